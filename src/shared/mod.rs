//! Shared components, resources, events, and states for Butterfly's Garden.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::Deserialize;
use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
}

/// When true, a playfield click plants; otherwise it harvests.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlantMode(pub bool);

// ═══════════════════════════════════════════════════════════════════════
// CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// Monotonic time since startup. Every plant and drop timestamp is read
/// from here, never from the wall clock.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GrowthClock {
    pub now: Duration,
}

// ═══════════════════════════════════════════════════════════════════════
// FIELDS & CELLS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrowthStage {
    Sprout,
    Growing,
    Mature,
}

impl GrowthStage {
    /// Stage number as drawn on the plant sheet (0 is reserved for empty).
    pub fn number(self) -> u8 {
        match self {
            GrowthStage::Sprout => 1,
            GrowthStage::Growing => 2,
            GrowthStage::Mature => 3,
        }
    }

    pub fn sprite(self) -> SpriteKey {
        match self {
            GrowthStage::Sprout => SpriteKey::Sprout,
            GrowthStage::Growing => SpriteKey::Growing,
            GrowthStage::Mature => SpriteKey::Mature,
        }
    }
}

/// A single plantable tile. The plant timestamp only exists on planted cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Planted { since: Duration, stage: GrowthStage },
}

impl Cell {
    pub fn stage(&self) -> Option<GrowthStage> {
        match self {
            Cell::Empty => None,
            Cell::Planted { stage, .. } => Some(*stage),
        }
    }

    pub fn planted_at(&self) -> Option<Duration> {
        match self {
            Cell::Empty => None,
            Cell::Planted { since, .. } => Some(*since),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Declarative description of one field, as written in the layout file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FieldDef {
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_field_width")]
    pub w: u32,
    #[serde(default = "default_field_height")]
    pub h: u32,
}

fn default_field_width() -> u32 {
    DEFAULT_FIELD_WIDTH
}

fn default_field_height() -> u32 {
    DEFAULT_FIELD_HEIGHT
}

/// A rectangular plot of cells, positioned in tile units.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub origin: IVec2,
    pub size: UVec2,
    /// Row-major, `size.x * size.y` long.
    cells: Vec<Cell>,
}

impl Field {
    pub fn new(origin: IVec2, size: UVec2) -> Self {
        Self {
            origin,
            size,
            cells: vec![Cell::Empty; (size.x * size.y) as usize],
        }
    }

    pub fn from_def(def: &FieldDef) -> Self {
        Self::new(IVec2::new(def.x, def.y), UVec2::new(def.w, def.h))
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        let end = self.origin + self.size.as_ivec2();
        tile.x >= self.origin.x && tile.x < end.x && tile.y >= self.origin.y && tile.y < end.y
    }

    fn index_of(&self, tile: IVec2) -> Option<usize> {
        if !self.contains(tile) {
            return None;
        }
        let local = (tile - self.origin).as_uvec2();
        Some((local.y * self.size.x + local.x) as usize)
    }

    /// Cell at an absolute tile position.
    pub fn cell(&self, tile: IVec2) -> Option<&Cell> {
        self.index_of(tile).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, tile: IVec2) -> Option<&mut Cell> {
        self.index_of(tile).map(|i| &mut self.cells[i])
    }

    /// Every cell paired with its absolute tile position.
    pub fn tiles(&self) -> impl Iterator<Item = (IVec2, &Cell)> + '_ {
        let width = self.size.x;
        let origin = self.origin;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let i = i as u32;
            (origin + UVec2::new(i % width, i / width).as_ivec2(), cell)
        })
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.iter_mut()
    }

    pub fn overlaps(&self, other: &Field) -> bool {
        let a_end = self.origin + self.size.as_ivec2();
        let b_end = other.origin + other.size.as_ivec2();
        self.origin.x < b_end.x
            && other.origin.x < a_end.x
            && self.origin.y < b_end.y
            && other.origin.y < a_end.y
    }
}

/// Every field on the farm. Filled once at startup from the layout.
#[derive(Resource, Debug, Clone, Default)]
pub struct FarmState {
    pub fields: Vec<Field>,
}

impl FarmState {
    pub fn from_defs(defs: &[FieldDef]) -> Self {
        Self {
            fields: defs.iter().map(Field::from_def).collect(),
        }
    }

    /// First field whose rectangle contains `tile`.
    pub fn field_at(&self, tile: IVec2) -> Option<&Field> {
        self.fields.iter().find(|f| f.contains(tile))
    }

    pub fn field_at_mut(&mut self, tile: IVec2) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.contains(tile))
    }

    pub fn cell(&self, tile: IVec2) -> Option<&Cell> {
        self.field_at(tile).and_then(|f| f.cell(tile))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DROPS
// ═══════════════════════════════════════════════════════════════════════

/// A harvested item lying on the ground until it expires.
#[derive(Debug, Clone, PartialEq)]
pub struct DropItem {
    pub id: u64,
    pub tile: IVec2,
    pub sprite: SpriteKey,
    pub spawned_at: Duration,
    pub lifetime: Duration,
}

impl DropItem {
    pub fn is_alive(&self, now: Duration) -> bool {
        now.saturating_sub(self.spawned_at) < self.lifetime
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DropList {
    pub items: Vec<DropItem>,
    pub next_id: u64,
}

// ═══════════════════════════════════════════════════════════════════════
// SPRITES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteSheet {
    Ground,
    Plants,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Ground,
    Sprout,
    Growing,
    Mature,
    Drop,
}

impl SpriteKey {
    pub const ALL: [SpriteKey; 5] = [
        SpriteKey::Ground,
        SpriteKey::Sprout,
        SpriteKey::Growing,
        SpriteKey::Mature,
        SpriteKey::Drop,
    ];

    pub fn sheet(self) -> SpriteSheet {
        match self {
            SpriteKey::Ground => SpriteSheet::Ground,
            _ => SpriteSheet::Plants,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Left click on the playfield, in window pixels (origin top-left).
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayfieldClickEvent {
    pub pos: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PlantAttemptEvent {
    pub tile: IVec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct HarvestAttemptEvent {
    pub tile: IVec2,
}

/// A mature plant was picked at `tile`.
#[derive(Event, Debug, Clone, Copy)]
pub struct CropHarvestedEvent {
    pub tile: IVec2,
}

// ═══════════════════════════════════════════════════════════════════════
// SETTINGS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct GameSettings {
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: f64,
    /// On-screen tile size in pixels.
    pub tile_size: f32,
    pub sprout_to_growing: Duration,
    pub growing_to_mature: Duration,
    pub drop_lifetime: Duration,
    /// Plant-mode toggle, in window pixels (origin top-left).
    pub plant_button: Rect,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: TARGET_FPS,
            tile_size: TILE_SIZE,
            sprout_to_growing: SPROUT_TO_GROWING,
            growing_to_mature: GROWING_TO_MATURE,
            drop_lifetime: DROP_LIFETIME,
            plant_button: Rect::new(10.0, 10.0, 65.0, 30.0),
        }
    }
}

impl GameSettings {
    /// Tile under a window-space pixel position.
    pub fn pixel_to_tile(&self, pos: Vec2) -> IVec2 {
        (pos / self.tile_size).floor().as_ivec2()
    }

    /// World-space centre of a tile for a camera centred on the window.
    pub fn tile_to_world(&self, tile: IVec2, z: f32) -> Vec3 {
        let half = self.tile_size / 2.0;
        Vec3::new(
            tile.x as f32 * self.tile_size + half - self.screen_width / 2.0,
            self.screen_height / 2.0 - (tile.y as f32 * self.tile_size + half),
            z,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 608.0;
pub const SCREEN_HEIGHT: f32 = 416.0;
pub const TARGET_FPS: f64 = 60.0;

pub const SOURCE_TILE_SIZE: u32 = 16;
pub const SPRITE_SCALE: u32 = 2;
pub const TILE_SIZE: f32 = (SOURCE_TILE_SIZE * SPRITE_SCALE) as f32; // 32px on screen

pub const DEFAULT_FIELD_WIDTH: u32 = 5;
pub const DEFAULT_FIELD_HEIGHT: u32 = 3;

pub const SPROUT_TO_GROWING: Duration = Duration::from_secs(5);
pub const GROWING_TO_MATURE: Duration = Duration::from_secs(10);
pub const DROP_LIFETIME: Duration = Duration::from_secs(2);

pub const GROUND_SHEET_PATH: &str = "misc.png";
pub const PLANT_SHEET_PATH: &str = "plant.png";
