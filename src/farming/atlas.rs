//! Sprite sheet loading and the stage → sprite lookup table.

use bevy::asset::LoadState;
use bevy::prelude::*;
use crate::shared::*;

/// Which tile of which sheet each sprite key draws.
///
/// Ground comes from the ground sheet; everything else from the plant sheet,
/// where the growth frames sit six tiles past their stage number.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteTable {
    pub ground: usize,
    pub sprout: usize,
    pub growing: usize,
    pub mature: usize,
    pub drop: usize,
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self {
            ground: 1,
            sprout: 7,
            growing: 8,
            mature: 9,
            drop: 5,
        }
    }
}

impl SpriteTable {
    pub fn index(&self, key: SpriteKey) -> usize {
        match key {
            SpriteKey::Ground => self.ground,
            SpriteKey::Sprout => self.sprout,
            SpriteKey::Growing => self.growing,
            SpriteKey::Mature => self.mature,
            SpriteKey::Drop => self.drop,
        }
    }

    fn index_mut(&mut self, key: SpriteKey) -> &mut usize {
        match key {
            SpriteKey::Ground => &mut self.ground,
            SpriteKey::Sprout => &mut self.sprout,
            SpriteKey::Growing => &mut self.growing,
            SpriteKey::Mature => &mut self.mature,
            SpriteKey::Drop => &mut self.drop,
        }
    }

    /// Fit the table to the real tile counts of the loaded sheets.
    ///
    /// Indices past the end of a sheet are clamped to its last tile; the
    /// clamped keys are returned alongside the fitted table. A sheet with no
    /// tiles at all cannot be drawn from and is an error.
    pub fn resolve(
        &self,
        ground_tiles: usize,
        plant_tiles: usize,
    ) -> Result<(SpriteTable, Vec<SpriteKey>), String> {
        if ground_tiles == 0 {
            return Err(format!("Ground sheet '{}' holds no tiles", GROUND_SHEET_PATH));
        }
        if plant_tiles == 0 {
            return Err(format!("Plant sheet '{}' holds no tiles", PLANT_SHEET_PATH));
        }

        let mut fitted = *self;
        let mut clamped = Vec::new();
        for key in SpriteKey::ALL {
            let len = match key.sheet() {
                SpriteSheet::Ground => ground_tiles,
                SpriteSheet::Plants => plant_tiles,
            };
            let index = fitted.index_mut(key);
            if *index >= len {
                *index = len - 1;
                clamped.push(key);
            }
        }
        Ok((fitted, clamped))
    }
}

/// Texture atlas handles for the two sprite sheets.
/// `sprites` is filled once both images are loaded and the table is fitted;
/// render systems draw nothing until then.
#[derive(Resource, Default)]
pub struct FarmingAtlases {
    pub ground_image: Handle<Image>,
    pub ground_layout: Handle<TextureAtlasLayout>,
    pub plants_image: Handle<Image>,
    pub plants_layout: Handle<TextureAtlasLayout>,
    pub sprites: Option<SpriteTable>,
    pub failed: bool,
}

impl FarmingAtlases {
    pub fn ready(&self) -> bool {
        self.sprites.is_some()
    }

    /// A tile-sized sprite for `key`, or `None` while sheets are loading.
    pub fn sprite(&self, key: SpriteKey, tile_size: f32) -> Option<Sprite> {
        let table = self.sprites?;
        let (image, layout) = match key.sheet() {
            SpriteSheet::Ground => (&self.ground_image, &self.ground_layout),
            SpriteSheet::Plants => (&self.plants_image, &self.plants_layout),
        };
        Some(Sprite {
            image: image.clone(),
            texture_atlas: Some(TextureAtlas {
                layout: layout.clone(),
                index: table.index(key),
            }),
            custom_size: Some(Vec2::splat(tile_size)),
            ..default()
        })
    }
}

/// Columns × rows of source tiles in an image of the given pixel size.
pub fn sheet_grid(size: UVec2) -> UVec2 {
    size / SOURCE_TILE_SIZE
}

/// Run condition: loading finished one way or the other.
pub fn atlases_settled(atlases: Res<FarmingAtlases>) -> bool {
    atlases.ready() || atlases.failed
}

pub fn start_loading_atlases(asset_server: Res<AssetServer>, mut atlases: ResMut<FarmingAtlases>) {
    atlases.ground_image = asset_server.load(GROUND_SHEET_PATH);
    atlases.plants_image = asset_server.load(PLANT_SHEET_PATH);
}

/// Polls both sheets. On success builds the atlas layouts from the real image
/// sizes and fits the sprite table; any failure is fatal.
pub fn finish_loading_atlases(
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    table: Res<SpriteTable>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut atlases: ResMut<FarmingAtlases>,
    mut app_exit: EventWriter<AppExit>,
) {
    let failure = [
        (GROUND_SHEET_PATH, &atlases.ground_image),
        (PLANT_SHEET_PATH, &atlases.plants_image),
    ]
    .into_iter()
    .find_map(|(path, handle)| match asset_server.load_state(handle.id()) {
        LoadState::Failed(err) => Some(format!("Could not load sprite sheet '{}': {}", path, err)),
        _ => None,
    });
    if let Some(message) = failure {
        error!("[Farm] {}", message);
        atlases.failed = true;
        app_exit.send(AppExit::error());
        return;
    }

    let (Some(ground), Some(plants)) = (
        images.get(&atlases.ground_image),
        images.get(&atlases.plants_image),
    ) else {
        return;
    };
    let ground_grid = sheet_grid(ground.size());
    let plant_grid = sheet_grid(plants.size());

    let (fitted, clamped) = match table.resolve(
        (ground_grid.x * ground_grid.y) as usize,
        (plant_grid.x * plant_grid.y) as usize,
    ) {
        Ok(resolved) => resolved,
        Err(e) => {
            error!("[Farm] {}", e);
            atlases.failed = true;
            app_exit.send(AppExit::error());
            return;
        }
    };
    for key in clamped {
        warn!(
            "[Farm] Sprite {:?} index {} is past the end of its sheet; using tile {}",
            key,
            table.index(key),
            fitted.index(key)
        );
    }

    atlases.ground_layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::splat(SOURCE_TILE_SIZE),
        ground_grid.x,
        ground_grid.y,
        None,
        None,
    ));
    atlases.plants_layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::splat(SOURCE_TILE_SIZE),
        plant_grid.x,
        plant_grid.y,
        None,
        None,
    ));
    atlases.sprites = Some(fitted);

    info!(
        "[Farm] Sprite sheets ready: ground {}x{}, plants {}x{}",
        ground_grid.x, ground_grid.y, plant_grid.x, plant_grid.y
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_follows_stage_offset() {
        let table = SpriteTable::default();
        for stage in [GrowthStage::Sprout, GrowthStage::Growing, GrowthStage::Mature] {
            assert_eq!(table.index(stage.sprite()), stage.number() as usize + 6);
        }
        assert_eq!(table.index(SpriteKey::Drop), 5);
        assert_eq!(table.index(SpriteKey::Ground), 1);
    }

    #[test]
    fn large_sheets_keep_every_index() {
        let (fitted, clamped) = SpriteTable::default().resolve(16, 24).unwrap();
        assert_eq!(fitted, SpriteTable::default());
        assert!(clamped.is_empty());
    }

    #[test]
    fn short_plant_sheet_clamps_to_last_tile() {
        let (fitted, clamped) = SpriteTable::default().resolve(4, 8).unwrap();
        assert_eq!(fitted.sprout, 7);
        assert_eq!(fitted.growing, 7);
        assert_eq!(fitted.mature, 7);
        assert_eq!(fitted.drop, 5);
        assert_eq!(clamped, vec![SpriteKey::Growing, SpriteKey::Mature]);
    }

    #[test]
    fn ground_index_is_checked_against_ground_sheet() {
        let (fitted, clamped) = SpriteTable::default().resolve(1, 12).unwrap();
        assert_eq!(fitted.ground, 0);
        assert_eq!(clamped, vec![SpriteKey::Ground]);
    }

    #[test]
    fn empty_sheet_is_an_error() {
        assert!(SpriteTable::default().resolve(0, 12).is_err());
        assert!(SpriteTable::default().resolve(4, 0).is_err());
    }

    #[test]
    fn sheet_grid_counts_source_tiles() {
        assert_eq!(sheet_grid(UVec2::new(96, 32)), UVec2::new(6, 2));
        // Partial tiles at the edge are dropped.
        assert_eq!(sheet_grid(UVec2::new(40, 17)), UVec2::new(2, 1));
    }
}
