//! Visual synchronisation systems — keep sprite entities in sync with game state.

use bevy::prelude::*;
use crate::shared::*;
use super::FarmingAtlases;
use std::collections::HashMap;

// Ground at z=1, crops at z=2, drops on top.
const GROUND_Z: f32 = 1.0;
const CROP_Z: f32 = 2.0;
const DROP_Z: f32 = 3.0;

#[derive(Component, Debug, Clone)]
pub struct GroundTileEntity {
    pub tile: IVec2,
}

#[derive(Component, Debug, Clone)]
pub struct CropTileEntity {
    pub tile: IVec2,
}

#[derive(Component, Debug, Clone)]
pub struct DropEntity {
    pub id: u64,
}

/// Tracks which playfield entities exist, so systems can find the entity
/// for a given tile or drop quickly.
#[derive(Resource, Default, Debug)]
pub struct FarmEntities {
    pub ground: HashMap<IVec2, Entity>,
    pub crops: HashMap<IVec2, Entity>,
    pub drops: HashMap<u64, Entity>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Ground
// ─────────────────────────────────────────────────────────────────────────────

/// Lay the ground tile under every field cell. Fields never change shape,
/// so this only does work the first frame the sheets are ready.
pub fn sync_ground_tiles(
    mut commands: Commands,
    mut farm_entities: ResMut<FarmEntities>,
    farm_state: Res<FarmState>,
    atlases: Res<FarmingAtlases>,
    settings: Res<GameSettings>,
) {
    let Some(sprite) = atlases.sprite(SpriteKey::Ground, settings.tile_size) else {
        return;
    };

    for field in &farm_state.fields {
        for (tile, _) in field.tiles() {
            if farm_entities.ground.contains_key(&tile) {
                continue;
            }
            let entity = commands
                .spawn((
                    sprite.clone(),
                    Transform::from_translation(settings.tile_to_world(tile, GROUND_Z)),
                    GroundTileEntity { tile },
                ))
                .id();
            farm_entities.ground.insert(tile, entity);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Crops
// ─────────────────────────────────────────────────────────────────────────────

/// Point every crop sprite at its current stage frame, spawn sprites for new
/// crops and despawn sprites for harvested ones.
pub fn sync_crop_sprites(
    mut commands: Commands,
    mut farm_entities: ResMut<FarmEntities>,
    farm_state: Res<FarmState>,
    atlases: Res<FarmingAtlases>,
    settings: Res<GameSettings>,
    mut crop_query: Query<(&CropTileEntity, &mut Sprite)>,
) {
    let Some(table) = atlases.sprites else {
        return;
    };

    // Update frames on existing entities.
    for (crop, mut sprite) in crop_query.iter_mut() {
        let Some(stage) = farm_state.cell(crop.tile).and_then(Cell::stage) else {
            continue;
        };
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            let index = table.index(stage.sprite());
            if atlas.index != index {
                atlas.index = index;
            }
        }
    }

    // Spawn entities for crops that don't have one yet.
    let missing: Vec<(IVec2, GrowthStage)> = farm_state
        .fields
        .iter()
        .flat_map(|f| f.tiles())
        .filter_map(|(tile, cell)| cell.stage().map(|stage| (tile, stage)))
        .filter(|(tile, _)| !farm_entities.crops.contains_key(tile))
        .collect();

    for (tile, stage) in missing {
        let Some(sprite) = atlases.sprite(stage.sprite(), settings.tile_size) else {
            continue;
        };
        let entity = commands
            .spawn((
                sprite,
                Transform::from_translation(settings.tile_to_world(tile, CROP_Z)),
                CropTileEntity { tile },
            ))
            .id();
        farm_entities.crops.insert(tile, entity);
    }

    // Despawn crop entities whose cells were emptied.
    let stale: Vec<IVec2> = farm_entities
        .crops
        .keys()
        .filter(|tile| farm_state.cell(**tile).map_or(true, Cell::is_empty))
        .copied()
        .collect();

    for tile in stale {
        if let Some(entity) = farm_entities.crops.remove(&tile) {
            commands.entity(entity).despawn();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Drops
// ─────────────────────────────────────────────────────────────────────────────

pub fn sync_drop_sprites(
    mut commands: Commands,
    mut farm_entities: ResMut<FarmEntities>,
    drops: Res<DropList>,
    atlases: Res<FarmingAtlases>,
    settings: Res<GameSettings>,
) {
    if !atlases.ready() {
        return;
    }

    for drop in &drops.items {
        if farm_entities.drops.contains_key(&drop.id) {
            continue;
        }
        let Some(sprite) = atlases.sprite(drop.sprite, settings.tile_size) else {
            continue;
        };
        let entity = commands
            .spawn((
                sprite,
                Transform::from_translation(settings.tile_to_world(drop.tile, DROP_Z)),
                DropEntity { id: drop.id },
            ))
            .id();
        farm_entities.drops.insert(drop.id, entity);
    }

    let stale: Vec<u64> = farm_entities
        .drops
        .keys()
        .filter(|id| !drops.items.iter().any(|d| d.id == **id))
        .copied()
        .collect();

    for id in stale {
        if let Some(entity) = farm_entities.drops.remove(&id) {
            commands.entity(entity).despawn();
        }
    }
}

/// Remove every playfield sprite when leaving the Playing screen. The sync
/// systems rebuild them from state on the way back in.
pub fn despawn_playfield(mut commands: Commands, mut farm_entities: ResMut<FarmEntities>) {
    let farm_entities = &mut *farm_entities;
    let entities = farm_entities
        .ground
        .drain()
        .map(|(_, e)| e)
        .chain(farm_entities.crops.drain().map(|(_, e)| e))
        .chain(farm_entities.drops.drain().map(|(_, e)| e))
        .collect::<Vec<_>>();
    for entity in entities {
        commands.entity(entity).despawn();
    }
}
