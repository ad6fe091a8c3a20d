//! Crop planting and time-driven growth.

use bevy::prelude::*;
use crate::shared::*;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Growth rule
// ─────────────────────────────────────────────────────────────────────────────

/// Stage of a crop that has been in the ground for `elapsed`.
/// Thresholds count from planting, not from the last stage change.
pub fn stage_for_elapsed(elapsed: Duration, settings: &GameSettings) -> GrowthStage {
    if elapsed >= settings.growing_to_mature {
        GrowthStage::Mature
    } else if elapsed >= settings.sprout_to_growing {
        GrowthStage::Growing
    } else {
        GrowthStage::Sprout
    }
}

/// Recompute every planted cell's stage from its plant time.
///
/// Stages are derived from `now - since` rather than stepped, so calling this
/// any number of times at any cadence gives the same answer. Returns the
/// number of cells whose stage changed.
pub fn advance_growth(farm_state: &mut FarmState, now: Duration, settings: &GameSettings) -> usize {
    let mut changed = 0;
    for field in &mut farm_state.fields {
        for cell in field.cells_mut() {
            if let Cell::Planted { since, stage } = cell {
                let next = stage_for_elapsed(now.saturating_sub(*since), settings);
                if next != *stage {
                    *stage = next;
                    changed += 1;
                }
            }
        }
    }
    changed
}

// ─────────────────────────────────────────────────────────────────────────────
// Planting
// ─────────────────────────────────────────────────────────────────────────────

/// Plant a sprout at `tile` if it lies in a field and the cell is empty.
/// Returns true if something was planted.
pub fn plant_at(farm_state: &mut FarmState, tile: IVec2, now: Duration) -> bool {
    let Some(cell) = farm_state.field_at_mut(tile).and_then(|f| f.cell_mut(tile)) else {
        return false;
    };
    if !cell.is_empty() {
        return false;
    }
    *cell = Cell::Planted {
        since: now,
        stage: GrowthStage::Sprout,
    };
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_plant_attempts(
    mut plant_events: EventReader<PlantAttemptEvent>,
    mut farm_state: ResMut<FarmState>,
    clock: Res<GrowthClock>,
) {
    for event in plant_events.read() {
        if plant_at(&mut farm_state, event.tile, clock.now) {
            info!("[Farm] Planted at ({}, {})", event.tile.x, event.tile.y);
        } else {
            debug!("[Farm] Nothing to plant at ({}, {})", event.tile.x, event.tile.y);
        }
    }
}

pub fn update_growth(
    mut farm_state: ResMut<FarmState>,
    clock: Res<GrowthClock>,
    settings: Res<GameSettings>,
) {
    let changed = advance_growth(&mut farm_state, clock.now, &settings);
    if changed > 0 {
        debug!("[Farm] {} crop(s) changed stage", changed);
    }
}
