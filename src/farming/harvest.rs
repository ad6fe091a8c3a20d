//! Harvest system — the player picks mature crops.

use bevy::prelude::*;
use crate::shared::*;

/// Clear the cell at `tile` if it holds a mature crop.
/// Returns true if a harvest occurred.
pub fn harvest_at(farm_state: &mut FarmState, tile: IVec2) -> bool {
    let Some(cell) = farm_state.field_at_mut(tile).and_then(|f| f.cell_mut(tile)) else {
        return false;
    };
    if cell.stage() != Some(GrowthStage::Mature) {
        return false; // Not ready.
    }
    *cell = Cell::Empty;
    true
}

pub fn handle_harvest_attempts(
    mut harvest_events: EventReader<HarvestAttemptEvent>,
    mut farm_state: ResMut<FarmState>,
    mut crop_harvested_events: EventWriter<CropHarvestedEvent>,
) {
    for event in harvest_events.read() {
        if harvest_at(&mut farm_state, event.tile) {
            info!("[Farm] Harvested at ({}, {})", event.tile.x, event.tile.y);
            crop_harvested_events.send(CropHarvestedEvent { tile: event.tile });
        } else {
            debug!("[Farm] Nothing to harvest at ({}, {})", event.tile.x, event.tile.y);
        }
    }
}
