//! Data layer — builds the farm from the embedded field layout at startup.
//!
//! Runs once in `Startup`, before the first frame. A broken layout is a
//! startup error: it is logged and the app exits.

pub mod fields;

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_field_layout);
    }
}

fn load_field_layout(
    settings: Res<GameSettings>,
    mut farm_state: ResMut<FarmState>,
    mut app_exit: EventWriter<AppExit>,
) {
    info!("[Data] Loading field layout…");

    let defs = match fields::parse_field_layout(fields::FIELD_LAYOUT) {
        Ok(defs) => defs,
        Err(e) => {
            error!("[Data] {}", e);
            app_exit.send(AppExit::error());
            return;
        }
    };

    for i in fields::fields_outside_screen(&defs, &settings) {
        warn!(
            "[Data] Field #{} at ({}, {}) extends past the visible grid",
            i, defs[i].x, defs[i].y
        );
    }

    *farm_state = FarmState::from_defs(&defs);
    info!("[Data] Fields loaded: {}", farm_state.fields.len());
}
