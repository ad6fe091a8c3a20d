//! Turns raw mouse input on the playfield into farm commands.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (detect_playfield_clicks, dispatch_playfield_clicks)
                .chain()
                .before(crate::farming::crops::handle_plant_attempts)
                .before(crate::farming::harvest::handle_harvest_attempts)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// What a left click on the playfield means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    TogglePlantMode,
    Plant(IVec2),
    Harvest(IVec2),
}

/// The toggle button takes the click first; otherwise plant mode decides.
pub fn resolve_click(pos: Vec2, plant_mode: PlantMode, settings: &GameSettings) -> ClickAction {
    if settings.plant_button.contains(pos) {
        return ClickAction::TogglePlantMode;
    }
    let tile = settings.pixel_to_tile(pos);
    if plant_mode.0 {
        ClickAction::Plant(tile)
    } else {
        ClickAction::Harvest(tile)
    }
}

/// The single point where a hardware click becomes a `PlayfieldClickEvent`.
fn detect_playfield_clicks(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut clicks: EventWriter<PlayfieldClickEvent>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    if let Some(pos) = window.cursor_position() {
        clicks.send(PlayfieldClickEvent { pos });
    }
}

pub fn dispatch_playfield_clicks(
    mut clicks: EventReader<PlayfieldClickEvent>,
    settings: Res<GameSettings>,
    mut plant_mode: ResMut<PlantMode>,
    mut plant_events: EventWriter<PlantAttemptEvent>,
    mut harvest_events: EventWriter<HarvestAttemptEvent>,
) {
    for click in clicks.read() {
        match resolve_click(click.pos, *plant_mode, &settings) {
            ClickAction::TogglePlantMode => {
                plant_mode.0 = !plant_mode.0;
                info!("[Input] Plant mode {}", if plant_mode.0 { "on" } else { "off" });
            }
            ClickAction::Plant(tile) => {
                plant_events.send(PlantAttemptEvent { tile });
            }
            ClickAction::Harvest(tile) => {
                harvest_events.send(HarvestAttemptEvent { tile });
            }
        }
    }
}
