use bevy::prelude::*;
use crate::shared::*;

/// Escape leaves the playfield for the main menu. Farm state is kept.
pub fn global_input_handler(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if *current_state.get() == GameState::Playing && keyboard.just_pressed(KeyCode::Escape) {
        info!("[UI] Returning to menu");
        next_state.set(GameState::Menu);
    }
}
