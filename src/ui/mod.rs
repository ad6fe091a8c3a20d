pub mod hud;
pub mod input;
pub mod main_menu;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // ─── MAIN MENU ───
        app.add_systems(OnEnter(GameState::Menu), main_menu::spawn_main_menu);
        app.add_systems(OnExit(GameState::Menu), main_menu::despawn_main_menu);
        app.add_systems(
            Update,
            (
                main_menu::menu_hover_selection,
                main_menu::update_menu_cursor_icon,
                main_menu::main_menu_navigation,
                main_menu::menu_button_actions,
                main_menu::update_main_menu_visuals,
            )
                .chain()
                .run_if(in_state(GameState::Menu)),
        );

        // ─── HUD — visible during Playing state ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(OnExit(GameState::Playing), hud::despawn_hud);
        app.add_systems(
            Update,
            hud::update_plant_toggle.run_if(in_state(GameState::Playing)),
        );

        // ─── GLOBAL INPUT ───
        app.add_systems(
            Update,
            input::global_input_handler.run_if(in_state(GameState::Playing)),
        );
    }
}
