use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct MainMenuRoot;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Start,
    Quit,
}

impl MenuButton {
    pub fn index(self) -> usize {
        MAIN_MENU_OPTIONS
            .iter()
            .position(|(button, _)| *button == self)
            .unwrap_or(0)
    }
}

/// Tracks main menu selection, from either the mouse or the arrow keys.
#[derive(Resource)]
pub struct MainMenuState {
    pub cursor: usize,
}

const MAIN_MENU_OPTIONS: &[(MenuButton, &str)] = &[
    (MenuButton::Start, "Start"),
    (MenuButton::Quit, "Quit"),
];

const MENU_BACKGROUND: Color = Color::srgb(30.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0);
const BUTTON_COLOR: Color = Color::srgb(70.0 / 255.0, 130.0 / 255.0, 180.0 / 255.0);
const BUTTON_HOVER_COLOR: Color = Color::srgb(100.0 / 255.0, 180.0 / 255.0, 1.0);

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_main_menu(mut commands: Commands) {
    commands.insert_resource(MainMenuState { cursor: 0 });

    commands
        .spawn((
            MainMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(40.0),
                ..default()
            },
            BackgroundColor(MENU_BACKGROUND),
        ))
        .with_children(|menu| {
            for (button, label) in MAIN_MENU_OPTIONS {
                menu.spawn((
                    Button,
                    *button,
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(60.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BorderRadius::all(Val::Px(10.0)),
                    BackgroundColor(BUTTON_COLOR),
                ))
                .with_children(|item| {
                    item.spawn((
                        Text::new(*label),
                        TextFont {
                            font_size: 28.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
            }
        });
}

pub fn despawn_main_menu(
    mut commands: Commands,
    query: Query<Entity, With<MainMenuRoot>>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<MainMenuState>();

    if let Ok(window) = windows.get_single() {
        commands
            .entity(window)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE / INTERACTION
// ═══════════════════════════════════════════════════════════════════════

/// Hovering a button selects it, so mouse and keyboard share one highlight.
pub fn menu_hover_selection(
    mut state: Option<ResMut<MainMenuState>>,
    query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
) {
    let Some(ref mut state) = state else { return };
    for (interaction, button) in &query {
        if matches!(interaction, Interaction::Hovered | Interaction::Pressed) {
            state.cursor = button.index();
        }
    }
}

pub fn update_main_menu_visuals(
    state: Option<Res<MainMenuState>>,
    mut query: Query<(&MenuButton, &mut BackgroundColor)>,
) {
    let Some(state) = state else { return };
    for (button, mut background) in &mut query {
        let color = if button.index() == state.cursor {
            BUTTON_HOVER_COLOR
        } else {
            BUTTON_COLOR
        };
        if background.0 != color {
            background.0 = color;
        }
    }
}

/// Pointer cursor while the mouse is over any menu button.
pub fn update_menu_cursor_icon(
    mut commands: Commands,
    windows: Query<Entity, With<PrimaryWindow>>,
    buttons: Query<&Interaction, With<MenuButton>>,
    changed: Query<(), (Changed<Interaction>, With<MenuButton>)>,
) {
    if changed.is_empty() {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let over_button = buttons.iter().any(|i| *i != Interaction::None);
    let icon = if over_button {
        SystemCursorIcon::Pointer
    } else {
        SystemCursorIcon::Default
    };
    commands.entity(window).insert(CursorIcon::System(icon));
}

pub fn menu_button_actions(
    query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut app_exit: EventWriter<AppExit>,
) {
    for (interaction, button) in &query {
        if *interaction == Interaction::Pressed {
            activate(*button, &mut next_state, &mut app_exit);
        }
    }
}

pub fn main_menu_navigation(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: Option<ResMut<MainMenuState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut app_exit: EventWriter<AppExit>,
) {
    let Some(ref mut state) = state else { return };

    if keyboard.just_pressed(KeyCode::ArrowDown) && state.cursor < MAIN_MENU_OPTIONS.len() - 1 {
        state.cursor += 1;
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) && state.cursor > 0 {
        state.cursor -= 1;
    }

    if keyboard.just_pressed(KeyCode::Enter) {
        if let Some((button, _)) = MAIN_MENU_OPTIONS.get(state.cursor) {
            activate(*button, &mut next_state, &mut app_exit);
        }
    }
}

fn activate(
    button: MenuButton,
    next_state: &mut NextState<GameState>,
    app_exit: &mut EventWriter<AppExit>,
) {
    match button {
        MenuButton::Start => {
            info!("[UI] Starting game");
            next_state.set(GameState::Playing);
        }
        MenuButton::Quit => {
            info!("[UI] Quit selected");
            app_exit.send(AppExit::Success);
        }
    }
}
