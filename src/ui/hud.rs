use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS — used to query and update HUD elements
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

/// The plant-mode toggle. Clicks on it are resolved by position in the input
/// domain, so this is only a visual.
#[derive(Component)]
pub struct PlantToggleButton;

#[derive(Component)]
pub struct PlantToggleText;

/// Background colour and label for the toggle in the given mode.
pub fn plant_toggle_style(mode: PlantMode) -> (Color, &'static str) {
    if mode.0 {
        (Color::srgb_u8(125, 35, 35), "Stop")
    } else {
        (Color::srgb_u8(34, 139, 34), "Plant")
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands, settings: Res<GameSettings>, plant_mode: Res<PlantMode>) {
    let rect = settings.plant_button;
    let (color, label) = plant_toggle_style(*plant_mode);

    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((
                PlantToggleButton,
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(rect.min.x),
                    top: Val::Px(rect.min.y),
                    width: Val::Px(rect.width()),
                    height: Val::Px(rect.height()),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BorderRadius::all(Val::Px(8.0)),
                BackgroundColor(color),
            ))
            .with_children(|button| {
                button.spawn((
                    PlantToggleText,
                    Text::new(label),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn update_plant_toggle(
    plant_mode: Res<PlantMode>,
    mut buttons: Query<&mut BackgroundColor, With<PlantToggleButton>>,
    mut texts: Query<&mut Text, With<PlantToggleText>>,
) {
    if !plant_mode.is_changed() {
        return;
    }
    let (color, label) = plant_toggle_style(*plant_mode);
    for mut background in &mut buttons {
        background.0 = color;
    }
    for mut text in &mut texts {
        text.0 = label.to_string();
    }
}
