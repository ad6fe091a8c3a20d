use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use butterfly_garden::shared::*;
use butterfly_garden::{data, farming, input, ui};

fn main() {
    let settings = GameSettings::default();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Butterfly's Garden".into(),
                        resolution: WindowResolution::new(settings.screen_width, settings.screen_height),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Fixed simulation rate
        .insert_resource(Time::<Fixed>::from_hz(settings.fps))
        .insert_resource(ClearColor(Color::srgb_u8(20, 100, 40)))
        .insert_resource(settings)
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<FarmState>()
        .init_resource::<DropList>()
        .init_resource::<PlantMode>()
        // Events
        .add_event::<PlayfieldClickEvent>()
        .add_event::<PlantAttemptEvent>()
        .add_event::<HarvestAttemptEvent>()
        .add_event::<CropHarvestedEvent>()
        // Domain plugins
        .add_plugins(data::DataPlugin)
        .add_plugins(farming::FarmingPlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
