//! Headless integration tests for Butterfly's Garden.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering), and drive time through the
//! `GrowthClock` resource instead of the real clock.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use butterfly_garden::data::fields::{parse_field_layout, FIELD_LAYOUT};
use butterfly_garden::data::DataPlugin;
use butterfly_garden::farming::crops::{handle_plant_attempts, update_growth};
use butterfly_garden::farming::drops::{spawn_harvest_drops, sweep_expired_drops};
use butterfly_garden::farming::harvest::handle_harvest_attempts;
use butterfly_garden::input::dispatch_playfield_clicks;
use butterfly_garden::shared::*;
use butterfly_garden::ui::input::global_input_handler;
use butterfly_garden::ui::main_menu::{
    despawn_main_menu, menu_button_actions, spawn_main_menu, MainMenuRoot, MenuButton,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but NO rendering, windowing, or asset loading. Systems must be added
/// per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    let defs = parse_field_layout(FIELD_LAYOUT).expect("builtin layout parses");
    app.insert_resource(GameSettings::default())
        .insert_resource(FarmState::from_defs(&defs))
        .init_resource::<DropList>()
        .init_resource::<PlantMode>()
        .init_resource::<GrowthClock>()
        .init_resource::<ButtonInput<KeyCode>>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<PlayfieldClickEvent>()
        .add_event::<PlantAttemptEvent>()
        .add_event::<HarvestAttemptEvent>()
        .add_event::<CropHarvestedEvent>();

    app
}

/// Registers the click → command → state pipeline, in the same order the
/// game runs it, plus growth and drop expiry every frame.
fn add_farm_logic(app: &mut App) {
    app.add_systems(
        Update,
        (
            dispatch_playfield_clicks,
            handle_plant_attempts,
            handle_harvest_attempts,
            spawn_harvest_drops,
            update_growth,
            sweep_expired_drops,
        )
            .chain()
            .run_if(in_state(GameState::Playing)),
    );
}

fn add_menu(app: &mut App) {
    app.add_systems(OnEnter(GameState::Menu), spawn_main_menu);
    app.add_systems(OnExit(GameState::Menu), despawn_main_menu);
    app.add_systems(Update, menu_button_actions.run_if(in_state(GameState::Menu)));
}

fn current_state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

fn enter_playing_state(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update(); // process state transition
}

/// Marks a menu button as pressed, the way bevy_ui would on a mouse click.
fn press_menu_button(app: &mut App, which: MenuButton) {
    let mut buttons = app.world_mut().query::<(Entity, &MenuButton)>();
    let entity = buttons
        .iter(app.world())
        .find(|(_, button)| **button == which)
        .map(|(entity, _)| entity)
        .expect("menu button should exist");
    app.world_mut().entity_mut(entity).insert(Interaction::Pressed);
}

fn set_clock(app: &mut App, secs: f32) {
    app.world_mut().resource_mut::<GrowthClock>().now = Duration::from_secs_f32(secs);
}

/// Left click at the centre of `tile`.
fn click_tile(app: &mut App, tile: IVec2) {
    let tile_size = app.world().resource::<GameSettings>().tile_size;
    let pos = (tile.as_vec2() + Vec2::splat(0.5)) * tile_size;
    app.world_mut().send_event(PlayfieldClickEvent { pos });
    app.update();
}

fn click_plant_toggle(app: &mut App) {
    let pos = app.world().resource::<GameSettings>().plant_button.center();
    app.world_mut().send_event(PlayfieldClickEvent { pos });
    app.update();
}

fn cell(app: &App, tile: IVec2) -> Cell {
    *app.world()
        .resource::<FarmState>()
        .cell(tile)
        .expect("tile should be inside a field")
}

fn drop_count(app: &App) -> usize {
    app.world().resource::<DropList>().items.len()
}

fn all_cells_empty(app: &App) -> bool {
    app.world()
        .resource::<FarmState>()
        .fields
        .iter()
        .all(|f| f.tiles().all(|(_, c)| c.is_empty()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_data_plugin_builds_eight_fields_at_startup() {
    let mut app = build_test_app();
    app.insert_resource(FarmState::default());
    app.add_plugins(DataPlugin);

    app.update();

    let farm = app.world().resource::<FarmState>();
    assert_eq!(farm.fields.len(), 8, "Startup should build all eight fields");
    assert!(farm.fields.iter().all(|f| f.size == UVec2::new(5, 3)));
    assert!(app.should_exit().is_none(), "A valid layout must not exit the app");
}

#[test]
fn test_game_starts_in_menu() {
    let mut app = build_test_app();
    add_menu(&mut app);
    app.update();

    assert_eq!(current_state(&app), GameState::Menu);
    let mut roots = app.world_mut().query_filtered::<Entity, With<MainMenuRoot>>();
    assert_eq!(roots.iter(app.world()).count(), 1, "Menu should be spawned on boot");
}

// ─────────────────────────────────────────────────────────────────────────────
// Screen transitions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_start_button_enters_playing_and_removes_menu() {
    let mut app = build_test_app();
    add_menu(&mut app);
    app.update();

    press_menu_button(&mut app, MenuButton::Start);
    app.update(); // button sets NextState
    app.update(); // transition applies

    assert_eq!(current_state(&app), GameState::Playing);
    let mut roots = app.world_mut().query_filtered::<Entity, With<MainMenuRoot>>();
    assert_eq!(roots.iter(app.world()).count(), 0, "Menu should be despawned");
}

#[test]
fn test_quit_button_requests_exit() {
    let mut app = build_test_app();
    add_menu(&mut app);
    app.update();

    press_menu_button(&mut app, MenuButton::Quit);
    app.update();

    assert_eq!(app.should_exit(), Some(AppExit::Success));
    assert_eq!(current_state(&app), GameState::Menu);
}

#[test]
fn test_escape_returns_to_menu_and_keeps_the_farm() {
    let mut app = build_test_app();
    add_farm_logic(&mut app);
    app.add_systems(Update, global_input_handler);
    enter_playing_state(&mut app);

    set_clock(&mut app, 1.0);
    app.insert_resource(PlantMode(true));
    click_tile(&mut app, IVec2::new(8, 2));

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Escape);
    app.update();
    app.update();
    assert_eq!(current_state(&app), GameState::Menu);

    assert_eq!(
        cell(&app, IVec2::new(8, 2)),
        Cell::Planted { since: Duration::from_secs(1), stage: GrowthStage::Sprout },
        "Leaving the playfield must not clear planted cells"
    );
    assert!(app.world().resource::<PlantMode>().0, "Plant mode survives the menu");
}

// ─────────────────────────────────────────────────────────────────────────────
// Click dispatch
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_toggle_button_flips_plant_mode_without_touching_fields() {
    let mut app = build_test_app();
    add_farm_logic(&mut app);
    enter_playing_state(&mut app);

    click_plant_toggle(&mut app);
    assert!(app.world().resource::<PlantMode>().0);
    assert!(all_cells_empty(&app));

    click_plant_toggle(&mut app);
    assert!(!app.world().resource::<PlantMode>().0);
    assert!(all_cells_empty(&app));
}

#[test]
fn test_clicks_outside_fields_do_nothing() {
    let mut app = build_test_app();
    add_farm_logic(&mut app);
    enter_playing_state(&mut app);
    app.insert_resource(PlantMode(true));

    // Gaps between fields and the screen border.
    for tile in [IVec2::new(0, 0), IVec2::new(6, 2), IVec2::new(9, 6), IVec2::new(18, 12)] {
        click_tile(&mut app, tile);
    }
    assert!(all_cells_empty(&app));

    app.insert_resource(PlantMode(false));
    click_tile(&mut app, IVec2::new(9, 6));
    assert_eq!(drop_count(&app), 0);
}

#[test]
fn test_clicks_are_ignored_in_menu() {
    let mut app = build_test_app();
    add_farm_logic(&mut app);
    app.update();
    app.insert_resource(PlantMode(true));

    click_tile(&mut app, IVec2::new(2, 2));
    assert_eq!(current_state(&app), GameState::Menu);
    assert!(all_cells_empty(&app));
}

#[test]
fn test_harvest_click_on_unripe_crop_is_noop() {
    let mut app = build_test_app();
    add_farm_logic(&mut app);
    enter_playing_state(&mut app);

    let tile = IVec2::new(14, 6);
    set_clock(&mut app, 0.0);
    app.insert_resource(PlantMode(true));
    click_tile(&mut app, tile);

    set_clock(&mut app, 7.0);
    app.insert_resource(PlantMode(false));
    click_tile(&mut app, tile);

    assert_eq!(cell(&app, tile).stage(), Some(GrowthStage::Growing));
    assert_eq!(drop_count(&app), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Drops
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_drop_expires_after_two_seconds() {
    let mut app = build_test_app();
    add_farm_logic(&mut app);
    enter_playing_state(&mut app);

    let tile = IVec2::new(3, 10);
    app.insert_resource(PlantMode(true));
    click_tile(&mut app, tile);
    set_clock(&mut app, 10.0);
    app.update();

    app.insert_resource(PlantMode(false));
    click_tile(&mut app, tile);
    assert_eq!(drop_count(&app), 1);
    assert_eq!(app.world().resource::<DropList>().items[0].tile, tile);

    set_clock(&mut app, 11.9);
    app.update();
    assert_eq!(drop_count(&app), 1, "Drop should still be visible at +1.9s");

    set_clock(&mut app, 12.1);
    app.update();
    assert_eq!(drop_count(&app), 0, "Drop should be gone at +2.1s");
}

// ─────────────────────────────────────────────────────────────────────────────
// End to end
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_plant_grow_harvest_cycle() {
    let mut app = build_test_app();
    add_menu(&mut app);
    add_farm_logic(&mut app);

    // Menu → Playing
    app.update();
    assert_eq!(current_state(&app), GameState::Menu);
    press_menu_button(&mut app, MenuButton::Start);
    app.update();
    app.update();
    assert_eq!(current_state(&app), GameState::Playing);

    // Plant mode on, plant inside field (1,1,5,3).
    click_plant_toggle(&mut app);
    assert!(app.world().resource::<PlantMode>().0);

    let tile = IVec2::new(2, 2);
    set_clock(&mut app, 1.0);
    click_tile(&mut app, tile);
    assert_eq!(
        cell(&app, tile),
        Cell::Planted { since: Duration::from_secs(1), stage: GrowthStage::Sprout }
    );

    // +5s → Growing, +10s → Mature.
    set_clock(&mut app, 6.0);
    app.update();
    assert_eq!(cell(&app, tile).stage(), Some(GrowthStage::Growing));

    set_clock(&mut app, 11.0);
    app.update();
    assert_eq!(cell(&app, tile).stage(), Some(GrowthStage::Mature));

    // Plant mode off, harvest.
    click_plant_toggle(&mut app);
    assert!(!app.world().resource::<PlantMode>().0);
    let drops_before = drop_count(&app);
    click_tile(&mut app, tile);

    assert_eq!(cell(&app, tile), Cell::Empty);
    assert_eq!(drop_count(&app), drops_before + 1);
    let drop = &app.world().resource::<DropList>().items[0];
    assert_eq!(drop.tile, tile);
    assert_eq!(drop.sprite, SpriteKey::Drop);
}
