//! Farming domain — planting, timed crop growth, harvest, and harvest drops.
//!
//! Communicates with other domains exclusively through crate::shared events/resources.

use bevy::prelude::*;
use crate::shared::*;

pub mod atlas;
pub mod crops;
pub mod drops;
pub mod harvest;
pub mod render;

pub use atlas::{FarmingAtlases, SpriteTable};
pub use render::FarmEntities;

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app
            // Internal resources
            .init_resource::<FarmEntities>()
            .init_resource::<FarmingAtlases>()
            .init_resource::<SpriteTable>()
            .init_resource::<GrowthClock>()
            .add_systems(Startup, atlas::start_loading_atlases)
            .add_systems(PreUpdate, tick_growth_clock)
            .add_systems(
                Update,
                atlas::finish_loading_atlases.run_if(not(atlas::atlases_settled)),
            )
            // ------------------------------------------------------------------
            // Fixed-rate simulation — growth recompute and drop expiry
            // ------------------------------------------------------------------
            .add_systems(
                FixedUpdate,
                (crops::update_growth, drops::sweep_expired_drops)
                    .run_if(in_state(GameState::Playing)),
            )
            // ------------------------------------------------------------------
            // Commands from the input domain
            // ------------------------------------------------------------------
            .add_systems(
                Update,
                (
                    crops::handle_plant_attempts,
                    harvest::handle_harvest_attempts,
                    drops::spawn_harvest_drops,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            // ------------------------------------------------------------------
            // Visual sync — runs after all state mutations
            // ------------------------------------------------------------------
            .add_systems(
                PostUpdate,
                (
                    render::sync_ground_tiles,
                    render::sync_crop_sprites,
                    render::sync_drop_sprites,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnExit(GameState::Playing), render::despawn_playfield);
    }
}

/// Copies the monotonic real-time clock into `GrowthClock` once per frame.
/// `Time<Real>` is used instead of virtual time so long frames are never
/// clamped out of the growth timers.
pub fn tick_growth_clock(time: Res<Time<Real>>, mut clock: ResMut<GrowthClock>) {
    clock.now = time.elapsed();
}
