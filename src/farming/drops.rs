//! Harvest drops — short-lived items left on the tile a crop was picked from.

use bevy::prelude::*;
use crate::shared::*;
use std::time::Duration;

impl DropList {
    /// Add a drop stamped with `now`. Returns its id.
    pub fn spawn(&mut self, tile: IVec2, sprite: SpriteKey, now: Duration, lifetime: Duration) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(DropItem {
            id,
            tile,
            sprite,
            spawned_at: now,
            lifetime,
        });
        id
    }

    /// Drop every item whose lifetime has run out. This is the only way
    /// drops leave the list. Returns how many were removed.
    pub fn sweep(&mut self, now: Duration) -> usize {
        let before = self.items.len();
        self.items.retain(|drop| drop.is_alive(now));
        before - self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn spawn_harvest_drops(
    mut harvested: EventReader<CropHarvestedEvent>,
    mut drops: ResMut<DropList>,
    clock: Res<GrowthClock>,
    settings: Res<GameSettings>,
) {
    for event in harvested.read() {
        drops.spawn(event.tile, SpriteKey::Drop, clock.now, settings.drop_lifetime);
    }
}

pub fn sweep_expired_drops(mut drops: ResMut<DropList>, clock: Res<GrowthClock>) {
    // Read-only check first: an idle sweep must not mark the list changed.
    if drops.items.iter().all(|d| d.is_alive(clock.now)) {
        return;
    }
    let removed = drops.sweep(clock.now);
    debug!("[Farm] {} drop(s) expired", removed);
}
