use std::collections::BTreeMap;

use crate::clock::{ClockId, ClockInstance};
use crate::config::Configuration;

/// Live clocks keyed by id.
///
/// This is the only link between a drawn face and its owning instance: the
/// presenter hit-tests here instead of storing back-references in draw data.
/// Iteration order is spawn order.
#[derive(Debug, Default)]
pub struct ClockRegistry {
    clocks: BTreeMap<ClockId, ClockInstance>,
}

impl ClockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clocks.is_empty()
    }

    pub fn insert(&mut self, clock: ClockInstance) {
        self.clocks.insert(clock.id(), clock);
    }

    /// Stops the clock, then detaches it.
    pub fn remove(&mut self, id: ClockId) -> Option<ClockInstance> {
        let mut clock = self.clocks.remove(&id)?;
        clock.remove();
        Some(clock)
    }

    pub fn get(&self, id: ClockId) -> Option<&ClockInstance> {
        self.clocks.get(&id)
    }

    pub fn get_mut(&mut self, id: ClockId) -> Option<&mut ClockInstance> {
        self.clocks.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClockInstance> {
        self.clocks.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ClockInstance> {
        self.clocks.values_mut()
    }

    /// Topmost selectable clock under the point; later spawns sit on top.
    pub fn hit_test(&self, x: f32, y: f32, config: &Configuration) -> Option<ClockId> {
        self.clocks
            .values()
            .rev()
            .filter(|c| c.is_selectable())
            .find(|c| c.bounds(config).contains(x, y))
            .map(ClockInstance::id)
    }

    /// Detaches every clock that is no longer live.
    pub fn prune(&mut self) -> Vec<ClockId> {
        let dead: Vec<ClockId> =
            self.clocks.values().filter(|c| !c.is_live()).map(ClockInstance::id).collect();
        for id in &dead {
            self.clocks.remove(id);
        }
        dead
    }
}
