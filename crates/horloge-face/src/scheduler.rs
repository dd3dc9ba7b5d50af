//! The single driver for every live clock.
//!
//! Owns the configuration, the registry, the spawn timer and the RNG. The
//! presenter calls [`Scheduler::frame`] once per rendered frame with the
//! measured delta and reads the registry back to draw.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::clock::{ClockId, ClockInstance, ClockState, SpawnRequest, TickOutcome, Traits};
use crate::config::{Configuration, Extent, Layout, Tunables};
use crate::error::FaceResult;
use crate::registry::ClockRegistry;
use crate::time::Time;
use crate::timer::RepeatingTimer;

/// What happened during one [`Scheduler::frame`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameReport {
    pub spawned: Vec<ClockId>,
    pub removed: Vec<ClockId>,
}

pub struct Scheduler {
    tunables: Tunables,
    config: Configuration,
    registry: ClockRegistry,
    spawner: RepeatingTimer,
    rng: Pcg64Mcg,
    next_id: u64,
}

impl Scheduler {
    /// Builds the first configuration; fails if the tunables or viewport are unusable.
    pub fn new(tunables: Tunables, viewport: Extent) -> FaceResult<Self> {
        let config = Configuration::compute(viewport, &tunables)?;
        let rng = match tunables.seed {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_entropy(),
        };
        let spawner = RepeatingTimer::new(config.tick_period_ms);

        log::debug!(
            "scheduler ready: {} slot(s), face {:.1}px, tick {:.1}ms",
            config.clock_count,
            config.face_size,
            config.tick_period_ms
        );

        Ok(Self { tunables, config, registry: ClockRegistry::new(), spawner, rng, next_id: 0 })
    }

    #[inline]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    #[inline]
    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    #[inline]
    pub fn registry(&self) -> &ClockRegistry {
        &self.registry
    }

    pub fn clocks(&self) -> impl Iterator<Item = &ClockInstance> {
        self.registry.iter()
    }

    pub fn get(&self, id: ClockId) -> Option<&ClockInstance> {
        self.registry.get(id)
    }

    /// Spawns one clock at the layout's entry position.
    ///
    /// `time = None` draws a random time.
    pub fn spawn(&mut self, time: Option<Time>, slot: usize) -> FaceResult<ClockId> {
        let left = self.config.spawn_left();
        self.spawn_at(time, slot, left)
    }

    pub fn spawn_at(&mut self, time: Option<Time>, slot: usize, left: f32) -> FaceResult<ClockId> {
        let time = time.unwrap_or_else(|| Time::random(&mut self.rng));
        let traits = Traits::sample(&self.tunables, &mut self.rng);
        let id = ClockId(self.next_id);

        let clock = ClockInstance::spawn(id, SpawnRequest { time, slot, left, traits }, &self.config)?;
        self.next_id += 1;

        log::debug!("spawned clock {} in slot {slot} at {time} (x={left:.1})", id.0);
        self.registry.insert(clock);
        Ok(id)
    }

    /// Spawns one random clock per slot at `left`.
    ///
    /// A slot that fails is logged and skipped; the rest still spawn.
    pub fn spawn_column(&mut self, left: f32) -> Vec<ClockId> {
        (0..self.config.clock_count)
            .filter_map(|slot| match self.spawn_at(None, slot, left) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("clock for slot {slot} not created: {e}");
                    None
                }
            })
            .collect()
    }

    /// Initial column at the layout's entry position.
    pub fn populate(&mut self) -> Vec<ClockId> {
        let left = self.config.spawn_left();
        self.spawn_column(left)
    }

    /// Advances every live clock, drops the dead ones, and spawns new columns
    /// in the scrolling layout.
    ///
    /// A non-finite or negative delta is treated as zero.
    pub fn frame(&mut self, delta_ms: f64) -> FrameReport {
        let delta_ms = if delta_ms.is_finite() && delta_ms > 0.0 {
            delta_ms
        } else {
            log::trace!("frame delta {delta_ms} treated as zero");
            0.0
        };

        let mut report = FrameReport::default();

        for clock in self.registry.iter_mut() {
            if let TickOutcome::Removed(cause) = clock.tick(delta_ms, &self.config) {
                log::debug!("clock {} removed ({cause:?})", clock.id().0);
            }
        }
        report.removed = self.registry.prune();

        if self.config.layout == Layout::Scrolling {
            let fired = self.spawner.advance(delta_ms);
            let lefts = self.catch_up_lefts(fired);
            if lefts.len() < fired as usize {
                log::debug!("skipped {} column(s) already past the left edge", fired as usize - lefts.len());
            }
            for left in lefts {
                report.spawned.extend(self.spawn_column(left));
            }
        }

        report
    }

    /// Entry positions for `fired` spawn periods that completed during one
    /// frame, oldest first.
    ///
    /// Each column starts where it would be had it spawned exactly when its
    /// period ended. Columns that would already be fully off-screen are
    /// dropped.
    fn catch_up_lefts(&self, fired: u32) -> Vec<f32> {
        let entry = f64::from(self.config.spawn_left());
        let period = self.spawner.period_ms();
        let since_last = self.spawner.pending_ms();
        let exit = -f64::from(self.config.face_size);

        (0..fired)
            .rev()
            .map(|k| entry - self.config.velocity * (since_last + period * f64::from(k)))
            .filter(|&left| left >= exit)
            .map(|left| left as f32)
            .collect()
    }

    /// Recomputes the configuration for a new viewport and hands it to every
    /// live clock. On error the previous configuration stays in force.
    pub fn resize(&mut self, viewport: Extent) -> FaceResult<()> {
        let config = Configuration::compute(viewport, &self.tunables)?;
        log::debug!(
            "viewport {}x{}: face {:.1}px, margin {:.1}px",
            viewport.width,
            viewport.height,
            config.face_size,
            config.margin
        );
        self.config = config;
        for clock in self.registry.iter_mut() {
            clock.reconfigure(&self.config);
        }
        Ok(())
    }

    /// Hit-tests a pointer press and broadcasts from the clock under it.
    pub fn select_at(&mut self, x: f32, y: f32) -> Option<ClockId> {
        let id = self.registry.hit_test(x, y, &self.config)?;
        self.synchronize(id);
        Some(id)
    }

    /// Freezes every other live clock on `source`'s time and direction.
    ///
    /// Returns how many clocks were synchronized. A missing or unselectable
    /// source broadcasts nothing.
    pub fn synchronize(&mut self, source: ClockId) -> usize {
        let Some(src) = self.registry.get(source).filter(|c| c.is_selectable()) else {
            return 0;
        };
        let (time, reverse) = (src.time(), src.is_reversed());

        let mut synced = 0;
        for clock in self.registry.iter_mut().filter(|c| c.id() != source) {
            if clock.sync_to(time, reverse, &self.config) {
                synced += 1;
            }
        }
        log::debug!("clock {} broadcast {time} (reverse={reverse}) to {synced} clock(s)", source.0);
        synced
    }

    /// Resumes every paused clock.
    pub fn release(&mut self) -> usize {
        let mut resumed = 0;
        for clock in self.registry.iter_mut().filter(|c| c.state() == ClockState::Paused) {
            clock.resume();
            resumed += 1;
        }
        if resumed > 0 {
            log::debug!("released {resumed} paused clock(s)");
        }
        resumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Lifetime, TickPolicy};
    use crate::error::FaceError;

    fn fixed_wall(count: usize) -> Tunables {
        Tunables::default()
            .clock_count(count)
            .layout(Layout::Static { left: 100.0 })
            .lifetime(Lifetime::Unlimited)
            .tick_policy(TickPolicy::PerFrame)
            .seed(11)
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn four_slots_stack_from_padding() {
        let mut s = Scheduler::new(fixed_wall(4), Extent::new(1280.0, 720.0)).unwrap();
        let ids = s.populate();
        assert_eq!(ids.len(), 4);

        let cfg = s.config().clone();
        let third = s.get(ids[3]).unwrap();
        let expected = cfg.padding_top_bottom + 3.0 * (cfg.face_size + cfg.margin);
        assert_eq!(third.slot(), 3);
        assert_eq!(third.bounds(&cfg).top, expected);
        assert!((expected - (72.0 + 3.0 * 1.5 * (576.0 / 5.5))).abs() < 1e-3);
    }

    #[test]
    fn out_of_range_slot_fails_alone() {
        let mut s = Scheduler::new(fixed_wall(2), Extent::new(800.0, 600.0)).unwrap();
        assert_eq!(s.spawn(None, 2), Err(FaceError::SlotOutOfRange { slot: 2, count: 2 }));
        assert!(s.spawn(None, 1).is_ok());
        assert_eq!(s.registry().len(), 1);
    }

    #[test]
    fn rejects_unusable_viewport() {
        assert!(Scheduler::new(fixed_wall(1), Extent::new(0.0, 0.0)).is_err());
    }

    // ── frame ─────────────────────────────────────────────────────────────

    #[test]
    fn frame_advances_running_clocks() {
        let mut s = Scheduler::new(fixed_wall(1), Extent::new(800.0, 600.0)).unwrap();
        let id = s.spawn(Some(Time::zero()), 0).unwrap();
        s.frame(250.0);
        s.frame(f64::NAN);
        s.frame(750.0);
        assert_eq!(s.get(id).unwrap().time().hms(), (0, 0, 1));
    }

    #[test]
    fn scrolling_spawns_columns_and_retires_old_ones() {
        let t = Tunables::default().clock_count(2).lifetime(Lifetime::Unlimited).seed(5);
        let mut s = Scheduler::new(t, Extent::new(1000.0, 600.0)).unwrap();
        assert!(s.populate().len() == 2);

        let report = s.frame(1_000.0);
        assert_eq!(report.spawned.len(), 2);
        assert!(report.removed.is_empty());

        // Long enough for the first column to clear the left edge.
        let cfg = s.config().clone();
        let travel = f64::from(cfg.viewport.width + cfg.face_size) / cfg.velocity;
        let mut removed = 0;
        let mut elapsed = 0.0;
        while elapsed < travel + 100.0 {
            removed += s.frame(100.0).removed.len();
            elapsed += 100.0;
        }
        assert!(removed >= 2);
        assert!(s.clocks().all(|c| c.left() >= -cfg.face_size));
    }

    #[test]
    fn stalled_frame_staggers_columns() {
        let t = Tunables::default().clock_count(1).lifetime(Lifetime::Unlimited).seed(1);
        let mut s = Scheduler::new(t, Extent::new(1000.0, 600.0)).unwrap();
        let report = s.frame(3_000.0);
        let lefts: Vec<f32> = report.spawned.iter().map(|&id| s.get(id).unwrap().left()).collect();
        let stride = s.config().face_size + s.config().margin;
        assert_eq!(lefts.len(), 3);
        assert_eq!(lefts[2], 1000.0);
        assert!((lefts[1] - (1000.0 - stride)).abs() < 1e-3);
        assert!((lefts[0] - (1000.0 - 2.0 * stride)).abs() < 1e-3);
    }

    #[test]
    fn long_stall_never_spawns_off_screen() {
        let t = Tunables::default().clock_count(1).lifetime(Lifetime::Unlimited).seed(3);
        let mut s = Scheduler::new(t, Extent::new(1000.0, 600.0)).unwrap();
        let report = s.frame(60_000.0);

        let face = s.config().face_size;
        assert!(!report.spawned.is_empty());
        assert!(report.spawned.len() < 60);
        assert!(report.spawned.iter().all(|&id| s.get(id).unwrap().left() >= -face));
        assert!(s.frame(16.0).removed.is_empty());
    }

    #[test]
    fn column_enters_at_its_share_of_the_period() {
        let t = Tunables::default().clock_count(1).lifetime(Lifetime::Unlimited).seed(9);
        let mut s = Scheduler::new(t, Extent::new(1000.0, 600.0)).unwrap();
        let first = s.populate()[0];

        // The period ended 500 ms into this frame.
        let report = s.frame(1_500.0);
        assert_eq!(report.spawned.len(), 1);

        let cfg = s.config().clone();
        let second = s.get(report.spawned[0]).unwrap().left();
        let expected = 1000.0 - (cfg.velocity * 500.0) as f32;
        assert!((second - expected).abs() < 1e-3);

        let gap = second - s.get(first).unwrap().left();
        assert!((gap - (cfg.face_size + cfg.margin)).abs() < 1e-3);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_replaces_configuration_and_keeps_clocks() {
        let mut s = Scheduler::new(fixed_wall(2), Extent::new(800.0, 600.0)).unwrap();
        let ids = s.populate();
        let before = s.config().face_size;

        s.resize(Extent::new(800.0, 1200.0)).unwrap();
        assert!((s.config().face_size - before * 2.0).abs() < 1e-3);
        for id in ids {
            let c = s.get(id).unwrap();
            assert_eq!(c.bounds(s.config()).size, s.config().face_size);
        }
    }

    #[test]
    fn failed_resize_keeps_previous_configuration() {
        let mut s = Scheduler::new(fixed_wall(2), Extent::new(800.0, 600.0)).unwrap();
        let before = s.config().clone();
        assert!(s.resize(Extent::new(800.0, 0.0)).is_err());
        assert_eq!(s.config(), &before);
    }

    // ── synchronize ───────────────────────────────────────────────────────

    #[test]
    fn broadcast_copies_time_and_direction_then_freezes() {
        let t = fixed_wall(3).reverse_probability(0.0);
        let mut s = Scheduler::new(t, Extent::new(800.0, 900.0)).unwrap();
        let a = s.spawn(Some(Time::from_hms(9, 41, 7).unwrap()), 0).unwrap();
        let b = s.spawn(Some(Time::from_hms(1, 0, 0).unwrap()), 1).unwrap();
        let c = s.spawn(Some(Time::from_hms(2, 0, 0).unwrap()), 2).unwrap();

        s.frame(500.0);
        assert_eq!(s.synchronize(a), 2);

        let source = s.get(a).unwrap().time();
        for id in [b, c] {
            let clock = s.get(id).unwrap();
            assert_eq!(clock.time(), source);
            assert_eq!(clock.is_reversed(), s.get(a).unwrap().is_reversed());
            assert_eq!(clock.state(), ClockState::Paused);
        }

        s.frame(5_000.0);
        assert_eq!(s.get(b).unwrap().time(), source);
        assert_eq!(s.get(c).unwrap().time(), source);
        assert_eq!(s.get(a).unwrap().time(), source.advanced(5_000.0));
    }

    #[test]
    fn broadcast_carries_reverse_flag() {
        let mut s = Scheduler::new(fixed_wall(2).reverse_probability(1.0), Extent::new(800.0, 600.0))
            .unwrap();
        let a = s.spawn(None, 0).unwrap();
        s.tunables.reverse_probability = 0.0;
        let b = s.spawn(None, 1).unwrap();
        assert!(!s.get(b).unwrap().is_reversed());

        s.synchronize(a);
        assert!(s.get(b).unwrap().is_reversed());
        assert!(s.get(b).unwrap().angles().hour <= 0.0);
    }

    #[test]
    fn select_at_hits_the_face_under_the_pointer() {
        let mut s = Scheduler::new(fixed_wall(2), Extent::new(800.0, 600.0)).unwrap();
        let ids = s.populate();
        let (x, y) = s.get(ids[1]).unwrap().bounds(s.config()).center();

        assert_eq!(s.select_at(x, y), Some(ids[1]));
        assert_eq!(s.get(ids[0]).unwrap().state(), ClockState::Paused);

        // The frozen clock no longer answers clicks.
        let (x0, y0) = s.get(ids[0]).unwrap().bounds(s.config()).center();
        assert_eq!(s.select_at(x0, y0), None);
        assert_eq!(s.select_at(-500.0, -500.0), None);
    }

    #[test]
    fn removed_clocks_are_not_broadcast_targets() {
        let mut s = Scheduler::new(fixed_wall(3), Extent::new(800.0, 600.0)).unwrap();
        let ids = s.populate();
        s.registry.remove(ids[2]);
        assert_eq!(s.synchronize(ids[0]), 1);
        assert_eq!(s.synchronize(ClockId(999)), 0);
    }

    #[test]
    fn release_resumes_everything() {
        let mut s = Scheduler::new(fixed_wall(3), Extent::new(800.0, 600.0)).unwrap();
        let ids = s.populate();
        s.synchronize(ids[0]);
        assert_eq!(s.release(), 2);
        assert!(s.clocks().all(|c| c.state() == ClockState::Running && c.is_selectable()));
    }
}
