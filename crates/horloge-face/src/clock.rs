//! One on-screen clock and its lifecycle.
//!
//! ```text
//! Spawning ──► Running ──► Removed
//!                 │           ▲
//!                 ▼           │
//!               Paused ───────┘
//! ```
//!
//! `Spawning` only exists inside [`ClockInstance::spawn`]; callers always
//! receive a `Running` instance or an error.

use rand::Rng;

use crate::angle::HandAngles;
use crate::config::{Configuration, Layout, Rgb8, TickPolicy, Tunables};
use crate::error::{FaceError, FaceResult};
use crate::time::Time;
use crate::timer::{Countdown, RepeatingTimer};

/// Stable identity of a clock for as long as it lives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ClockId(pub u64);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClockState {
    Spawning,
    Running,
    Paused,
    Removed,
}

/// Why a clock left the screen.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RemovalCause {
    OffScreen,
    Expired,
    /// Removed by its owner rather than by its own tick.
    Cancelled,
}

/// Result of one [`ClockInstance::tick`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    Alive,
    Removed(RemovalCause),
}

/// Per-instance random traits, drawn once at spawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Traits {
    pub color: Rgb8,
    pub speed: f64,
    pub reverse: bool,
}

impl Traits {
    pub fn sample<R: Rng + ?Sized>(tunables: &Tunables, rng: &mut R) -> Self {
        let color = match tunables.palette.len() {
            0 => Rgb8::new(0xff, 0xff, 0xff),
            n => tunables.palette[rng.gen_range(0..n)],
        };
        let speed = match tunables.speed {
            Some(r) if r.max > r.min => rng.gen_range(r.min..=r.max),
            Some(r) => r.min,
            None => 1.0,
        };
        let reverse = rng.gen_bool(tunables.reverse_probability.clamp(0.0, 1.0));
        Self { color, speed, reverse }
    }
}

impl Default for Traits {
    fn default() -> Self {
        Self { color: Rgb8::new(0xff, 0xff, 0xff), speed: 1.0, reverse: false }
    }
}

/// What the scheduler asks for when it spawns a clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpawnRequest {
    pub time: Time,
    pub slot: usize,
    pub left: f32,
    pub traits: Traits,
}

/// Face placement in viewport pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FaceBounds {
    pub left: f32,
    pub top: f32,
    pub size: f32,
}

impl FaceBounds {
    #[inline]
    pub fn center(self) -> (f32, f32) {
        (self.left + self.size / 2.0, self.top + self.size / 2.0)
    }

    /// Round hit test against the dial.
    pub fn contains(self, x: f32, y: f32) -> bool {
        let (cx, cy) = self.center();
        let r = self.size / 2.0;
        let (dx, dy) = (x - cx, y - cy);
        dx * dx + dy * dy <= r * r
    }
}

#[derive(Debug, Clone)]
pub struct ClockInstance {
    id: ClockId,
    time: Time,
    slot: usize,
    left: f64,
    state: ClockState,
    traits: Traits,
    selectable: bool,
    ticker: RepeatingTimer,
    lifetime: Option<Countdown>,
    angles: HandAngles,
    removal: Option<RemovalCause>,
}

impl ClockInstance {
    /// Validates the request against `config` and starts the clock.
    pub fn spawn(id: ClockId, request: SpawnRequest, config: &Configuration) -> FaceResult<Self> {
        if !config.viewport.is_valid() {
            return Err(FaceError::InvalidViewport {
                width: config.viewport.width,
                height: config.viewport.height,
            });
        }
        config.check_slot(request.slot)?;
        if !request.left.is_finite() {
            return Err(FaceError::InvalidPosition { left: request.left });
        }

        let mut clock = Self {
            id,
            time: request.time,
            slot: request.slot,
            left: f64::from(request.left),
            state: ClockState::Spawning,
            traits: request.traits,
            selectable: true,
            ticker: RepeatingTimer::new(config.tick_period_ms),
            lifetime: config.lifetime_ms.map(Countdown::new),
            angles: HandAngles::default(),
            removal: None,
        };
        clock.redraw(config);
        clock.state = ClockState::Running;
        Ok(clock)
    }

    #[inline]
    pub fn id(&self) -> ClockId {
        self.id
    }

    #[inline]
    pub fn time(&self) -> Time {
        self.time
    }

    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.left as f32
    }

    #[inline]
    pub fn state(&self) -> ClockState {
        self.state
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.traits.reverse
    }

    #[inline]
    pub fn traits(&self) -> Traits {
        self.traits
    }

    #[inline]
    pub fn angles(&self) -> HandAngles {
        self.angles
    }

    #[inline]
    pub fn is_selectable(&self) -> bool {
        self.selectable && self.state == ClockState::Running
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self.state, ClockState::Running | ClockState::Paused)
    }

    /// Set once the clock is removed.
    #[inline]
    pub fn removal_cause(&self) -> Option<RemovalCause> {
        self.removal
    }

    pub fn bounds(&self, config: &Configuration) -> FaceBounds {
        FaceBounds { left: self.left as f32, top: config.slot_top(self.slot), size: config.face_size }
    }

    /// Advances by `delta_ms` of wall time.
    ///
    /// Running clocks move their hands; running and paused clocks both keep
    /// scrolling and aging. A removed clock ignores late ticks.
    pub fn tick(&mut self, delta_ms: f64, config: &Configuration) -> TickOutcome {
        if let Some(cause) = self.removal {
            return TickOutcome::Removed(cause);
        }
        let delta_ms = if delta_ms.is_finite() && delta_ms > 0.0 { delta_ms } else { 0.0 };

        if self.state == ClockState::Running {
            let advance = match config.tick_policy {
                TickPolicy::Fixed => f64::from(self.ticker.advance(delta_ms)) * self.ticker.period_ms(),
                TickPolicy::PerFrame => delta_ms,
            };
            self.time.advance(advance * self.traits.speed);
            self.redraw(config);
        }

        if config.layout == Layout::Scrolling {
            self.left -= config.velocity * delta_ms;
        }

        if self.left < -f64::from(config.face_size) {
            return self.retire(RemovalCause::OffScreen);
        }
        if let Some(countdown) = self.lifetime.as_mut() {
            if countdown.advance(delta_ms) {
                return self.retire(RemovalCause::Expired);
            }
        }
        TickOutcome::Alive
    }

    /// Stops ticking but keeps the face on screen.
    pub fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.ticker.cancel();
            self.state = ClockState::Paused;
        }
    }

    /// Resumes a paused clock and lets it be selected again.
    pub fn resume(&mut self) {
        if self.state == ClockState::Paused {
            self.ticker.restart();
            self.state = ClockState::Running;
            self.selectable = true;
        }
    }

    /// Cancels the tick handle and marks the clock removed. Idempotent; the
    /// first cause sticks.
    pub fn remove(&mut self) {
        self.retire(RemovalCause::Cancelled);
    }

    fn retire(&mut self, cause: RemovalCause) -> TickOutcome {
        self.ticker.cancel();
        self.selectable = false;
        self.state = ClockState::Removed;
        let cause = *self.removal.get_or_insert(cause);
        TickOutcome::Removed(cause)
    }

    /// Freezes this clock on `source`'s time and direction.
    ///
    /// Returns `false` if the clock was already removed.
    pub fn sync_to(&mut self, time: Time, reverse: bool, config: &Configuration) -> bool {
        if !self.is_live() {
            return false;
        }
        self.pause();
        self.time = time;
        self.traits.reverse = reverse;
        self.selectable = false;
        self.redraw(config);
        true
    }

    /// Picks up a freshly computed configuration after a resize.
    pub fn reconfigure(&mut self, config: &Configuration) {
        if !self.is_live() {
            return;
        }
        if let Layout::Static { left } = config.layout {
            self.left = f64::from(left);
        }
        self.redraw(config);
    }

    fn redraw(&mut self, config: &Configuration) {
        self.angles = HandAngles::compute(self.time, self.traits.reverse, config.second_hand);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::config::{Extent, Lifetime};

    fn config(tunables: &Tunables) -> Configuration {
        Configuration::compute(Extent::new(1000.0, 500.0), tunables).unwrap()
    }

    fn request(slot: usize, left: f32) -> SpawnRequest {
        SpawnRequest { time: Time::zero(), slot, left, traits: Traits::default() }
    }

    fn static_tunables() -> Tunables {
        Tunables::default()
            .clock_count(1)
            .layout(Layout::Static { left: 100.0 })
            .lifetime(Lifetime::Unlimited)
    }

    // ── spawn ─────────────────────────────────────────────────────────────

    #[test]
    fn spawn_starts_running() {
        let cfg = config(&static_tunables());
        let c = ClockInstance::spawn(ClockId(1), request(0, 100.0), &cfg).unwrap();
        assert_eq!(c.state(), ClockState::Running);
        assert!(c.is_selectable());
        assert_eq!(c.angles(), HandAngles::default());
    }

    #[test]
    fn spawn_rejects_bad_slot() {
        let cfg = config(&static_tunables());
        let err = ClockInstance::spawn(ClockId(1), request(1, 0.0), &cfg).unwrap_err();
        assert_eq!(err, FaceError::SlotOutOfRange { slot: 1, count: 1 });
    }

    #[test]
    fn spawn_rejects_missing_viewport() {
        let mut cfg = config(&static_tunables());
        cfg.viewport = Extent::new(0.0, 0.0);
        let err = ClockInstance::spawn(ClockId(1), request(0, 0.0), &cfg).unwrap_err();
        assert!(matches!(err, FaceError::InvalidViewport { .. }));
    }

    #[test]
    fn spawn_rejects_non_finite_left() {
        let cfg = config(&static_tunables());
        let err = ClockInstance::spawn(ClockId(1), request(0, f32::NAN), &cfg);
        assert!(matches!(err, Err(FaceError::InvalidPosition { .. })));
    }

    // ── tick ──────────────────────────────────────────────────────────────

    #[test]
    fn per_frame_tick_advances_by_delta_times_speed() {
        let cfg = config(&static_tunables().tick_policy(TickPolicy::PerFrame));
        let mut req = request(0, 100.0);
        req.traits.speed = 2.0;
        let mut c = ClockInstance::spawn(ClockId(1), req, &cfg).unwrap();
        assert_eq!(c.tick(1_500.0, &cfg), TickOutcome::Alive);
        assert_eq!(c.time().as_millis(), 3_000.0);
        assert_eq!(c.angles().second, 18.0);
    }

    #[test]
    fn fixed_tick_jumps_whole_periods() {
        let cfg = config(&static_tunables().tick_policy(TickPolicy::Fixed));
        let mut c = ClockInstance::spawn(ClockId(1), request(0, 100.0), &cfg).unwrap();
        c.tick(600.0, &cfg);
        assert_eq!(c.time().as_millis(), 0.0);
        c.tick(600.0, &cfg);
        assert_eq!(c.time().as_millis(), 1_000.0);
        assert_eq!(c.angles().second, 6.0);
    }

    #[test]
    fn scrolling_clock_leaves_past_left_edge() {
        let t = Tunables::default().clock_count(1).lifetime(Lifetime::Unlimited);
        let cfg = config(&t);
        let mut c = ClockInstance::spawn(ClockId(1), request(0, 0.0), &cfg).unwrap();

        // Time needed to slide one full face width to the left.
        let to_edge = f64::from(cfg.face_size) / cfg.velocity;
        assert_eq!(c.tick(to_edge * 0.99, &cfg), TickOutcome::Alive);
        assert!(c.left() < 0.0);
        assert_eq!(c.tick(to_edge * 0.02, &cfg), TickOutcome::Removed(RemovalCause::OffScreen));
        assert_eq!(c.state(), ClockState::Removed);
    }

    #[test]
    fn late_tick_reports_the_original_cause() {
        let t = Tunables::default().clock_count(1).lifetime(Lifetime::Fixed { millis: 60_000.0 });
        let cfg = config(&t);
        let mut c = ClockInstance::spawn(ClockId(1), request(0, 0.0), &cfg).unwrap();

        let past_edge = 2.0 * f64::from(cfg.face_size) / cfg.velocity;
        assert_eq!(c.tick(past_edge, &cfg), TickOutcome::Removed(RemovalCause::OffScreen));
        assert_eq!(c.tick(1.0, &cfg), TickOutcome::Removed(RemovalCause::OffScreen));

        // An owner's later remove() does not overwrite it.
        c.remove();
        assert_eq!(c.removal_cause(), Some(RemovalCause::OffScreen));
    }

    #[test]
    fn lifetime_expires() {
        let t = static_tunables().lifetime(Lifetime::Fixed { millis: 2_000.0 });
        let cfg = config(&t);
        let mut c = ClockInstance::spawn(ClockId(1), request(0, 100.0), &cfg).unwrap();
        assert_eq!(c.tick(1_999.0, &cfg), TickOutcome::Alive);
        assert_eq!(c.tick(1.0, &cfg), TickOutcome::Removed(RemovalCause::Expired));
    }

    #[test]
    fn removed_clock_ignores_late_ticks() {
        let cfg = config(&static_tunables());
        let mut c = ClockInstance::spawn(ClockId(1), request(0, 100.0), &cfg).unwrap();
        c.remove();
        c.remove();
        let before = c.time();
        assert_eq!(c.tick(5_000.0, &cfg), TickOutcome::Removed(RemovalCause::Cancelled));
        assert_eq!(c.time(), before);
        assert!(!c.sync_to(Time::from_millis(1.0), true, &cfg));
    }

    #[test]
    fn bad_delta_is_zero() {
        let cfg = config(&static_tunables());
        let mut c = ClockInstance::spawn(ClockId(1), request(0, 100.0), &cfg).unwrap();
        c.tick(f64::NAN, &cfg);
        c.tick(-10.0, &cfg);
        assert_eq!(c.time(), Time::zero());
    }

    // ── pause / sync ──────────────────────────────────────────────────────

    #[test]
    fn sync_freezes_and_disables_selection() {
        let cfg = config(&static_tunables());
        let mut c = ClockInstance::spawn(ClockId(1), request(0, 100.0), &cfg).unwrap();
        let target = Time::from_hms(6, 15, 30).unwrap();
        assert!(c.sync_to(target, true, &cfg));
        assert_eq!(c.state(), ClockState::Paused);
        assert!(c.is_reversed());
        assert!(!c.is_selectable());
        assert!(c.angles().minute < 0.0);

        c.tick(10_000.0, &cfg);
        assert_eq!(c.time(), target);

        c.resume();
        assert!(c.is_selectable());
        c.tick(1_000.0, &cfg);
        assert_eq!(c.time(), target.advanced(1_000.0));
    }

    #[test]
    fn static_reconfigure_pins_left() {
        let cfg = config(&static_tunables());
        let mut c = ClockInstance::spawn(ClockId(1), request(0, 300.0), &cfg).unwrap();
        c.reconfigure(&cfg);
        assert_eq!(c.left(), 100.0);
    }

    // ── traits / bounds ───────────────────────────────────────────────────

    #[test]
    fn traits_respect_tunables() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let t = Tunables::default().speed(0.5, 2.0).reverse_probability(1.0);
        for _ in 0..100 {
            let tr = Traits::sample(&t, &mut rng);
            assert!((0.5..=2.0).contains(&tr.speed));
            assert!(tr.reverse);
            assert!(t.palette.contains(&tr.color));
        }
        let plain = Traits::sample(&Tunables::default(), &mut rng);
        assert_eq!(plain.speed, 1.0);
        assert!(!plain.reverse);
    }

    #[test]
    fn bounds_hit_test_is_round() {
        let b = FaceBounds { left: 0.0, top: 0.0, size: 100.0 };
        assert!(b.contains(50.0, 50.0));
        assert!(b.contains(50.0, 0.5));
        assert!(!b.contains(2.0, 2.0));
    }
}
