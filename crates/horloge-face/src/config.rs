//! Tunables and the viewport-derived configuration.
//!
//! `Tunables` is what a user sets; `Configuration` is what every clock reads.
//! A `Configuration` is only ever produced whole by [`Configuration::compute`]
//! and replaced whole on resize.

use crate::angle::SecondHand;
use crate::error::{FaceError, FaceResult};

/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Straight sRGB color, 8 bits per channel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
}

/// One value per hand.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct HandSet<T> {
    pub hour: T,
    pub minute: T,
    pub second: T,
}

impl<T> HandSet<T> {
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> HandSet<U> {
        HandSet { hour: f(&self.hour), minute: f(&self.minute), second: f(&self.second) }
    }

    /// Hands in paint order (hour at the bottom).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.hour, &self.minute, &self.second].into_iter()
    }
}

/// Hand style relative to the face diameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandStyle {
    /// Divisor of the face size, e.g. `3.5` means `size / 3.5`.
    pub length_div: f32,
    pub width_div: f32,
    /// `None` draws no border.
    pub border_div: Option<f32>,
    pub fill: bool,
    pub rounded: bool,
    pub color: Rgb8,
}

/// Where new clocks appear and whether they move.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Layout {
    /// A single column at a fixed left offset.
    Static { left: f32 },
    /// A new column enters at the right edge every tick period and scrolls left.
    Scrolling,
}

/// Self-destruct policy for a clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Lifetime {
    Unlimited,
    Fixed { millis: f64 },
    /// Long enough to travel one and a half viewport widths.
    CrossScreen,
}

/// How time is fed to the clocks.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TickPolicy {
    /// Whole tick periods, fired by a repeating timer.
    Fixed,
    /// The measured frame delta, every frame.
    #[default]
    PerFrame,
}

/// Per-instance speed multiplier range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

/// User-facing knobs.
///
/// Build with `Tunables::default()` and the chained setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Tunables {
    pub clock_count: usize,
    pub margin_coefficient: f32,
    /// Top and bottom padding as a fraction of viewport height.
    pub padding_ratio: f32,
    pub ticks_per_second: f64,
    pub palette: Vec<Rgb8>,
    /// `None` runs every clock at 1×.
    pub speed: Option<SpeedRange>,
    pub hands: HandSet<HandStyle>,
    /// Center cap diameter in logical pixels.
    pub center_cap: f32,
    pub reverse_probability: f64,
    pub layout: Layout,
    pub lifetime: Lifetime,
    pub tick_policy: TickPolicy,
    /// `None` picks `Step` for fixed ticking and `Sweep` for per-frame ticking.
    pub second_hand: Option<SecondHand>,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            clock_count: 4,
            margin_coefficient: 0.5,
            padding_ratio: 0.1,
            ticks_per_second: 1.0,
            palette: vec![
                Rgb8::new(0xf4, 0xe4, 0xc1),
                Rgb8::new(0xa8, 0xd5, 0xba),
                Rgb8::new(0xf7, 0xb2, 0xad),
                Rgb8::new(0x9a, 0xb7, 0xd3),
                Rgb8::new(0xff, 0xd9, 0x7d),
            ],
            speed: None,
            hands: HandSet {
                hour: HandStyle {
                    length_div: 3.5,
                    width_div: 15.0,
                    border_div: Some(90.0),
                    fill: false,
                    rounded: true,
                    color: Rgb8::BLACK,
                },
                minute: HandStyle {
                    length_div: 3.0,
                    width_div: 40.0,
                    border_div: None,
                    fill: true,
                    rounded: true,
                    color: Rgb8::BLACK,
                },
                second: HandStyle {
                    length_div: 2.5,
                    width_div: 80.0,
                    border_div: None,
                    fill: true,
                    rounded: false,
                    color: Rgb8::BLACK,
                },
            },
            center_cap: 2.0,
            reverse_probability: 0.0,
            layout: Layout::Scrolling,
            lifetime: Lifetime::CrossScreen,
            tick_policy: TickPolicy::PerFrame,
            second_hand: None,
            seed: None,
        }
    }
}

impl Tunables {
    pub fn clock_count(mut self, n: usize) -> Self {
        self.clock_count = n;
        self
    }

    pub fn margin_coefficient(mut self, c: f32) -> Self {
        self.margin_coefficient = c;
        self
    }

    pub fn ticks_per_second(mut self, t: f64) -> Self {
        self.ticks_per_second = t;
        self
    }

    pub fn palette(mut self, colors: impl Into<Vec<Rgb8>>) -> Self {
        self.palette = colors.into();
        self
    }

    pub fn speed(mut self, min: f64, max: f64) -> Self {
        self.speed = Some(SpeedRange { min, max });
        self
    }

    pub fn reverse_probability(mut self, p: f64) -> Self {
        self.reverse_probability = p;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn tick_policy(mut self, policy: TickPolicy) -> Self {
        self.tick_policy = policy;
        self
    }

    pub fn second_hand(mut self, mode: SecondHand) -> Self {
        self.second_hand = Some(mode);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects values no configuration can be built from.
    pub fn validate(&self) -> FaceResult<()> {
        if self.clock_count == 0 {
            return Err(FaceError::tunable("clock_count", "must be at least 1"));
        }
        if !(self.margin_coefficient.is_finite() && self.margin_coefficient >= 0.0) {
            return Err(FaceError::tunable("margin_coefficient", "must be finite and >= 0"));
        }
        if !(0.0..0.5).contains(&self.padding_ratio) {
            return Err(FaceError::tunable("padding_ratio", "must be in [0, 0.5)"));
        }
        if !(self.ticks_per_second.is_finite() && self.ticks_per_second > 0.0) {
            return Err(FaceError::tunable("ticks_per_second", "must be finite and > 0"));
        }
        if self.palette.is_empty() {
            return Err(FaceError::tunable("palette", "needs at least one color"));
        }
        if let Some(SpeedRange { min, max }) = self.speed {
            if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
                return Err(FaceError::tunable("speed", format!("bad range {min}..={max}")));
            }
        }
        if !(0.0..=1.0).contains(&self.reverse_probability) {
            return Err(FaceError::tunable("reverse_probability", "must be in [0, 1]"));
        }
        for style in self.hands.iter() {
            let divs_ok = [Some(style.length_div), Some(style.width_div), style.border_div]
                .into_iter()
                .flatten()
                .all(|d| d.is_finite() && d > 0.0);
            if !divs_ok {
                return Err(FaceError::tunable("hands", "divisors must be finite and > 0"));
            }
        }
        if let Lifetime::Fixed { millis } = self.lifetime {
            if !(millis.is_finite() && millis > 0.0) {
                return Err(FaceError::tunable("lifetime", "must be finite and > 0"));
            }
        }
        Ok(())
    }
}

/// Hand geometry resolved to logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandGeometry {
    pub length: f32,
    pub width: f32,
    pub border: f32,
    pub fill: bool,
    pub rounded: bool,
    pub color: Rgb8,
}

impl HandGeometry {
    fn resolve(style: &HandStyle, size: f32) -> Self {
        Self {
            length: size / style.length_div,
            width: size / style.width_div,
            border: style.border_div.map_or(0.0, |d| size / d),
            fill: style.fill,
            rounded: style.rounded,
            color: style.color,
        }
    }

    /// Unrotated hand box relative to the face's top-left corner, pointing at 12.
    ///
    /// The tail overhangs the center by half a width so a rounded hand pivots
    /// around the middle of its end cap.
    pub fn local_box(&self, face_size: f32) -> LocalBox {
        let center = face_size / 2.0;
        LocalBox {
            left: center - self.width / 2.0,
            top: center + self.width / 2.0 - self.length,
            width: self.width,
            height: self.length,
        }
    }

    /// Corner radius: half the width for rounded hands.
    pub fn corner_radius(&self) -> f32 {
        if self.rounded { self.width / 2.0 } else { 0.0 }
    }
}

/// Axis-aligned box in face-local pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything derived from the viewport and the tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub viewport: Extent,
    pub clock_count: usize,
    pub padding_top_bottom: f32,
    pub face_size: f32,
    pub margin: f32,
    pub hands: HandSet<HandGeometry>,
    pub center_cap: f32,
    pub tick_period_ms: f64,
    /// Horizontal scroll speed in pixels per millisecond.
    pub velocity: f64,
    /// `None` when clocks never expire.
    pub lifetime_ms: Option<f64>,
    pub layout: Layout,
    pub tick_policy: TickPolicy,
    pub second_hand: SecondHand,
}

impl Configuration {
    pub fn compute(viewport: Extent, tunables: &Tunables) -> FaceResult<Self> {
        tunables.validate()?;

        let invalid = || FaceError::InvalidViewport { width: viewport.width, height: viewport.height };
        if !viewport.is_valid() {
            return Err(invalid());
        }

        let n = tunables.clock_count as f32;
        let coef = tunables.margin_coefficient;
        let padding_top_bottom = viewport.height * tunables.padding_ratio;
        let face_size = (viewport.height - padding_top_bottom * 2.0) / (n + (n - 1.0) * coef);
        if !(face_size.is_finite() && face_size > 0.0) {
            return Err(invalid());
        }
        let margin = face_size * coef;

        let tick_period_ms = 1_000.0 / tunables.ticks_per_second;
        let velocity = f64::from(face_size + margin) / tick_period_ms;

        let lifetime_ms = match tunables.lifetime {
            Lifetime::Unlimited => None,
            Lifetime::Fixed { millis } => Some(millis),
            Lifetime::CrossScreen => Some(f64::from(viewport.width) * 1.5 / velocity),
        };

        let second_hand = tunables.second_hand.unwrap_or(match tunables.tick_policy {
            TickPolicy::Fixed => SecondHand::Step,
            TickPolicy::PerFrame => SecondHand::Sweep,
        });

        Ok(Self {
            viewport,
            clock_count: tunables.clock_count,
            padding_top_bottom,
            face_size,
            margin,
            hands: tunables.hands.map(|s| HandGeometry::resolve(s, face_size)),
            center_cap: tunables.center_cap,
            tick_period_ms,
            velocity,
            lifetime_ms,
            layout: tunables.layout,
            tick_policy: tunables.tick_policy,
            second_hand,
        })
    }

    /// Vertical offset of a slot's face.
    #[inline]
    pub fn slot_top(&self, slot: usize) -> f32 {
        self.padding_top_bottom + slot as f32 * (self.face_size + self.margin)
    }

    /// Horizontal offset where a new clock enters.
    pub fn spawn_left(&self) -> f32 {
        match self.layout {
            Layout::Static { left } => left,
            Layout::Scrolling => self.viewport.width,
        }
    }

    pub fn check_slot(&self, slot: usize) -> FaceResult<()> {
        if slot < self.clock_count {
            Ok(())
        } else {
            Err(FaceError::SlotOutOfRange { slot, count: self.clock_count })
        }
    }
}
