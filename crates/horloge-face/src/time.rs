use std::fmt;

use rand::Rng;

use crate::error::{FaceError, FaceResult};

pub const MS_PER_SECOND: f64 = 1_000.0;
pub const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
pub const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;

/// One full turn of the hour hand, in milliseconds.
pub const FACE_DURATION: f64 = 12.0 * MS_PER_HOUR;

const FACE_DURATION_MS: u64 = 12 * 60 * 60 * 1_000;

/// A position on a 12-hour analog face.
///
/// Stored as milliseconds since face start, always normalized into
/// `[0, FACE_DURATION)`. Hours, minutes and seconds are derived on demand,
/// so a fractional advance never drifts the way carried integer fields do.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Time {
    millis: f64,
}

impl Time {
    /// Face start (`0:0:0`).
    #[inline]
    pub const fn zero() -> Self {
        Self { millis: 0.0 }
    }

    /// Builds a time from a millisecond offset, wrapping it onto the face.
    ///
    /// A non-finite offset is treated as face start.
    pub fn from_millis(millis: f64) -> Self {
        let mut t = Self::zero();
        t.advance(millis);
        t
    }

    /// Builds a time from discrete components.
    ///
    /// Each component must already be inside its natural range; nothing is
    /// rounded or carried.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> FaceResult<Self> {
        check_component("hours", hours, 12)?;
        check_component("minutes", minutes, 60)?;
        check_component("seconds", seconds, 60)?;

        let millis = hours as f64 * MS_PER_HOUR
            + minutes as f64 * MS_PER_MINUTE
            + seconds as f64 * MS_PER_SECOND;
        Ok(Self { millis })
    }

    /// Uniformly random millisecond offset on the face.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self { millis: rng.gen_range(0..FACE_DURATION_MS) as f64 }
    }

    /// Milliseconds since face start, in `[0, FACE_DURATION)`.
    #[inline]
    pub fn as_millis(self) -> f64 {
        self.millis
    }

    /// Adds `delta_ms` (fractional and negative deltas allowed) and wraps the
    /// result back onto the face.
    ///
    /// A NaN or infinite delta is dropped and the time stays where it was.
    pub fn advance(&mut self, delta_ms: f64) {
        if !delta_ms.is_finite() {
            log::trace!("ignoring non-finite advance delta {delta_ms}");
            return;
        }
        if delta_ms == 0.0 {
            return;
        }
        self.millis = normalize(self.millis + delta_ms);
    }

    /// Returns a copy advanced by `delta_ms`.
    #[must_use]
    pub fn advanced(mut self, delta_ms: f64) -> Self {
        self.advance(delta_ms);
        self
    }

    /// Hours in `[0, 12)`; floored when `whole`.
    pub fn hours(self, whole: bool) -> f64 {
        component(self.millis / MS_PER_HOUR, 12.0, whole)
    }

    /// Minutes in `[0, 60)`; floored when `whole`.
    pub fn minutes(self, whole: bool) -> f64 {
        component((self.millis % MS_PER_HOUR) / MS_PER_MINUTE, 60.0, whole)
    }

    /// Seconds in `[0, 60)`; floored when `whole`.
    pub fn seconds(self, whole: bool) -> f64 {
        component((self.millis % MS_PER_MINUTE) / MS_PER_SECOND, 60.0, whole)
    }

    /// Whole `(hours, minutes, seconds)`.
    pub fn hms(self) -> (u32, u32, u32) {
        (
            self.hours(true) as u32,
            self.minutes(true) as u32,
            self.seconds(true) as u32,
        )
    }
}

/// `H:M:S` with whole values and no zero padding, e.g. `3:7:0`.
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{h}:{m}:{s}")
    }
}

fn normalize(millis: f64) -> f64 {
    let wrapped = millis.rem_euclid(FACE_DURATION);
    // rem_euclid may round a tiny negative input up to exactly the modulus.
    if wrapped >= FACE_DURATION { 0.0 } else { wrapped }
}

fn component(value: f64, limit: f64, whole: bool) -> f64 {
    if whole {
        value.floor().clamp(0.0, limit - 1.0)
    } else {
        value.clamp(0.0, limit)
    }
}

fn check_component(name: &'static str, value: u32, limit: u32) -> FaceResult<()> {
    if value < limit {
        Ok(())
    } else {
        Err(FaceError::TimeComponentOutOfRange { name, value, limit })
    }
}
