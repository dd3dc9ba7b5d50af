/// Repeating timer driven by elapsed frame time.
///
/// Fires once per whole `period_ms` accumulated. Fires are handed out one
/// batch per [`advance`](Self::advance) call, so two batches never overlap.
/// Cancelling is idempotent; a cancelled timer never fires again.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatingTimer {
    period_ms: f64,
    pending_ms: f64,
    cancelled: bool,
}

impl RepeatingTimer {
    /// `period_ms` must be finite and positive; anything else yields a timer
    /// that is already cancelled.
    pub fn new(period_ms: f64) -> Self {
        let valid = period_ms.is_finite() && period_ms > 0.0;
        Self { period_ms: if valid { period_ms } else { 0.0 }, pending_ms: 0.0, cancelled: !valid }
    }

    #[inline]
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Time accumulated since the most recent fire.
    #[inline]
    pub fn pending_ms(&self) -> f64 {
        self.pending_ms
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Accumulates `elapsed_ms` and returns how many periods completed.
    ///
    /// Non-finite or negative elapsed time counts as zero.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if self.cancelled || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        self.pending_ms += elapsed_ms;
        let fired = (self.pending_ms / self.period_ms).floor();
        self.pending_ms -= fired * self.period_ms;
        fired as u32
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.pending_ms = 0.0;
    }

    /// Re-arms a cancelled timer with an empty accumulator.
    pub fn restart(&mut self) {
        if self.period_ms > 0.0 {
            self.cancelled = false;
            self.pending_ms = 0.0;
        }
    }
}

/// One-shot countdown, in milliseconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Countdown {
    remaining_ms: f64,
}

impl Countdown {
    pub fn new(millis: f64) -> Self {
        Self { remaining_ms: millis.max(0.0) }
    }

    /// Consumes `elapsed_ms`; returns `true` once the countdown reached zero.
    pub fn advance(&mut self, elapsed_ms: f64) -> bool {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.remaining_ms = (self.remaining_ms - elapsed_ms).max(0.0);
        }
        self.is_elapsed()
    }

    #[inline]
    pub fn is_elapsed(&self) -> bool {
        self.remaining_ms <= 0.0
    }

    #[inline]
    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }
}
