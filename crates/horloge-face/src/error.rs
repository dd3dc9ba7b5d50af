use thiserror::Error;

/// Construction-time failures.
///
/// Every variant is fatal for the one value being built (an instance, a
/// configuration, a time) and never for the scheduler that asked for it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FaceError {
    #[error("viewport {width}x{height} cannot host a clock")]
    InvalidViewport { width: f32, height: f32 },

    #[error("slot {slot} is out of range (clock count is {count})")]
    SlotOutOfRange { slot: usize, count: usize },

    #[error("horizontal position {left} is not finite")]
    InvalidPosition { left: f32 },

    #[error("tunable `{name}` is invalid: {reason}")]
    InvalidTunable { name: &'static str, reason: String },

    #[error("time component `{name}` = {value} is outside [0, {limit})")]
    TimeComponentOutOfRange { name: &'static str, value: u32, limit: u32 },
}

impl FaceError {
    pub(crate) fn tunable(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTunable { name, reason: reason.into() }
    }
}

pub type FaceResult<T> = Result<T, FaceError>;
