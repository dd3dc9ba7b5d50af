//! Horloge clock-face model.
//!
//! Everything here is plain data and arithmetic: no window, no GPU. The studio
//! binary drives a [`Scheduler`] once per frame and paints what it reads back.

pub mod angle;
pub mod clock;
pub mod config;
pub mod error;
pub mod registry;
pub mod scheduler;
pub mod time;
pub mod timer;

pub use angle::{HandAngles, SecondHand};
pub use clock::{ClockId, ClockInstance, ClockState, FaceBounds};
pub use config::{Configuration, Extent, Layout, Lifetime, Rgb8, TickPolicy, Tunables};
pub use error::{FaceError, FaceResult};
pub use registry::ClockRegistry;
pub use scheduler::{FrameReport, Scheduler};
pub use time::Time;
