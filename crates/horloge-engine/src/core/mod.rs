//! Contract between the runtime loop and the application.
//!
//! The runtime owns the platform loop; applications implement [`App`] and see
//! only the per-frame [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub(crate) use ctx::logical_viewport;
