//! Input subsystem.
//!
//! The public types are platform-agnostic; `platform` translates winit events
//! into [`InputEvent`]s for the runtime.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, MouseButton, PointerButtonEvent};
