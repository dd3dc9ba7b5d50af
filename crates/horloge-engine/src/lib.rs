//! Horloge engine crate.
//!
//! Window runtime, GPU device and the small 2D renderer the clock faces are
//! drawn with. Nothing here knows about clocks.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
