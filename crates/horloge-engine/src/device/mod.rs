//! GPU device + surface management.
//!
//! Creates the wgpu adapter/device/queue for a window, keeps the surface
//! configured across resizes, and hands out one frame (encoder + view) at a
//! time.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
