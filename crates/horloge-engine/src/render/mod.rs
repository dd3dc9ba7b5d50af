//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw lists and issue wgpu commands. Each renderer
//! owns its pipeline and buffers and builds them lazily on first use.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The vertex shader converts to NDC using a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
