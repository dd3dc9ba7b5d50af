//! Scene (draw stream) types.
//!
//! The draw list stores renderer-agnostic commands and hands them back in a
//! deterministic paint order (z-index, then insertion order). Shape payloads
//! and their push helpers live under `scene::shapes`.

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;
