//! Paint model shared between the scene and the renderers.
//!
//! Colors are linear-blend premultiplied RGBA. Geometry types stay in `coords`.

pub mod color;

pub use color::Color;

/// Fill source for a shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Paint {
    /// No fill; only the border (if any) is drawn.
    None,
    Solid(Color),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    /// Premultiplied fill color; fully transparent for `None`.
    #[inline]
    pub fn fill_color(&self) -> Color {
        match self {
            Paint::None => Color::transparent(),
            Paint::Solid(c) => *c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_paints_nothing() {
        assert_eq!(Paint::None.fill_color(), Color::transparent());
    }

    #[test]
    fn solid_passes_color_through() {
        let c = Color::from_srgb_u8(10, 20, 30, 255);
        assert_eq!(Paint::solid(c).fill_color(), c);
    }
}
