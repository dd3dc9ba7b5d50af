use crate::coords::{CornerRadii, Rect, Vec2};
use crate::paint::Paint;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Clockwise rotation, in degrees, about a pivot in logical pixels.
///
/// Negative angles turn counter-clockwise.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
    pub pivot: Vec2,
}

impl Rotation {
    #[inline]
    pub fn new(degrees: f32, pivot: Vec2) -> Self {
        Self { degrees, pivot }
    }

    /// `(sin, cos)` of the angle, as uploaded to the shader.
    #[inline]
    pub fn sin_cos(self) -> (f32, f32) {
        self.degrees.to_radians().sin_cos()
    }
}

/// Rounded rectangle draw payload.
///
/// `rect` is the unrotated box; `rotation` (if any) is applied to the whole
/// shape, border included.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub paint: Paint,
    pub border: Option<Border>,
    pub rotation: Option<Rotation>,
}

impl DrawList {
    /// Records a rounded rectangle draw command.
    #[inline]
    pub fn push_rounded_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        radii: CornerRadii,
        paint: Paint,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::RoundedRect(RoundedRectCmd { rect, radii, paint, border, rotation: None }));
    }

    /// Records a rounded rectangle turned by `rotation`.
    #[inline]
    pub fn push_rotated_rounded_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        radii: CornerRadii,
        paint: Paint,
        border: Option<Border>,
        rotation: Rotation,
    ) {
        self.push(
            z,
            DrawCmd::RoundedRect(RoundedRectCmd { rect, radii, paint, border, rotation: Some(rotation) }),
        );
    }
}
