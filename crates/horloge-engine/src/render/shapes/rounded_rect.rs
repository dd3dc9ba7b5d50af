use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::rounded_rect::RoundedRectCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::{BatchDesc, QuadBatch};

/// Renderer for `DrawCmd::RoundedRect`.
///
/// The quad is turned around the command's pivot in the vertex stage and the
/// rounded-box distance field is evaluated in unrotated local space, so a
/// rotated rect keeps crisp corners and borders.
#[derive(Default)]
pub struct RoundedRectRenderer {
    batch: QuadBatch,
    instances: Vec<RoundedRectInstance>,
}

impl RoundedRectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &mut DrawList) {
        self.instances.clear();
        self.instances.extend(draw_list.iter_in_paint_order().filter_map(|item| match &item.cmd {
            DrawCmd::RoundedRect(cmd) => RoundedRectInstance::from_cmd(cmd),
            _ => None,
        }));
        self.batch.draw(&batch_desc(), ctx, target, &self.instances);
    }
}

fn batch_desc() -> BatchDesc {
    BatchDesc {
        name: "horloge rounded_rect",
        shader: include_str!("shaders/rounded_rect.wgsl"),
        instance_layout: RoundedRectInstance::layout(),
        instance_size: std::mem::size_of::<RoundedRectInstance>(),
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (88 bytes):
///
///  offset  0  origin       [f32; 2]   loc 1
///  offset  8  size         [f32; 2]   loc 2
///  offset 16  radii        [f32; 4]   loc 3  (tl, tr, br, bl)
///  offset 32  fill         [f32; 4]   loc 4
///  offset 48  border_color [f32; 4]   loc 5
///  offset 64  pivot        [f32; 2]   loc 6
///  offset 72  sin_cos      [f32; 2]   loc 7
///  offset 80  border_pad   [f32; 2]   loc 8  (.x = border width)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct RoundedRectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    radii: [f32; 4],
    fill: [f32; 4],
    border_color: [f32; 4],
    pivot: [f32; 2],
    sin_cos: [f32; 2],
    border_pad: [f32; 2],
}

impl RoundedRectInstance {
    const ATTRS: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4, // radii
        4 => Float32x4, // fill
        5 => Float32x4, // border_color
        6 => Float32x2, // pivot
        7 => Float32x2, // sin_cos
        8 => Float32x2  // border_pad
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RoundedRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` for empty or non-finite rects.
    ///
    /// Radii and border width are clamped to half the shorter side.
    fn from_cmd(cmd: &RoundedRectCmd) -> Option<Self> {
        let r = cmd.rect.normalized();
        if r.is_empty() || !r.is_finite() {
            return None;
        }
        let fill = cmd.paint.fill_color();
        if !fill.is_finite() {
            return None;
        }

        let half_min = r.size.x.min(r.size.y) / 2.0;
        let (border_width, border_color) = match cmd.border {
            Some(b) if b.width > 0.0 && b.color.is_finite() => (b.width.min(half_min), b.color.to_array()),
            _ => (0.0, [0.0; 4]),
        };

        let (pivot, sin_cos) = match cmd.rotation {
            Some(rot) if rot.degrees.is_finite() && rot.pivot.is_finite() => {
                let (s, c) = rot.sin_cos();
                ([rot.pivot.x, rot.pivot.y], [s, c])
            }
            _ => {
                let center = r.center();
                ([center.x, center.y], [0.0, 1.0])
            }
        };

        Some(Self {
            origin: [r.origin.x, r.origin.y],
            size: [r.size.x, r.size.y],
            radii: cmd.radii.clamped(half_min).to_array(),
            fill: fill.to_array(),
            border_color,
            pivot,
            sin_cos,
            border_pad: [border_width, 0.0],
        })
    }
}
