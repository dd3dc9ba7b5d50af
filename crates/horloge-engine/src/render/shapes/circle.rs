use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::circle::CircleCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::{BatchDesc, QuadBatch};

/// Renderer for `DrawCmd::Circle`.
///
/// Fill and border are evaluated from the distance field in the fragment
/// shader; the border sits inside the radius.
#[derive(Default)]
pub struct CircleRenderer {
    batch: QuadBatch,
    instances: Vec<CircleInstance>,
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &mut DrawList) {
        self.instances.clear();
        self.instances.extend(draw_list.iter_in_paint_order().filter_map(|item| match &item.cmd {
            DrawCmd::Circle(cmd) => CircleInstance::from_cmd(cmd),
            _ => None,
        }));
        self.batch.draw(&batch_desc(), ctx, target, &self.instances);
    }
}

fn batch_desc() -> BatchDesc {
    BatchDesc {
        name: "horloge circle",
        shader: include_str!("shaders/circle.wgsl"),
        instance_layout: CircleInstance::layout(),
        instance_size: std::mem::size_of::<CircleInstance>(),
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  center       [f32; 2]   loc 1
///  offset  8  radius_bw    [f32; 2]   loc 2  (.x = radius, .y = border width)
///  offset 16  fill         [f32; 4]   loc 3
///  offset 32  border_color [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_bw: [f32; 2],
    fill: [f32; 4],
    border_color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_bw
        3 => Float32x4, // fill
        4 => Float32x4  // border_color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` for degenerate or non-finite circles.
    fn from_cmd(cmd: &CircleCmd) -> Option<Self> {
        if !(cmd.radius.is_finite() && cmd.radius > 0.0 && cmd.center.is_finite()) {
            return None;
        }
        let fill = cmd.paint.fill_color();
        let (border_width, border_color) = match cmd.border {
            Some(b) if b.width > 0.0 && b.color.is_finite() => (b.width.min(cmd.radius), b.color.to_array()),
            _ => (0.0, [0.0; 4]),
        };
        if !fill.is_finite() {
            return None;
        }
        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius_bw: [cmd.radius, border_width],
            fill: fill.to_array(),
            border_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, Paint};
    use crate::scene::shapes::Border;

    fn cmd(radius: f32, border: Option<Border>) -> CircleCmd {
        CircleCmd { center: Vec2::new(10.0, 20.0), radius, paint: Paint::solid(Color::from_srgb_u8(255, 0, 0, 255)), border }
    }

    #[test]
    fn packs_center_radius_and_colors() {
        let border = Border::new(2.0, Color::from_srgb_u8(0, 0, 0, 255));
        let inst = CircleInstance::from_cmd(&cmd(8.0, Some(border))).unwrap();
        assert_eq!(inst.center, [10.0, 20.0]);
        assert_eq!(inst.radius_bw, [8.0, 2.0]);
        assert_eq!(inst.fill, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(inst.border_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn border_never_exceeds_radius() {
        let border = Border::new(50.0, Color::from_srgb_u8(0, 0, 0, 255));
        let inst = CircleInstance::from_cmd(&cmd(4.0, Some(border))).unwrap();
        assert_eq!(inst.radius_bw, [4.0, 4.0]);
    }

    #[test]
    fn skips_degenerate_circles() {
        assert!(CircleInstance::from_cmd(&cmd(0.0, None)).is_none());
        assert!(CircleInstance::from_cmd(&cmd(f32::NAN, None)).is_none());
    }

    #[test]
    fn instance_is_forty_eight_bytes() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 48);
    }
}
