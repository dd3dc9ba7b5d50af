//! Turns live clocks into draw commands.
//!
//! Each face is a filled circle, each hand a rounded rectangle turned about
//! the face center, and the cap a rounded square on top.

use horloge_engine::coords::{CornerRadii, Rect, Vec2};
use horloge_engine::paint::{Color, Paint};
use horloge_engine::scene::shapes::Border;
use horloge_engine::scene::shapes::rounded_rect::Rotation;
use horloge_engine::scene::{DrawList, ZIndex};
use horloge_face::config::HandGeometry;
use horloge_face::{ClockInstance, Configuration, Rgb8, Scheduler};

const FACE_Z: ZIndex = ZIndex(0);
const HAND_Z: ZIndex = ZIndex(1);
const CAP_Z: ZIndex = ZIndex(2);

const CAP_COLOR: Rgb8 = Rgb8::BLACK;

pub fn background() -> Color {
    Color::from_srgb_u8(0xfa, 0xf8, 0xf2, 0xff)
}

#[inline]
fn color(c: Rgb8) -> Color {
    Color::from_srgb_u8(c.r, c.g, c.b, 0xff)
}

pub fn paint_scene(list: &mut DrawList, scheduler: &Scheduler) {
    let config = scheduler.config();
    for clock in scheduler.clocks() {
        paint_clock(list, clock, config);
    }
}

pub fn paint_clock(list: &mut DrawList, clock: &ClockInstance, config: &Configuration) {
    let bounds = clock.bounds(config);
    let (cx, cy) = bounds.center();
    let center = Vec2::new(cx, cy);

    list.push_circle(FACE_Z, center, bounds.size / 2.0, Paint::solid(color(clock.traits().color)), None);

    let angles = clock.angles();
    let hands = [
        (&config.hands.hour, angles.hour),
        (&config.hands.minute, angles.minute),
        (&config.hands.second, angles.second),
    ];
    for (geometry, degrees) in hands {
        push_hand(list, geometry, (bounds.left, bounds.top), bounds.size, degrees as f32, center);
    }

    let cap = config.center_cap;
    if cap > 0.0 {
        list.push_rounded_rect(
            CAP_Z,
            Rect::new(cx - cap / 2.0, cy - cap / 2.0, cap, cap),
            CornerRadii::all(cap / 2.0),
            Paint::solid(color(CAP_COLOR)),
            None,
        );
    }
}

fn push_hand(
    list: &mut DrawList,
    geometry: &HandGeometry,
    (left, top): (f32, f32),
    face_size: f32,
    degrees: f32,
    pivot: Vec2,
) {
    let local = geometry.local_box(face_size);
    let rect = Rect::new(left + local.left, top + local.top, local.width, local.height);

    let c = color(geometry.color);
    let paint = if geometry.fill { Paint::solid(c) } else { Paint::None };
    let border = (geometry.border > 0.0).then(|| Border::new(geometry.border, c));

    list.push_rotated_rounded_rect(
        HAND_Z,
        rect,
        CornerRadii::all(geometry.corner_radius()),
        paint,
        border,
        Rotation::new(degrees, pivot),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use horloge_engine::scene::shapes::rounded_rect::RoundedRectCmd;
    use horloge_engine::scene::DrawCmd;
    use horloge_face::{Extent, Layout, Lifetime, Time, Tunables};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    // 800x800, one slot, 80 px padding: a 640 px face at (100, 80).
    fn scheduler_at(time: Time) -> Scheduler {
        let t = Tunables::default()
            .clock_count(1)
            .layout(Layout::Static { left: 100.0 })
            .lifetime(Lifetime::Unlimited)
            .seed(7);
        let mut s = Scheduler::new(t, Extent::new(800.0, 800.0)).unwrap();
        s.spawn(Some(time), 0).unwrap();
        s
    }

    fn painted(s: &Scheduler) -> DrawList {
        let mut list = DrawList::new();
        paint_scene(&mut list, s);
        list
    }

    fn hands(list: &DrawList) -> Vec<&RoundedRectCmd> {
        list.items()
            .iter()
            .filter(|i| i.key.z == HAND_Z)
            .filter_map(|i| match &i.cmd {
                DrawCmd::RoundedRect(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn one_face_three_hands_one_cap() {
        let s = scheduler_at(Time::zero());
        let list = painted(&s);
        assert_eq!(list.len(), 5);

        let DrawCmd::Circle(face) = &list.items()[0].cmd else { panic!("face first") };
        assert!(close(face.center.x, 420.0));
        assert!(close(face.center.y, 400.0));
        assert!(close(face.radius, 320.0));
        assert_eq!(hands(&list).len(), 3);
    }

    #[test]
    fn hour_hand_box_points_up_from_center() {
        let s = scheduler_at(Time::zero());
        let list = painted(&s);
        let hour = hands(&list)[0];

        // 640 / 3.5 long, 640 / 15 wide.
        let (len, w) = (640.0 / 3.5, 640.0 / 15.0);
        assert!(close(hour.rect.size.x, w));
        assert!(close(hour.rect.size.y, len));
        assert!(close(hour.rect.origin.x, 420.0 - w / 2.0));
        assert!(close(hour.rect.origin.y, 400.0 + w / 2.0 - len));
        assert!(close(hour.radii.top_left, w / 2.0));
    }

    #[test]
    fn hollow_hour_hand_has_border_only() {
        let s = scheduler_at(Time::zero());
        let list = painted(&s);
        let hour = hands(&list)[0];
        assert_eq!(hour.paint, Paint::None);
        let border = hour.border.expect("hour hand border");
        assert!(close(border.width, 640.0 / 90.0));

        let minute = hands(&list)[1];
        assert!(minute.border.is_none());
        assert_eq!(minute.paint, Paint::solid(color(Rgb8::BLACK)));
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn hands_turn_about_face_center() {
        let s = scheduler_at(Time::from_hms(3, 0, 0).unwrap());
        let list = painted(&s);
        let hs = hands(&list);

        let hour = hs[0].rotation.expect("hour rotation");
        assert!(close(hour.degrees, 90.0));
        assert!(close(hour.pivot.x, 420.0));
        assert!(close(hour.pivot.y, 400.0));
        assert!(close(hs[1].rotation.expect("minute rotation").degrees, 0.0));
    }

    #[test]
    fn square_second_hand_has_no_radius() {
        let s = scheduler_at(Time::zero());
        let list = painted(&s);
        assert_eq!(hands(&list)[2].radii, CornerRadii::zero());
    }
}
