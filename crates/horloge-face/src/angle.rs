use crate::time::Time;

/// How the second hand moves.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SecondHand {
    /// Continuous sweep from fractional seconds.
    #[default]
    Sweep,
    /// One jump per whole second.
    Step,
}

/// Rotation of a hand in degrees, clockwise from 12 o'clock.
///
/// `smooth == false` snaps back by `360 mod (360 / max_value)`, which is zero
/// whenever `max_value` divides 360 (12 and 60 both do). `reverse` mirrors the
/// hand so it turns counter-clockwise.
pub fn angle_for_hand(value: f64, max_value: f64, smooth: bool, reverse: bool) -> f64 {
    let mut angle = 360.0 * value / max_value;
    if !smooth {
        angle -= 360.0 % (360.0 / max_value);
    }
    if reverse { -angle } else { angle }
}

/// Angles for the three hands of one face.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub fn compute(time: Time, reverse: bool, second_hand: SecondHand) -> Self {
        let h = time.hours(true);
        let m = time.minutes(true);
        let s = time.seconds(false);

        let second = match second_hand {
            SecondHand::Sweep => angle_for_hand(s, 60.0, true, reverse),
            SecondHand::Step => angle_for_hand(time.seconds(true), 60.0, false, reverse),
        };

        Self {
            hour: angle_for_hand(h + m / 60.0 + s / 3600.0, 12.0, true, reverse),
            minute: angle_for_hand(m + s / 60.0, 60.0, true, reverse),
            second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── angle_for_hand ────────────────────────────────────────────────────

    #[test]
    fn zero_value_is_zero_angle() {
        assert_eq!(angle_for_hand(0.0, 12.0, true, false), 0.0);
        assert_eq!(angle_for_hand(0.0, 60.0, false, false), 0.0);
    }

    #[test]
    fn quarter_turns() {
        assert_eq!(angle_for_hand(3.0, 12.0, true, false), 90.0);
        assert_eq!(angle_for_hand(30.0, 60.0, true, false), 180.0);
        assert_eq!(angle_for_hand(45.0, 60.0, false, false), 270.0);
    }

    #[test]
    fn smooth_is_monotonic() {
        for max in [12.0, 60.0, 7.0] {
            let mut prev = angle_for_hand(0.0, max, true, false);
            let mut v = 0.0;
            while v < max {
                let a = angle_for_hand(v, max, true, false);
                assert!(a >= prev, "max {max} v {v}");
                prev = a;
                v += max / 997.0;
            }
        }
    }

    #[test]
    fn reverse_negates() {
        for (v, max, smooth) in [(1.5, 12.0, true), (17.0, 60.0, false), (3.0, 7.0, false)] {
            assert_eq!(
                angle_for_hand(v, max, smooth, true),
                -angle_for_hand(v, max, smooth, false)
            );
        }
    }

    #[test]
    fn snap_only_matters_for_uneven_divisors() {
        // 360 / 7 does not divide 360 evenly, so the discrete angle is shifted.
        let smooth = angle_for_hand(1.0, 7.0, true, false);
        let snapped = angle_for_hand(1.0, 7.0, false, false);
        assert!((smooth - snapped - 360.0 % (360.0 / 7.0)).abs() < 1e-9);
        assert_eq!(angle_for_hand(5.0, 60.0, false, false), angle_for_hand(5.0, 60.0, true, false));
    }

    // ── HandAngles ────────────────────────────────────────────────────────

    #[test]
    fn three_thirty() {
        let t = Time::from_hms(3, 30, 0).unwrap();
        let a = HandAngles::compute(t, false, SecondHand::Step);
        assert_eq!(a.hour, 105.0);
        assert_eq!(a.minute, 180.0);
        assert_eq!(a.second, 0.0);
    }

    #[test]
    fn sweep_moves_between_seconds() {
        let t = Time::from_millis(10_500.0);
        let sweep = HandAngles::compute(t, false, SecondHand::Sweep);
        let step = HandAngles::compute(t, false, SecondHand::Step);
        assert_eq!(sweep.second, 63.0);
        assert_eq!(step.second, 60.0);
    }

    #[test]
    fn reversed_face_mirrors_every_hand() {
        let t = Time::from_hms(7, 12, 45).unwrap();
        let fwd = HandAngles::compute(t, false, SecondHand::Sweep);
        let rev = HandAngles::compute(t, true, SecondHand::Sweep);
        assert_eq!(rev.hour, -fwd.hour);
        assert_eq!(rev.minute, -fwd.minute);
        assert_eq!(rev.second, -fwd.second);
    }
}
