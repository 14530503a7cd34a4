//! Frame math for the profile progress ring.
//!
//! The SVG circle is drawn with a dash offset equal to the full
//! circumference (empty) and animates down to the offset matching the
//! target percentage. The number in the middle counts up alongside.

use crate::anim::easing::ease_out_cubic;
use crate::config::ring;

/// One rendered ring state: dash offset plus the percentage label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingFrame {
    pub offset: f64,
    pub label: i32,
}

/// Reads the target percentage from a `data-target` attribute value or the
/// element's text. Anything non-numeric or outside 0..=100 disables the
/// animation.
pub fn parse_target(raw: &str) -> Option<i32> {
    let cleaned = raw.trim().trim_end_matches('%').trim();
    cleaned.parse::<i32>().ok().filter(|p| (0..=100).contains(p))
}

/// Dash offset that displays `percent` worth of ring.
pub fn target_offset(percent: i32) -> f64 {
    ring::CIRCUMFERENCE * (1.0 - f64::from(percent) / 100.0)
}

/// Ring state at time ratio `t` of the fill animation. The final frame
/// snaps to the exact target values instead of trusting the interpolation
/// to land there.
pub fn frame(t: f64, target_percent: i32) -> RingFrame {
    if t >= 1.0 {
        return RingFrame {
            offset: target_offset(target_percent),
            label: target_percent,
        };
    }
    let eased = ease_out_cubic(t);
    let target = target_offset(target_percent);
    RingFrame {
        offset: (target - ring::CIRCUMFERENCE).mul_add(eased, ring::CIRCUMFERENCE),
        label: (eased * f64::from(target_percent)).floor() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_an_empty_ring() {
        let f = frame(0.0, 73);
        assert!((f.offset - 534.07).abs() < f64::EPSILON);
        assert_eq!(f.label, 0);
    }

    #[test]
    fn finishes_exactly_on_target() {
        let f = frame(1.0, 73);
        assert!((f.offset - 534.07 * (1.0 - 0.73)).abs() < 1e-9);
        assert_eq!(f.label, 73);
        // past-the-end frames hold the target
        let late = frame(1.5, 73);
        assert_eq!(late, f);
    }

    #[test]
    fn offset_shrinks_and_label_grows_monotonically() {
        let mut prev = frame(0.0, 73);
        for i in 1..=50 {
            let f = frame(f64::from(i) / 50.0, 73);
            assert!(f.offset <= prev.offset);
            assert!(f.label >= prev.label);
            assert!(f.label <= 73);
            prev = f;
        }
    }

    #[test]
    fn zero_and_full_targets() {
        assert!((frame(1.0, 0).offset - 534.07).abs() < 1e-9);
        assert!((frame(1.0, 100).offset - 0.0).abs() < 1e-9);
    }

    #[test]
    fn parse_target_accepts_plain_and_percent_forms() {
        assert_eq!(parse_target("73"), Some(73));
        assert_eq!(parse_target("73%"), Some(73));
        assert_eq!(parse_target(" 100% "), Some(100));
        assert_eq!(parse_target("0"), Some(0));
    }

    #[test]
    fn parse_target_rejects_out_of_range_and_garbage() {
        assert_eq!(parse_target("101"), None);
        assert_eq!(parse_target("-1"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target("12.5"), None);
    }
}
