//! Timeline math for the content reveal that follows the banner fly-out.
//!
//! The reveal runs on a single [0, 1] time ratio. The two description
//! paragraphs fly apart during the first half; the join block grows in over
//! the last 60%, staying clipped to zero size until it is visibly underway.

use crate::anim::easing::ease_in_out_cubic;
use crate::config::check_in;

/// Rendered state of one description paragraph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DescriptionFrame {
    pub y_offset: f64,
    pub opacity: f64,
}

/// Rendered state of the join block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoinFrame {
    pub opacity: f64,
    pub scale: f64,
    /// Once true, the block's zero-size clamp is released for good.
    pub unclipped: bool,
}

/// Description `index` at reveal time `t`. The first paragraph flies up,
/// every other one flies down.
pub fn description_frame(t: f64, index: usize) -> DescriptionFrame {
    let eased = ease_in_out_cubic((t * 2.0).min(1.0));
    let direction = if index == 0 { -1.0 } else { 1.0 };
    DescriptionFrame {
        y_offset: direction * eased * check_in::DESCRIPTION_FLY_DISTANCE,
        opacity: (1.0 - eased).max(0.0),
    }
}

/// Join block at reveal time `t`.
pub fn join_frame(t: f64) -> JoinFrame {
    if t < check_in::JOIN_PHASE_START {
        return JoinFrame {
            opacity: 0.0,
            scale: check_in::JOIN_MIN_SCALE,
            unclipped: false,
        };
    }
    let sub = (t - check_in::JOIN_PHASE_START) / (1.0 - check_in::JOIN_PHASE_START);
    let eased = ease_in_out_cubic(sub);
    JoinFrame {
        opacity: eased,
        scale: eased.mul_add(1.0 - check_in::JOIN_MIN_SCALE, check_in::JOIN_MIN_SCALE),
        unclipped: sub > check_in::JOIN_UNCLIP_AT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions_start_in_place() {
        for index in 0..2 {
            let f = description_frame(0.0, index);
            assert_eq!(f.y_offset, 0.0);
            assert!((f.opacity - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn descriptions_are_gone_by_the_half_way_mark() {
        let up = description_frame(0.5, 0);
        let down = description_frame(0.5, 1);
        assert!((up.y_offset - -300.0).abs() < 1e-9);
        assert!((down.y_offset - 300.0).abs() < 1e-9);
        assert!((up.opacity - 0.0).abs() < f64::EPSILON);
        assert!((down.opacity - 0.0).abs() < f64::EPSILON);
        // and stay gone through the rest of the reveal
        let late = description_frame(0.9, 0);
        assert!((late.y_offset - -300.0).abs() < 1e-9);
    }

    #[test]
    fn join_is_hidden_through_the_first_phase() {
        for t in [0.0, 0.2, 0.399] {
            let f = join_frame(t);
            assert_eq!(f.opacity, 0.0);
            assert!((f.scale - 0.05).abs() < f64::EPSILON);
            assert!(!f.unclipped);
        }
    }

    #[test]
    fn join_unclips_once_its_growth_is_underway() {
        // sub-progress 0.1 is the release threshold
        assert!(!join_frame(0.45).unclipped); // sub ~0.083
        assert!(join_frame(0.47).unclipped); // sub ~0.117
        assert!(join_frame(1.0).unclipped);
    }

    #[test]
    fn join_finishes_full_size_and_opaque() {
        let f = join_frame(1.0);
        assert!((f.opacity - 1.0).abs() < f64::EPSILON);
        assert!((f.scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn join_growth_is_monotonic() {
        let mut prev = join_frame(0.4);
        for i in 1..=60 {
            let t = 0.4 + 0.6 * f64::from(i) / 60.0;
            let f = join_frame(t);
            assert!(f.opacity >= prev.opacity);
            assert!(f.scale >= prev.scale);
            prev = f;
        }
    }
}
