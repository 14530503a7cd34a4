//! Frame math for the check-in banner fly-out.
//!
//! Each banner keeps the offset of its own center from the section center,
//! measured once when the section arms, and flies outward along a fixed
//! direction vector as the eased progress grows.

use crate::config::check_in;

/// A banner center's offset from the section container center, in px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// One rendered banner state: translation plus fade and shrink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BannerFrame {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
}

/// Fly direction for the banner at `index`. Banners beyond the authored
/// table do not move.
pub fn direction(index: usize) -> (f64, f64) {
    check_in::FLY_DIRECTIONS.get(index).copied().unwrap_or((0.0, 0.0))
}

/// Computes the banner frame for an already-eased progress value.
pub fn frame(initial: Offset, index: usize, eased: f64) -> BannerFrame {
    let (dx, dy) = direction(index);
    BannerFrame {
        x: dx.mul_add(check_in::MAX_FLY_DISTANCE * eased, initial.x),
        y: dy.mul_add(check_in::MAX_FLY_DISTANCE * eased, initial.y),
        scale: eased.mul_add(-0.7, 1.0).max(check_in::MIN_SCALE),
        opacity: (1.0 - eased).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_frame_keeps_the_initial_position() {
        let f = frame(Offset { x: 40.0, y: -12.5 }, 0, 0.0);
        assert!((f.x - 40.0).abs() < f64::EPSILON);
        assert!((f.y - -12.5).abs() < f64::EPSILON);
        assert!((f.scale - 1.0).abs() < f64::EPSILON);
        assert!((f.opacity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn full_progress_lands_on_direction_times_max_distance() {
        let f = frame(Offset::default(), 1, 1.0);
        assert!((f.x - 0.9 * 800.0).abs() < 1e-9);
        assert!((f.y - -0.4 * 800.0).abs() < 1e-9);
    }

    #[test]
    fn fade_and_shrink_hit_their_floors() {
        let f = frame(Offset::default(), 0, 1.0);
        assert!((f.opacity - 0.0).abs() < f64::EPSILON);
        assert!((f.scale - 0.3).abs() < 1e-12);
    }

    #[test]
    fn travel_is_monotonic_in_progress() {
        let initial = Offset { x: 10.0, y: 20.0 };
        let mut prev = 0.0;
        for i in 0..=20 {
            let eased = f64::from(i) / 20.0;
            let f = frame(initial, 4, eased);
            let dist = ((f.x - initial.x).powi(2) + (f.y - initial.y).powi(2)).sqrt();
            assert!(dist >= prev);
            prev = dist;
        }
    }

    #[test]
    fn banner_past_the_direction_table_stays_put() {
        let initial = Offset { x: 7.0, y: 9.0 };
        let f = frame(initial, 7, 1.0);
        assert!((f.x - initial.x).abs() < f64::EPSILON);
        assert!((f.y - initial.y).abs() < f64::EPSILON);
        // it still fades and shrinks with the rest
        assert!((f.opacity - 0.0).abs() < f64::EPSILON);
    }
}
