//! Easing curves shared by the scroll and reveal animations.
//!
//! Both map [0, 1] onto [0, 1], fix the endpoints and are monotonic, so a
//! clamped progress value stays a valid progress value after shaping.

/// Cubic ease-in-out: slow start, fast middle, slow end.
#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let t1 = 2.0f64.mul_add(t, -2.0);
        (0.5 * t1 * t1).mul_add(t1, 1.0)
    }
}

/// Cubic ease-out: fast start, decelerating finish.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let t1 = t - 1.0;
    (t1 * t1).mul_add(t1, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_in_out_cubic_endpoints() {
        assert!((ease_in_out_cubic(0.0) - 0.0).abs() < f64::EPSILON);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < f64::EPSILON);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ease_in_out_cubic_shape() {
        // Slower than linear early, faster than linear late
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn ease_out_cubic_endpoints() {
        assert!((ease_out_cubic(0.0) - 0.0).abs() < f64::EPSILON);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ease_out_cubic_shape() {
        // Ahead of linear over the whole interior
        assert!(ease_out_cubic(0.25) > 0.25);
        assert!(ease_out_cubic(0.5) > 0.5);
        assert!(ease_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn curves_are_monotonic() {
        let mut prev_io = 0.0;
        let mut prev_o = 0.0;
        for i in 0..=100 {
            let t = f64::from(i) / 100.0;
            let io = ease_in_out_cubic(t);
            let o = ease_out_cubic(t);
            assert!(io >= prev_io);
            assert!(o >= prev_o);
            assert!((0.0..=1.0).contains(&io));
            assert!((0.0..=1.0).contains(&o));
            prev_io = io;
            prev_o = o;
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert!((ease_in_out_cubic(-1.0) - 0.0).abs() < f64::EPSILON);
        assert!((ease_in_out_cubic(2.0) - 1.0).abs() < f64::EPSILON);
        assert!((ease_out_cubic(-1.0) - 0.0).abs() < f64::EPSILON);
        assert!((ease_out_cubic(2.0) - 1.0).abs() < f64::EPSILON);
    }
}
