//! Wheel-driven progress state machine behind the scroll-captured sections.
//!
//! The session only tracks numbers: activation, wheel deltas and completion
//! flags come in, a clamped [0, 1] progress value comes out. The DOM side
//! (listeners, scroll lock, styles) lives with the section runtimes.

/// How wheel deltas map onto progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelPolicy {
    /// Any wheel movement advances progress; there is no way back.
    OneWay,
    /// Scrolling down advances, scrolling up rewinds.
    Reversible,
}

/// Per-activation animation state for one scroll-captured section.
#[derive(Debug)]
pub struct HijackSession {
    policy: WheelPolicy,
    divisor: f64,
    progress: f64,
    active: bool,
    has_played: bool,
}

impl HijackSession {
    pub fn new(policy: WheelPolicy, divisor: f64) -> Self {
        Self {
            policy,
            divisor,
            progress: 0.0,
            active: false,
            has_played: false,
        }
    }

    /// Starts a fresh session. Progress restarts from zero.
    pub fn activate(&mut self) {
        self.active = true;
        self.progress = 0.0;
    }

    /// Ends the session keeping whatever progress it reached.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Early exit: the trigger left before completion. Progress is thrown
    /// away so the next activation starts clean; the played flag is not
    /// touched because nothing finished.
    pub fn abort(&mut self) {
        self.active = false;
        self.progress = 0.0;
    }

    /// Feeds one wheel delta into the session and returns the new progress.
    /// Inactive sessions ignore input.
    pub fn feed(&mut self, delta_y: f64) -> f64 {
        if !self.active {
            return self.progress;
        }
        let step = delta_y.abs() / self.divisor;
        self.progress = match self.policy {
            WheelPolicy::OneWay => (self.progress + step).min(1.0),
            WheelPolicy::Reversible => {
                if delta_y > 0.0 {
                    (self.progress + step).min(1.0)
                } else {
                    (self.progress - step).max(0.0)
                }
            }
        };
        self.progress
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn mark_played(&mut self) {
        self.has_played = true;
    }

    pub fn clear_played(&mut self) {
        self.has_played = false;
    }

    pub fn has_played(&self) -> bool {
        self.has_played
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_way() -> HijackSession {
        let mut s = HijackSession::new(WheelPolicy::OneWay, 2000.0);
        s.activate();
        s
    }

    fn reversible() -> HijackSession {
        let mut s = HijackSession::new(WheelPolicy::Reversible, 800.0);
        s.activate();
        s
    }

    #[test]
    fn one_way_progress_never_decreases() {
        let mut s = one_way();
        let deltas = [120.0, -250.0, 3.0, -1.0, 999.0, -4000.0, 80.0];
        let mut prev = 0.0;
        for d in deltas {
            let p = s.feed(d);
            assert!(p >= prev, "progress went backwards on delta {d}");
            assert!((0.0..=1.0).contains(&p));
            prev = p;
        }
    }

    #[test]
    fn seven_full_notches_complete_the_banner_session() {
        // 7 * 300 = 2100 total delta against a divisor of 2000
        let mut s = one_way();
        for _ in 0..6 {
            assert!(s.feed(300.0) < 1.0);
        }
        assert_eq!(s.feed(300.0), 1.0);
        assert!(s.is_complete());
    }

    #[test]
    fn one_way_clamps_at_one() {
        let mut s = one_way();
        s.feed(1_000_000.0);
        assert_eq!(s.progress(), 1.0);
        s.feed(500.0);
        assert_eq!(s.progress(), 1.0);
    }

    #[test]
    fn reversible_moves_both_ways_and_clamps() {
        let mut s = reversible();
        s.feed(400.0);
        assert!((s.progress() - 0.5).abs() < 1e-12);
        s.feed(-200.0);
        assert!((s.progress() - 0.25).abs() < 1e-12);
        s.feed(-10_000.0);
        assert_eq!(s.progress(), 0.0);
        s.feed(10_000.0);
        assert_eq!(s.progress(), 1.0);
    }

    #[test]
    fn rewinding_to_zero_keeps_the_session_active() {
        let mut s = reversible();
        s.feed(800.0);
        s.feed(-1600.0);
        assert_eq!(s.progress(), 0.0);
        assert!(s.is_active());
        // and forward motion still works afterwards
        s.feed(400.0);
        assert!(s.progress() > 0.0);
    }

    #[test]
    fn inactive_session_ignores_input() {
        let mut s = HijackSession::new(WheelPolicy::OneWay, 2000.0);
        assert_eq!(s.feed(5000.0), 0.0);
        s.activate();
        s.feed(5000.0);
        s.deactivate();
        let frozen = s.progress();
        assert_eq!(s.feed(5000.0), frozen);
    }

    #[test]
    fn abort_resets_progress_but_not_the_played_flag() {
        let mut s = one_way();
        s.feed(900.0);
        s.abort();
        assert_eq!(s.progress(), 0.0);
        assert!(!s.is_active());
        assert!(!s.has_played());

        s.activate();
        s.feed(99_999.0);
        s.mark_played();
        s.abort();
        assert!(s.has_played(), "abort must not clear a completed run");
    }

    #[test]
    fn activation_restarts_progress() {
        let mut s = one_way();
        s.feed(1000.0);
        s.deactivate();
        s.activate();
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn played_flag_round_trip() {
        let mut s = one_way();
        s.mark_played();
        assert!(s.has_played());
        s.clear_played();
        assert!(!s.has_played());
    }
}
