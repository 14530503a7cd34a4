//! Page scroll lock shared by the popup layer and the scroll-captured
//! sections.
//!
//! Locking pins the body with `position: fixed` at the current scroll
//! offset; unlocking clears the styles and jumps back to the saved offset.
//! Each holder owns its own `ScrollLock`, and the pair is save-once /
//! restore-once: a second lock keeps the first saved offset, a second
//! unlock does nothing.

pub struct ScrollLock {
    saved_y: Option<f64>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self { saved_y: None }
    }

    pub fn is_locked(&self) -> bool {
        self.saved_y.is_some()
    }

    /// Records the offset unless one is already held. Returns whether the
    /// lock was newly taken.
    fn save(&mut self, y: f64) -> bool {
        if self.saved_y.is_some() {
            return false;
        }
        self.saved_y = Some(y);
        true
    }

    /// Gives back the saved offset, exactly once.
    fn restore(&mut self) -> Option<f64> {
        self.saved_y.take()
    }

    /// Freezes the page at its current scroll offset.
    pub fn lock(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let y = window.scroll_y().unwrap_or(0.0);
        if !self.save(y) {
            return;
        }
        if let Some(body) = window.document().and_then(|d| d.body()) {
            let style = body.style();
            let _ = style.set_property("position", "fixed");
            let _ = style.set_property("top", &format!("-{y}px"));
            let _ = style.set_property("width", "100%");
            let _ = style.set_property("overflow", "hidden");
        }
    }

    /// Releases the page and restores the saved scroll offset.
    pub fn unlock(&mut self) {
        let Some(y) = self.restore() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(body) = window.document().and_then(|d| d.body()) {
            let style = body.style();
            let _ = style.remove_property("position");
            let _ = style.remove_property("top");
            let _ = style.remove_property("width");
            let _ = style.remove_property("overflow");
        }
        window.scroll_to_with_x_and_y(0.0, y);
    }
}

impl Default for ScrollLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_save_keeps_the_first_offset() {
        let mut lock = ScrollLock::new();
        assert!(lock.save(100.0));
        assert!(!lock.save(250.0));
        assert_eq!(lock.restore(), Some(100.0));
    }

    #[test]
    fn restore_yields_the_offset_exactly_once() {
        let mut lock = ScrollLock::new();
        lock.save(42.0);
        assert_eq!(lock.restore(), Some(42.0));
        assert_eq!(lock.restore(), None);
    }

    #[test]
    fn lock_state_tracks_save_and_restore() {
        let mut lock = ScrollLock::new();
        assert!(!lock.is_locked());
        lock.save(0.0);
        assert!(lock.is_locked());
        lock.restore();
        assert!(!lock.is_locked());
    }

    #[test]
    fn lock_is_reusable_after_a_full_cycle() {
        let mut lock = ScrollLock::new();
        lock.save(10.0);
        lock.restore();
        assert!(lock.save(77.0));
        assert_eq!(lock.restore(), Some(77.0));
    }
}
