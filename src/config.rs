//! Animation and popup tuning constants.
//!
//! Every magic number behind the scroll-driven effects lives here so the
//! feel of the site can be adjusted in one place.

/// Check-in section: banner fly-out driven by captured wheel input.
pub mod check_in {
    /// Wheel delta accumulated per unit of progress. Larger is slower.
    pub const WHEEL_DIVISOR: f64 = 2000.0;
    /// How far a banner travels along its direction vector at full progress (px).
    pub const MAX_FLY_DISTANCE: f64 = 800.0;
    /// Banner scale at full progress.
    pub const MIN_SCALE: f64 = 0.3;
    /// Fly-out direction per banner, in DOM order. Extra banners stay put.
    pub const FLY_DIRECTIONS: [(f64, f64); 7] = [
        (-0.8, -0.6), // up-left
        (0.9, -0.4),  // up-right
        (0.6, 0.8),   // down-right
        (-0.7, 0.7),  // down-left
        (0.0, -1.0),  // straight up
        (-1.0, 0.0),  // straight left
        (0.8, 0.6),   // down-right
    ];
    /// Pause between the last banner frame and the content reveal (ms).
    pub const SETTLE_DELAY_MS: u32 = 200;
    /// Window after arming during which the observer may not re-arm (ms).
    pub const ARM_GUARD_MS: u32 = 100;
    /// Content reveal duration (ms).
    pub const REVEAL_DURATION_MS: f64 = 2000.0;
    /// How far each description flies off vertically (px).
    pub const DESCRIPTION_FLY_DISTANCE: f64 = 300.0;
    /// Fraction of the reveal spent before the join block starts growing.
    pub const JOIN_PHASE_START: f64 = 0.4;
    /// Join block scale at the start of its growth.
    pub const JOIN_MIN_SCALE: f64 = 0.05;
    /// Join sub-progress past which its size clamp is released.
    pub const JOIN_UNCLIP_AT: f64 = 0.1;
    /// Delay before the faded descriptions are display-hidden (ms).
    pub const DESCRIPTION_HIDE_DELAY_MS: u32 = 100;
}

/// How-it-works section: cards collapsing into a deck.
pub mod how_it_works {
    /// Wheel delta accumulated per unit of progress, both directions.
    pub const WHEEL_DIVISOR: f64 = 800.0;
    /// Vertical offset each stacked card keeps below the one above (px).
    pub const CARD_OFFSET: f64 = 25.0;
    /// Gap between cards in the resting layout, from the stylesheet (px).
    pub const CARD_GAP: f64 = 32.0;
    /// Pause after the deck closes before scroll is released (ms).
    pub const SETTLE_DELAY_MS: u32 = 300;
    /// Section top must be within this of the viewport top to count as aligned (px).
    pub const TOP_TOLERANCE: f64 = 10.0;
    /// "Near top" upper bound as a fraction of viewport height.
    pub const NEAR_TOP_RATIO: f64 = 0.3;
    /// "Near top" lower bound: how far the top may have scrolled past (px).
    pub const NEAR_TOP_OVERSHOOT: f64 = 100.0;
    /// Overshoot limit when re-qualifying a played section (px).
    pub const REQUALIFY_OVERSHOOT: f64 = 50.0;
    /// Delay after the smooth alignment scroll before arming (ms).
    pub const ALIGN_DELAY_MS: u32 = 300;
    /// Extra margin around the viewport for the scroll position check (px).
    pub const SCROLL_CHECK_MARGIN: f64 = 200.0;
}

/// Popup open/close choreography.
pub mod popup {
    /// Close transition length; the node is hidden after this (ms).
    pub const CLOSE_ANIMATION_MS: u32 = 300;
    /// Delay before the first input of an opened popup is focused (ms).
    pub const FOCUS_DELAY_MS: u32 = 200;
    /// Delay between a hero submit and the thanks popup (ms).
    pub const THANKS_CHAIN_DELAY_MS: u32 = 100;
    /// Delay between a login submit and the confirm popup (ms).
    pub const CONFIRM_CHAIN_DELAY_MS: u32 = 300;
}

/// Profile progress ring.
pub mod ring {
    /// Circle circumference: 2 * PI * 85, the radius used in the SVG.
    pub const CIRCUMFERENCE: f64 = 534.07;
    /// Fill animation duration (ms).
    pub const DURATION_MS: f64 = 1500.0;
    /// Delay after mount before the fill starts (ms).
    pub const START_DELAY_MS: u32 = 300;
}

/// Copy-link feedback on the profile page.
pub mod toast {
    /// How long the toast stays fully shown (ms).
    pub const SHOW_MS: u32 = 2000;
    /// Fade-out length before the node is removed (ms).
    pub const FADE_MS: u32 = 300;
    /// How long the copy button keeps its `copied` class (ms).
    pub const COPIED_FLASH_MS: u32 = 200;
}
