//! Frame math for the how-it-works card deck.
//!
//! Global progress is split into one sub-range per card, so the cards close
//! into the deck one after another instead of all at once. Card 0 is the
//! base of the deck and never moves; card `i` travels up from its resting
//! position to `CARD_OFFSET * i` below the base.

use crate::anim::easing::ease_in_out_cubic;
use crate::config::how_it_works;

/// One rendered card state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardFrame {
    pub y_offset: f64,
    pub z_index: i32,
}

/// Maps global progress onto the sub-range [i/n, (i+1)/n) owned by card `i`,
/// clamped to [0, 1].
pub fn slot_progress(global: f64, index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    let start = index as f64 / n;
    let end = (index as f64 + 1.0) / n;
    if global < start {
        0.0
    } else if global >= end {
        1.0
    } else {
        (global - start) / (end - start)
    }
}

/// Computes the frame for card `index` at the given global progress.
/// `heights` holds the measured resting heights of all cards in DOM order.
pub fn frame(index: usize, count: usize, global: f64, heights: &[f64]) -> CardFrame {
    let eased = ease_in_out_cubic(slot_progress(global, index, count));

    let y_offset = if index == 0 {
        0.0
    } else {
        let initial_distance: f64 = heights
            .iter()
            .take(index)
            .map(|h| h + how_it_works::CARD_GAP)
            .sum();
        let final_distance = how_it_works::CARD_OFFSET * index as f64;
        -(initial_distance - final_distance) * eased
    };

    CardFrame {
        y_offset,
        z_index: index as i32 + 1 + (eased * 5.0).floor() as i32,
    }
}

/// Z-index a card holds in the resting layout.
pub fn resting_z_index(index: usize) -> i32 {
    index as i32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_progress_is_zero_before_the_cards_turn() {
        // Card i must not move while global progress is below i/n
        for (global, index) in [(0.0, 1), (0.24, 1), (0.49, 2), (0.1, 3)] {
            assert_eq!(slot_progress(global, index, 4), 0.0, "card {index} at {global}");
        }
    }

    #[test]
    fn slot_progress_is_one_past_the_cards_turn() {
        for (global, index) in [(0.25, 0), (0.5, 1), (1.0, 3), (0.76, 2)] {
            assert_eq!(slot_progress(global, index, 4), 1.0, "card {index} at {global}");
        }
    }

    #[test]
    fn slot_progress_interpolates_inside_the_turn() {
        // halfway through card 1's quarter of the range
        let p = slot_progress(0.375, 1, 4);
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn slot_progress_handles_empty_deck() {
        assert_eq!(slot_progress(0.5, 0, 0), 0.0);
    }

    #[test]
    fn base_card_never_moves() {
        let heights = [120.0, 140.0, 130.0];
        for global in [0.0, 0.3, 0.7, 1.0] {
            let f = frame(0, 3, global, &heights);
            assert_eq!(f.y_offset, 0.0);
        }
    }

    #[test]
    fn closed_deck_leaves_each_card_at_its_shelf_offset() {
        let heights = [100.0, 100.0, 100.0];
        // card 2 starts (100 + 32) * 2 = 264 below the base, ends at 25 * 2 = 50
        let f = frame(2, 3, 1.0, &heights);
        assert!((f.y_offset - -214.0).abs() < 1e-9);

        let f1 = frame(1, 3, 1.0, &heights);
        assert!((f1.y_offset - -107.0).abs() < 1e-9);
    }

    #[test]
    fn open_deck_has_no_translation() {
        let heights = [100.0, 120.0];
        let f = frame(1, 2, 0.0, &heights);
        assert_eq!(f.y_offset, 0.0);
        assert_eq!(f.z_index, resting_z_index(1));
    }

    #[test]
    fn z_index_climbs_with_the_card() {
        let heights = [100.0, 100.0];
        let at_rest = frame(1, 2, 0.5, &heights);
        let closed = frame(1, 2, 1.0, &heights);
        assert_eq!(at_rest.z_index, 2); // sub-progress 0 at global 0.5
        assert_eq!(closed.z_index, 2 + 5);
    }

    #[test]
    fn card_travel_is_monotonic() {
        let heights = [110.0, 95.0, 140.0, 80.0];
        let mut prev = 0.0;
        for i in 0..=40 {
            let global = f64::from(i) / 40.0;
            let f = frame(3, 4, global, &heights);
            assert!(f.y_offset <= prev + 1e-12, "card rose then fell at {global}");
            prev = f.y_offset;
        }
    }
}
