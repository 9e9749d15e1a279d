//! Swipe direction classification
//!
//! The area around the initial touch is split into eight octants:
//!
//! ```text
//! |\ 2 | 3 /|
//! | 1 \|/ 4 |
//! |----+----|
//! | 5 /|\ 8 |
//! |/ 6 | 7 \|
//! ```
//!
//! Horizontal-dominant movements (`|dx| >= |dy|`) land in the outer
//! octants 1, 4, 5, 8. A zero `dx` belongs to the left half and a zero `dy`
//! to the upper half.

use serde::Deserialize;

/// Where the pointer is relative to its initial touch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Direction {
    /// Not swiped further than the threshold
    #[default]
    Center = 0,
    LeftUp = 1,
    UpLeft = 2,
    UpRight = 3,
    RightUp = 4,
    LeftDown = 5,
    DownLeft = 6,
    DownRight = 7,
    RightDown = 8,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::Center,
        Direction::LeftUp,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::RightUp,
        Direction::LeftDown,
        Direction::DownLeft,
        Direction::DownRight,
        Direction::RightDown,
    ];

    /// Classify a movement of `(dx, dy)` from the initial touch
    ///
    /// `dist` is the Manhattan distance of the movement; below `threshold`
    /// the pointer hasn't swiped.
    pub fn classify(dx: f32, dy: f32, dist: f32, threshold: f32) -> Direction {
        if dist < threshold {
            return Direction::Center;
        }

        let horizontal = dx.abs() >= dy.abs();
        match (dy > 0., dx > 0., horizontal) {
            (false, false, true) => Direction::LeftUp,
            (false, false, false) => Direction::UpLeft,
            (false, true, false) => Direction::UpRight,
            (false, true, true) => Direction::RightUp,
            (true, false, true) => Direction::LeftDown,
            (true, false, false) => Direction::DownLeft,
            (true, true, false) => Direction::DownRight,
            (true, true, true) => Direction::RightDown,
        }
    }

    /// Slot index of this direction, 0 for the center
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The other octant of the same quadrant
    pub const fn sibling(self) -> Direction {
        match self {
            Direction::Center => Direction::Center,
            Direction::LeftUp => Direction::UpLeft,
            Direction::UpLeft => Direction::LeftUp,
            Direction::UpRight => Direction::RightUp,
            Direction::RightUp => Direction::UpRight,
            Direction::LeftDown => Direction::DownLeft,
            Direction::DownLeft => Direction::LeftDown,
            Direction::DownRight => Direction::RightDown,
            Direction::RightDown => Direction::DownRight,
        }
    }

    pub const fn is_center(self) -> bool {
        matches!(self, Direction::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const T: f32 = 20.;

    fn classify(dx: f32, dy: f32) -> Direction {
        Direction::classify(dx, dy, dx.abs() + dy.abs(), T)
    }

    #[test]
    fn test_below_threshold_is_center() {
        assert_eq!(classify(T - 1., 0.), Direction::Center);
        assert_eq!(classify(5., -5.), Direction::Center);
        assert_eq!(classify(0., 0.), Direction::Center);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(classify(T, 0.), Direction::RightUp);
    }

    #[test]
    fn test_axes() {
        assert_eq!(classify(T + 1., 0.), Direction::RightUp);
        assert_eq!(classify(-(T + 1.), 0.), Direction::LeftUp);
        assert_eq!(classify(0., -(T + 1.)), Direction::UpLeft);
        assert_eq!(classify(0., T + 1.), Direction::DownLeft);
    }

    #[test]
    fn test_octants() {
        assert_eq!(classify(-30., -10.), Direction::LeftUp);
        assert_eq!(classify(-10., -30.), Direction::UpLeft);
        assert_eq!(classify(10., -30.), Direction::UpRight);
        assert_eq!(classify(30., -10.), Direction::RightUp);
        assert_eq!(classify(-30., 10.), Direction::LeftDown);
        assert_eq!(classify(-10., 30.), Direction::DownLeft);
        assert_eq!(classify(10., 30.), Direction::DownRight);
        assert_eq!(classify(30., 10.), Direction::RightDown);
    }

    #[test]
    fn test_diagonal_ties_are_horizontal() {
        assert_eq!(classify(-15., -15.), Direction::LeftUp);
        assert_eq!(classify(15., -15.), Direction::RightUp);
        assert_eq!(classify(-15., 15.), Direction::LeftDown);
        assert_eq!(classify(15., 15.), Direction::RightDown);
    }

    #[test]
    fn test_sibling_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.sibling().sibling(), d);
        }
        assert_eq!(Direction::Center.sibling(), Direction::Center);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }

    proptest! {
        #[test]
        fn swipes_never_classify_as_center(dx in -500f32..500., dy in -500f32..500.) {
            let dist = dx.abs() + dy.abs();
            prop_assume!(dist >= T);
            prop_assert_ne!(classify(dx, dy), Direction::Center);
        }

        #[test]
        fn octant_agrees_with_signs(dx in -500f32..500., dy in -500f32..500.) {
            let d = classify(dx, dy);
            prop_assume!(!d.is_center());
            let right = matches!(
                d,
                Direction::UpRight | Direction::RightUp | Direction::DownRight | Direction::RightDown
            );
            let down = matches!(
                d,
                Direction::LeftDown | Direction::DownLeft | Direction::DownRight | Direction::RightDown
            );
            prop_assert_eq!(right, dx > 0.);
            prop_assert_eq!(down, dy > 0.);
        }
    }
}
