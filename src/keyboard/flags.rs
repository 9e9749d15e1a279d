//! Flag vocabulary carried by key values
//!
//! A value's flags describe how the pointer engine treats it (repeat, latch,
//! lock). Modifier bits live in the same set, so the union of every tracked
//! pointer's flags is also the active modifier state.

use std::fmt;

bitflags::bitflags! {
    /// Flags attached to a [`KeyValue`](super::KeyValue)
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        /// Never starts key repeat and doesn't count as "another finger down"
        const SPECIAL = 1 << 0;
        /// Stays active after release until the next key is committed
        const LATCH = 1 << 1;
        /// A second press while latched locks the key
        const LOCK = 1 << 2;
        /// Currently locked; survives commits of other keys
        const LOCKED = 1 << 3;
        /// Repeat is modulated by the swipe distance
        const PRECISE_REPEAT = 1 << 4;

        const SHIFT = 1 << 8;
        const CTRL = 1 << 9;
        const ALT = 1 << 10;
        const META = 1 << 11;
        const FN = 1 << 12;
    }
}

impl Flags {
    /// Every modifier bit
    pub const MODIFIERS: Flags = Flags::SHIFT
        .union(Flags::CTRL)
        .union(Flags::ALT)
        .union(Flags::META)
        .union(Flags::FN);

    /// Only the modifier bits of this set
    #[inline]
    pub fn modifiers(self) -> Flags {
        self & Flags::MODIFIERS
    }

    #[inline]
    pub fn is_special(self) -> bool {
        self.contains(Flags::SPECIAL)
    }

    #[inline]
    pub fn is_precise_repeat(self) -> bool {
        self.contains(Flags::PRECISE_REPEAT)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.contains(Flags::CTRL) {
            parts.push("Ctrl");
        }
        if self.contains(Flags::ALT) {
            parts.push("Alt");
        }
        if self.contains(Flags::SHIFT) {
            parts.push("Shift");
        }
        if self.contains(Flags::META) {
            parts.push("Meta");
        }
        if self.contains(Flags::FN) {
            parts.push("Fn");
        }
        write!(f, "{}", parts.join("+"))
    }
}
