//! Collaborators the pointer engine calls into

use crate::keyboard::{Flags, KeyId, KeyValue};

use super::direction::Direction;

/// Maps a key and a swipe direction to a candidate value
pub trait KeyGeometry {
    /// Candidate of `key` in `direction`, `None` when the slot is empty or
    /// the key is unknown
    fn resolve_candidate(&self, key: KeyId, direction: Direction) -> Option<KeyValue>;
}

/// Receives the key actions decided by the pointer engine
///
/// `None` from `on_key_press` or `on_key_swipe` vetoes the action; it is never
/// an error.
pub trait KeyActionSink {
    /// A key is pressed. The value may be transformed (e.g. shifted) or
    /// suppressed. The engine's modifier state doesn't include this key yet.
    fn on_key_press(&mut self, value: &KeyValue, modifiers: Flags) -> Option<KeyValue>;

    /// The pointer swiped onto another value of its key
    fn on_key_swipe(&mut self, value: &KeyValue, modifiers: Flags) -> Option<KeyValue>;

    /// The key is released and must be committed. `value` is what
    /// `on_key_press` or `on_key_swipe` returned last.
    fn on_key_release(&mut self, value: &KeyValue, modifiers: Flags);

    /// The modifier state changed without any key being committed (latch,
    /// lock, cancelled pointer)
    fn on_flags_changed(&mut self);

    /// The key is held and repeats
    fn on_key_hold(&mut self, value: &KeyValue, modifiers: Flags);
}

impl<G: KeyGeometry + ?Sized> KeyGeometry for &G {
    fn resolve_candidate(&self, key: KeyId, direction: Direction) -> Option<KeyValue> {
        (**self).resolve_candidate(key, direction)
    }
}
