//! Per-pointer state

use std::fmt;

use crate::keyboard::{Flags, KeyId, KeyValue};
use crate::timer::TimerToken;

/// Which finger a pointer belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
    /// A finger currently on the surface
    Touch(i32),
    /// No finger: the key was released but stays logically held
    Latched,
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerId::Touch(id) => write!(f, "{}", id),
            PointerId::Latched => write!(f, "latched"),
        }
    }
}

/// A tracked finger or latched key
#[derive(Debug, Clone)]
pub(crate) struct Pointer {
    pub id: PointerId,
    /// The key pressed by this pointer
    pub key: KeyId,
    /// Candidate currently under the finger (any slot of `key`)
    pub selected_value: Option<KeyValue>,
    /// `selected_value` as accepted by the sink, `None` when suppressed
    pub value: Option<KeyValue>,
    pub down_x: f32,
    pub down_y: f32,
    /// Manhattan distance to the initial touch
    pub ptr_dist: f32,
    /// Modifier state at the time the key was pressed
    pub modifier_flags: Flags,
    /// Flags of `value`; LATCH, LOCK and LOCKED change over time
    pub flags: Flags,
    pub timeout: Option<TimerToken>,
    /// `ptr_dist` when the repeat started accelerating
    pub repeating_ptr_dist: Option<f32>,
}

impl Pointer {
    pub fn new(
        id: PointerId,
        key: KeyId,
        selected_value: Option<KeyValue>,
        value: Option<KeyValue>,
        x: f32,
        y: f32,
        modifier_flags: Flags,
    ) -> Self {
        let flags = value.as_ref().map_or(Flags::empty(), |v| v.flags);
        Self {
            id,
            key,
            selected_value,
            value,
            down_x: x,
            down_y: y,
            ptr_dist: 0.,
            modifier_flags,
            flags,
            timeout: None,
            repeating_ptr_dist: None,
        }
    }

    #[inline]
    pub fn is_latched(&self) -> bool {
        self.id == PointerId::Latched
    }

    /// Latched and not locked: cleared by the next committed key
    #[inline]
    pub fn is_latched_unlocked(&self) -> bool {
        self.is_latched() && !self.flags.contains(Flags::LOCKED)
    }

    /// Whether this pointer's value is `other`, by name
    pub fn has_value(&self, other: &KeyValue) -> bool {
        self.value.as_ref().is_some_and(|v| v.same_as(other))
    }

    pub fn value_name(&self) -> &str {
        self.value.as_ref().map_or("<none>", |v| v.name())
    }
}
