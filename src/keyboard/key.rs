//! Keys: a touch region holding one candidate value per swipe direction

use std::fmt;

use super::value::KeyValue;
use crate::pointers::Direction;

/// Stable identity of a key within its layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(pub u32);

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A key with its center value and up to eight swipe values
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    pub name: String,
    slots: [Option<KeyValue>; 9],
}

impl Key {
    /// A key with only a center value
    pub fn new(name: impl Into<String>, center: KeyValue) -> Self {
        Self::empty(name).with_slot(Direction::Center, center)
    }

    /// A key with no values at all
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Default::default(),
        }
    }

    /// Set the value of one slot (builder pattern)
    pub fn with_slot(mut self, direction: Direction, value: KeyValue) -> Self {
        self.set_slot(direction, Some(value));
        self
    }

    pub fn set_slot(&mut self, direction: Direction, value: Option<KeyValue>) {
        self.slots[direction.index()] = value;
    }

    /// The value pressed without swiping
    pub fn center(&self) -> Option<&KeyValue> {
        self.slots[Direction::Center.index()].as_ref()
    }

    /// Value selected by a swipe in `direction`
    ///
    /// An empty octant borrows the value of the other octant in the same
    /// quadrant, so a key defining only corner values reacts to any swipe.
    pub fn at_direction(&self, direction: Direction) -> Option<&KeyValue> {
        self.slots[direction.index()]
            .as_ref()
            .or_else(|| self.slots[direction.sibling().index()].as_ref())
    }

    /// Iterate over every defined value
    pub fn values(&self) -> impl Iterator<Item = &KeyValue> {
        self.slots.iter().flatten()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut KeyValue> {
        self.slots.iter_mut().flatten()
    }
}
