//! A text-composing key action sink
//!
//! Applies the modifier state to pressed values, commits released and
//! repeated values into a text buffer, and keeps a log of every callback so
//! a replay can be inspected afterwards.

use serde::Serialize;

use crate::keyboard::{Flags, KeyValue, NamedKey, ValueKind};
use crate::pointers::KeyActionSink;

/// One callback received from the pointer engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ComposerEvent {
    Press { value: String, modifiers: String },
    Swipe { value: String },
    Release { value: String, modifiers: String },
    Hold { value: String },
    FlagsChanged,
}

/// Text buffer with a cursor, fed by key actions
#[derive(Debug, Clone, Default)]
pub struct TextComposer {
    text: Vec<char>,
    cursor: usize,
    events: Vec<ComposerEvent>,
    feedback_requests: usize,
}

impl TextComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn events(&self) -> &[ComposerEvent] {
        &self.events
    }

    /// Number of times haptic feedback was requested (one per swipe)
    pub fn feedback_requests(&self) -> usize {
        self.feedback_requests
    }

    fn commit(&mut self, value: &KeyValue, modifiers: Flags) {
        // Shortcuts go to the application, not the text
        let shortcut = modifiers.intersects(Flags::CTRL | Flags::ALT | Flags::META);

        match value.kind {
            ValueKind::Named(NamedKey::Backspace) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.text.remove(self.cursor);
                }
            }
            ValueKind::Named(NamedKey::Delete) => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                }
            }
            ValueKind::Named(NamedKey::CursorLeft) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            ValueKind::Named(NamedKey::CursorRight) => {
                self.cursor = (self.cursor + 1).min(self.text.len());
            }
            _ if shortcut => {
                tracing::debug!("Shortcut {}+{} not handled", modifiers, value);
            }
            _ => {
                if let Some(c) = value.as_char() {
                    self.text.insert(self.cursor, c);
                    self.cursor += 1;
                }
            }
        }
    }
}

/// The value as typed with `modifiers` held; the name is kept so the engine
/// still recognizes it
pub fn apply_modifiers(value: &KeyValue, modifiers: Flags) -> KeyValue {
    match value.kind {
        ValueKind::Char(c) if modifiers.contains(Flags::SHIFT) => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => KeyValue::new(value.name(), ValueKind::Char(u), value.flags),
                _ => value.clone(),
            }
        }
        _ => value.clone(),
    }
}

impl KeyActionSink for TextComposer {
    fn on_key_press(&mut self, value: &KeyValue, modifiers: Flags) -> Option<KeyValue> {
        self.events.push(ComposerEvent::Press {
            value: value.name().to_string(),
            modifiers: modifiers.modifiers().to_string(),
        });
        Some(apply_modifiers(value, modifiers))
    }

    fn on_key_swipe(&mut self, value: &KeyValue, modifiers: Flags) -> Option<KeyValue> {
        self.events.push(ComposerEvent::Swipe {
            value: value.name().to_string(),
        });
        self.feedback_requests += 1;
        Some(apply_modifiers(value, modifiers))
    }

    fn on_key_release(&mut self, value: &KeyValue, modifiers: Flags) {
        self.events.push(ComposerEvent::Release {
            value: value.name().to_string(),
            modifiers: modifiers.modifiers().to_string(),
        });
        self.commit(value, modifiers);
    }

    fn on_flags_changed(&mut self) {
        self.events.push(ComposerEvent::FlagsChanged);
    }

    fn on_key_hold(&mut self, value: &KeyValue, modifiers: Flags) {
        self.events.push(ComposerEvent::Hold {
            value: value.name().to_string(),
        });
        self.commit(value, modifiers);
    }
}
