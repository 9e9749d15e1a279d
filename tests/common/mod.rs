//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use flickboard::config::Config;
use flickboard::keyboard::{get_default_layout_yaml, parse_layout_yaml, Modifier};
use flickboard::session::TouchEvent;
use flickboard::{Flags, KeyActionSink, KeyId, KeyValue, Layout, Session};

/// One sink callback as seen by the tests
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Press(String, Flags),
    Swipe(String, Flags),
    Release(String, Flags),
    Hold(String, Flags),
    FlagsChanged,
}

/// Sink that records every call, with optional vetoes and rewrites
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<Call>,
    /// Value names for which press and swipe return `None`
    pub veto: HashSet<String>,
    /// Value names replaced by another value on press and swipe
    pub rewrite: HashMap<String, KeyValue>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn answer(&self, value: &KeyValue) -> Option<KeyValue> {
        if self.veto.contains(value.name()) {
            return None;
        }
        Some(
            self.rewrite
                .get(value.name())
                .cloned()
                .unwrap_or_else(|| value.clone()),
        )
    }

    pub fn releases(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Release(name, _) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn holds(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Hold(..)))
            .count()
    }
}

impl KeyActionSink for RecordingSink {
    fn on_key_press(&mut self, value: &KeyValue, modifiers: Flags) -> Option<KeyValue> {
        self.calls.push(Call::Press(value.name().to_string(), modifiers));
        self.answer(value)
    }

    fn on_key_swipe(&mut self, value: &KeyValue, modifiers: Flags) -> Option<KeyValue> {
        self.calls.push(Call::Swipe(value.name().to_string(), modifiers));
        self.answer(value)
    }

    fn on_key_release(&mut self, value: &KeyValue, modifiers: Flags) {
        self.calls.push(Call::Release(value.name().to_string(), modifiers));
    }

    fn on_flags_changed(&mut self) {
        self.calls.push(Call::FlagsChanged);
    }

    fn on_key_hold(&mut self, value: &KeyValue, modifiers: Flags) {
        self.calls.push(Call::Hold(value.name().to_string(), modifiers));
    }
}

/// The embedded qwerty layout with a lockable shift
pub fn test_layout() -> Layout {
    parse_layout_yaml(get_default_layout_yaml())
        .unwrap()
        .with_lockable_modifiers(&[Modifier::Shift])
}

/// Default timing: 23px swipes, 600ms timeout, 65ms interval
pub fn test_config() -> Config {
    Config::default()
}

pub fn test_session() -> Session<RecordingSink> {
    Session::new(test_config(), test_layout(), RecordingSink::new())
}

pub fn key(session: &Session<RecordingSink>, name: &str) -> KeyId {
    session
        .layout()
        .key_id(name)
        .unwrap_or_else(|| panic!("no key named {}", name))
}

pub fn calls(session: &Session<RecordingSink>) -> &[Call] {
    &session.sink().calls
}

/// Press `name` with finger `id` at (100, 100)
pub fn down(session: &mut Session<RecordingSink>, at_ms: u64, id: i32, name: &str) {
    let key = key(session, name);
    session.dispatch(
        at_ms,
        TouchEvent::Down {
            id,
            key,
            x: 100.,
            y: 100.,
        },
    );
}

/// Move finger `id` by (dx, dy) from (100, 100)
pub fn drag(session: &mut Session<RecordingSink>, at_ms: u64, id: i32, dx: f32, dy: f32) {
    session.dispatch(
        at_ms,
        TouchEvent::Move {
            id,
            x: 100. + dx,
            y: 100. + dy,
        },
    );
}

pub fn up(session: &mut Session<RecordingSink>, at_ms: u64, id: i32) {
    session.dispatch(at_ms, TouchEvent::Up { id });
}

pub fn cancel(session: &mut Session<RecordingSink>, at_ms: u64, id: i32) {
    session.dispatch(at_ms, TouchEvent::Cancel { id });
}

/// Press and release `name` without moving
pub fn tap(session: &mut Session<RecordingSink>, at_ms: u64, id: i32, name: &str) {
    down(session, at_ms, id, name);
    up(session, at_ms + 10, id);
}
