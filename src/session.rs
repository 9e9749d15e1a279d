//! The serial event path
//!
//! Touch events and timer callbacks reach the engine through one queue, in
//! time order. Before a touch event at `t` is applied, every repeat timer due
//! at or before `t` fires; a touch-up therefore cancels a repeat that isn't
//! due yet, deterministically.
//!
//! Scripts replay recorded touch sequences:
//!
//! ```yaml
//! events:
//!   - { at_ms: 0, event: { type: down, id: 1, key: shift, x: 10, y: 300 } }
//!   - { at_ms: 80, event: { type: up, id: 1 } }
//!   - { at_ms: 200, event: { type: down, id: 1, key: a, x: 40, y: 200 } }
//!   - { at_ms: 260, event: { type: up, id: 1 } }
//! end_ms: 1000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::config::Config;
use crate::keyboard::{KeyId, Layout};
use crate::pointers::{KeyActionSink, Pointers};
use crate::timer::TimerQueue;

/// Errors that can occur when loading or replaying a script
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Unknown key '{key}' at {at_ms}ms")]
    UnknownKey { key: String, at_ms: u64 },
    #[error("Event at {at_ms}ms is earlier than the previous one")]
    OutOfOrder { at_ms: u64 },
    #[error("Pointer {id} pressed again at {at_ms}ms without being released")]
    DuplicatePointer { id: i32, at_ms: u64 },
}

/// A raw touch event
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    Down { id: i32, key: KeyId, x: f32, y: f32 },
    Move { id: i32, x: f32, y: f32 },
    Up { id: i32 },
    Cancel { id: i32 },
}

/// A touch event as written in scripts, naming its key
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptTouch {
    Down { id: i32, key: String, x: f32, y: f32 },
    Move { id: i32, x: f32, y: f32 },
    Up { id: i32 },
    Cancel { id: i32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptEvent {
    pub at_ms: u64,
    pub event: ScriptTouch,
}

/// A recorded touch sequence
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    pub events: Vec<ScriptEvent>,
    /// Keep the clock running until then, so pending repeats fire
    #[serde(default)]
    pub end_ms: Option<u64>,
}

impl Script {
    pub fn from_yaml(yaml: &str) -> Result<Self, ReplayError> {
        serde_yaml::from_str(yaml).map_err(|e| ReplayError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ReplayError::Io(e.to_string()))?;
        Self::from_yaml(&content)
    }
}

/// A pointer engine on a layout, driven by a virtual clock
pub struct Session<S> {
    engine: Pointers<Layout, S, TimerQueue>,
}

impl<S: KeyActionSink> Session<S> {
    pub fn new(config: Config, layout: Layout, sink: S) -> Self {
        Self {
            engine: Pointers::new(config, layout, sink, TimerQueue::new()),
        }
    }

    pub fn engine(&self) -> &Pointers<Layout, S, TimerQueue> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Pointers<Layout, S, TimerQueue> {
        &mut self.engine
    }

    pub fn sink(&self) -> &S {
        self.engine.sink()
    }

    pub fn layout(&self) -> &Layout {
        self.engine.geometry()
    }

    /// Current time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.engine.timers().now().as_millis() as u64
    }

    /// Fire every timer due at or before `at_ms`, in deadline order
    ///
    /// Returns how many timers fired.
    pub fn advance(&mut self, at_ms: u64) -> usize {
        let until = Duration::from_millis(at_ms);
        let mut fired = 0;
        while let Some(token) = self.engine.timers_mut().pop_due(until) {
            if self.engine.on_timer_fired(token) {
                fired += 1;
            }
        }
        self.engine.timers_mut().advance_to(until);
        fired
    }

    /// Apply a touch event happening at `at_ms`
    pub fn dispatch(&mut self, at_ms: u64, event: TouchEvent) {
        self.advance(at_ms);
        match event {
            TouchEvent::Down { id, key, x, y } => self.engine.on_touch_down(x, y, id, key),
            TouchEvent::Move { id, x, y } => self.engine.on_touch_move(x, y, id),
            TouchEvent::Up { id } => self.engine.on_touch_up(id),
            TouchEvent::Cancel { id } => self.engine.on_touch_cancel(id),
        }
    }

    /// Replay a whole script
    pub fn run(&mut self, script: &Script) -> Result<(), ReplayError> {
        for step in &script.events {
            if step.at_ms < self.now_ms() {
                return Err(ReplayError::OutOfOrder { at_ms: step.at_ms });
            }
            let event = self.resolve(step)?;
            if let TouchEvent::Down { id, .. } = event {
                if self.engine.is_pointer_down(id) {
                    return Err(ReplayError::DuplicatePointer {
                        id,
                        at_ms: step.at_ms,
                    });
                }
            }
            self.dispatch(step.at_ms, event);
        }
        if let Some(end_ms) = script.end_ms {
            self.advance(end_ms);
        }
        tracing::debug!(
            "Replayed {} events, clock at {}ms",
            script.events.len(),
            self.now_ms()
        );
        Ok(())
    }

    fn resolve(&self, step: &ScriptEvent) -> Result<TouchEvent, ReplayError> {
        Ok(match &step.event {
            ScriptTouch::Down { id, key, x, y } => {
                let key_id =
                    self.layout()
                        .key_id(key)
                        .ok_or_else(|| ReplayError::UnknownKey {
                            key: key.clone(),
                            at_ms: step.at_ms,
                        })?;
                TouchEvent::Down {
                    id: *id,
                    key: key_id,
                    x: *x,
                    y: *y,
                }
            }
            ScriptTouch::Move { id, x, y } => TouchEvent::Move {
                id: *id,
                x: *x,
                y: *y,
            },
            ScriptTouch::Up { id } => TouchEvent::Up { id: *id },
            ScriptTouch::Cancel { id } => TouchEvent::Cancel { id: *id },
        })
    }
}
