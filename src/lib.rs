//! flickboard - gesture and modifier engine for swipe soft keyboards
//!
//! This crate turns raw per-finger touch events into committed key actions,
//! directional swipe selections, latched and locked modifiers, and
//! accelerating key repeat.

pub mod composer;
pub mod config;
pub mod config_paths;
pub mod keyboard;
pub mod pointers;
pub mod session;
pub mod timer;
pub mod tracing;

// Re-export commonly used types
pub use composer::TextComposer;
pub use config::Config;
pub use keyboard::{Flags, Key, KeyId, KeyValue, Layout};
pub use pointers::{Direction, KeyActionSink, KeyGeometry, Pointers};
pub use session::Session;
pub use timer::{TimerQueue, TimerService, TimerToken};
