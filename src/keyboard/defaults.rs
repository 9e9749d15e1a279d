//! Default layout shipped with the crate
//!
//! Loaded from layout.yaml at project root, embedded at compile time.

use std::path::Path;

use super::key::Key;
use super::layout::{load_layout_file, parse_layout_yaml, Layout};
use super::value::{KeyValue, Modifier, NamedKey};
use crate::pointers::Direction;

/// Default layout YAML embedded at compile time
const DEFAULT_LAYOUT_YAML: &str = include_str!("../../layout.yaml");

/// The embedded layout source, for tooling that wants to show it
pub fn get_default_layout_yaml() -> &'static str {
    DEFAULT_LAYOUT_YAML
}

/// Load the layout to use
///
/// Loading order (first that succeeds wins):
/// 1. An explicit path, when given
/// 2. The user layout at ~/.config/flickboard/layout.yaml
/// 3. The embedded default layout
/// 4. The hardcoded fallback layout
pub fn load_default_layout(path: Option<&Path>) -> Layout {
    if let Some(path) = path {
        match load_layout_file(path) {
            Ok(layout) => {
                tracing::info!("Loaded layout from {} ({} keys)", path.display(), layout.len());
                return layout;
            }
            Err(e) => {
                tracing::warn!("Failed to load layout from {}: {}", path.display(), e);
            }
        }
    }

    if let Some(user_path) = crate::config_paths::layout_file() {
        if user_path.exists() {
            match load_layout_file(&user_path) {
                Ok(layout) => {
                    tracing::info!("Loaded user layout from {}", user_path.display());
                    return layout;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to load user layout from {}: {}",
                        user_path.display(),
                        e
                    );
                }
            }
        }
    }

    match parse_layout_yaml(DEFAULT_LAYOUT_YAML) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::warn!("Failed to parse embedded layout: {}, using fallback", e);
            fallback_layout()
        }
    }
}

/// A minimal hardcoded layout: the alphabet, shift, backspace, space, enter
pub fn fallback_layout() -> Layout {
    let mut layout = Layout::new("fallback");
    for c in 'a'..='z' {
        layout.add_key(Key::new(c.to_string(), KeyValue::char(c)));
    }
    layout.add_key(Key::new("shift", KeyValue::modifier(Modifier::Shift)));
    layout.add_key(
        Key::new("backspace", KeyValue::named(NamedKey::Backspace))
            .with_slot(Direction::RightUp, KeyValue::named(NamedKey::Delete)),
    );
    layout.add_key(
        Key::new("space", KeyValue::named(NamedKey::Space))
            .with_slot(Direction::LeftUp, KeyValue::named(NamedKey::CursorLeft))
            .with_slot(Direction::LeftDown, KeyValue::named(NamedKey::CursorLeft))
            .with_slot(Direction::RightUp, KeyValue::named(NamedKey::CursorRight))
            .with_slot(Direction::RightDown, KeyValue::named(NamedKey::CursorRight)),
    );
    layout.add_key(Key::new("enter", KeyValue::named(NamedKey::Enter)));
    layout
}
