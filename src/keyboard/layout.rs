//! Keyboard layouts and their YAML notation
//!
//! ```yaml
//! name: minimal
//! keys:
//!   - id: e
//!     center: e
//!     ne: "3"
//!     slots:
//!       down_left: "€"
//!   - id: shift
//!     center: shift
//! ```
//!
//! Corner fields (`nw`, `ne`, `sw`, `se`) fill the horizontal octant of their
//! quadrant; `slots` addresses any octant directly.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::flags::Flags;
use super::key::{Key, KeyId};
use super::value::{KeyValue, Modifier, ValueKind};
use crate::pointers::{Direction, KeyGeometry};

/// Root structure of a layout YAML file
#[derive(Debug, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub keys: Vec<KeyConfig>,
}

/// A single key entry from YAML
#[derive(Debug, Deserialize)]
pub struct KeyConfig {
    pub id: String,
    #[serde(default)]
    pub center: Option<String>,
    #[serde(default)]
    pub nw: Option<String>,
    #[serde(default)]
    pub ne: Option<String>,
    #[serde(default)]
    pub sw: Option<String>,
    #[serde(default)]
    pub se: Option<String>,
    #[serde(default)]
    pub slots: HashMap<Direction, String>,
}

/// Errors that can occur when parsing layouts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid key value: {0}")]
    InvalidValue(String),
    #[error("Duplicate key id: {0}")]
    DuplicateKey(String),
    #[error("Layout has no keys")]
    Empty,
}

/// An ordered set of keys, addressed by [`KeyId`]
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub name: String,
    keys: Vec<Key>,
}

impl Layout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: Vec::new(),
        }
    }

    /// Add a key, returning its id
    pub fn add_key(&mut self, key: Key) -> KeyId {
        let id = KeyId(self.keys.len() as u32);
        self.keys.push(key);
        id
    }

    pub fn key(&self, id: KeyId) -> Option<&Key> {
        self.keys.get(id.0 as usize)
    }

    /// Look up a key by the name it was declared with
    pub fn key_id(&self, name: &str) -> Option<KeyId> {
        self.keys
            .iter()
            .position(|k| k.name == name)
            .map(|idx| KeyId(idx as u32))
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Mark the given modifiers as lockable (double press locks them)
    pub fn with_lockable_modifiers(mut self, lockable: &[Modifier]) -> Self {
        for key in &mut self.keys {
            for value in key.values_mut() {
                if let ValueKind::Modifier(m) = value.kind {
                    if lockable.contains(&m) {
                        value.flags |= Flags::LOCK;
                    }
                }
            }
        }
        self
    }
}

impl KeyGeometry for Layout {
    fn resolve_candidate(&self, key: KeyId, direction: Direction) -> Option<KeyValue> {
        self.key(key)?.at_direction(direction).cloned()
    }
}

/// Load a layout from a YAML file
pub fn load_layout_file(path: &Path) -> Result<Layout, LayoutError> {
    let content = std::fs::read_to_string(path).map_err(|e| LayoutError::Io(e.to_string()))?;

    parse_layout_yaml(&content)
}

/// Parse a layout from a YAML string
pub fn parse_layout_yaml(yaml: &str) -> Result<Layout, LayoutError> {
    let config: LayoutConfig =
        serde_yaml::from_str(yaml).map_err(|e| LayoutError::Parse(e.to_string()))?;

    if config.keys.is_empty() {
        return Err(LayoutError::Empty);
    }

    let mut layout = Layout::new(config.name.unwrap_or_else(|| "custom".to_string()));
    for entry in config.keys {
        if layout.key_id(&entry.id).is_some() {
            return Err(LayoutError::DuplicateKey(entry.id));
        }
        let key = parse_key(entry)?;
        layout.add_key(key);
    }

    tracing::debug!("Parsed layout '{}' ({} keys)", layout.name, layout.len());
    Ok(layout)
}

fn parse_key(entry: KeyConfig) -> Result<Key, LayoutError> {
    let mut key = Key::empty(entry.id);

    let fixed = [
        (Direction::Center, entry.center),
        (Direction::LeftUp, entry.nw),
        (Direction::RightUp, entry.ne),
        (Direction::LeftDown, entry.sw),
        (Direction::RightDown, entry.se),
    ];
    for (direction, value) in fixed {
        if let Some(value) = value {
            key.set_slot(direction, Some(KeyValue::parse(&value)?));
        }
    }

    // Explicit slots override corners
    for (direction, value) in entry.slots {
        key.set_slot(direction, Some(KeyValue::parse(&value)?));
    }

    Ok(key)
}
