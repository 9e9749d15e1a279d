//! Key data consumed by the pointer engine
//!
//! This module provides:
//! - The flag vocabulary (`Flags`) shared by values and the modifier state
//! - Key values, compared by name because sinks clone and transform them
//! - Keys with nine directional slots and the `Layout` geometry
//! - Layout loading from YAML files
//!
//! # Architecture
//!
//! ```text
//! layout.yaml → Layout → KeyGeometry::resolve_candidate(key, direction) → KeyValue
//! ```

mod defaults;
mod flags;
mod key;
mod layout;
mod value;

pub use defaults::{fallback_layout, get_default_layout_yaml, load_default_layout};
pub use flags::Flags;
pub use key::{Key, KeyId};
pub use layout::{load_layout_file, parse_layout_yaml, Layout, LayoutError};
pub use value::{KeyValue, Modifier, NamedKey, ValueKind};

pub(crate) use value::same_value;
