//! Key values: what a key slot produces when committed

use std::fmt;
use std::sync::Arc;

use super::flags::Flags;
use super::layout::LayoutError;

/// Modifier keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
    Meta,
    Fn,
}

impl Modifier {
    /// The flag bit this modifier contributes to the modifier state
    pub const fn flag(self) -> Flags {
        match self {
            Modifier::Shift => Flags::SHIFT,
            Modifier::Ctrl => Flags::CTRL,
            Modifier::Alt => Flags::ALT,
            Modifier::Meta => Flags::META,
            Modifier::Fn => Flags::FN,
        }
    }

    fn from_name(name: &str) -> Option<Modifier> {
        match name {
            "shift" => Some(Modifier::Shift),
            "ctrl" | "control" => Some(Modifier::Ctrl),
            "alt" | "option" | "opt" => Some(Modifier::Alt),
            "meta" | "super" | "win" => Some(Modifier::Meta),
            "fn" => Some(Modifier::Fn),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Modifier::Shift => "shift",
            Modifier::Ctrl => "ctrl",
            Modifier::Alt => "alt",
            Modifier::Meta => "meta",
            Modifier::Fn => "fn",
        }
    }
}

/// Non-character keys that produce an editing action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Backspace,
    Delete,
    Enter,
    Tab,
    Space,
    Escape,
    CursorLeft,
    CursorRight,
}

impl NamedKey {
    fn from_name(name: &str) -> Option<NamedKey> {
        match name {
            "backspace" | "back" => Some(NamedKey::Backspace),
            "delete" | "del" => Some(NamedKey::Delete),
            "enter" | "return" => Some(NamedKey::Enter),
            "tab" => Some(NamedKey::Tab),
            "space" => Some(NamedKey::Space),
            "escape" | "esc" => Some(NamedKey::Escape),
            "cursor_left" => Some(NamedKey::CursorLeft),
            "cursor_right" => Some(NamedKey::CursorRight),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            NamedKey::Backspace => "backspace",
            NamedKey::Delete => "delete",
            NamedKey::Enter => "enter",
            NamedKey::Tab => "tab",
            NamedKey::Space => "space",
            NamedKey::Escape => "escape",
            NamedKey::CursorLeft => "cursor_left",
            NamedKey::CursorRight => "cursor_right",
        }
    }

    const fn default_flags(self) -> Flags {
        match self {
            NamedKey::Escape => Flags::SPECIAL,
            NamedKey::CursorLeft | NamedKey::CursorRight => Flags::PRECISE_REPEAT,
            _ => Flags::empty(),
        }
    }
}

/// What kind of output a value produces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Char(char),
    Modifier(Modifier),
    Named(NamedKey),
}

/// A candidate value of a key slot
///
/// Values are cloned and transformed freely (the sink may replace `a` with
/// `A`), so identity is the `name`, never the address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyValue {
    name: Arc<str>,
    pub kind: ValueKind,
    pub flags: Flags,
}

impl KeyValue {
    pub fn new(name: impl Into<Arc<str>>, kind: ValueKind, flags: Flags) -> Self {
        Self {
            name: name.into(),
            kind,
            flags,
        }
    }

    /// A plain character value named after the character itself
    pub fn char(c: char) -> Self {
        Self::new(c.to_string(), ValueKind::Char(c), Flags::empty())
    }

    /// A latching modifier value
    pub fn modifier(modifier: Modifier) -> Self {
        Self::new(
            modifier.name(),
            ValueKind::Modifier(modifier),
            modifier.flag() | Flags::SPECIAL | Flags::LATCH,
        )
    }

    pub fn named(key: NamedKey) -> Self {
        Self::new(key.name(), ValueKind::Named(key), key.default_flags())
    }

    /// Parse a value from its layout notation
    ///
    /// A single character is a character key; anything longer must be a
    /// modifier or named key.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::char(c));
        }

        let lower = s.to_lowercase();
        if let Some(modifier) = Modifier::from_name(&lower) {
            return Ok(Self::modifier(modifier));
        }
        if let Some(key) = NamedKey::from_name(&lower) {
            return Ok(Self::named(key));
        }
        Err(LayoutError::InvalidValue(s.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether two values are the same candidate, regardless of transformations
    #[inline]
    pub fn same_as(&self, other: &KeyValue) -> bool {
        self.name == other.name
    }

    /// Same value with extra flags set
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags |= flags;
        self
    }

    /// The character this value types, if any
    pub fn as_char(&self) -> Option<char> {
        match self.kind {
            ValueKind::Char(c) => Some(c),
            ValueKind::Named(NamedKey::Space) => Some(' '),
            ValueKind::Named(NamedKey::Tab) => Some('\t'),
            ValueKind::Named(NamedKey::Enter) => Some('\n'),
            _ => None,
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Compare optional values by identity
pub(crate) fn same_value(a: Option<&KeyValue>, b: Option<&KeyValue>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_as(b),
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_char() {
        let v = KeyValue::parse("a").unwrap();
        assert_eq!(v.kind, ValueKind::Char('a'));
        assert_eq!(v.name(), "a");
        assert!(v.flags.is_empty());

        let v = KeyValue::parse("é").unwrap();
        assert_eq!(v.kind, ValueKind::Char('é'));
    }

    #[test]
    fn test_parse_modifier() {
        let v = KeyValue::parse("Shift").unwrap();
        assert_eq!(v.kind, ValueKind::Modifier(Modifier::Shift));
        assert!(v.flags.contains(Flags::SHIFT | Flags::LATCH | Flags::SPECIAL));
        assert!(!v.flags.contains(Flags::LOCK));

        let v = KeyValue::parse("control").unwrap();
        assert_eq!(v.name(), "ctrl");
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(
            KeyValue::parse("esc").unwrap().kind,
            ValueKind::Named(NamedKey::Escape)
        );
        assert!(KeyValue::parse("escape").unwrap().flags.is_special());
        assert!(KeyValue::parse("cursor_left")
            .unwrap()
            .flags
            .is_precise_repeat());
        assert!(KeyValue::parse("backspace").unwrap().flags.is_empty());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            KeyValue::parse("hyper"),
            Err(LayoutError::InvalidValue(_))
        ));
        assert!(KeyValue::parse("").is_err());
    }

    #[test]
    fn test_identity_ignores_flags_and_kind() {
        let a = KeyValue::char('a');
        let transformed = KeyValue::new("a", ValueKind::Char('A'), Flags::LOCKED);
        assert!(a.same_as(&transformed));
        assert_ne!(a, transformed);
        assert!(!a.same_as(&KeyValue::char('b')));
    }

    #[test]
    fn test_same_value_options() {
        let a = KeyValue::char('a');
        assert!(same_value(None, None));
        assert!(same_value(Some(&a), Some(&a.clone())));
        assert!(!same_value(Some(&a), None));
    }
}
