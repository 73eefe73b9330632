//! Values flowing between stages.

/// A value carried across a stage boundary.
///
/// The executor never looks inside; each stage checks the kind it expects
/// and rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Int(i64),
    Text(String),
}

/// The kind of an [`Item`], used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Int,
    Text,
}

impl Item {
    /// Get the kind of this item
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Int(_) => ItemKind::Int,
            Item::Text(_) => ItemKind::Text,
        }
    }

    /// Take the integer out, or hand the item back unchanged
    pub fn into_int(self) -> Result<i64, Item> {
        match self {
            Item::Int(value) => Ok(value),
            other => Err(other),
        }
    }

    /// Take the string out, or hand the item back unchanged
    pub fn into_text(self) -> Result<String, Item> {
        match self {
            Item::Text(value) => Ok(value),
            other => Err(other),
        }
    }
}

impl From<i64> for Item {
    fn from(value: i64) -> Self {
        Item::Int(value)
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Item::Text(value)
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Item::Text(value.to_string())
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Int => write!(f, "int"),
            ItemKind::Text => write!(f, "string"),
        }
    }
}
