//! Block identifier management using string interning
//!
//! This module provides the [`BlockId`] type. The conversion service sends
//! identifiers either as JSON strings or as numbers; both are interned as
//! their textual form so `1` and `"1"` name the same block.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, de};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for block identifiers.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier of a block within a diagram.
///
/// Copying and comparing a `BlockId` is cheap; the textual form is resolved
/// only for display.
///
/// # Examples
///
/// ```
/// use simview_core::identifier::BlockId;
///
/// let inport = BlockId::new("1");
/// assert_eq!(inport, BlockId::from(1u64));
/// assert_eq!(inport.to_string(), "1");
/// assert!(inport == "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(DefaultSymbol);

impl BlockId {
    /// Creates a `BlockId` from its textual form.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{str_value}")
    }
}

impl From<&str> for BlockId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<u64> for BlockId {
    fn from(value: u64) -> Self {
        Self::new(&value.to_string())
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<'de> Deserialize<'de> for BlockId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(BlockIdVisitor)
    }
}

struct BlockIdVisitor;

impl de::Visitor<'_> for BlockIdVisitor {
    type Value = BlockId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a block identifier as a string or an integer")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(BlockId::new(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(BlockId::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(BlockId::new(&value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        if value.fract() == 0.0 && value.is_finite() {
            Ok(BlockId::new(&format!("{value:.0}")))
        } else {
            Ok(BlockId::new(&value.to_string()))
        }
    }
}
