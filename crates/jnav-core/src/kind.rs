//! # Type Masks
//!
//! Bitwise-composable classification of stored values. Every concrete
//! value maps to exactly one bit; schema authors declare a *category* by
//! OR-ing bits together (`INT` means "any integer, any width, any sign")
//! and a node matches when the bitwise AND is non-zero.
//!
//! The bit values are part of the on-disk schema vocabulary and must not
//! be renumbered.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// A set of value kinds.
    ///
    /// Serializes as `"SINT32 | UINT32"` text in human-readable formats so
    /// schema files can name categories directly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TypeMask: u16 {
        const OBJECT = 0x0001;
        const ARRAY  = 0x0002;
        const SINT32 = 0x0004;
        const SINT64 = 0x0008;
        const UINT32 = 0x0010;
        const UINT64 = 0x0020;
        const FLOAT  = 0x0040;
        const DOUBLE = 0x0080;
        const BOOL   = 0x0100;
        const STRING = 0x0200;

        const SINT  = Self::SINT32.bits() | Self::SINT64.bits();
        const UINT  = Self::UINT32.bits() | Self::UINT64.bits();
        const INT32 = Self::SINT32.bits() | Self::UINT32.bits();
        const INT64 = Self::SINT64.bits() | Self::UINT64.bits();
        const INT   = Self::SINT.bits() | Self::UINT.bits();
    }
}

impl TypeMask {
    /// Unresolved node, or a `null` leaf.
    pub const UNKNOWN: Self = Self::empty();

    /// Returns true when `actual` belongs to this category.
    ///
    /// An `UNKNOWN` mask on either side never matches.
    #[inline]
    pub fn matches(self, actual: TypeMask) -> bool {
        self.intersects(actual)
    }

    /// Returns true for any integer bit.
    #[inline]
    pub fn is_integer(self) -> bool {
        !self.is_empty() && Self::INT.contains(self)
    }

    /// Returns true for `FLOAT` or `DOUBLE`.
    #[inline]
    pub fn is_real(self) -> bool {
        !self.is_empty() && (Self::FLOAT | Self::DOUBLE).contains(self)
    }
}

impl Default for TypeMask {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for TypeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("UNKNOWN");
        }
        bitflags::parser::to_writer(self, f)
    }
}
