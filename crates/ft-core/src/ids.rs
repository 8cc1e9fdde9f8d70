//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are zero-based indices so they can address `Vec`-backed pools
//! directly.  The operating staff think in one-based ordinals ("Bus 1"), so
//! every ID also exposes [`ordinal`](BusId::ordinal) and displays that way.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Build from a one-based ordinal.  `0` saturates to index 0.
            #[inline]
            pub fn from_ordinal(ordinal: $inner) -> Self {
                Self(ordinal.saturating_sub(1))
            }

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// One-based ordinal as shown on timetables.
            #[inline(always)]
            pub fn ordinal(self) -> $inner {
                self.0 + 1
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", $label, self.ordinal())
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a physical bus in the fleet.
    pub struct BusId(u32) => "Bus";
}

typed_id! {
    /// Index of a pooled-engine work block (one ongoing duty that may be
    /// served by several physical buses).
    pub struct WorkBlockId(u32) => "Work Block";
}

typed_id! {
    /// Index of a depot charger slot.
    pub struct ChargerId(u16) => "Charger";
}

// ── Shift ─────────────────────────────────────────────────────────────────────

/// Which of the two daily shifts a duty belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Shift {
    First,
    Second,
}

impl Shift {
    pub const ALL: [Shift; 2] = [Shift::First, Shift::Second];

    pub fn number(self) -> u8 {
        match self {
            Shift::First => 1,
            Shift::Second => 2,
        }
    }

    /// The following shift, or `None` after the second.
    pub fn next(self) -> Option<Shift> {
        match self {
            Shift::First => Some(Shift::Second),
            Shift::Second => None,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.number())
    }
}
