//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct construction in tests and snapshot code, but callers should prefer
//! the `.index()` helpers when an ID is used as a `Vec` index.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the inner type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
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
    /// A registered point in the spatial network.  IDs are handed out by the
    /// owning `Map` and never reused within one map's lifetime.
    pub struct PointId(u32);
}

typed_id! {
    /// A line feature (open polyline) on the map.
    pub struct LineId(u32);
}

typed_id! {
    /// An area feature (closed polygon) on the map.
    pub struct AreaId(u32);
}

typed_id! {
    /// A marker feature pinned to a single point.
    pub struct MarkerId(u32);
}

typed_id! {
    /// Index of a mover (racer, test actor) in its owning store.
    pub struct MoverId(u32);
}

typed_id! {
    /// Index of a surface type in the `SurfaceCatalog`.
    /// Using `u16` keeps per-feature storage compact (max 65,535 surfaces).
    pub struct SurfaceId(u16);
}
