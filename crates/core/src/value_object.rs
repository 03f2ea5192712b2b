//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two with the same attributes are equal.
/// They are small and `Copy`-like in spirit: "changing" one produces a new
/// value (e.g. `rank.advanced()`), the old one is never mutated through a
/// shared reference.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Level(u8);
///
/// impl ValueObject for Level {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
