//! Typed identifiers
//!
//! The backend hands out small integer identifiers. Each entity gets its own
//! newtype so a slot id can never be passed where a product id is expected.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// An integer identifier tagged with the entity type it belongs to.
pub struct TypedId<T>(i32, PhantomData<T>);

impl<T> TypedId<T> {
    /// Wrap a raw backend identifier.
    pub const fn from_i32(id: i32) -> Self {
        Self(id, PhantomData)
    }

    /// Unwrap back into the raw backend identifier.
    #[must_use]
    pub const fn into_i32(self) -> i32 {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<i32> for TypedId<T> {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl<T> From<TypedId<T>> for i32 {
    fn from(value: TypedId<T>) -> Self {
        value.into_i32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    #[test]
    fn round_trips_raw_id() {
        let id = TypedId::<Widget>::from_i32(42);

        assert_eq!(id.into_i32(), 42);
    }

    #[test]
    fn equality_compares_raw_ids() {
        let a = TypedId::<Widget>::from_i32(1);
        let b = TypedId::<Widget>::from_i32(1);
        let c = TypedId::<Widget>::from_i32(2);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
