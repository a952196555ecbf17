//! Shared type definitions for the Cinebot SDK.

use serde::{Deserialize, Serialize};

// ============================================================================
// OneOrMany
// ============================================================================

/// A list parameter that also accepts a single value.
///
/// Every operation that takes "one or many" entries or IDs goes through this
/// type, so a lone value is always sent as a one-element JSON array and an
/// absent value as `[]`.
///
/// ```rust,ignore
/// let one: OneOrMany<i64> = 101.into();
/// let many: OneOrMany<i64> = vec![101, 102].into();
/// let none: OneOrMany<i64> = None.into();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OneOrMany<T>(Vec<T>);

impl<T> OneOrMany<T> {
    /// Empty list.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        Self(vec![value])
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<T> From<Option<T>> for OneOrMany<T> {
    fn from(value: Option<T>) -> Self {
        Self(value.into_iter().collect())
    }
}

impl<T: Clone> From<&[T]> for OneOrMany<T> {
    fn from(values: &[T]) -> Self {
        Self(values.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
    fn from(values: [T; N]) -> Self {
        Self(Vec::from(values))
    }
}

impl<T> FromIterator<T> for OneOrMany<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Server-assigned identifier of a pre-issued ticket entry or subscription.
pub type PreemissioneId = i64;

/// A list of pre-issued identifiers (entries or subscriptions).
pub type IdList = OneOrMany<PreemissioneId>;
