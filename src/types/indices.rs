//! Strongly-typed index newtypes.
//!
//! Indices are stored zero-based; the meshfem files are one-based, so every
//! index that ends up in a file goes through [`ElementIndex::one_based`] or
//! [`NodeIndex::one_based`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw (zero-based) index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// Index as written to meshfem files.
            #[inline]
            pub const fn one_based(self) -> usize {
                self.0 + 1
            }

            /// Whether the index addresses one of `count` entries.
            #[inline]
            pub const fn is_within(self, count: usize) -> bool {
                self.0 < count
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }

        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }
    };
}

define_index!(
    /// Element index in a mesh model.
    ///
    /// # Example
    ///
    /// ```
    /// use meshfem_export::types::ElementIndex;
    ///
    /// let elem = ElementIndex::new(41);
    /// assert_eq!(elem.get(), 41);
    /// assert_eq!(elem.one_based(), 42);
    /// ```
    ElementIndex,
    "E"
);

define_index!(
    /// Global node index in a mesh model.
    ///
    /// # Example
    ///
    /// ```
    /// use meshfem_export::types::NodeIndex;
    ///
    /// let node = NodeIndex::new(3);
    /// assert_eq!(node.one_based(), 4);
    /// ```
    NodeIndex,
    "N"
);

impl ElementIndex {
    /// Iterate over [0, n) element indices.
    pub fn iter(n: usize) -> impl ExactSizeIterator<Item = ElementIndex> {
        (0..n).map(ElementIndex)
    }
}
