//! Typed identifiers
//!
//! Newtype wrappers for node, segment, muscle and lesion identifiers. They
//! can only be minted inside the crate, by the loader, once the referenced
//! entity is known to exist. Holding one is proof the name resolved at load
//! time.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            pub(crate) fn new(s: &str) -> Self {
                Self(Arc::from(s))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                &*self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                &*self.0 == *other
            }
        }
    };
}

typed_id!(
    /// Identifier of a graph node (root, trunk, division, cord or terminal nerve).
    NodeId
);

typed_id!(
    /// Identifier of a graph segment.
    SegmentId
);

typed_id!(
    /// Structural tag shared by the segments of one anatomical structure.
    SegmentTag
);

typed_id!(
    /// Muscle name.
    MuscleId
);

typed_id!(
    /// Lesion pattern name.
    LesionId
);
