//! Shared foundational types for the pscache toolkit.
//!
//! This crate provides the two value types every other crate speaks in:
//! the entry [`Key`] that identifies one compiled pipeline configuration,
//! and the [`Checksum`] that guards a record against on-disk corruption.

#![warn(missing_docs)]

pub mod checksum;
pub mod key;

pub use checksum::{Checksum, CHECKSUM_SIZE};
pub use key::Key;
