//! `plexus` - brachial plexus pathway model, lesion simulator and EMG
//! localization quiz engine
//!
//! The [`anatomy`] layer loads and validates the reference data into an
//! immutable [`Catalog`](anatomy::Catalog). The [`engine`] traces nerves and
//! simulates lesions over it; the [`quiz`] layer generates randomized
//! localization cases and runs scored sessions. All operations are
//! synchronous and take randomness from a caller-supplied RNG.

pub mod anatomy;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod observability;
pub mod quiz;
