//! Coursestore: flat-file course and user collections
//!
//! An in-process store for a course catalog and its user accounts, backed by
//! whole-file JSON persistence, with text/price search, composable orderings,
//! and a tag-overlap recommendation engine.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod persistence;
pub mod store;
pub mod types;
