//! Utility modules shared by the catalog, scorer and input parsing.

pub mod canonical;

pub use canonical::canonical_key;
