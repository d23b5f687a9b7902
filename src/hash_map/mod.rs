//! Chained hash map implementation
//!
//! This module provides the crate's single container:
//! - `ChainedHashMap`: fixed-size bucket array with insertion-ordered chains,
//!   default table size of 11 buckets, pluggable `BuildHasher`

mod chained_hash_map;

pub use chained_hash_map::{ChainedHashMap, Iter, Keys, Values, DEFAULT_TABLE_SIZE};
