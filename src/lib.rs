//! # Chainmap: Fixed-Capacity Chained Hash Map
//!
//! This crate provides a generic associative container built on separate
//! chaining over a fixed-size bucket array. The table size is chosen once at
//! construction (default 11, a prime) and never changes; colliding keys simply
//! accumulate in the same chain and are found by linear scan.
//!
//! ## Key Features
//!
//! - **Separate chaining**: an indexable array of insertion-ordered chains,
//!   with all keyed operations funneled through a single indexing function
//! - **Full map contract**: get/insert/remove/contains, bulk extend, clear,
//!   structural equality, and `Debug` formatting
//! - **Snapshot views**: key set, value list, and entry set are materialized
//!   eagerly and never alias table internals
//! - **Pluggable hashing**: any `BuildHasher`, with `ahash` as the default
//! - **No rehashing**: the bucket array is immutable post-construction, so
//!   insertion never moves existing entries
//!
//! ## Quick Start
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::new();
//! assert_eq!(map.insert("key", 42), None);
//! assert_eq!(map.insert("key", 43), Some(42));
//! assert_eq!(map.get("key"), Some(&43));
//!
//! // A one-bucket table still honors the full contract, purely via chaining.
//! let mut tiny = ChainedHashMap::with_table_size(1).unwrap();
//! tiny.insert("a", 1);
//! tiny.insert("b", 2);
//! assert_eq!(tiny.len(), 2);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod hash_map;

pub use error::{ChainMapError, Result};
pub use hash_map::{ChainedHashMap, Iter, Keys, Values, DEFAULT_TABLE_SIZE};
