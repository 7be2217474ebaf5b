//! Repository layer: key/value storage and typed collections on top of it.
//!
//! # Responsibility
//! - Define the string key/value contract and its SQLite/in-memory backends.
//! - Map habit collections, categories and theme onto stable keys.
//!
//! # Invariants
//! - Reads of malformed data degrade to empty values instead of failing.
//! - Writes surface transport and encoding errors unchanged.

pub mod collection_repo;
pub mod kv_repo;
