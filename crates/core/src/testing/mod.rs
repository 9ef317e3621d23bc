//! Test support shared by the storage crates.
//!
//! `contract` holds the repository contract suite. Every backend runs the
//! same functions against a fresh `RecordStore`, so no assertion here may
//! depend on which backend is underneath.

pub mod contract;
pub mod fixtures;
