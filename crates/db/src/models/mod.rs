//! Row structs for the `species` and `profiles` tables.
//!
//! Rows carry the bookkeeping columns the domain records omit and are
//! converted into [`biodex_core`] records at the repository boundary.

pub mod profile;
pub mod species;
