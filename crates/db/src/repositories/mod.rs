//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async queries that
//! accept `&PgPool` as the first argument. There is no insert or delete
//! path; rows are created by the hosted backend.

pub mod profile_repo;
pub mod species_repo;

pub use profile_repo::ProfileRepo;
pub use species_repo::SpeciesRepo;
