//! Repository layer: one unit struct per table, each method takes the pool.

mod project_repo;

pub use project_repo::ProjectRepo;
