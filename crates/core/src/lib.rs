//! Domain types shared by the persistence and HTTP layers.

pub mod error;
pub mod paging;
pub mod roles;
pub mod types;
