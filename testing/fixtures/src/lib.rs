//! Worked-example fixtures: in-memory entities and storages for sites, tags,
//! and users, wired through the full capability surface, plus the test
//! server that embeds them. Consumed by the acceptance and integration test
//! suites in this crate's `tests/` directory.

pub mod entities;
pub mod resources;
pub mod server;

pub use server::TestServer;
