//! Domain entities shared by the dashboard engine, data sources and server.

pub mod gems;
pub mod gpf;
pub mod record;
pub mod types;
pub mod user;
