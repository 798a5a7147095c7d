pub mod core;

pub use self::core::{bootstrap_db, connect_db, orchestrate_migration};
