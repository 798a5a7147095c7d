//! Infrastructure layer - state assembly and database error translation.

pub mod db_errors;
pub mod state;
