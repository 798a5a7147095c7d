//! DTOs for players_sea adapter.

/// A score to record; `email` is already normalized.
#[derive(Debug, Clone)]
pub struct PlayerUpsert {
    pub email: String,
    pub name: String,
    pub attempts: i32,
}

impl PlayerUpsert {
    pub fn new(email: impl Into<String>, name: impl Into<String>, attempts: i32) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            attempts,
        }
    }
}
