use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A city bookmarked by a user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub id: i64,
    pub city: String,
    /// Owning user id; not checked against the users table
    #[serde(alias = "User_id")]
    pub user_id: i64,
}

impl Favorite {
    pub fn new(id: i64, city: &str, user_id: i64) -> Self {
        Self {
            id,
            city: city.to_string(),
            user_id,
        }
    }
}
