use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account record. The id is chosen by the caller, not generated.
///
/// The password is kept as given, without hashing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub pay: String,
}

impl User {
    pub fn new(id: i64, username: &str, password: &str, pay: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
            password: password.to_string(),
            pay: pay.to_string(),
        }
    }
}
