use crate::core::error::StoreError;
use crate::models::user::User;
use crate::stores::database::Database;

/// `users` table access. Every write is its own committed transaction.
#[derive(Clone, Debug)]
pub struct UserStore {
    db: Database,
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All users ordered by id
    pub async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, password, pay FROM users ORDER BY id",
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(users)
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, pay FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(user)
    }

    /// Insert with the caller-supplied id
    /// Fails with `StoreError::Duplicate` if the id is taken
    pub async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("INSERT INTO users (id, username, password, pay) VALUES (?, ?, ?, ?)")
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.password)
            .bind(&user.pay)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_write(e, user.id))?;

        tx.commit().await?;
        Ok(())
    }

    /// Overwrite username, password and pay of the user with `user.id`
    /// Returns false if no such user exists
    pub async fn update(&self, user: &User) -> Result<bool, StoreError> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("UPDATE users SET username = ?, password = ?, pay = ? WHERE id = ?")
            .bind(&user.username)
            .bind(&user.password)
            .bind(&user.pay)
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Returns false if no such user exists
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}
