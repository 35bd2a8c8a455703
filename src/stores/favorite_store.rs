use crate::core::error::StoreError;
use crate::models::favorite::Favorite;
use crate::stores::database::Database;

/// `favorites` table access
///
/// `user_id` is stored as given; it is not checked against `users`.
#[derive(Clone, Debug)]
pub struct FavoriteStore {
    db: Database,
}

impl FavoriteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Favorite>, StoreError> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT id, city, user_id FROM favorites ORDER BY id",
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(favorites)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Favorite>, StoreError> {
        let favorite = sqlx::query_as::<_, Favorite>(
            "SELECT id, city, user_id FROM favorites WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(favorite)
    }

    pub async fn insert(&self, favorite: &Favorite) -> Result<(), StoreError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("INSERT INTO favorites (id, city, user_id) VALUES (?, ?, ?)")
            .bind(favorite.id)
            .bind(&favorite.city)
            .bind(favorite.user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_write(e, favorite.id))?;

        tx.commit().await?;
        Ok(())
    }

    /// Overwrite city and user_id; false if the favorite does not exist
    pub async fn update(&self, favorite: &Favorite) -> Result<bool, StoreError> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("UPDATE favorites SET city = ?, user_id = ? WHERE id = ?")
            .bind(&favorite.city)
            .bind(favorite.user_id)
            .bind(favorite.id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("DELETE FROM favorites WHERE id = ?")
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
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM favorites")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}
