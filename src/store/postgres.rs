use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, UserStore};
use crate::models::user::{NewUser, User, UserChanges};

pub struct PgUserStore {
    db_pool: PgPool,
}

impl PgUserStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT id, name, dob, address, description, "createdAt"
               FROM "Users" ORDER BY id"#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(users)
    }

    async fn find(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, dob, address, description, "createdAt"
               FROM "Users" WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<Option<User>, StoreError> {
        let created = sqlx::query_as::<_, User>(
            r#"INSERT INTO "Users" (name, dob, address, description)
               VALUES ($1, $2, $3, $4)
               RETURNING id, name, dob, address, description, "createdAt""#,
        )
        .bind(user.name)
        .bind(user.dob)
        .bind(user.address)
        .bind(user.description)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<bool, StoreError> {
        // "createdAt" is written once, on insert. $n is "field present", $n+1 its value.
        let result = sqlx::query(
            r#"UPDATE "Users" SET
               name = CASE WHEN $2 THEN $3 ELSE name END,
               dob = CASE WHEN $4 THEN $5 ELSE dob END,
               address = CASE WHEN $6 THEN $7 ELSE address END,
               description = CASE WHEN $8 THEN $9 ELSE description END
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(changes.name.is_some())
        .bind(changes.name.flatten())
        .bind(changes.dob.is_some())
        .bind(changes.dob.flatten())
        .bind(changes.address.is_some())
        .bind(changes.address.flatten())
        .bind(changes.description.is_some())
        .bind(changes.description.flatten())
        .execute(&self.db_pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM "Users" WHERE id = $1"#)
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
