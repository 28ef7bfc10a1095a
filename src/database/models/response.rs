use crate::invitation::{GuestResponse, Rsvp};
use chrono::Utc;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ResponseRecord {
    pub inv_id: String,
    pub user_id: i64,
    pub response: String, // 'yes', 'no'
    pub username: Option<String>,
    pub name: String,
    pub updated_at: String,
}

impl ResponseRecord {
    pub async fn upsert(
        pool: &sqlx::SqlitePool,
        inv_id: &str,
        user_id: i64,
        response: &GuestResponse,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO responses (inv_id, user_id, response, username, name, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(inv_id, user_id) DO UPDATE SET
                response = excluded.response,
                username = excluded.username,
                name = excluded.name,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(inv_id)
        .bind(user_id)
        .bind(response.response.as_str())
        .bind(&response.username)
        .bind(&response.name)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_invitation(
        pool: &sqlx::SqlitePool,
        inv_id: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ResponseRecord>(
            "SELECT inv_id, user_id, response, username, name, updated_at FROM responses WHERE inv_id = ? ORDER BY user_id"
        )
        .bind(inv_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ResponseRecord>(
            "SELECT inv_id, user_id, response, username, name, updated_at FROM responses ORDER BY inv_id, user_id"
        )
        .fetch_all(pool)
        .await
    }

    /// Converts the row back into a ledger entry; unknown response values
    /// yield `None`.
    pub fn to_guest_response(&self) -> Option<GuestResponse> {
        let response = self.response.parse::<Rsvp>().ok()?;
        Some(GuestResponse {
            response,
            username: self.username.clone(),
            name: self.name.clone(),
        })
    }
}
