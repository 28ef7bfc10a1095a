use crate::invitation::Invitation;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct InvitationRecord {
    pub inv_id: String,
    pub message: String,
    pub photo: Option<String>,
    pub video_url: Option<String>,
    pub created_at: String,
    pub is_current: bool,
}

impl InvitationRecord {
    /// Inserts or replaces an invitation. When `is_current` is set every other
    /// invitation loses the flag in the same transaction.
    pub async fn upsert(
        pool: &sqlx::SqlitePool,
        invitation: &Invitation,
        is_current: bool,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        if is_current {
            sqlx::query("UPDATE invitations SET is_current = 0 WHERE is_current = 1")
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO invitations (inv_id, message, photo, video_url, created_at, is_current)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(inv_id) DO UPDATE SET
                message = excluded.message,
                photo = excluded.photo,
                video_url = excluded.video_url,
                created_at = excluded.created_at,
                is_current = excluded.is_current
            "#,
        )
        .bind(&invitation.inv_id)
        .bind(&invitation.message)
        .bind(&invitation.photo)
        .bind(&invitation.video_url)
        .bind(invitation.created_at.to_rfc3339())
        .bind(is_current)
        .execute(&mut *tx)
        .await?;

        tx.commit().await
    }

    pub async fn find_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, InvitationRecord>(
            "SELECT inv_id, message, photo, video_url, created_at, is_current FROM invitations ORDER BY created_at"
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_current(pool: &sqlx::SqlitePool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, InvitationRecord>(
            "SELECT inv_id, message, photo, video_url, created_at, is_current FROM invitations WHERE is_current = 1 LIMIT 1"
        )
        .fetch_optional(pool)
        .await
    }

    pub fn into_invitation(self) -> Result<Invitation, chrono::ParseError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)?.with_timezone(&Utc);
        Ok(Invitation {
            inv_id: self.inv_id,
            message: self.message,
            photo: self.photo,
            video_url: self.video_url,
            created_at,
        })
    }
}
