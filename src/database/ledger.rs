use super::connection::DatabaseManager;
use super::models::{InvitationRecord, ResponseRecord};
use crate::invitation::{GuestResponse, Invitation, Ledger, ResponseMap};
use std::collections::BTreeMap;
use tracing::warn;

impl DatabaseManager {
    pub async fn save_publication(&self, invitation: &Invitation) -> Result<(), sqlx::Error> {
        InvitationRecord::upsert(&self.pool, invitation, true).await
    }

    pub async fn save_response(
        &self,
        inv_id: &str,
        user_id: i64,
        response: &GuestResponse,
    ) -> Result<(), sqlx::Error> {
        ResponseRecord::upsert(&self.pool, inv_id, user_id, response).await
    }

    /// Rebuilds the whole ledger from the document store. Rows that cannot be
    /// decoded are skipped with a warning.
    pub async fn load_ledger(&self) -> Result<Ledger, sqlx::Error> {
        let mut invitations = Vec::new();
        for record in InvitationRecord::find_all(&self.pool).await? {
            if let Some(invitation) = decode_invitation(record) {
                invitations.push(invitation);
            }
        }

        let current = InvitationRecord::find_current(&self.pool)
            .await?
            .and_then(decode_invitation);

        let mut responses: BTreeMap<String, ResponseMap> = invitations
            .iter()
            .map(|inv| (inv.inv_id.clone(), ResponseMap::new()))
            .collect();

        for record in ResponseRecord::find_all(&self.pool).await? {
            match record.to_guest_response() {
                Some(response) => {
                    responses
                        .entry(record.inv_id.clone())
                        .or_default()
                        .insert(record.user_id, response);
                }
                None => warn!(
                    "Skipping response of user {} to {} with unknown value '{}'",
                    record.user_id, record.inv_id, record.response
                ),
            }
        }

        Ok(Ledger::from_parts(invitations, responses, current))
    }
}

fn decode_invitation(record: InvitationRecord) -> Option<Invitation> {
    let inv_id = record.inv_id.clone();
    match record.into_invitation() {
        Ok(invitation) => Some(invitation),
        Err(e) => {
            warn!("Skipping invitation {} with bad timestamp: {}", inv_id, e);
            None
        }
    }
}
