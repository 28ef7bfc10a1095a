//! Response ledger: invitation catalogue, the current invitation, and every
//! guest's yes/no answer keyed by invitation id.

use super::authoring::Draft;
use crate::storage::Persistence;
use crate::utils::logging::log_guest_response;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub inv_id: String,
    pub message: String,
    pub photo: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rsvp {
    Yes,
    No,
}

impl Rsvp {
    pub fn as_str(self) -> &'static str {
        match self {
            Rsvp::Yes => "yes",
            Rsvp::No => "no",
        }
    }
}

impl fmt::Display for Rsvp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rsvp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Rsvp::Yes),
            "no" => Ok(Rsvp::No),
            other => Err(format!("unknown response '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestResponse {
    pub response: Rsvp,
    pub username: Option<String>,
    pub name: String,
}

/// Responses of one invitation, keyed by Telegram user id.
pub type ResponseMap = BTreeMap<i64, GuestResponse>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("there is no active invitation")]
    NoActiveInvitation,
    #[error("invitation {0} is no longer active")]
    NotCurrent(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub attending: Vec<GuestResponse>,
    pub declining: Vec<GuestResponse>,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.attending.len() + self.declining.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationSummary {
    pub invitation: Invitation,
    pub response_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    invitations: BTreeMap<String, Invitation>,
    responses: BTreeMap<String, ResponseMap>,
    current: Option<String>,
}

impl Ledger {
    /// Rebuilds a ledger from persisted parts. A current invitation missing
    /// from the catalogue is added to it.
    pub fn from_parts(
        invitations: impl IntoIterator<Item = Invitation>,
        responses: BTreeMap<String, ResponseMap>,
        current: Option<Invitation>,
    ) -> Self {
        let mut invitations: BTreeMap<String, Invitation> = invitations
            .into_iter()
            .map(|inv| (inv.inv_id.clone(), inv))
            .collect();

        let current = current.map(|inv| {
            let id = inv.inv_id.clone();
            invitations.entry(id.clone()).or_insert(inv);
            id
        });

        Self {
            invitations,
            responses,
            current,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.invitations.is_empty()
    }

    pub fn invitation_count(&self) -> usize {
        self.invitations.len()
    }

    pub fn invitations(&self) -> impl Iterator<Item = &Invitation> {
        self.invitations.values()
    }

    pub fn all_responses(&self) -> &BTreeMap<String, ResponseMap> {
        &self.responses
    }

    pub fn get(&self, inv_id: &str) -> Option<&Invitation> {
        self.invitations.get(inv_id)
    }

    pub fn current(&self) -> Option<&Invitation> {
        self.current.as_deref().and_then(|id| self.invitations.get(id))
    }

    pub fn responses_for(&self, inv_id: &str) -> Option<&ResponseMap> {
        self.responses.get(inv_id)
    }

    /// Publishes a draft as the new current invitation.
    pub fn publish(&mut self, draft: Draft, now: DateTime<Utc>) -> Invitation {
        let mut millis = now.timestamp_millis();
        while self.invitations.contains_key(&millis.to_string()) {
            millis += 1;
        }
        let inv_id = millis.to_string();

        let invitation = Invitation {
            inv_id: inv_id.clone(),
            message: draft.message,
            photo: draft.photo,
            video_url: draft.video_url,
            created_at: now,
        };

        self.invitations.insert(inv_id.clone(), invitation.clone());
        self.responses.insert(inv_id.clone(), ResponseMap::new());
        self.current = Some(inv_id);

        invitation
    }

    /// Stores a guest's answer, replacing any earlier answer from the same user.
    pub fn record(
        &mut self,
        inv_id: &str,
        user_id: i64,
        response: GuestResponse,
    ) -> Result<(), RecordError> {
        match self.current.as_deref() {
            None => return Err(RecordError::NoActiveInvitation),
            Some(current) if current != inv_id => {
                return Err(RecordError::NotCurrent(inv_id.to_string()))
            }
            Some(_) => {}
        }

        self.responses
            .entry(inv_id.to_string())
            .or_default()
            .insert(user_id, response);
        Ok(())
    }

    pub fn tally(&self, inv_id: &str) -> Tally {
        let mut tally = Tally::default();
        if let Some(responses) = self.responses_for(inv_id) {
            for response in responses.values() {
                match response.response {
                    Rsvp::Yes => tally.attending.push(response.clone()),
                    Rsvp::No => tally.declining.push(response.clone()),
                }
            }
        }
        tally
    }

    /// All invitations, oldest first, with their response counts.
    pub fn summaries(&self) -> Vec<InvitationSummary> {
        let mut summaries: Vec<InvitationSummary> = self
            .invitations
            .values()
            .map(|invitation| InvitationSummary {
                response_count: self
                    .responses_for(&invitation.inv_id)
                    .map_or(0, BTreeMap::len),
                invitation: invitation.clone(),
            })
            .collect();
        summaries.sort_by(|a, b| a.invitation.created_at.cmp(&b.invitation.created_at));
        summaries
    }
}

/// Shared ledger that writes every change through [`Persistence`].
pub struct InvitationLedger {
    state: RwLock<Ledger>,
    persistence: Persistence,
}

impl InvitationLedger {
    pub async fn load(persistence: Persistence) -> Self {
        let ledger = persistence.load().await;
        Self {
            state: RwLock::new(ledger),
            persistence,
        }
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub async fn publish(&self, draft: Draft) -> Invitation {
        // The write guard is held while persisting so snapshots land in order.
        let mut ledger = self.state.write().await;
        let invitation = ledger.publish(draft, Utc::now());
        self.persistence
            .save_publication(&ledger, &invitation)
            .await;
        invitation
    }

    pub async fn record(
        &self,
        inv_id: &str,
        user_id: i64,
        response: GuestResponse,
    ) -> Result<(), RecordError> {
        let mut ledger = self.state.write().await;
        ledger.record(inv_id, user_id, response.clone())?;
        log_guest_response(inv_id, user_id, &response.name, response.response.as_str());
        self.persistence
            .save_response(&ledger, inv_id, user_id, &response)
            .await;
        Ok(())
    }

    pub async fn current(&self) -> Option<Invitation> {
        self.state.read().await.current().cloned()
    }

    pub async fn get(&self, inv_id: &str) -> Option<Invitation> {
        self.state.read().await.get(inv_id).cloned()
    }

    /// The current invitation together with its tally.
    pub async fn current_tally(&self) -> Option<(Invitation, Tally)> {
        let ledger = self.state.read().await;
        let invitation = ledger.current()?.clone();
        let tally = ledger.tally(&invitation.inv_id);
        Some((invitation, tally))
    }

    pub async fn summaries(&self) -> Vec<InvitationSummary> {
        self.state.read().await.summaries()
    }

    pub async fn invitation_count(&self) -> usize {
        self.state.read().await.invitation_count()
    }
}
