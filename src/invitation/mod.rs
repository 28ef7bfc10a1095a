pub mod authoring;
pub mod ledger;

pub use authoring::{AuthoringInput, AuthoringState, Draft, Transition};
pub use ledger::{
    GuestResponse, Invitation, InvitationLedger, InvitationSummary, Ledger, RecordError,
    ResponseMap, Rsvp, Tally,
};
