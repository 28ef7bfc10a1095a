//! Admin wizard for composing an invitation.
//!
//! The admin walks a linear path:
//! `ChooseType -> EnterText | EnterPhoto -> EnterCaption -> EnterVideo -> finalize`.
//! [`AuthoringState::advance`] is pure so the whole flow can be tested without
//! a bot; the handlers only translate [`Transition`]s into chat replies.

use crate::utils::validation::{
    normalize_video_link, validate_invitation_caption, validate_invitation_text,
};

/// An invitation that has all of its content but has not been published yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub message: String,
    pub photo: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthoringState {
    #[default]
    Idle,
    ChooseType,
    EnterText,
    EnterPhoto,
    EnterCaption {
        photo: String,
    },
    EnterVideo {
        draft: Draft,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthoringInput {
    Begin,
    ChooseText,
    ChoosePhoto,
    /// Telegram file id of the largest photo size.
    Photo(String),
    Text(String),
    SkipVideo,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Move to a new step and prompt the admin for it.
    Prompt(AuthoringState),
    /// The input was invalid for the current step, which is kept.
    Rejected {
        state: AuthoringState,
        reason: String,
    },
    /// All content collected; the admin is back to `Idle`.
    Finalize(Draft),
    Cancelled,
    /// Input does not apply to the current step.
    Ignored,
}

impl AuthoringState {
    pub fn is_idle(&self) -> bool {
        matches!(self, AuthoringState::Idle)
    }

    pub fn advance(self, input: AuthoringInput) -> Transition {
        use AuthoringInput as In;
        use AuthoringState as S;

        match (self, input) {
            (_, In::Begin) => Transition::Prompt(S::ChooseType),
            (S::Idle, In::Cancel) => Transition::Ignored,
            (_, In::Cancel) => Transition::Cancelled,

            (S::ChooseType, In::ChooseText) => Transition::Prompt(S::EnterText),
            (S::ChooseType, In::ChoosePhoto) => Transition::Prompt(S::EnterPhoto),

            (S::EnterPhoto, In::Photo(photo)) => Transition::Prompt(S::EnterCaption { photo }),
            (S::EnterPhoto, In::Text(_)) => Transition::Rejected {
                state: S::EnterPhoto,
                reason: "A photo is expected at this step.".to_string(),
            },

            (S::EnterText, In::Text(text)) => match validate_invitation_text(&text) {
                Ok(()) => Transition::Prompt(S::EnterVideo {
                    draft: Draft {
                        message: text,
                        photo: None,
                        video_url: None,
                    },
                }),
                Err(e) => Transition::Rejected {
                    state: S::EnterText,
                    reason: e.to_string(),
                },
            },

            (S::EnterCaption { photo }, In::Text(text)) => {
                match validate_invitation_caption(&text) {
                    Ok(()) => Transition::Prompt(S::EnterVideo {
                        draft: Draft {
                            message: text,
                            photo: Some(photo),
                            video_url: None,
                        },
                    }),
                    Err(e) => Transition::Rejected {
                        state: S::EnterCaption { photo },
                        reason: e.to_string(),
                    },
                }
            }

            (S::EnterVideo { mut draft }, In::Text(link)) => match normalize_video_link(&link) {
                Ok(url) => {
                    draft.video_url = Some(url);
                    Transition::Finalize(draft)
                }
                Err(e) => Transition::Rejected {
                    state: S::EnterVideo { draft },
                    reason: e.to_string(),
                },
            },
            (S::EnterVideo { draft }, In::SkipVideo) => Transition::Finalize(draft),

            _ => Transition::Ignored,
        }
    }
}
