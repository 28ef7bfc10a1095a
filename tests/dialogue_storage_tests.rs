use rsvp_bot::bot::handlers::authoring::persist_transition;
use rsvp_bot::bot::handlers::{AuthoringDialogue, BotHandler};
use rsvp_bot::bot::BotContext;
use rsvp_bot::invitation::{AuthoringInput, AuthoringState, Draft, InvitationLedger, Transition};
use rsvp_bot::storage::{FileStore, Persistence};
use std::sync::Arc;
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage, Storage};
use teloxide::types::ChatId;
use tempfile::TempDir;

#[tokio::test]
async fn test_dialogue_storage_setup() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let persistence = Persistence::new(FileStore::new(temp_dir.path()), None);
    let ledger = Arc::new(InvitationLedger::load(persistence).await);

    let ctx = BotContext::new(42, "rsvp_test_bot".to_string(), ledger);
    let handler = BotHandler::new(ctx);

    // Building the schema must not panic
    let _schema = handler.schema();
}

#[tokio::test]
async fn test_authoring_state_persists_per_chat() {
    let storage = InMemStorage::<AuthoringState>::new();
    let admin_chat = ChatId(42);
    let other_chat = ChatId(7);

    storage
        .clone()
        .update_dialogue(admin_chat, AuthoringState::EnterPhoto)
        .await
        .expect("Failed to update dialogue");

    let state = storage
        .clone()
        .get_dialogue(admin_chat)
        .await
        .expect("Failed to read dialogue");
    assert_eq!(state, Some(AuthoringState::EnterPhoto));

    let other = storage
        .clone()
        .get_dialogue(other_chat)
        .await
        .expect("Failed to read dialogue");
    assert_eq!(other, None);

    storage
        .clone()
        .remove_dialogue(admin_chat)
        .await
        .expect("Failed to remove dialogue");
    let state = storage
        .get_dialogue(admin_chat)
        .await
        .expect("Failed to read dialogue");
    assert_eq!(state, None);
}

fn draft() -> Draft {
    Draft {
        message: "Join us on Saturday".to_string(),
        photo: None,
        video_url: None,
    }
}

fn admin_dialogue() -> AuthoringDialogue {
    Dialogue::new(InMemStorage::<AuthoringState>::new(), ChatId(42))
}

async fn drive(dialogue: &AuthoringDialogue, input: AuthoringInput) -> Transition {
    let state = dialogue
        .get()
        .await
        .expect("Failed to read dialogue")
        .unwrap_or_default();
    let transition = state.advance(input);
    persist_transition(dialogue, &transition)
        .await
        .expect("Failed to persist transition");
    transition
}

#[tokio::test]
async fn test_finalize_resets_dialogue_to_idle() {
    let dialogue = admin_dialogue();

    drive(&dialogue, AuthoringInput::Begin).await;
    drive(&dialogue, AuthoringInput::ChooseText).await;
    drive(&dialogue, AuthoringInput::Text("Join us on Saturday".into())).await;
    assert_eq!(
        dialogue.get().await.expect("Failed to read dialogue"),
        Some(AuthoringState::EnterVideo { draft: draft() })
    );

    let transition = drive(&dialogue, AuthoringInput::SkipVideo).await;
    assert_eq!(transition, Transition::Finalize(draft()));
    assert_eq!(dialogue.get().await.expect("Failed to read dialogue"), None);
}

#[tokio::test]
async fn test_cancel_resets_dialogue_to_idle() {
    let dialogue = admin_dialogue();

    drive(&dialogue, AuthoringInput::Begin).await;
    drive(&dialogue, AuthoringInput::ChoosePhoto).await;
    assert_eq!(
        dialogue.get().await.expect("Failed to read dialogue"),
        Some(AuthoringState::EnterPhoto)
    );

    assert_eq!(drive(&dialogue, AuthoringInput::Cancel).await, Transition::Cancelled);
    assert_eq!(dialogue.get().await.expect("Failed to read dialogue"), None);
}

#[tokio::test]
async fn test_rejected_input_keeps_the_step() {
    let dialogue = admin_dialogue();
    dialogue
        .update(AuthoringState::EnterVideo { draft: draft() })
        .await
        .expect("Failed to update dialogue");

    let transition = drive(&dialogue, AuthoringInput::Text("https://evil.example/youtu.be/dQw4w9WgXcQ".into())).await;
    assert!(matches!(transition, Transition::Rejected { .. }));
    assert_eq!(
        dialogue.get().await.expect("Failed to read dialogue"),
        Some(AuthoringState::EnterVideo { draft: draft() })
    );
}
