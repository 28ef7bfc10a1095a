use anyhow::Result;
use rsvp_bot::database::connection::DatabaseManager;
use rsvp_bot::database::models::ResponseRecord;
use rsvp_bot::invitation::{Draft, GuestResponse, InvitationLedger, RecordError, Rsvp};
use rsvp_bot::storage::{FileStore, Persistence};
use tempfile::{tempdir, TempDir};

async fn document_store(temp_dir: &TempDir) -> Result<DatabaseManager> {
    let url = format!("sqlite:{}", temp_dir.path().join("rsvp.db").display());
    let db = DatabaseManager::new(&url).await?;
    db.run_migrations().await?;
    Ok(db)
}

fn files(temp_dir: &TempDir) -> FileStore {
    FileStore::new(temp_dir.path().join("data"))
}

fn draft(message: &str) -> Draft {
    Draft {
        message: message.to_string(),
        photo: None,
        video_url: None,
    }
}

fn guest(name: &str, response: Rsvp) -> GuestResponse {
    GuestResponse {
        response,
        username: None,
        name: name.to_string(),
    }
}

#[tokio::test]
async fn test_publish_and_record_survive_restart_from_files() -> Result<()> {
    let temp_dir = tempdir()?;

    let ledger = InvitationLedger::load(Persistence::new(files(&temp_dir), None)).await;
    let invitation = ledger.publish(draft("Garden party on Saturday")).await;
    ledger
        .record(&invitation.inv_id, 1, guest("Alice", Rsvp::Yes))
        .await?;
    ledger
        .record(&invitation.inv_id, 2, guest("Bob", Rsvp::No))
        .await?;
    drop(ledger);

    let reloaded = InvitationLedger::load(Persistence::new(files(&temp_dir), None)).await;
    let (current, tally) = reloaded.current_tally().await.unwrap();
    assert_eq!(current, invitation);
    assert_eq!(tally.attending, vec![guest("Alice", Rsvp::Yes)]);
    assert_eq!(tally.declining, vec![guest("Bob", Rsvp::No)]);
    Ok(())
}

#[tokio::test]
async fn test_files_use_expected_layout() -> Result<()> {
    let temp_dir = tempdir()?;

    let ledger = InvitationLedger::load(Persistence::new(files(&temp_dir), None)).await;
    let invitation = ledger.publish(draft("Dinner")).await;
    ledger
        .record(&invitation.inv_id, 99, guest("Alice", Rsvp::Yes))
        .await?;

    let data_dir = temp_dir.path().join("data");
    let invitations: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(data_dir.join("invitations.json"))?)?;
    assert_eq!(invitations[&invitation.inv_id]["invId"], invitation.inv_id.as_str());
    assert_eq!(invitations[&invitation.inv_id]["message"], "Dinner");

    let responses: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(data_dir.join("responses.json"))?)?;
    assert_eq!(responses[&invitation.inv_id]["99"]["response"], "yes");

    let current: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(data_dir.join("current.json"))?)?;
    assert_eq!(current["invId"], invitation.inv_id.as_str());
    Ok(())
}

#[tokio::test]
async fn test_dual_write_reaches_document_store() -> Result<()> {
    let temp_dir = tempdir()?;
    let db = document_store(&temp_dir).await?;

    let ledger = InvitationLedger::load(Persistence::new(files(&temp_dir), Some(db.clone()))).await;
    let invitation = ledger.publish(draft("Picnic")).await;
    ledger
        .record(&invitation.inv_id, 5, guest("Carol", Rsvp::Yes))
        .await?;

    let stored = db.load_ledger().await?;
    assert_eq!(stored.current(), Some(&invitation));

    let rows = ResponseRecord::find_by_invitation(&db.pool, &invitation.inv_id).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Carol");
    Ok(())
}

#[tokio::test]
async fn test_document_store_is_fallback_when_files_are_empty() -> Result<()> {
    let temp_dir = tempdir()?;
    let db = document_store(&temp_dir).await?;

    let ledger = InvitationLedger::load(Persistence::new(files(&temp_dir), Some(db.clone()))).await;
    let invitation = ledger.publish(draft("Concert")).await;
    ledger
        .record(&invitation.inv_id, 8, guest("Dave", Rsvp::No))
        .await?;
    drop(ledger);

    // Simulate a host that lost its local disk
    std::fs::remove_dir_all(temp_dir.path().join("data"))?;

    let reloaded = InvitationLedger::load(Persistence::new(files(&temp_dir), Some(db))).await;
    let (current, tally) = reloaded.current_tally().await.unwrap();
    assert_eq!(current.inv_id, invitation.inv_id);
    assert_eq!(tally.declining, vec![guest("Dave", Rsvp::No)]);
    Ok(())
}

#[tokio::test]
async fn test_new_invitation_retires_the_previous_one() -> Result<()> {
    let temp_dir = tempdir()?;

    let ledger = InvitationLedger::load(Persistence::new(files(&temp_dir), None)).await;
    let first = ledger.publish(draft("First")).await;
    let second = ledger.publish(draft("Second")).await;
    assert_ne!(first.inv_id, second.inv_id);

    let err = ledger
        .record(&first.inv_id, 1, guest("Alice", Rsvp::Yes))
        .await
        .unwrap_err();
    assert_eq!(err, RecordError::NotCurrent(first.inv_id.clone()));

    ledger
        .record(&second.inv_id, 1, guest("Alice", Rsvp::Yes))
        .await?;

    let summaries = ledger.summaries().await;
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].invitation.inv_id, first.inv_id);
    assert_eq!(summaries[0].response_count, 0);
    assert_eq!(summaries[1].response_count, 1);
    Ok(())
}

#[tokio::test]
async fn test_record_without_invitation_is_rejected() -> Result<()> {
    let temp_dir = tempdir()?;

    let ledger = InvitationLedger::load(Persistence::new(files(&temp_dir), None)).await;
    let err = ledger
        .record("123", 1, guest("Alice", Rsvp::Yes))
        .await
        .unwrap_err();
    assert_eq!(err, RecordError::NoActiveInvitation);
    assert!(ledger.current().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_falls_back_to_empty_ledger() -> Result<()> {
    let temp_dir = tempdir()?;
    let data_dir = temp_dir.path().join("data");
    std::fs::create_dir_all(&data_dir)?;
    std::fs::write(data_dir.join("invitations.json"), "{ not json")?;

    let ledger = InvitationLedger::load(Persistence::new(files(&temp_dir), None)).await;
    assert_eq!(ledger.invitation_count().await, 0);

    // The next publication rewrites the broken file
    ledger.publish(draft("Fresh start")).await;
    let reloaded = InvitationLedger::load(Persistence::new(files(&temp_dir), None)).await;
    assert_eq!(reloaded.invitation_count().await, 1);
    Ok(())
}
