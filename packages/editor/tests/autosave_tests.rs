// ABOUTME: Integration tests for the autosave cycle and the editable surface
// ABOUTME: Runs under paused tokio time so the debounce and indicator timings are exact

use std::sync::Arc;
use std::time::Duration;

use dealdraft_ai::{CompletionClient, DocumentGenerator};
use dealdraft_core::{DocumentEdit, RequestStatus};
use dealdraft_editor::{AutosaveController, DocumentSurface, EditableField, SaveState};
use dealdraft_requests::RequestStore;
use pretty_assertions::assert_eq;

fn store() -> Arc<RequestStore> {
    Arc::new(RequestStore::new(DocumentGenerator::new(
        CompletionClient::unconfigured(),
    )))
}

fn title_edit(value: &str) -> DocumentEdit {
    DocumentEdit {
        title: Some(value.to_string()),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_save_cycle_idle_saving_saved_idle() {
    let store = store();
    let request = store.create_from_text("draft under edit").await;
    let mut controller = AutosaveController::new(Arc::clone(&store));
    assert_eq!(controller.save_state(), SaveState::Idle);

    assert!(controller.record_edit(&request.id, title_edit("Cycle")).await);

    // Debounce window still open: nothing written, indicator idle
    tokio::time::sleep(Duration::from_millis(900)).await;
    assert_eq!(controller.save_state(), SaveState::Idle);
    assert_eq!(store.get_by_id(&request.id).await.unwrap().title, request.title);

    // Debounce fired at 1s; the simulated save is in flight
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(controller.save_state(), SaveState::Saving);

    // Save completes 500ms after firing
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(controller.save_state(), SaveState::Saved);
    assert_eq!(store.get_by_id(&request.id).await.unwrap().title, "Cycle");

    // Saved indicator lingers 2s, then reverts
    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(controller.save_state(), SaveState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_five_rapid_edits_coalesce_into_one_save() {
    let store = store();
    let request = store.create_from_text("draft under edit").await;
    let before = store.get_by_id(&request.id).await.unwrap().last_modified;
    let mut controller = AutosaveController::new(Arc::clone(&store));

    for i in 1..=5 {
        controller
            .record_edit(&request.id, title_edit(&format!("Title v{}", i)))
            .await;
        tokio::time::sleep(Duration::from_millis(150)).await;
    }

    // Nothing was written during the burst
    assert_eq!(
        store.get_by_id(&request.id).await.unwrap().last_modified,
        before
    );

    tokio::time::sleep(Duration::from_secs(2)).await;

    // Exactly one save, carrying the final coalesced value
    let saved = store.get_by_id(&request.id).await.unwrap();
    assert_eq!(saved.title, "Title v5");
    assert!(saved.last_modified > before);
}

#[tokio::test(start_paused = true)]
async fn test_coalesced_save_merges_edits_across_fields() {
    let store = store();
    let request = store.create_from_text("draft under edit").await;
    let mut controller = AutosaveController::new(Arc::clone(&store));

    controller.record_edit(&request.id, title_edit("Merged")).await;
    controller
        .record_edit(
            &request.id,
            DocumentEdit {
                problem: Some("merged problem".to_string()),
                ..Default::default()
            },
        )
        .await;

    tokio::time::sleep(Duration::from_secs(2)).await;

    let saved = store.get_by_id(&request.id).await.unwrap();
    assert_eq!(saved.title, "Merged");
    assert_eq!(saved.problem, "merged problem");
}

#[tokio::test(start_paused = true)]
async fn test_edits_refused_once_request_leaves_draft() {
    let store = store();
    let request = store.create_from_text("about to send").await;
    store.update_status(&request.id, RequestStatus::Sent).await;
    let frozen = store.get_by_id(&request.id).await.unwrap();
    let mut controller = AutosaveController::new(Arc::clone(&store));

    let accepted = controller.record_edit(&request.id, title_edit("Too late")).await;
    assert!(!accepted);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(store.get_by_id(&request.id).await.unwrap(), frozen);
    assert_eq!(controller.save_state(), SaveState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_status_change_during_debounce_keeps_request_frozen() {
    let store = store();
    let request = store.create_from_text("racing send").await;
    let mut controller = AutosaveController::new(Arc::clone(&store));

    // Edit accepted while still a draft, then the request is sent before
    // the debounced save fires; the store refuses the late write
    controller.record_edit(&request.id, title_edit("Racy")).await;
    store.update_status(&request.id, RequestStatus::Sent).await;
    let frozen = store.get_by_id(&request.id).await.unwrap();

    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(store.get_by_id(&request.id).await.unwrap(), frozen);
    assert_eq!(controller.save_state(), SaveState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_new_edit_interrupts_saved_indicator() {
    let store = store();
    let request = store.create_from_text("draft under edit").await;
    let mut controller = AutosaveController::new(Arc::clone(&store));

    controller.record_edit(&request.id, title_edit("First")).await;
    // Reach the saved state: 1s debounce + 500ms save
    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(controller.save_state(), SaveState::Saved);

    // A new edit during the 2s hold restarts the cycle instead of idling
    controller.record_edit(&request.id, title_edit("Second")).await;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(controller.save_state(), SaveState::Saving);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(controller.save_state(), SaveState::Saved);
    assert_eq!(store.get_by_id(&request.id).await.unwrap().title, "Second");
}

#[tokio::test(start_paused = true)]
async fn test_unknown_id_edit_is_refused() {
    let store = store();
    let mut controller = AutosaveController::new(Arc::clone(&store));

    assert!(!controller.record_edit("missingX", title_edit("ghost")).await);
}

#[tokio::test(start_paused = true)]
async fn test_surface_edits_flow_into_store() {
    let store = store();
    store.create_from_text("online store cart abandonment").await;
    let mut surface = DocumentSurface::new(Arc::clone(&store));

    assert!(surface.load_current().await);
    assert!(!surface.is_read_only());

    assert!(surface.set_field(EditableField::Title, "Hand-tuned Title").await);
    assert!(
        surface
            .set_field(EditableField::Impact, "quantified impact")
            .await
    );

    tokio::time::sleep(Duration::from_secs(2)).await;

    let saved = store.current_request().await.unwrap();
    assert_eq!(saved.title, "Hand-tuned Title");
    assert_eq!(saved.impact, "quantified impact");
}

#[tokio::test(start_paused = true)]
async fn test_surface_goes_read_only_after_send() {
    let store = store();
    let request = store.create_from_text("to be sent").await;
    let mut surface = DocumentSurface::new(Arc::clone(&store));
    surface.load_current().await;
    assert!(!surface.is_read_only());

    store.update_status(&request.id, RequestStatus::Sent).await;
    surface.refresh().await;

    assert!(surface.is_read_only());
    assert!(!surface.set_field(EditableField::Title, "nope").await);

    // Read-only views still work
    let markdown = surface.export_markdown().unwrap();
    assert!(markdown.contains(&request.title));
}

#[tokio::test(start_paused = true)]
async fn test_surface_with_nothing_loaded_is_read_only() {
    let store = store();
    let mut surface = DocumentSurface::new(Arc::clone(&store));

    assert!(!surface.load_current().await);
    assert!(surface.is_read_only());
    assert!(surface.export_markdown().is_none());
}
