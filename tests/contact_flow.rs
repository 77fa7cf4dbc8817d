use zcontacts::storage::{ContactStore, FileStore, KeyValueStore};
use zcontacts::worker::WorkerResponse;
use zcontacts::{handle_event, initialize, AppState, Config, Event, Focus};

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        data_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

fn send(state: &mut AppState, events: &[Event]) {
    for event in events {
        handle_event(state, event).unwrap();
    }
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
}

fn add_contact(state: &mut AppState, name: &str, phone: &str) {
    send(state, &[Event::AddContact]);
    type_text(state, name);
    send(state, &[Event::FormNextField]);
    type_text(state, phone);
    send(state, &[Event::SubmitForm]);
}

#[test]
fn contacts_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut state = initialize(&config_in(dir.path()));
    add_contact(&mut state, "Mona Said", "01012345678");
    assert_eq!(state.status.as_deref(), Some("Contact added"));
    assert_eq!(state.focus(), Focus::List(zcontacts::InputMode::Normal));

    let reopened = initialize(&config_in(dir.path()));
    assert_eq!(reopened.store.len(), 1);
    assert_eq!(reopened.store.contacts()[0].name, "Mona Said");
    assert_eq!(reopened.store.contacts()[0].phone, "01012345678");
}

#[test]
fn add_edit_flag_search_delete() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = initialize(&config_in(dir.path()));

    add_contact(&mut state, "Ali Hassan", "01112345678");
    add_contact(&mut state, "Salma Adel", "01212345678");
    assert_eq!(state.store.len(), 2);

    // Invalid phone keeps the form open with an inline error.
    add_contact(&mut state, "Bad Phone", "12");
    assert_eq!(state.focus(), Focus::Form);
    let vm = state.compute_viewmodel(40, 120);
    let modal = vm.modal.unwrap();
    assert!(modal.fields.iter().any(|f| f.label == "Phone" && f.error.is_some()));
    send(&mut state, &[Event::CancelForm]);
    assert_eq!(state.store.len(), 2);

    // Edit the selected contact (the one just added) to mark it favorite.
    let edited_id = state.selected_contact().unwrap().id.clone();
    send(&mut state, &[Event::EditSelected]);
    for _ in 0..7 {
        send(&mut state, &[Event::FormNextField]);
    }
    send(&mut state, &[Event::Char(' '), Event::SubmitForm]);
    let edited = state.store.find_by_id(&edited_id).unwrap();
    assert!(edited.is_favorite);
    assert_eq!(edited.name, "Salma Adel");

    send(&mut state, &[Event::ToggleEmergency]);
    let counts = state.store.counts();
    assert_eq!((counts.total, counts.favorites, counts.emergency), (2, 1, 1));

    send(&mut state, &[Event::SearchMode]);
    type_text(&mut state, "ali");
    let vm = state.compute_viewmodel(40, 120);
    assert_eq!(vm.display_items.len(), 1);
    assert_eq!(vm.display_items[0].name, "Ali Hassan");

    send(
        &mut state,
        &[Event::FocusResults, Event::DeleteSelected, Event::ConfirmDelete],
    );
    assert_eq!(state.store.len(), 1);
    assert!(state.store.contacts().iter().all(|c| c.name != "Ali Hassan"));

    let reopened = initialize(&config_in(dir.path()));
    assert_eq!(reopened.store.len(), 1);
}

#[test]
fn stale_photo_response_does_not_touch_form() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = initialize(&config_in(dir.path()));

    send(&mut state, &[Event::AddContact]);
    let (_, actions) = handle_event(
        &mut state,
        &Event::WorkerResponse(WorkerResponse::PhotoLoaded {
            request_id: 99,
            data_uri: "data:image/png;base64,AA==".to_string(),
        }),
    )
    .unwrap();

    assert!(actions.is_empty());
    let vm = state.compute_viewmodel(40, 120);
    assert!(!matches!(vm.modal.unwrap().avatar, zcontacts::ui::Avatar::Photo));
}

#[test]
fn malformed_store_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("contacts.json"), "{ not an array").unwrap();

    let state = initialize(&config_in(dir.path()));
    assert!(state.store.is_empty());

    let backend = FileStore::open(dir.path()).unwrap();
    assert_eq!(
        backend.get("contacts.corrupt").unwrap().as_deref(),
        Some("{ not an array")
    );

    // Loading again through the store API sees the same empty start.
    let store = ContactStore::load(Box::new(backend), "contacts").unwrap();
    assert!(store.is_empty());
}
