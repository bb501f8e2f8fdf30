use chrono::{Local, TimeZone};
use futures::executor::block_on;
use notepad_core::NotificationCenter;
use notepad_core::{
    App, AppConfig, AttachOutcome, CalendarTrigger, DetailNotice, DetailSession,
    InMemoryNotificationCenter, NoteList, NoteServiceError, PhotoPicker, PickError, PickRequest,
    PickedPhoto, ReminderOutcome, StorageError,
};
use rusqlite::Connection;
use std::cell::RefCell;

struct FakePicker {
    result: Result<PickedPhoto, PickError>,
    requests: RefCell<Vec<PickRequest>>,
}

impl FakePicker {
    fn returning(result: Result<PickedPhoto, PickError>) -> Self {
        Self {
            result,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl PhotoPicker for FakePicker {
    async fn pick(&self, request: &PickRequest) -> Result<PickedPhoto, PickError> {
        self.requests.borrow_mut().push(request.clone());
        self.result.clone()
    }
}

fn local_ms(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
    Local
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("unambiguous local time")
        .timestamp_millis()
}

#[test]
fn body_and_reminder_save_then_reopen_shows_same_state() {
    let app = App::open_in_memory(InMemoryNotificationCenter::granted()).unwrap();
    let notes = app.notes().unwrap();
    let mut list = NoteList::load(&notes).unwrap();
    let id = list.add_note(&notes).unwrap();
    let at = local_ms(2025, 1, 1, 10, 0);

    let mut detail = DetailSession::open(&notes, id).unwrap();
    assert!(!detail.is_reminder_enabled());
    detail.set_body("Buy milk");
    detail.toggle_reminder();
    detail.set_reminder_time(at);
    let outcome = block_on(detail.save(&notes)).unwrap();
    assert_eq!(
        outcome,
        ReminderOutcome::Scheduled(CalendarTrigger {
            year: 2025,
            month: 1,
            day: 1,
            hour: 10,
            minute: 0,
        })
    );

    list.refresh(&notes).unwrap();
    let row = &list.visible_rows()[0];
    assert!(row.has_bell());
    assert_eq!(row.reminder_at, Some(at));

    let reopened = DetailSession::open(&notes, id).unwrap();
    assert_eq!(reopened.body(), "Buy milk");
    assert!(reopened.is_reminder_enabled());
    assert_eq!(reopened.reminder_time(), at);

    let alert = app.reminders().center().pending(&id.to_string()).unwrap();
    assert_eq!(alert.body, "Buy milk");
    assert!(alert.play_sound);
}

#[test]
fn drafts_are_not_committed_without_save() {
    let app = App::open_in_memory(InMemoryNotificationCenter::granted()).unwrap();
    let notes = app.notes().unwrap();
    let id = notes.create_note().unwrap().id;

    let mut detail = DetailSession::open(&notes, id).unwrap();
    detail.set_body("draft only");
    detail.set_reminder_enabled(true);
    drop(detail);

    let stored = notes.get_note(id).unwrap();
    assert!(stored.body.is_none());
    assert!(stored.reminder_at.is_none());
    assert!(!app.reminders().is_pending(&id.to_string()));
}

#[test]
fn disabling_reminder_clears_it_and_cancels_alert() {
    let app = App::open_in_memory(InMemoryNotificationCenter::granted()).unwrap();
    let notes = app.notes().unwrap();
    let id = notes.create_note().unwrap().id;

    let mut detail = DetailSession::open(&notes, id).unwrap();
    detail.set_reminder_enabled(true);
    detail.set_reminder_time(local_ms(2030, 6, 1, 8, 30));
    block_on(detail.save(&notes)).unwrap();
    assert!(app.reminders().is_pending(&id.to_string()));

    let mut detail = DetailSession::open(&notes, id).unwrap();
    detail.toggle_reminder();
    let outcome = block_on(detail.save(&notes)).unwrap();
    assert_eq!(outcome, ReminderOutcome::Cleared);
    assert!(notes.get_note(id).unwrap().reminder_at.is_none());
    assert!(!app.reminders().is_pending(&id.to_string()));
}

#[test]
fn denied_permission_reverts_toggle_and_still_saves_body() {
    let app = App::open_in_memory(InMemoryNotificationCenter::denied()).unwrap();
    let notes = app.notes().unwrap();
    let id = notes.create_note().unwrap().id;

    let mut detail = DetailSession::open(&notes, id).unwrap();
    detail.set_body("Call the dentist");
    detail.set_reminder_enabled(true);
    let outcome = block_on(detail.save(&notes)).unwrap();

    assert_eq!(outcome, ReminderOutcome::PermissionDenied);
    assert!(!detail.is_reminder_enabled());
    assert_eq!(
        detail.notice(),
        Some(DetailNotice::ReminderPermissionDenied)
    );
    let stored = notes.get_note(id).unwrap();
    assert_eq!(stored.body.as_deref(), Some("Call the dentist"));
    assert!(stored.reminder_at.is_none());
}

#[test]
fn failed_commit_restores_previous_alert() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        db_path: dir.path().join("notes.sqlite3"),
        ..AppConfig::default()
    };
    let app = App::open(&config, InMemoryNotificationCenter::granted()).unwrap();
    let notes = app.notes().unwrap();
    let id = notes.create_note().unwrap().id;
    let first = local_ms(2030, 1, 1, 9, 0);

    let mut detail = DetailSession::open(&notes, id).unwrap();
    detail.set_reminder_enabled(true);
    detail.set_reminder_time(first);
    block_on(detail.save(&notes)).unwrap();

    let writer = Connection::open(&config.db_path).unwrap();
    writer
        .execute_batch(
            "CREATE TRIGGER reject_note_updates BEFORE UPDATE ON notes
             BEGIN
                 SELECT RAISE(ABORT, 'store is read-only');
             END;",
        )
        .unwrap();
    drop(writer);

    detail.set_reminder_time(local_ms(2031, 2, 2, 18, 45));
    let err = block_on(detail.save(&notes)).unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Storage(StorageError::CommitFailed(_))
    ));

    let alert = app.reminders().center().pending(&id.to_string()).unwrap();
    assert_eq!(alert.trigger, CalendarTrigger::from_epoch_ms(first).unwrap());
    assert_eq!(notes.get_note(id).unwrap().reminder_at, Some(first));
}

#[test]
fn attach_photo_commits_immediately_and_delete_clears_it() {
    let app = App::open_in_memory(InMemoryNotificationCenter::granted()).unwrap();
    let notes = app.notes().unwrap();
    let id = notes.create_note().unwrap().id;
    let picker = FakePicker::returning(Ok(PickedPhoto {
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }));

    let mut detail = DetailSession::open(&notes, id).unwrap();
    detail.set_body("unsaved body");
    let outcome = block_on(detail.attach_photo(&notes, &picker)).unwrap();
    assert_eq!(outcome, AttachOutcome::Attached);

    let request = picker.requests.borrow()[0].clone();
    assert_eq!(request, PickRequest::default());
    assert_eq!(request.selection_limit, 1);

    let stored = notes.get_note(id).unwrap();
    assert_eq!(stored.image_data, Some(vec![0xFF, 0xD8, 0xFF, 0xE0]));
    assert!(stored.body.is_none());

    detail.delete_photo(&notes).unwrap();
    assert!(detail.note().image_data.is_none());
    assert!(notes.get_note(id).unwrap().image_data.is_none());
}

#[test]
fn cancelled_or_unloadable_pick_changes_nothing() {
    let app = App::open_in_memory(InMemoryNotificationCenter::granted()).unwrap();
    let notes = app.notes().unwrap();
    let id = notes.create_note().unwrap().id;
    let mut detail = DetailSession::open(&notes, id).unwrap();

    for result in [
        Err(PickError::NoSelectionMade),
        Err(PickError::LoadFailed("heic decode".to_string())),
        Ok(PickedPhoto { bytes: Vec::new() }),
    ] {
        let picker = FakePicker::returning(result);
        let outcome = block_on(detail.attach_photo(&notes, &picker)).unwrap();
        assert_eq!(outcome, AttachOutcome::Cancelled);
    }
    assert!(notes.get_note(id).unwrap().image_data.is_none());
}

#[test]
fn detail_delete_cancels_reminder() {
    let app = App::open_in_memory(InMemoryNotificationCenter::granted()).unwrap();
    let notes = app.notes().unwrap();
    let id = notes.create_note().unwrap().id;
    let mut detail = DetailSession::open(&notes, id).unwrap();
    detail.set_reminder_enabled(true);
    block_on(detail.save(&notes)).unwrap();

    detail.delete(&notes).unwrap();
    assert!(matches!(
        notes.get_note(id),
        Err(NoteServiceError::NoteNotFound(_))
    ));
    assert!(app.reminders().center().pending_ids().is_empty());
}

#[test]
fn share_payload_uses_title_body_draft_and_photo() {
    let app = App::open_in_memory(InMemoryNotificationCenter::granted()).unwrap();
    let notes = app.notes().unwrap();
    let id = notes.create_note().unwrap().id;
    notes.rename_note(id, "Trip").unwrap();
    notes.set_photo(id, Some(vec![7, 7])).unwrap();

    let mut detail = DetailSession::open(&notes, id).unwrap();
    detail.set_body("Pack socks");
    let payload = detail.share_payload();
    assert_eq!(payload.text, "Trip\n\nPack socks");
    assert_eq!(payload.image, Some(vec![7, 7]));
}
