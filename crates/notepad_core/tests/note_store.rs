use notepad_core::db::open_db_in_memory;
use notepad_core::{
    Note, NoteRepository, NoteSummary, SqliteNoteRepository, StorageError, DEFAULT_NOTE_TITLE,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip_keeps_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut note = Note::new();
    note.title = "Groceries".to_string();
    note.body = Some("Buy milk".to_string());
    note.reminder_at = Some(1_735_725_600_000);
    note.image_data = Some(vec![0xFF, 0xD8, 0xFF]);
    note.drawing_data = Some(b"{\"version\":1,\"strokes\":[]}".to_vec());
    let id = repo.create_note(&note).unwrap();

    let loaded = repo.get_note(id).unwrap().unwrap();
    assert_eq!(loaded, note);
}

#[test]
fn new_notes_have_timestamp_and_placeholder_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id = repo.create_note(&Note::new()).unwrap();
    let loaded = repo.get_note(id).unwrap().unwrap();
    assert_eq!(loaded.title, DEFAULT_NOTE_TITLE);
    assert!(loaded.created_at > 0);
}

#[test]
fn list_orders_by_creation_time_then_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let late = Note::with_id(Uuid::new_v4(), 3_000);
    let tie_a = Note::with_id(Uuid::from_u128(1), 1_000);
    let tie_b = Note::with_id(Uuid::from_u128(2), 1_000);
    for note in [&late, &tie_b, &tie_a] {
        repo.create_note(note).unwrap();
    }

    let ids: Vec<_> = repo.list_notes().unwrap().into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![tie_a.id, tie_b.id, late.id]);
}

#[test]
fn update_can_clear_optional_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut note = Note::new();
    note.body = Some("text".to_string());
    note.image_data = Some(vec![1]);
    note.reminder_at = Some(5);
    repo.create_note(&note).unwrap();

    note.body = None;
    note.image_data = None;
    note.reminder_at = None;
    repo.update_note(&note).unwrap();

    let loaded = repo.get_note(note.id).unwrap().unwrap();
    assert!(loaded.body.is_none());
    assert!(loaded.image_data.is_none());
    assert!(loaded.reminder_at.is_none());
    assert_eq!(loaded.created_at, note.created_at);
}

#[test]
fn update_and_delete_unknown_note_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let missing = Note::new();

    assert!(matches!(
        repo.update_note(&missing),
        Err(StorageError::NotFound(id)) if id == missing.id
    ));
    assert!(matches!(
        repo.delete_note(missing.id),
        Err(StorageError::NotFound(_))
    ));
}

#[test]
fn delete_removes_the_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let id = repo.create_note(&Note::new()).unwrap();

    repo.delete_note(id).unwrap();
    assert!(repo.get_note(id).unwrap().is_none());
    assert!(repo.list_notes().unwrap().is_empty());
}

#[test]
fn list_returns_summaries_without_attachments() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut note = Note::new();
    note.title = "Trip".to_string();
    note.body = Some("Pack socks".to_string());
    note.reminder_at = Some(1_735_725_600_000);
    note.image_data = Some(vec![0xAB; 4096]);
    note.drawing_data = Some(b"{\"version\":1,\"strokes\":[]}".to_vec());
    repo.create_note(&note).unwrap();

    let listed = repo.list_notes().unwrap();
    assert_eq!(listed, vec![NoteSummary::from(&note)]);
    let loaded = repo.get_note(note.id).unwrap().unwrap();
    assert_eq!(loaded.image_data, note.image_data);
}

#[test]
fn rejected_write_reports_commit_failure_and_leaves_row_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let mut note = Note::new();
    note.body = Some("original".to_string());
    repo.create_note(&note).unwrap();
    reject_updates(&conn);

    note.body = Some("changed".to_string());
    note.image_data = Some(vec![9]);
    let err = repo.update_note(&note).unwrap_err();
    assert!(matches!(err, StorageError::CommitFailed(_)));

    let loaded = repo.get_note(note.id).unwrap().unwrap();
    assert_eq!(loaded.body.as_deref(), Some("original"));
    assert!(loaded.image_data.is_none());
}

#[test]
fn invalid_persisted_uuid_is_reported() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (uuid, title, created_at) VALUES ('not-a-uuid', 'x', 1);",
        [],
    )
    .unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.list_notes(),
        Err(StorageError::InvalidData(_))
    ));
}

#[test]
fn unmigrated_connection_is_rejected() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqliteNoteRepository::try_new(&conn),
        Err(StorageError::InvalidData(_))
    ));
}

fn reject_updates(conn: &Connection) {
    conn.execute_batch(
        "CREATE TRIGGER reject_note_updates BEFORE UPDATE ON notes
         BEGIN
             SELECT RAISE(ABORT, 'store is read-only');
         END;",
    )
    .unwrap();
}
