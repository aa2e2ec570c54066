//! Activity Log Tests — events written during a scripted session
//!
//! Runs a [`Session`] under the same subscriber the binary installs and checks
//! the lines that land in the log file. Kept in its own test binary so no
//! other test's subscriber shares the callsite cache.

use std::io::Cursor;

use roster_cli::{logging, Session};
use roster_core::store::RecordStore;

/// Run `script` against `store` with the activity log captured.
/// Returns the final store, the session output and the log text.
fn logged_run(store: RecordStore, script: &str) -> (RecordStore, String, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("game_session.log");
    let file = std::fs::File::create(&log_path).expect("create log");
    let (writer, guard) = tracing_appender::non_blocking(file);

    let input = Cursor::new(script.as_bytes().to_vec());
    let mut session = Session::new(store, input, Vec::new());
    tracing::subscriber::with_default(logging::subscriber("info", writer), || {
        session.run().expect("session run");
    });
    drop(guard);

    let log = std::fs::read_to_string(&log_path).expect("read log");
    let (store, output) = session.into_parts();
    (store, String::from_utf8(output).expect("utf8 output"), log)
}

/// The first log line containing every one of `parts`.
fn line_with<'a>(log: &'a str, parts: &[&str]) -> Option<&'a str> {
    log.lines().find(|line| parts.iter().all(|p| line.contains(p)))
}

#[test]
fn session_events_reach_the_log_with_their_severity() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A directory cannot be written as a file, so every save fails.
    let store = RecordStore::new(dir.path());

    let script = "1\nAria\n1\n1\n\
                  1\naria\n\
                  1\nZed\nx\n\
                  4\nNobody\n\
                  3\nAria\nBea\n\
                  6\n";
    let (store, out, log) = logged_run(store, script);

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].name, "Bea");
    assert!(out.contains("could not be saved"));

    assert!(line_with(&log, &["INFO roster_cli::session: Session started"]).is_some());
    assert!(line_with(&log, &["INFO roster_core::store: Character created", "Aria"]).is_some());
    assert!(line_with(&log, &["ERROR roster_core::store: Failed to save roster"]).is_some());
    assert!(line_with(
        &log,
        &["WARN roster_core::store: Request rejected", "operation=\"create\"", "already exists"]
    )
    .is_some());
    assert!(line_with(
        &log,
        &["WARN roster_cli::session: Request rejected", "Invalid numeric input: 'x'"]
    )
    .is_some());
    assert!(line_with(
        &log,
        &["WARN roster_core::store: Request rejected", "operation=\"delete\"", "No character named 'Nobody'"]
    )
    .is_some());
    assert!(line_with(&log, &["INFO roster_core::store: Character renamed"]).is_some());
    assert!(line_with(&log, &["INFO roster_cli::session: Session ended"]).is_some());
}

#[test]
fn rename_and_delete_do_not_log_lookups() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = RecordStore::new(dir.path().join("heroes.json"));
    store
        .insert("Aria", 1, roster_core::types::VariantKind::Hero, None)
        .expect("seed Aria");

    let (store, _, log) = logged_run(store, "3\nNobody\n3\nAria\nBea\n4\nbea\ny\n6\n");

    assert!(store.is_empty());
    assert!(!log.contains("Character looked up"));
    assert!(!log.contains("operation=\"find\""));
    assert!(line_with(&log, &["Request rejected", "operation=\"rename\"", "No character named 'Nobody'"]).is_some());
    assert!(line_with(&log, &["INFO roster_core::store: Character deleted"]).is_some());
}

#[test]
fn store_view_tracks_the_running_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = Cursor::new(b"1\nAria\n2\n1\n".to_vec());
    let mut session = Session::new(RecordStore::new(dir.path().join("heroes.json")), input, Vec::new());

    assert!(session.store().is_empty());
    session.run().expect("session run");
    assert_eq!(session.store().len(), 1);
    assert_eq!(session.store().records()[0].name, "Aria");
}
