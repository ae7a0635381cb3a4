use jotter_core::{
    create_note, list_notes, CreateNoteRequest, DbPool, Deps, ListNotesRequest, NewNote,
    NoteRepository, SqliteNoteRepository, UserId,
};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn concurrent_writers_share_one_file_pool() {
    let dir = tempfile::tempdir().unwrap();
    let pool = DbPool::open(dir.path().join("concurrent.db"), 4).unwrap();

    thread::scope(|scope| {
        for worker in 0..4 {
            let pool = &pool;
            scope.spawn(move || {
                let deps = Deps::authenticated(pool, format!("user-{worker}"));
                for idx in 0..10 {
                    create_note::execute(
                        &deps,
                        CreateNoteRequest {
                            title: format!("note {idx}"),
                            content: "body".to_string(),
                        },
                    )
                    .unwrap();
                }
            });
        }
    });

    for worker in 0..4 {
        let deps = Deps::authenticated(&pool, format!("user-{worker}"));
        let listed = list_notes::execute(&deps, ListNotesRequest::default()).unwrap();
        assert_eq!(listed.notes.len(), 10);
        assert!(listed
            .notes
            .iter()
            .all(|note| note.owner_id.as_str() == format!("user-{worker}")));
    }
}

#[test]
fn reopening_the_file_keeps_committed_notes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reopen.db");

    let created = {
        let pool = DbPool::open(&path, 2).unwrap();
        let deps = Deps::authenticated(&pool, "u1");
        create_note::execute(
            &deps,
            CreateNoteRequest {
                title: "persisted".to_string(),
                content: "body".to_string(),
            },
        )
        .unwrap()
    };

    let pool = DbPool::open(&path, 1).unwrap();
    let deps = Deps::authenticated(&pool, "u1");
    let listed = list_notes::execute(&deps, ListNotesRequest::default()).unwrap();
    assert_eq!(listed.notes, vec![created]);
}

#[test]
fn list_does_not_wait_for_an_open_writer() {
    let dir = tempfile::tempdir().unwrap();
    let pool = DbPool::open(dir.path().join("read-write.db"), 2).unwrap();
    let deps = Deps::authenticated(&pool, "u1");
    let (locked_tx, locked_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let (listed, elapsed) = thread::scope(|scope| {
        let pool = &pool;
        scope.spawn(move || {
            pool.with_transaction(|tx| {
                SqliteNoteRepository::new(tx).insert(&NewNote {
                    owner_id: UserId::parse("u1").unwrap(),
                    title: "pending".to_string(),
                    content: "body".to_string(),
                })?;
                locked_tx.send(()).unwrap();
                let _ = release_rx.recv();
                Ok(())
            })
            .unwrap();
        });

        locked_rx.recv().unwrap();
        let started_at = Instant::now();
        let listed = list_notes::execute(&deps, ListNotesRequest::default());
        let elapsed = started_at.elapsed();
        release_tx.send(()).unwrap();
        (listed, elapsed)
    });

    let listed = listed.unwrap();
    assert!(listed.notes.is_empty(), "uncommitted note must stay invisible");
    assert!(elapsed < Duration::from_secs(1), "list waited {elapsed:?}");

    let after = list_notes::execute(&deps, ListNotesRequest::default()).unwrap();
    assert_eq!(after.notes.len(), 1);
    assert_eq!(after.notes[0].title, "pending");
}
