use jotter_core::{
    create_note, delete_note, list_notes, update_note, AppResult, CreateNoteRequest, DbPool,
    DeleteNoteRequest, Deps, ErrorKind, IssueCode, ListNotesRequest, NoteDto, UpdateNoteRequest,
};

fn pool() -> DbPool {
    DbPool::in_memory().unwrap()
}

fn count_notes(pool: &DbPool) -> i64 {
    pool.with_connection(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?)
    })
    .unwrap()
}

fn create(deps: &Deps<'_>, title: &str, content: &str) -> AppResult<NoteDto> {
    create_note::execute(
        deps,
        CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
        },
    )
}

fn update(
    deps: &Deps<'_>,
    note_id: &str,
    title: Option<&str>,
    content: Option<&str>,
) -> AppResult<NoteDto> {
    update_note::execute(
        deps,
        UpdateNoteRequest {
            note_id: note_id.to_string(),
            title: title.map(str::to_string),
            content: content.map(str::to_string),
        },
    )
}

fn delete(deps: &Deps<'_>, note_id: &str) -> AppResult<NoteDto> {
    delete_note::execute(
        deps,
        DeleteNoteRequest {
            note_id: note_id.to_string(),
        },
    )
}

fn list(deps: &Deps<'_>, limit: Option<i64>, offset: Option<i64>) -> AppResult<Vec<NoteDto>> {
    list_notes::execute(deps, ListNotesRequest { limit, offset }).map(|output| output.notes)
}

#[test]
fn owner_lifecycle_scenario() {
    let pool = pool();
    let u1 = Deps::authenticated(&pool, "U1");
    let u2 = Deps::authenticated(&pool, "U2");

    let created = create(&u1, "A", "B").unwrap();
    assert_eq!(created.owner_id.as_str(), "U1");
    assert!(!created.id.as_str().is_empty());
    let note_id = created.id.as_str().to_string();

    let foreign = update(&u2, &note_id, Some("C"), None).unwrap_err();
    assert_eq!(foreign.kind(), ErrorKind::NotFound);

    let updated = update(&u1, &note_id, Some("C"), None).unwrap();
    assert_eq!(updated.title, "C");
    assert_eq!(updated.content, "B");

    let deleted = delete(&u1, &note_id).unwrap();
    assert_eq!(deleted.title, "C");
    assert_eq!(deleted.id, created.id);

    let again = delete(&u1, &note_id).unwrap_err();
    assert_eq!(again.kind(), ErrorKind::NotFound);
    assert_eq!(count_notes(&pool), 0);
}

#[test]
fn other_users_never_see_or_touch_foreign_notes() {
    let pool = pool();
    let owner = Deps::authenticated(&pool, "owner");
    let other = Deps::authenticated(&pool, "other");
    let created = create(&owner, "private", "secret").unwrap();

    assert!(list(&other, None, None).unwrap().is_empty());
    let delete_err = delete(&other, created.id.as_str()).unwrap_err();
    assert_eq!(delete_err.kind(), ErrorKind::NotFound);
    assert_eq!(delete_err.safe_message(), Some("not found"));

    let listed = list(&owner, None, None).unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn invalid_create_input_writes_nothing() {
    let pool = pool();
    let deps = Deps::authenticated(&pool, "u1");
    let cases = [
        (String::new(), "body".to_string()),
        ("t".repeat(101), "body".to_string()),
        ("title".to_string(), "c".repeat(10_001)),
        ("title".to_string(), String::new()),
    ];

    for (title, content) in cases {
        let err = create(&deps, &title, &content).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code(), "INVALID_INPUT");
        assert!(!err.details().unwrap().is_empty());
    }
    assert_eq!(count_notes(&pool), 0);
}

#[test]
fn invalid_update_input_modifies_nothing() {
    let pool = pool();
    let deps = Deps::authenticated(&pool, "u1");
    let created = create(&deps, "A", "B").unwrap();
    let id = created.id.as_str();

    let neither = update(&deps, id, None, None).unwrap_err();
    assert_eq!(neither.kind(), ErrorKind::Validation);
    assert_eq!(neither.details().unwrap()[0].code, IssueCode::Custom);

    let long_title = "t".repeat(101);
    let long_content = "c".repeat(10_001);
    let cases: [(Option<&str>, Option<&str>); 3] = [
        (Some(""), None),
        (Some(long_title.as_str()), None),
        (None, Some(long_content.as_str())),
    ];
    for (title, content) in cases {
        let err = update(&deps, id, title, content).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    let listed = list(&deps, None, None).unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn update_is_a_true_patch() {
    let pool = pool();
    let deps = Deps::authenticated(&pool, "u1");
    let created = create(&deps, "title", "  content with spaces \n").unwrap();

    let content_only = update(&deps, created.id.as_str(), None, Some("new content")).unwrap();
    assert_eq!(content_only.title, "title");
    assert_eq!(content_only.content, "new content");
    assert!(content_only.updated_at > created.updated_at);
    assert_eq!(content_only.created_at, created.created_at);

    let title_only = update(&deps, created.id.as_str(), Some("new title"), None).unwrap();
    assert_eq!(title_only.title, "new title");
    assert_eq!(title_only.content, "new content");
    assert!(title_only.updated_at > content_only.updated_at);
}

#[test]
fn create_then_list_round_trips() {
    let pool = pool();
    let deps = Deps::authenticated(&pool, "u1");
    let created = create(&deps, "T", " C ").unwrap();

    let listed = list(&deps, None, None).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "T");
    assert_eq!(listed[0].content, " C ");
    assert_eq!(listed[0].created_at, listed[0].updated_at);
    assert_eq!(listed[0], created);
}

#[test]
fn list_respects_limit_offset_and_bounds() {
    let pool = pool();
    let deps = Deps::authenticated(&pool, "u1");
    for idx in 0..5 {
        create(&deps, &format!("note {idx}"), "body").unwrap();
    }

    assert_eq!(list(&deps, None, None).unwrap().len(), 5);
    assert_eq!(list(&deps, Some(2), None).unwrap().len(), 2);
    assert_eq!(list(&deps, Some(2), Some(4)).unwrap().len(), 1);
    assert_eq!(list(&deps, Some(100), Some(5)).unwrap().len(), 0);

    let listed = list(&deps, None, None).unwrap();
    for pair in listed.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    for limit in [0, 101] {
        let err = list(&deps, Some(limit), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "limit {limit}");
    }
    let err = list(&deps, None, Some(-1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn missing_caller_identity_is_rejected_before_storage() {
    let pool = pool();
    let deps = Deps::public(&pool);

    let err = create(&deps, "A", "B").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.details().unwrap()[0].path, "userId");

    let blank = Deps::authenticated(&pool, "");
    assert_eq!(
        list(&blank, None, None).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(count_notes(&pool), 0);
}

#[test]
fn drifted_rows_fail_output_contract_and_roll_back() {
    let pool = pool();
    let deps = Deps::authenticated(&pool, "u1");
    pool.with_connection(|conn| {
        conn.execute(
            "INSERT INTO notes (id, owner_id, title, content, created_at)
             VALUES ('legacy', 'u1', '', 'old body', 1);",
            [],
        )?;
        Ok(())
    })
    .unwrap();

    let list_err = list(&deps, None, None).unwrap_err();
    assert_eq!(list_err.kind(), ErrorKind::Unknown);
    assert_eq!(list_err.safe_message(), Some("internal error"));

    let update_err = update(&deps, "legacy", None, Some("new body")).unwrap_err();
    assert_eq!(update_err.kind(), ErrorKind::Unknown);

    let content: String = pool
        .with_connection(|conn| {
            Ok(conn.query_row("SELECT content FROM notes WHERE id = 'legacy'", [], |row| {
                row.get(0)
            })?)
        })
        .unwrap();
    assert_eq!(content, "old body");

    let repaired = update(&deps, "legacy", Some("fixed"), None).unwrap();
    assert_eq!(repaired.title, "fixed");
    assert!(repaired.updated_at > repaired.created_at);
}
