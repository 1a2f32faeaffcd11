use blogstore_core::db::open_db_in_memory;
use blogstore_core::{
    Category, NewPost, PostChanges, PostRepository, PostService, PublishPostRequest, RepoError,
    SqlitePostRepository, ValidationError,
};
use rusqlite::Connection;
use std::thread;
use std::time::Duration;

#[test]
fn create_and_get_roundtrip_returns_trimmed_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    let content = body(250);

    let created = repo
        .create_post(
            &NewPost::new(
                "  This is a Secret ",
                &format!("   {content}\n"),
                Some("  summary  "),
                "Fiction",
            )
            .unwrap(),
        )
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.title, "This is a Secret");
    assert_eq!(created.content, content);
    assert_eq!(created.summary.as_deref(), Some("summary"));
    assert_eq!(created.category, Category::Fiction);
    assert_eq!(created.updated_at, created.created_at);

    assert_eq!(repo.get_post(created.id).unwrap(), Some(created));
}

#[test]
fn post_without_summary_is_stored_without_summary() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let created = repo
        .create_post(&NewPost::new("Top Picks", &body(300), None, "Non-Fiction").unwrap())
        .unwrap();
    let loaded = repo.get_post(created.id).unwrap().unwrap();
    assert_eq!(loaded.summary, None);
    assert_eq!(loaded.category, Category::NonFiction);
}

#[test]
fn service_enforces_every_field_rule() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let cases = [
        (request("Plain News Today", 300, None, "Fiction"), "title"),
        (request("Guess Again", 249, None, "Fiction"), "content"),
        (request("Guess Again", 300, Some(251), "Fiction"), "summary"),
        (request("Guess Again", 300, None, "Mystery"), "category"),
    ];
    for (input, field) in cases {
        match service.publish_post(&input) {
            Err(RepoError::Validation(err)) => assert_eq!(err.field(), field),
            other => panic!("expected {field} validation error, got {other:?}"),
        }
    }
    assert!(service.list_posts(None).unwrap().is_empty());

    service
        .publish_post(&request("Guess Again", 250, Some(250), "Fiction"))
        .unwrap();
    assert_eq!(service.list_posts(None).unwrap().len(), 1);
}

#[test]
fn update_applies_changes_and_can_clear_summary() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    let created = repo
        .create_post(&NewPost::new("Top Ten", &body(260), Some("teaser"), "Fiction").unwrap())
        .unwrap();

    let updated = repo
        .update_post(
            created.id,
            &PostChanges::default()
                .title(" You Won't Believe It ")
                .summary(None)
                .category("Non-Fiction"),
        )
        .unwrap();
    assert_eq!(updated.title, "You Won't Believe It");
    assert_eq!(updated.summary, None);
    assert_eq!(updated.category, Category::NonFiction);
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[test]
fn update_advances_updated_at_after_short_pause() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    let created = repo
        .create_post(&NewPost::new("Top Ten", &body(260), None, "Fiction").unwrap())
        .unwrap();

    thread::sleep(Duration::from_millis(20));
    let updated = repo
        .update_post(created.id, &PostChanges::default().category("Non-Fiction"))
        .unwrap();
    assert!(
        updated.updated_at > created.updated_at,
        "updated_at {} did not advance past {}",
        updated.updated_at,
        created.updated_at
    );
}

#[test]
fn rejected_update_leaves_row_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    let created = repo
        .create_post(&NewPost::new("Top Ten", &body(260), None, "Fiction").unwrap())
        .unwrap();

    let err = repo
        .update_post(
            created.id,
            &PostChanges::default()
                .title("Top Eleven")
                .content("too short"),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::ContentTooShort { length: 9 })
    ));
    assert_eq!(repo.get_post(created.id).unwrap().unwrap(), created);
}

#[test]
fn empty_changes_return_stored_post() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    let created = repo
        .create_post(&NewPost::new("Top Ten", &body(260), None, "Fiction").unwrap())
        .unwrap();

    let same = repo
        .update_post(created.id, &PostChanges::default())
        .unwrap();
    assert_eq!(same, created);
}

#[test]
fn list_filters_by_category() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    let fiction = repo
        .create_post(&NewPost::new("Secret One", &body(260), None, "Fiction").unwrap())
        .unwrap();
    let non_fiction = repo
        .create_post(&NewPost::new("Secret Two", &body(260), None, "Non-Fiction").unwrap())
        .unwrap();

    assert_eq!(repo.list_posts(None).unwrap().len(), 2);
    assert_eq!(repo.list_posts(Some(Category::Fiction)).unwrap(), vec![fiction]);
    assert_eq!(
        repo.list_posts(Some(Category::NonFiction)).unwrap(),
        vec![non_fiction]
    );
}

#[test]
fn delete_removes_post_and_reports_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());
    let created = service
        .publish_post(&request("Guess Who", 260, None, "Fiction"))
        .unwrap();

    service.delete_post(created.id).unwrap();
    assert!(service.get_post(created.id).unwrap().is_none());
    assert!(matches!(
        service.delete_post(created.id),
        Err(RepoError::PostNotFound(id)) if id == created.id
    ));
    assert!(matches!(
        service.edit_post(created.id, &PostChanges::default().title("Top")),
        Err(RepoError::PostNotFound(_))
    ));
}

#[test]
fn storage_rejects_unknown_category_literals() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO posts (title, content, category) VALUES ('Top', ?1, 'Mystery');",
        [body(260)],
    );
    assert!(result.is_err());
}

#[test]
fn read_path_rejects_rows_written_around_validation() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO posts (title, content, category) VALUES ('Top', 'short', 'Fiction');",
        [],
    )
    .unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.list_posts(None),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqlitePostRepository::try_new(&conn),
        Err(RepoError::UninitializedConnection { .. })
    ));
}

fn body(chars: usize) -> String {
    "x".repeat(chars)
}

fn request(
    title: &str,
    content_chars: usize,
    summary_chars: Option<usize>,
    category: &str,
) -> PublishPostRequest {
    PublishPostRequest {
        title: title.to_string(),
        content: body(content_chars),
        summary: summary_chars.map(|chars| "s".repeat(chars)),
        category: category.to_string(),
    }
}
