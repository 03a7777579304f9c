mod common;

use auth::RevocationEntry;
use auth::RevocationStore;
use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use common::TestDb;
use notes_service::domain::note::errors::NoteError;
use notes_service::domain::note::models::Note;
use notes_service::domain::note::models::NoteId;
use notes_service::domain::note::models::NoteTitle;
use notes_service::domain::note::ports::NoteRepository;
use notes_service::domain::user::errors::UserError;
use notes_service::domain::user::models::EmailAddress;
use notes_service::domain::user::models::PersonName;
use notes_service::domain::user::models::User;
use notes_service::domain::user::models::UserId;
use notes_service::domain::user::ports::UserRepository;
use notes_service::outbound::repositories::PostgresNoteRepository;
use notes_service::outbound::repositories::PostgresRevocationStore;
use notes_service::outbound::repositories::PostgresUserRepository;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn user(email: &str) -> User {
    User {
        id: UserId::new(),
        first_name: PersonName::new("Ada".to_string()).unwrap(),
        last_name: PersonName::new("Lovelace".to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$placeholder".to_string(),
        created_at: start(),
    }
}

fn note(owner: UserId, title: &str, created_at: DateTime<Utc>) -> Note {
    Note {
        id: NoteId::new(),
        owner,
        title: NoteTitle::new(title.to_string()).unwrap(),
        description: None,
        created_at,
        updated_at: created_at,
    }
}

fn entry(revoked_at: DateTime<Utc>) -> RevocationEntry {
    RevocationEntry {
        subject: "user-7".to_string(),
        revoked_at,
        cutoff: revoked_at + Duration::seconds(3600),
    }
}

#[tokio::test]
async fn test_revocation_upsert_never_moves_backward() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let store = PostgresRevocationStore::new(db.pool.clone());

    let later = entry(start() + Duration::seconds(10));
    assert_eq!(store.upsert(later.clone()).await.unwrap(), later);

    let stored = store.upsert(entry(start())).await.unwrap();

    assert_eq!(stored, later);
    assert_eq!(store.find("user-7").await.unwrap(), Some(later));
}

#[tokio::test]
async fn test_revocation_upsert_moves_forward() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let store = PostgresRevocationStore::new(db.pool.clone());

    store.upsert(entry(start())).await.unwrap();
    let newer = entry(start() + Duration::seconds(30));
    let stored = store.upsert(newer.clone()).await.unwrap();

    assert_eq!(stored, newer);
    assert!(store.find("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_email_already_exists() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let ada = repository.create(user("ada@example.com")).await.unwrap();
    let result = repository.create(user("ADA@example.com")).await;

    assert!(matches!(
        result,
        Err(UserError::EmailAlreadyExists(email)) if email == "ada@example.com"
    ));

    let found = repository
        .find_by_email(&EmailAddress::new("ada@example.com".to_string()).unwrap())
        .await
        .unwrap()
        .expect("User should exist");
    assert_eq!(found.id, ada.id);
    assert_eq!(found.first_name.as_str(), "Ada");
    assert!(repository.find_by_id(&UserId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_by_owner_is_scoped_and_newest_first() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone());
    let notes = PostgresNoteRepository::new(db.pool.clone());

    let ada = users.create(user("ada@example.com")).await.unwrap();
    let grace = users.create(user("grace@example.com")).await.unwrap();

    notes
        .create(note(ada.id, "oldest", start()))
        .await
        .unwrap();
    notes
        .create(note(ada.id, "newest", start() + Duration::hours(2)))
        .await
        .unwrap();
    notes
        .create(note(ada.id, "middle", start() + Duration::hours(1)))
        .await
        .unwrap();
    notes
        .create(note(grace.id, "not yours", start() + Duration::hours(3)))
        .await
        .unwrap();

    let listed = notes.list_by_owner(&ada.id).await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|note| note.title.as_str()).collect();

    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    assert!(listed.iter().all(|note| note.owner == ada.id));
}

#[tokio::test]
async fn test_note_update_and_delete_missing_is_not_found() {
    let Some(db) = TestDb::from_env().await else {
        return;
    };
    let users = PostgresUserRepository::new(db.pool.clone());
    let notes = PostgresNoteRepository::new(db.pool.clone());

    let ada = users.create(user("ada@example.com")).await.unwrap();
    let stored = notes
        .create(note(ada.id, "draft", start()))
        .await
        .unwrap();

    let mut edited = stored.clone();
    edited.title = NoteTitle::new("final".to_string()).unwrap();
    edited.updated_at = start() + Duration::minutes(5);
    notes.update(edited.clone()).await.unwrap();
    assert_eq!(notes.find_by_id(&stored.id).await.unwrap(), Some(edited));

    notes.delete(&stored.id).await.unwrap();
    assert!(matches!(
        notes.delete(&stored.id).await,
        Err(NoteError::NotFound(_))
    ));
    assert!(matches!(
        notes.update(stored).await,
        Err(NoteError::NotFound(_))
    ));
}
