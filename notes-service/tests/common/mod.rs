#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::InMemoryRevocationStore;
use auth::ManualClock;
use notes_service::domain::note::errors::NoteError;
use notes_service::domain::note::models::Note;
use notes_service::domain::note::models::NoteId;
use notes_service::domain::note::ports::NoteRepository;
use notes_service::domain::note::service::NoteService;
use notes_service::domain::session::service::SessionService;
use notes_service::domain::user::errors::UserError;
use notes_service::domain::user::models::EmailAddress;
use notes_service::domain::user::models::User;
use notes_service::domain::user::models::UserId;
use notes_service::domain::user::ports::UserRepository;
use notes_service::inbound::http::router::create_router;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use tokio::sync::RwLock;

pub const SECRET: &[u8] = b"integration-test-secret-at-least-32-bytes";
pub const DEFAULT_TTL_SECONDS: i64 = 3600;
pub const PASSWORD: &str = "correct horse battery";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::starting_now());
        let authenticator = Arc::new(
            Authenticator::with_clock(
                SECRET,
                DEFAULT_TTL_SECONDS,
                Arc::new(InMemoryRevocationStore::new()),
                clock.clone(),
            )
            .expect("Failed to build authenticator"),
        );

        let session_service = Arc::new(SessionService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::clone(&authenticator),
        ));
        let note_service = Arc::new(NoteService::new(Arc::new(
            InMemoryNoteRepository::default(),
        )));

        let router = create_router(session_service, note_service, Arc::clone(&authenticator));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            clock,
            authenticator,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the access token.
    pub async fn register(&self, email: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": email,
                "password": PASSWORD,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        access_token(response).await
    }

    /// Log in and return the raw response.
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create a note and return its id.
    pub async fn create_note(&self, token: &str, title: &str) -> String {
        let response = self
            .post_authenticated("/api/notes", token)
            .json(&json!({ "title": title }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

pub async fn access_token(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["accessToken"]
        .as_str()
        .expect("Missing access token")
        .to_string()
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == *email)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: RwLock<HashMap<NoteId, Note>>,
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn create(&self, note: Note) -> Result<Note, NoteError> {
        self.notes.write().await.insert(note.id, note.clone());
        Ok(note)
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        Ok(self.notes.read().await.get(id).cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Note>, NoteError> {
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .values()
            .filter(|note| note.owner == *owner)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn update(&self, note: Note) -> Result<Note, NoteError> {
        let mut notes = self.notes.write().await;
        match notes.get_mut(&note.id) {
            Some(stored) => {
                *stored = note.clone();
                Ok(note)
            }
            None => Err(NoteError::NotFound(note.id.to_string())),
        }
    }

    async fn delete(&self, id: &NoteId) -> Result<(), NoteError> {
        self.notes
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| NoteError::NotFound(id.to_string()))
    }
}

/// Throwaway Postgres database with migrations applied.
///
/// Created only when `DATABASE_URL` points at a reachable server's
/// maintenance database; each instance gets its own database.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Returns `None` when `DATABASE_URL` is unset.
    pub async fn from_env() -> Option<Self> {
        let Ok(admin_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres repository test");
            return None;
        };

        let db_name = format!(
            "test_notes_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        let pool = self.pool.clone();
        tokio::spawn(async move {
            pool.close().await;

            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
