#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode as AxumStatus};
use axum::routing::post;
use axum::{Json, Router};
use chrono::FixedOffset;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Mutex;
use uuid::Uuid;

use formdesk::config::{Config, StoreKind, TwilioConfig};
use formdesk::db::{InMemorySubmissionStore, PgSubmissionStore, StoreError, SubmissionStore};
use formdesk::models::{NewSubmission, Submission};
use formdesk::notify::{Notifier, NotifyError, Sms};
use formdesk::state::AppState;

/// A running server with in-process collaborators.
pub struct TestApp<S = InMemorySubmissionStore> {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<FlakyStore<S>>,
    /// Throwaway database backing the store, if any.
    pub db_name: Option<String>,
}

impl<S: SubmissionStore> TestApp<S> {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to `/Form`, return (body, status).
    pub async fn submit(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/Form"))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// GET `/Display`, return (body, status).
    pub async fn display(&self) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url("/Display"))
            .send()
            .await
            .expect("display request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Number of records visible through the store.
    pub async fn stored(&self) -> usize {
        self.store
            .inner
            .list_all()
            .await
            .expect("list submissions failed")
            .len()
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: None,
        store: StoreKind::Memory,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 65_536,
        log_level: "warn".to_string(),
        display_offset: FixedOffset::east_opt(330 * 60).unwrap(),
        twilio: None,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(formdesk::notify::NoopNotifier)).await
}

/// Spawn the router with the given notifier and a fresh in-memory store.
pub async fn spawn_app_with(notifier: Arc<dyn Notifier>) -> TestApp {
    let store: Arc<FlakyStore> = Arc::new(FlakyStore::default());
    let state = Arc::new(AppState {
        store: store.clone(),
        notifier,
        config: test_config(),
    });

    let addr = serve(formdesk::build_app(state)).await;
    TestApp {
        addr,
        client: Client::new(),
        store,
        db_name: None,
    }
}

/// Spawn the router through `build_state`, so the notifier comes from config.
pub async fn spawn_app_from_config(config: Config) -> TestApp {
    let store: Arc<FlakyStore> = Arc::new(FlakyStore::default());
    let state = formdesk::build_state(store.clone(), config);

    let addr = serve(formdesk::build_app(state)).await;
    TestApp {
        addr,
        client: Client::new(),
        store,
        db_name: None,
    }
}

/// Spawn the router on a fresh Postgres database created from `DATABASE_URL`.
/// Returns `None` when `DATABASE_URL` is unset so the caller can skip.
pub async fn spawn_app_pg() -> Option<TestApp<PgSubmissionStore>> {
    let _ = dotenvy::dotenv();

    let Ok(base_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres test");
        return None;
    };

    let db_name = format!("formdesk_test_{}", Uuid::now_v7().simple());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url_for(&base_url, "postgres"))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    // Opens the pool and runs migrations the same way the server does.
    let pg = formdesk::db::postgres::connect(&database_url_for(&base_url, &db_name))
        .await
        .expect("Failed to prepare test database");

    let store = Arc::new(FlakyStore::new(pg));
    let state = Arc::new(AppState {
        store: store.clone(),
        notifier: Arc::new(formdesk::notify::NoopNotifier),
        config: test_config(),
    });

    let addr = serve(formdesk::build_app(state)).await;
    Some(TestApp {
        addr,
        client: Client::new(),
        store,
        db_name: Some(db_name),
    })
}

/// Close the store and drop the test database, if one was created.
pub async fn cleanup<S: SubmissionStore>(app: TestApp<S>) {
    app.store.inner.close().await;

    let Some(db_name) = app.db_name else {
        return;
    };
    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url_for(&base_url, "postgres"))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}

/// Swap the database name at the end of a Postgres URL.
fn database_url_for(base_url: &str, db_name: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.to_string())
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    addr
}

/// Store wrapper whose reads and writes can be made to fail.
#[derive(Default)]
pub struct FlakyStore<S = InMemorySubmissionStore> {
    pub inner: S,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl<S> FlakyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl<S: SubmissionStore> SubmissionStore for FlakyStore<S> {
    async fn create(&self, new: NewSubmission) -> Result<Submission, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        self.inner.create(new).await
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        self.inner.list_all().await
    }
}

/// Notifier that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Sms>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn route(&self) -> Option<(&str, &str)> {
        Some(("+15550001111", "+919999900000"))
    }

    async fn send(&self, sms: &Sms) -> Result<(), NotifyError> {
        self.sent.lock().await.push(sms.clone());
        if self.fail {
            return Err(NotifyError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

/// A request captured by [`spawn_twilio_stub`].
#[derive(Debug, Clone)]
pub struct CapturedMessage {
    pub account_sid: String,
    pub authorization: Option<String>,
    pub form: HashMap<String, String>,
}

#[derive(Clone)]
struct StubState {
    status: AxumStatus,
    captured: Arc<Mutex<Vec<CapturedMessage>>>,
}

/// Local stand-in for the Twilio Messages API answering every request with
/// `status`. Returns its base URL and the captured requests.
pub async fn spawn_twilio_stub(status: u16) -> (String, Arc<Mutex<Vec<CapturedMessage>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status: AxumStatus::from_u16(status).unwrap(),
        captured: captured.clone(),
    };

    let app = Router::new()
        .route(
            "/2010-04-01/Accounts/{sid}/Messages.json",
            post(stub_messages),
        )
        .with_state(state);

    let addr = serve(app).await;
    (format!("http://{addr}"), captured)
}

async fn stub_messages(
    State(state): State<StubState>,
    Path(sid): Path<String>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (AxumStatus, Json<Value>) {
    state.captured.lock().await.push(CapturedMessage {
        account_sid: sid,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
        form,
    });

    let body = if state.status.is_success() {
        json!({ "sid": "SM00000000000000000000000000000000", "status": "queued" })
    } else {
        json!({ "code": 21211, "message": "The 'To' number is not a valid phone number." })
    };
    (state.status, Json(body))
}

pub fn twilio_config(api_base: &str) -> TwilioConfig {
    TwilioConfig {
        account_sid: "ACtest".to_string(),
        auth_token: "secret".to_string(),
        from: "+15550001111".to_string(),
        to: "+919999900000".to_string(),
        api_base: api_base.to_string(),
    }
}
