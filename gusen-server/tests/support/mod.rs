#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use gusen_config::{
    AuthConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    ServerConfig,
};
use gusen_core::{
    Identity,
    auth::{CredentialScheme, LegacySha1Hasher, SigningKey, TokenService},
    database::{
        InMemoryCityStore, InMemoryClientStore, InMemoryLogStore, InMemoryUserStore,
    },
};
use gusen_model::{City, ClientDetail, LoginId, LoginLogEntry, UserStatus};
use gusen_server::{AppState, build_app};

pub const ADMIN_ROLE: &str = "ADMIN";

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig {
            url: None,
            max_connections: 1,
        },
        auth: AuthConfig {
            signing_key: None,
            admin_role: ADMIN_ROLE.into(),
            credential_scheme: CredentialScheme::Sha1,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".into()],
            allowed_methods: vec!["GET".into(), "POST".into(), "PUT".into()],
            allowed_headers: vec!["Authorization".into(), "Content-Type".into()],
        },
        metadata: ConfigMetadata::default(),
    }
}

pub fn identity(raw_id: &str, password: &str, role: &str, minutes: i64) -> Identity {
    Identity {
        login_id: LoginId::parse(raw_id).expect("valid login id"),
        full_name: format!("{raw_id} Operator"),
        role: role.to_string(),
        credential_digest: LegacySha1Hasher::hex_digest(password),
        pin_digest: LegacySha1Hasher::hex_digest("654321"),
        status: UserStatus::Active,
        email: Some(format!("{}@backoffice.test", raw_id.to_lowercase())),
        phone: None,
        city: Some(1),
        last_login: None,
        created_at: base_time() + Duration::minutes(minutes),
        created_by: Some("SYSTEM".into()),
        updated_at: None,
        updated_by: None,
    }
}

pub fn log_entry(raw_id: &str, minutes: i64) -> LoginLogEntry {
    LoginLogEntry {
        login_id: raw_id.to_string(),
        status: "SUCCESS".into(),
        action_at: base_time() + Duration::minutes(minutes),
        channel_media: Some("WEB".into()),
        channel_device: Some("desktop".into()),
        ip_address: Some("192.0.2.10".into()),
    }
}

pub fn client_master() -> Vec<ClientDetail> {
    [("CL001", "Sinar Abadi"), ("CL002", "Dana Makmur"), ("CX900", "Nusantara Kapital")]
        .into_iter()
        .map(|(code, name)| ClientDetail {
            client_code: code.into(),
            client_name: name.into(),
        })
        .collect()
}

pub fn cities() -> Vec<City> {
    vec![
        City {
            city_code: 2,
            city_name: "Bandung".into(),
            province_code: Some("32".into()),
            province_name: Some("Jawa Barat".into()),
        },
        City {
            city_code: 1,
            city_name: "Jakarta".into(),
            province_code: Some("31".into()),
            province_name: Some("DKI Jakarta".into()),
        },
    ]
}

pub struct TestApp {
    pub server: TestServer,
    pub users: Arc<InMemoryUserStore>,
    pub logs: Arc<InMemoryLogStore>,
    pub clients: Arc<InMemoryClientStore>,
    /// Shares the server's key, for minting tokens the login flow never would.
    pub tokens: TokenService,
}

/// One administrator `ADMIN1` / `secret`, one operator `OPS01` / `ops-pass`.
pub fn default_users() -> Vec<Identity> {
    vec![
        identity("ADMIN1", "secret", ADMIN_ROLE, 0),
        identity("OPS01", "ops-pass", "OPERATOR", 1),
    ]
}

pub fn build_test_app(
    users: Vec<Identity>,
    entries: Vec<LoginLogEntry>,
) -> Result<TestApp> {
    let user_store = Arc::new(InMemoryUserStore::with_users(users));
    let log_store = Arc::new(InMemoryLogStore::with_entries(entries));
    let client_store = Arc::new(InMemoryClientStore::with_clients(client_master()));
    let key = SigningKey::generate()?;

    let state = AppState::new(
        test_config(),
        user_store.clone(),
        log_store.clone(),
        client_store.clone(),
        Arc::new(InMemoryCityStore::with_cities(cities())),
        Arc::new(LegacySha1Hasher),
        &key,
    );
    let server = TestServer::new(build_app(state))
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok(TestApp {
        server,
        users: user_store,
        logs: log_store,
        clients: client_store,
        tokens: TokenService::new(&key, ADMIN_ROLE),
    })
}

impl TestApp {
    pub async fn admin_token(&self) -> String {
        let response = self
            .server
            .post(gusen_model::routes::v1::auth::LOGIN)
            .json(&serde_json::json!({
                "login_id": "ADMIN1",
                "password": "secret",
            }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["data"]["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }
}
