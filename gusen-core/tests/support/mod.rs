#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use gusen_core::{
    Identity,
    auth::{CredentialHasher, LegacySha1Hasher, SigningKey, TokenService},
    database::{
        InMemoryCityStore, InMemoryClientStore, InMemoryLogStore, InMemoryUserStore,
    },
    services::{
        ActivityLogService, AuthService, ClientDirectoryService, UserManagementService,
    },
};
use gusen_model::{City, ClientDetail, LoginId, LoginLogEntry, UserStatus};

pub const ADMIN_ROLE: &str = "ADMIN";

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).single().unwrap_or_default()
}

pub fn login_id(raw: &str) -> LoginId {
    LoginId::parse(raw).expect("valid login id")
}

/// Account created `minutes` after [`base_time`] with SHA-1 digests.
pub fn identity(raw_id: &str, password: &str, role: &str, minutes: i64) -> Identity {
    Identity {
        login_id: login_id(raw_id),
        full_name: format!("{raw_id} Person"),
        role: role.to_string(),
        credential_digest: LegacySha1Hasher::hex_digest(password),
        pin_digest: LegacySha1Hasher::hex_digest("123456"),
        status: UserStatus::Active,
        email: Some(format!("{}@example.test", raw_id.to_lowercase())),
        phone: None,
        city: None,
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
        channel_media: Some("MOBILE".into()),
        channel_device: None,
        ip_address: Some("10.0.0.1".into()),
    }
}

pub fn client(code: &str, name: &str) -> ClientDetail {
    ClientDetail {
        client_code: code.to_string(),
        client_name: name.to_string(),
    }
}

pub fn city(code: i32, name: &str) -> City {
    City {
        city_code: code,
        city_name: name.to_string(),
        province_code: Some("31".into()),
        province_name: Some("DKI Jakarta".into()),
    }
}

/// CL001 to CL003 plus CX900, none assigned.
pub fn client_master() -> Vec<ClientDetail> {
    vec![
        client("CL002", "Dana Makmur"),
        client("CL001", "Sinar Abadi"),
        client("CX900", "Nusantara Kapital"),
        client("CL003", "Mitra Sejahtera"),
    ]
}

pub struct Harness {
    pub users: Arc<InMemoryUserStore>,
    pub logs: Arc<InMemoryLogStore>,
    pub tokens: Arc<TokenService>,
    pub auth: AuthService,
    pub management: UserManagementService,
    pub activity: ActivityLogService,
    pub clients: Arc<InMemoryClientStore>,
    pub directory: ClientDirectoryService,
}

pub fn harness(users: Vec<Identity>, entries: Vec<LoginLogEntry>) -> Harness {
    let users = Arc::new(InMemoryUserStore::with_users(users));
    let logs = Arc::new(InMemoryLogStore::with_entries(entries));
    let hasher: Arc<dyn CredentialHasher> = Arc::new(LegacySha1Hasher);
    let key = SigningKey::generate().expect("signing key");
    let tokens = Arc::new(TokenService::new(&key, ADMIN_ROLE));
    let clients = Arc::new(InMemoryClientStore::with_clients(client_master()));
    let cities = Arc::new(InMemoryCityStore::with_cities([
        city(3173, "Jakarta Selatan"),
        city(3171, "Jakarta Pusat"),
    ]));

    Harness {
        directory: ClientDirectoryService::new(users.clone(), clients.clone(), cities),
        auth: AuthService::new(users.clone(), hasher.clone(), tokens.clone()),
        management: UserManagementService::new(users.clone(), hasher),
        activity: ActivityLogService::new(logs.clone()),
        users,
        logs,
        tokens,
        clients,
    }
}
