use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::util::{non_blank_var, parse_csv_var, parse_var};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub auth: FileAuthConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_scheme: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_headers: Option<Vec<String>>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub database_url_file: Option<PathBuf>,
    pub database_host: Option<String>,
    pub database_port: Option<u16>,
    pub database_user: Option<String>,
    pub database_name: Option<String>,
    pub database_password: Option<String>,
    pub database_password_file: Option<PathBuf>,
    pub database_max_connections: Option<u32>,
    pub auth_signing_key: Option<String>,
    pub auth_admin_role: Option<String>,
    pub auth_credential_scheme: Option<String>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub cors_allowed_methods: Option<Vec<String>>,
    pub cors_allowed_headers: Option<Vec<String>>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: non_blank_var("GUSEN_CONFIG").map(PathBuf::from),
            server_host: non_blank_var("SERVER_HOST"),
            server_port: parse_var("SERVER_PORT"),
            database_url: non_blank_var("DATABASE_URL"),
            database_url_file: non_blank_var("DATABASE_URL_FILE").map(PathBuf::from),
            database_host: non_blank_var("DATABASE_HOST"),
            database_port: parse_var("DATABASE_PORT"),
            database_user: non_blank_var("DATABASE_USER"),
            database_name: non_blank_var("DATABASE_NAME"),
            database_password: non_blank_var("DATABASE_PASSWORD"),
            database_password_file: non_blank_var("DATABASE_PASSWORD_FILE")
                .map(PathBuf::from),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS"),
            auth_signing_key: non_blank_var("AUTH_SIGNING_KEY"),
            auth_admin_role: non_blank_var("AUTH_ADMIN_ROLE"),
            auth_credential_scheme: non_blank_var("AUTH_CREDENTIAL_SCHEME"),
            cors_allowed_origins: parse_csv_var("CORS_ALLOWED_ORIGINS"),
            cors_allowed_methods: parse_csv_var("CORS_ALLOWED_METHODS"),
            cors_allowed_headers: parse_csv_var("CORS_ALLOWED_HEADERS"),
        }
    }
}
