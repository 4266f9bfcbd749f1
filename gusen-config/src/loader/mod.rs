mod error;

pub use error::ConfigLoadError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use gusen_core::auth::CredentialScheme;
use url::Url;

use crate::{
    models::{
        AuthConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
        ServerConfig,
    },
    sources::{EnvConfig, FileConfig, FileDatabaseConfig},
    validation::{self, ConfigWarnings},
};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = ["admin.toml", "config/admin.toml"];

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ADMIN_ROLE: &str = "ADMIN";
const DEFAULT_DATABASE_PORT: u16 = 5432;

const DEFAULT_CORS_ORIGINS: [&str; 2] =
    ["http://localhost:3000", "http://localhost:5173"];
const DEFAULT_CORS_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];
const DEFAULT_CORS_HEADERS: [&str; 2] = ["Authorization", "Content-Type"];

/// Result of a successful load: the config plus anything worth telling the
/// operator about.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Load the `.env` file, read the process environment and resolve.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let mut loaded = self.load_from(EnvConfig::gather())?;
        loaded.config.metadata.env_file_loaded = env_file_loaded;
        Ok(loaded)
    }

    /// Resolve against an already gathered environment. Nothing is read from
    /// the process environment.
    pub fn load_from(&self, env: EnvConfig) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let mut warnings = ConfigWarnings::default();
        if config_path.is_none() {
            warnings.push_with_hint(
                "No configuration file found; using environment and defaults",
                "Create admin.toml or point GUSEN_CONFIG at a file",
            );
        }

        let config = self.compose_config(file_config.unwrap_or_default(), env, config_path)?;
        warnings.extend(validation::apply_guard_rails(&config)?);

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let outcome = match &self.env_file {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };
        match outcome {
            Ok(()) => Ok(true),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self.config_path.clone().or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file: FileConfig,
        env: EnvConfig,
        config_path: Option<PathBuf>,
    ) -> Result<Config, ConfigLoadError> {
        let database_url = self.resolve_database_url(&env, &file.database)?;

        let server = ServerConfig {
            host: env
                .server_host
                .or(file.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.server_port.or(file.server.port).unwrap_or(DEFAULT_PORT),
        };

        let database = DatabaseConfig {
            url: database_url,
            max_connections: env
                .database_max_connections
                .or(file.database.max_connections)
                .filter(|max| *max > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };

        let credential_scheme = match env
            .auth_credential_scheme
            .or(file.auth.credential_scheme)
        {
            Some(raw) => raw.parse::<CredentialScheme>().map_err(|_| {
                ConfigLoadError::UnknownCredentialScheme { value: raw }
            })?,
            None => CredentialScheme::default(),
        };

        let auth = AuthConfig {
            signing_key: env
                .auth_signing_key
                .or(file.auth.signing_key)
                .filter(|key| !key.trim().is_empty()),
            admin_role: env
                .auth_admin_role
                .or(file.auth.admin_role)
                .map(|role| role.trim().to_string())
                .unwrap_or_else(|| DEFAULT_ADMIN_ROLE.to_string()),
            credential_scheme,
        };

        let cors = CorsConfig {
            allowed_origins: env
                .cors_allowed_origins
                .or(file.cors.allowed_origins)
                .unwrap_or_else(|| owned(&DEFAULT_CORS_ORIGINS)),
            allowed_methods: env
                .cors_allowed_methods
                .or(file.cors.allowed_methods)
                .unwrap_or_else(|| owned(&DEFAULT_CORS_METHODS)),
            allowed_headers: env
                .cors_allowed_headers
                .or(file.cors.allowed_headers)
                .unwrap_or_else(|| owned(&DEFAULT_CORS_HEADERS)),
        };

        Ok(Config {
            server,
            database,
            auth,
            cors,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded: false,
            },
        })
    }

    fn resolve_database_url(
        &self,
        env: &EnvConfig,
        file_database: &FileDatabaseConfig,
    ) -> Result<Option<String>, ConfigLoadError> {
        if let Some(url) = env.database_url.clone() {
            return Ok(Some(url));
        }

        if let Some(path) = env.database_url_file.as_ref()
            && let Some(url) = read_secret_file(path)?
        {
            return Ok(Some(url));
        }

        if let Some(stored_url) = file_database
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        {
            let mut parsed = Url::parse(stored_url)
                .map_err(|source| ConfigLoadError::InvalidDatabaseUrl { source })?;
            if parsed.password().is_none()
                && let Some(password) = resolve_database_password(env, file_database)?
            {
                parsed
                    .set_password(Some(&password))
                    .map_err(|_| ConfigLoadError::InvalidDatabasePassword)?;
            }
            return Ok(Some(parsed.to_string()));
        }

        let (Some(host), Some(user), Some(name)) = (
            env.database_host.as_deref(),
            env.database_user.as_deref(),
            env.database_name.as_deref(),
        ) else {
            return Ok(None);
        };

        let port = env.database_port.unwrap_or(DEFAULT_DATABASE_PORT);
        let mut url = Url::parse(&format!("postgresql://{host}:{port}/{name}"))
            .map_err(|source| ConfigLoadError::InvalidDatabaseUrl { source })?;
        url.set_username(user)
            .map_err(|_| ConfigLoadError::InvalidDatabaseUsername {
                username: user.to_string(),
            })?;
        if let Some(password) = resolve_database_password(env, file_database)? {
            url.set_password(Some(&password))
                .map_err(|_| ConfigLoadError::InvalidDatabasePassword)?;
        }
        Ok(Some(url.to_string()))
    }
}

fn resolve_database_password(
    env: &EnvConfig,
    file_database: &FileDatabaseConfig,
) -> Result<Option<String>, ConfigLoadError> {
    if let Some(password) = env.database_password.clone() {
        return Ok(Some(password));
    }

    for path in [
        env.database_password_file.as_ref(),
        file_database.password_file.as_ref(),
    ]
    .into_iter()
    .flatten()
    {
        if let Some(secret) = read_secret_file(path)? {
            return Ok(Some(secret));
        }
    }

    Ok(None)
}

fn read_secret_file(path: &Path) -> Result<Option<String>, ConfigLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::SecretFileIo {
        path: path.to_path_buf(),
        source,
    })?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
