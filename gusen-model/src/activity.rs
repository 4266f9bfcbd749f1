use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One login attempt recorded by a channel. The admin backend only reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginLogEntry {
    pub login_id: String,
    pub status: String,
    pub action_at: DateTime<Utc>,
    pub channel_media: Option<String>,
    pub channel_device: Option<String>,
    pub ip_address: Option<String>,
}
