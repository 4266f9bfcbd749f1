use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::LoginId;

/// Entry of the client master list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDetail {
    pub client_code: String,
    pub client_name: String,
}

/// Link between an account and the client it trades for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAssignment {
    pub login_id: LoginId,
    pub client_code: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignClientRequest {
    pub client_code: String,
}

/// `?client_code=` filter for the unassigned-client search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientSearchQuery {
    #[serde(default)]
    pub client_code: String,
}

/// Reference city an account's `city` field points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub city_code: i32,
    pub city_name: String,
    pub province_code: Option<String>,
    pub province_name: Option<String>,
}
