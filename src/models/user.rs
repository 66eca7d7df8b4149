//! User model

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::utils::errors::{PartyBoardError, Result};
use crate::utils::helpers::split_full_name;
use super::wire::string_or_number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
    /// Page id -> granted
    #[serde(default)]
    pub permissions: HashMap<String, bool>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Coordinator,
    #[serde(alias = "participant")]
    User,
}

impl FromStr for Role {
    type Err = PartyBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "coordinator" => Ok(Role::Coordinator),
            "user" | "participant" => Ok(Role::User),
            other => Err(PartyBoardError::InvalidInput(format!("unknown role: {}", other))),
        }
    }
}

/// Dashboard pages that can be granted individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Users,
    Events,
    Parties,
    LanguageSettings,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Users,
        Page::Events,
        Page::Parties,
        Page::LanguageSettings,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Users => "users",
            Page::Events => "events",
            Page::Parties => "parties",
            Page::LanguageSettings => "language-settings",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl User {
    /// Name shown in lists; falls back to the username
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins see every page; everyone else needs an explicit grant
    pub fn can_access(&self, page: Page) -> bool {
        self.is_active
            && (self.is_admin() || self.permissions.get(page.id()).copied().unwrap_or(false))
    }

    /// Only admins and coordinators may move an event between statuses
    pub fn can_manage_status(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Coordinator)
    }
}

/// Payload for `POST /users/create/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: Role,
    pub permissions: HashMap<String, bool>,
}

impl CreateUserRequest {
    /// Build a request from the single "full name" form field
    pub fn from_full_name(full_name: &str, username: &str, password: &str, role: Role) -> Result<Self> {
        if full_name.trim().is_empty() || username.trim().is_empty() || password.is_empty() {
            return Err(PartyBoardError::InvalidInput("name, username and password are required".to_string()));
        }
        let (first_name, last_name) = split_full_name(full_name);
        Ok(Self {
            username: username.trim().to_string(),
            first_name,
            last_name,
            password: password.to_string(),
            role,
            permissions: HashMap::new(),
        })
    }

    pub fn grant(mut self, page: Page) -> Self {
        self.permissions.insert(page.id().to_string(), true);
        self
    }
}

/// Payload for `PATCH /users/{id}/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<HashMap<String, bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
