//! Logged-in session and staff roles.

use serde::{Deserialize, Serialize};

/// Staff role as reported by the token endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "bodega")]
    Warehouse,
    #[serde(rename = "pioneta")]
    Driver,
}

impl Role {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "bodega" => Some(Role::Warehouse),
            "pioneta" => Some(Role::Driver),
            _ => None,
        }
    }

    /// Human-readable screen title for the role.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Warehouse => "Warehouse",
            Role::Driver => "Driver",
        }
    }

    /// Which verification flag this role sets on a product.
    ///
    /// Administrators supervise the warehouse and act on its flag.
    pub fn checkpoint(&self) -> Checkpoint {
        match self {
            Role::Driver => Checkpoint::Driver,
            Role::Admin | Role::Warehouse => Checkpoint::Warehouse,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// The two independent verification flags a product carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    Warehouse,
    Driver,
}

impl Checkpoint {
    pub fn label(&self) -> &'static str {
        match self {
            Checkpoint::Warehouse => "warehouse",
            Checkpoint::Driver => "driver",
        }
    }
}

/// Session persisted after login and passed explicitly to every operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: i64,
    pub role: Role,
    /// License plate of the truck the user works on (drivers)
    #[serde(default)]
    pub patent: Option<String>,
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// License plate, ignoring blank values.
    pub fn license_plate(&self) -> Option<&str> {
        self.patent
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Reply from `POST /token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user_id: i64,
    pub role: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub patent: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}
