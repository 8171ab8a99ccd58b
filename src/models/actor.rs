use serde::Serialize;

/// Capability level of a registered actor.
/// Only supervisors may approve or reject entries.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Role {
    Crew,
    Supervisor,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Crew => "crew",
            Role::Supervisor => "supervisor",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "crew" => Some(Role::Crew),
            "supervisor" => Some(Role::Supervisor),
            _ => None,
        }
    }

    pub fn can_approve(&self) -> bool {
        matches!(self, Role::Supervisor)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub created_at: String, // RFC3339
}
