use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle of a material-usage line: `submitted → {approved | rejected}`,
/// both terminal. Corrections are made as a new entry, never by reopening.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum MaterialStatus {
    Submitted,
    Approved,
    Rejected,
}

impl MaterialStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MaterialStatus::Submitted => "submitted",
            MaterialStatus::Approved => "approved",
            MaterialStatus::Rejected => "rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(MaterialStatus::Submitted),
            "approved" => Some(MaterialStatus::Approved),
            "rejected" => Some(MaterialStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, MaterialStatus::Submitted)
    }
}

/// One logged material/cost line against a job.
///
/// `total_cost` is computed once at record time and frozen; display always
/// uses the stored value so historical totals survive pricing changes.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialUsage {
    pub id: i64,
    pub job_id: i64,
    pub sku: String,
    pub cost_code: Option<String>,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub approval_status: MaterialStatus,
    pub recorded_by: i64,
    pub approver_id: Option<i64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub notes: String,
    pub created_at: String, // RFC3339
}
