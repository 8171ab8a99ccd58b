use serde::Serialize;
use serde_json::{Value, json};

/// What kind of record an activity entry is attached to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SubjectType {
    Job,
    Lead,
    Template,
}

impl SubjectType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SubjectType::Job => "job",
            SubjectType::Lead => "lead",
            SubjectType::Template => "template",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "job" => Some(SubjectType::Job),
            "lead" => Some(SubjectType::Lead),
            "template" => Some(SubjectType::Template),
            _ => None,
        }
    }
}

/// One append-only audit row. Never updated or deleted after creation;
/// `meta` shape varies by `action` tag (see [`ActivityAction`]).
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub id: i64,
    pub subject_type: SubjectType,
    pub subject_id: i64,
    pub action: String,
    pub actor_id: Option<i64>, // None means system
    pub meta: Value,
    pub created_at: String, // RFC3339
}

/// Every action tag this core writes, with its fixed meta payload.
///
/// The audit table stores `action` as a plain string and `meta` as JSON, but
/// writers go through this enum so each tag always carries the same shape
/// (e.g. `time_entry.rejected` always has `reason`/`previous_status`).
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityAction {
    TimeEntryClockedIn {
        entry_id: i64,
        user_id: i64,
    },
    TimeEntrySubmitted {
        entry_id: i64,
        user_id: i64,
        previous_status: &'static str,
        new_status: &'static str,
        duration_minutes: i64,
    },
    TimeEntryApproved {
        entry_id: i64,
        approver_id: i64,
        previous_status: &'static str,
        new_status: &'static str,
        note: Option<String>,
    },
    TimeEntryRejected {
        entry_id: i64,
        approver_id: i64,
        reason: String,
        previous_status: &'static str,
        new_status: &'static str,
        note: Option<String>,
    },
    TimeEntryResubmitted {
        entry_id: i64,
        user_id: i64,
        previous_status: &'static str,
        new_status: &'static str,
    },
    MaterialRecorded {
        entry_id: i64,
        recorded_by: i64,
        sku: String,
        quantity: f64,
        unit_cost: f64,
        total_cost: f64,
    },
    MaterialApproved {
        entry_id: i64,
        approver_id: i64,
        previous_status: &'static str,
        new_status: &'static str,
        note: Option<String>,
    },
    MaterialRejected {
        entry_id: i64,
        approver_id: i64,
        reason: String,
        previous_status: &'static str,
        new_status: &'static str,
        note: Option<String>,
    },
    JobCreated {
        name: String,
    },
    JobArchived {
        previous_status: &'static str,
    },
}

impl ActivityAction {
    /// Stable action tag stored in the `action` column.
    pub fn tag(&self) -> &'static str {
        match self {
            ActivityAction::TimeEntryClockedIn { .. } => "time_entry.clocked_in",
            ActivityAction::TimeEntrySubmitted { .. } => "time_entry.submitted",
            ActivityAction::TimeEntryApproved { .. } => "time_entry.approved",
            ActivityAction::TimeEntryRejected { .. } => "time_entry.rejected",
            ActivityAction::TimeEntryResubmitted { .. } => "time_entry.resubmitted",
            ActivityAction::MaterialRecorded { .. } => "material.recorded",
            ActivityAction::MaterialApproved { .. } => "material.approved",
            ActivityAction::MaterialRejected { .. } => "material.rejected",
            ActivityAction::JobCreated { .. } => "job.created",
            ActivityAction::JobArchived { .. } => "job.archived",
        }
    }

    /// Meta payload stored (as JSON text) in the `meta` column.
    pub fn meta(&self) -> Value {
        match self {
            ActivityAction::TimeEntryClockedIn { entry_id, user_id } => json!({
                "entry_id": entry_id,
                "user_id": user_id,
            }),
            ActivityAction::TimeEntrySubmitted {
                entry_id,
                user_id,
                previous_status,
                new_status,
                duration_minutes,
            } => json!({
                "entry_id": entry_id,
                "user_id": user_id,
                "previous_status": previous_status,
                "new_status": new_status,
                "duration_minutes": duration_minutes,
            }),
            ActivityAction::TimeEntryApproved {
                entry_id,
                approver_id,
                previous_status,
                new_status,
                note,
            } => json!({
                "entry_id": entry_id,
                "approver_id": approver_id,
                "previous_status": previous_status,
                "new_status": new_status,
                "note": note,
            }),
            ActivityAction::TimeEntryRejected {
                entry_id,
                approver_id,
                reason,
                previous_status,
                new_status,
                note,
            } => json!({
                "entry_id": entry_id,
                "approver_id": approver_id,
                "reason": reason,
                "previous_status": previous_status,
                "new_status": new_status,
                "note": note,
            }),
            ActivityAction::TimeEntryResubmitted {
                entry_id,
                user_id,
                previous_status,
                new_status,
            } => json!({
                "entry_id": entry_id,
                "user_id": user_id,
                "previous_status": previous_status,
                "new_status": new_status,
            }),
            ActivityAction::MaterialRecorded {
                entry_id,
                recorded_by,
                sku,
                quantity,
                unit_cost,
                total_cost,
            } => json!({
                "entry_id": entry_id,
                "recorded_by": recorded_by,
                "sku": sku,
                "quantity": quantity,
                "unit_cost": unit_cost,
                "total_cost": total_cost,
            }),
            ActivityAction::MaterialApproved {
                entry_id,
                approver_id,
                previous_status,
                new_status,
                note,
            } => json!({
                "entry_id": entry_id,
                "approver_id": approver_id,
                "previous_status": previous_status,
                "new_status": new_status,
                "note": note,
            }),
            ActivityAction::MaterialRejected {
                entry_id,
                approver_id,
                reason,
                previous_status,
                new_status,
                note,
            } => json!({
                "entry_id": entry_id,
                "approver_id": approver_id,
                "reason": reason,
                "previous_status": previous_status,
                "new_status": new_status,
                "note": note,
            }),
            ActivityAction::JobCreated { name } => json!({ "name": name }),
            ActivityAction::JobArchived { previous_status } => json!({
                "previous_status": previous_status,
            }),
        }
    }
}
