use super::geo::GeoPoint;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle of a crew time entry.
///
/// `in_progress → submitted → {approved | adjustment_requested}`;
/// `adjustment_requested` re-enters `submitted` when the owner resubmits.
/// `approved` is terminal.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum TimeEntryStatus {
    InProgress,
    Submitted,
    Approved,
    Rejected,
    AdjustmentRequested,
}

impl TimeEntryStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TimeEntryStatus::InProgress => "in_progress",
            TimeEntryStatus::Submitted => "submitted",
            TimeEntryStatus::Approved => "approved",
            TimeEntryStatus::Rejected => "rejected",
            TimeEntryStatus::AdjustmentRequested => "adjustment_requested",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in_progress" => Some(TimeEntryStatus::InProgress),
            "submitted" => Some(TimeEntryStatus::Submitted),
            "approved" => Some(TimeEntryStatus::Approved),
            "rejected" => Some(TimeEntryStatus::Rejected),
            "adjustment_requested" => Some(TimeEntryStatus::AdjustmentRequested),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, TimeEntryStatus::InProgress)
    }

    /// States a supervisor may approve from.
    pub fn can_approve(&self) -> bool {
        matches!(
            self,
            TimeEntryStatus::Submitted | TimeEntryStatus::AdjustmentRequested
        )
    }

    /// States a supervisor may reject from.
    pub fn can_reject(&self) -> bool {
        matches!(self, TimeEntryStatus::Submitted)
    }

    /// States with no office action pending; only settled entries let the
    /// parent job archive.
    pub fn is_settled(&self) -> bool {
        matches!(self, TimeEntryStatus::Approved | TimeEntryStatus::Rejected)
    }
}

/// One crew member's worked interval on one job.
///
/// Created only by the clock-session tracker; mutated only through the
/// state-machine operations; never physically deleted.
#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub status: TimeEntryStatus,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>, // None iff status is in_progress
    pub clock_in_location: Option<GeoPoint>,
    pub clock_out_location: Option<GeoPoint>,
    pub notes: String,
    pub submitted_by: Option<i64>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub approver_id: Option<i64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub duration_minutes: Option<i64>,
    pub created_at: String, // RFC3339
}

impl TimeEntry {
    /// Minutes between clock-in and clock-out, rounded down.
    pub fn worked_minutes(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>) -> i64 {
        (clock_out - clock_in).num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_db_strings() {
        for s in [
            TimeEntryStatus::InProgress,
            TimeEntryStatus::Submitted,
            TimeEntryStatus::Approved,
            TimeEntryStatus::Rejected,
            TimeEntryStatus::AdjustmentRequested,
        ] {
            assert_eq!(TimeEntryStatus::from_db_str(s.to_db_str()), Some(s));
        }
        assert_eq!(TimeEntryStatus::from_db_str("pending"), None);
    }

    #[test]
    fn approve_legal_from_submitted_and_adjustment_requested_only() {
        assert!(TimeEntryStatus::Submitted.can_approve());
        assert!(TimeEntryStatus::AdjustmentRequested.can_approve());
        assert!(!TimeEntryStatus::InProgress.can_approve());
        assert!(!TimeEntryStatus::Approved.can_approve());
    }

    #[test]
    fn reject_legal_from_submitted_only() {
        assert!(TimeEntryStatus::Submitted.can_reject());
        assert!(!TimeEntryStatus::AdjustmentRequested.can_reject());
        assert!(!TimeEntryStatus::Approved.can_reject());
    }

    #[test]
    fn worked_minutes_full_day() {
        let start = "2025-06-02T07:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let end = "2025-06-02T15:30:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(TimeEntry::worked_minutes(start, end), 480);
    }
}
