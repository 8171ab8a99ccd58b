use serde::Serialize;

/// Job lifecycle as seen by this core. The surrounding application owns the
/// full scheduling flow; entries only need a live job to attach to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum JobStatus {
    Scheduled,
    InProgress,
    Completed,
    Archived,
}

impl JobStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            JobStatus::Scheduled => "scheduled",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Archived => "archived",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(JobStatus::Scheduled),
            "in_progress" => Some(JobStatus::InProgress),
            "completed" => Some(JobStatus::Completed),
            "archived" => Some(JobStatus::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: i64,
    pub name: String,
    pub status: JobStatus,
    pub created_at: String, // RFC3339
}
