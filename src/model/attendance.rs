use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attendance status, stored under its single-letter wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum Status {
    #[sqlx(rename = "P")]
    Present,
    #[sqlx(rename = "A")]
    Absent,
}

impl Status {
    /// Case-insensitive parse accepting the full word or the shorthand letter.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "present" | "p" => Some(Status::Present),
            "absent" | "a" => Some(Status::Absent),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Status::Present => "P",
            Status::Absent => "A",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::Absent => "Absent",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Attendance {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub status: Status,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Attendance row joined with the owning employee's identity for display.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub status: Status,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_word_and_shorthand_case_insensitively() {
        for raw in ["present", "Present", "PRESENT", "p", "P", " p "] {
            assert_eq!(Status::parse(raw), Some(Status::Present), "raw = {raw:?}");
        }
        for raw in ["absent", "Absent", "a", "A"] {
            assert_eq!(Status::parse(raw), Some(Status::Absent), "raw = {raw:?}");
        }
    }

    #[test]
    fn parse_rejects_unknown_vocabulary() {
        for raw in ["", "late", "presentt", "pa", "0"] {
            assert_eq!(Status::parse(raw), None, "raw = {raw:?}");
        }
    }

    #[test]
    fn codes_and_labels_are_stable() {
        assert_eq!(Status::Present.code(), "P");
        assert_eq!(Status::Present.label(), "Present");
        assert_eq!(Status::Absent.code(), "A");
        assert_eq!(Status::Absent.label(), "Absent");
    }
}
