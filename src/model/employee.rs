use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "E-1001",
        "full_name": "Ada Lovelace",
        "email": "ada@example.com",
        "department": "Engineering",
        "created_at": "2026-01-05T09:30:00"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    /// Externally assigned identifier, unique across all employees.
    #[schema(example = "E-1001")]
    pub employee_id: String,

    #[schema(example = "Ada Lovelace")]
    pub full_name: String,

    #[schema(example = "ada@example.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,
}
