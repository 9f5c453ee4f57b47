use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Every failure a handler can surface, mapped onto the JSON error envelope
/// `{"error": <message>, "details": {...}}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidBody(&'static str),

    #[error("Missing required fields.")]
    MissingFields(Vec<String>),

    /// Field name is one of `date`, `date_from`, `date_to`.
    #[error("Invalid {0}. Use YYYY-MM-DD.")]
    InvalidDate(&'static str),

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Invalid status. Use Present or Absent.")]
    InvalidStatus,

    #[error("Duplicate employee_id or email.")]
    DuplicateEmployee { employee_id: String, email: String },

    #[error("Employee not found.")]
    EmployeeNotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::MissingFields(fields) => Some(json!({ "missing": fields })),
            ApiError::InvalidDate(field) => Some(json!({ "field": field })),
            ApiError::InvalidEmail => Some(json!({ "field": "email" })),
            ApiError::InvalidStatus => Some(json!({
                "field": "status",
                "allowed": ["Present", "Absent"],
            })),
            ApiError::DuplicateEmployee { employee_id, email } => Some(json!({
                "employee_id": employee_id,
                "email": email,
            })),
            _ => None,
        }
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmployeeNotFound => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmployee { .. } => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Database(e) = self {
            tracing::error!(error = %e, "Database error");
            return HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }));
        }

        let mut body = json!({ "error": self.to_string() });
        if let Some(details) = self.details() {
            body["details"] = details;
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// True when the store rejected a write for violating a UNIQUE constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            ApiError::EmployeeNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::DuplicateEmployee {
                employee_id: "E1".into(),
                email: "a@x.com".into()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InvalidDate("date_from").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn invalid_date_names_the_field() {
        let err = ApiError::InvalidDate("date_to");
        assert_eq!(err.to_string(), "Invalid date_to. Use YYYY-MM-DD.");
        assert_eq!(err.details().unwrap()["field"], "date_to");
    }

    #[test]
    fn missing_fields_lists_names() {
        let err = ApiError::MissingFields(vec!["email".into(), "department".into()]);
        let details = err.details().unwrap();
        assert_eq!(details["missing"][0], "email");
        assert_eq!(details["missing"][1], "department");
    }
}
