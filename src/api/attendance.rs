use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::api::employee::{EmployeeResponse, fetch_employee};
use crate::error::{ApiError, is_unique_violation};
use crate::model::attendance::{Attendance, AttendanceRecord, Status};
use crate::model::employee::Employee;
use crate::validate;

/// Hard cap on the global attendance listing. There is deliberately no
/// pagination cursor; older rows are unreachable through that endpoint.
const GLOBAL_LIST_CAP: u32 = 500;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DateFilterQuery {
    /// Exact date; when given, `date_from`/`date_to` are ignored.
    #[schema(example = "2026-01-15")]
    pub date: Option<String>,
    /// Inclusive lower bound.
    #[schema(example = "2026-01-01")]
    pub date_from: Option<String>,
    /// Inclusive upper bound.
    #[schema(example = "2026-01-31")]
    pub date_to: Option<String>,
}

/// Resolved form of the shared date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    None,
    Exact(NaiveDate),
    Range {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl DateFilter {
    /// Empty parameters are treated as absent, matching form submissions that
    /// send blank inputs.
    pub fn from_query(query: &DateFilterQuery) -> Result<Self, ApiError> {
        if let Some(raw) = query.date.as_deref().filter(|s| !s.is_empty()) {
            return Ok(DateFilter::Exact(validate::parse_date(raw, "date")?));
        }

        let from = match query.date_from.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(validate::parse_date(raw, "date_from")?),
            None => None,
        };
        let to = match query.date_to.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(validate::parse_date(raw, "date_to")?),
            None => None,
        };

        if from.is_none() && to.is_none() {
            Ok(DateFilter::None)
        } else {
            Ok(DateFilter::Range { from, to })
        }
    }

    /// Append SQL conditions on `a.date` and the values to bind for them.
    fn push_conditions(&self, conditions: &mut Vec<&'static str>, binds: &mut Vec<NaiveDate>) {
        match *self {
            DateFilter::None => {}
            DateFilter::Exact(date) => {
                conditions.push("a.date = ?");
                binds.push(date);
            }
            DateFilter::Range { from, to } => {
                if let Some(from) = from {
                    conditions.push("a.date >= ?");
                    binds.push(from);
                }
                if let Some(to) = to {
                    conditions.push("a.date <= ?");
                    binds.push(to);
                }
            }
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceResponse {
    #[schema(example = 7)]
    pub id: i64,
    /// The employee's external identifier, not the internal row id.
    #[schema(example = "E-1001")]
    pub employee_id: String,
    #[schema(example = "Ada Lovelace")]
    pub employee_name: String,
    #[schema(value_type = String, format = "date", example = "2026-01-15")]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: String,
    #[schema(example = "P")]
    pub status_code: String,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: NaiveDateTime,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(r: AttendanceRecord) -> Self {
        Self {
            id: r.id,
            employee_id: r.employee_id,
            employee_name: r.employee_name,
            date: r.date,
            status: r.status.label().to_string(),
            status_code: r.status.code().to_string(),
            updated_at: r.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub results: Vec<AttendanceResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeAttendanceResponse {
    pub employee: EmployeeResponse,
    pub results: Vec<AttendanceResponse>,
    /// Present records within the filtered set.
    #[schema(example = 12)]
    pub total_present_days: i64,
}

/// Body accepted by the mark endpoint; kept for the OpenAPI document.
#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "2026-01-15", format = "date")]
    pub date: String,
    /// `Present`/`Absent`, or the shorthand `p`/`a`; case-insensitive.
    #[schema(example = "p")]
    pub status: String,
}

fn attendance_response(employee: &Employee, record: &Attendance) -> AttendanceResponse {
    AttendanceResponse {
        id: record.id,
        employee_id: employee.employee_id.clone(),
        employee_name: employee.full_name.clone(),
        date: record.date,
        status: record.status.label().to_string(),
        status_code: record.status.code().to_string(),
        updated_at: record.updated_at,
    }
}

/// Global attendance listing, newest dates first, capped.
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(DateFilterQuery),
    responses(
        (status = 200, description = "Up to 500 attendance rows", body = AttendanceListResponse),
        (status = 400, description = "Unparseable date parameter", body = Object, example = json!({
            "error": "Invalid date_from. Use YYYY-MM-DD.",
            "details": { "field": "date_from" }
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<DateFilterQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = DateFilter::from_query(&query)?;

    let mut conditions = Vec::new();
    let mut binds = Vec::new();
    filter.push_conditions(&mut conditions, &mut binds);

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        r#"
        SELECT a.id, e.employee_id, e.full_name AS employee_name, a.date, a.status, a.updated_at
        FROM attendance a
        JOIN employees e ON e.id = a.employee_id
        {where_clause}
        ORDER BY a.date DESC, e.full_name ASC
        LIMIT {GLOBAL_LIST_CAP}
        "#
    );

    let mut data_query = sqlx::query_as::<_, AttendanceRecord>(&sql);
    for bind in &binds {
        data_query = data_query.bind(*bind);
    }
    let rows = data_query.fetch_all(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        results: rows.into_iter().map(AttendanceResponse::from).collect(),
    }))
}

/// Per-employee attendance history with the same date filter, uncapped.
#[utoipa::path(
    get,
    path = "/api/employees/{id}/attendance",
    params(
        ("id", description = "Internal employee ID"),
        DateFilterQuery
    ),
    responses(
        (status = 200, description = "Employee, filtered history and Present count", body = EmployeeAttendanceResponse),
        (status = 400, description = "Unparseable date parameter"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<DateFilterQuery>,
) -> Result<HttpResponse, ApiError> {
    let employee = fetch_employee(pool.get_ref(), path.into_inner()).await?;
    let filter = DateFilter::from_query(&query)?;

    let mut conditions = vec!["a.employee_id = ?"];
    let mut binds = Vec::new();
    filter.push_conditions(&mut conditions, &mut binds);

    let sql = format!(
        r#"
        SELECT a.id, e.employee_id, e.full_name AS employee_name, a.date, a.status, a.updated_at
        FROM attendance a
        JOIN employees e ON e.id = a.employee_id
        WHERE {}
        ORDER BY a.date DESC
        "#,
        conditions.join(" AND ")
    );

    let mut data_query = sqlx::query_as::<_, AttendanceRecord>(&sql).bind(employee.id);
    for bind in &binds {
        data_query = data_query.bind(*bind);
    }
    let rows = data_query.fetch_all(pool.get_ref()).await?;

    let total_present_days = rows.iter().filter(|r| r.status == Status::Present).count() as i64;

    Ok(HttpResponse::Ok().json(EmployeeAttendanceResponse {
        employee: EmployeeResponse::from(employee),
        results: rows.into_iter().map(AttendanceResponse::from).collect(),
        total_present_days,
    }))
}

/// Mark attendance for one employee and date.
///
/// Upsert keyed on (employee, date): the INSERT runs first and a unique
/// violation is taken as "already marked", turning into the UPDATE path. The
/// existence check and the write are never separate steps, so two identical
/// concurrent marks cannot both insert.
#[utoipa::path(
    post,
    path = "/api/employees/{id}/attendance",
    params(
        ("id", description = "Internal employee ID")
    ),
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "New record created", body = AttendanceResponse),
        (status = 200, description = "Existing record overwritten", body = AttendanceResponse),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "error": "Invalid status. Use Present or Absent.",
            "details": { "field": "status", "allowed": ["Present", "Absent"] }
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let employee = fetch_employee(pool.get_ref(), path.into_inner()).await?;

    let data = validate::parse_json_body(&body)?;
    validate::require_fields(&data, &["date", "status"])?;

    let date = validate::parse_date(&validate::field_str(&data, "date"), "date")?;
    let status =
        Status::parse(&validate::field_str(&data, "status")).ok_or(ApiError::InvalidStatus)?;

    let now = Utc::now().naive_utc();
    let inserted = sqlx::query_as::<_, Attendance>(
        r#"
        INSERT INTO attendance (employee_id, date, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, employee_id, date, status, created_at, updated_at
        "#,
    )
    .bind(employee.id)
    .bind(date)
    .bind(status)
    .bind(now)
    .bind(now)
    .fetch_one(pool.get_ref())
    .await;

    match inserted {
        Ok(record) => {
            tracing::info!(employee_id = %employee.employee_id, %date, status = status.code(), "Attendance marked");
            Ok(HttpResponse::Created().json(attendance_response(&employee, &record)))
        }
        Err(e) if is_unique_violation(&e) => {
            let record = sqlx::query_as::<_, Attendance>(
                r#"
                UPDATE attendance
                SET status = ?, updated_at = ?
                WHERE employee_id = ? AND date = ?
                RETURNING id, employee_id, date, status, created_at, updated_at
                "#,
            )
            .bind(status)
            .bind(now)
            .bind(employee.id)
            .bind(date)
            .fetch_one(pool.get_ref())
            .await?;

            tracing::info!(employee_id = %employee.employee_id, %date, status = status.code(), "Attendance updated");
            Ok(HttpResponse::Ok().json(attendance_response(&employee, &record)))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        date: Option<&str>,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> DateFilterQuery {
        DateFilterQuery {
            date: date.map(String::from),
            date_from: date_from.map(String::from),
            date_to: date_to.map(String::from),
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn exact_date_wins_over_range_bounds() {
        let filter =
            DateFilter::from_query(&query(Some("2024-01-15"), Some("bogus"), Some("also-bogus")))
                .unwrap();
        assert_eq!(filter, DateFilter::Exact(day("2024-01-15")));
    }

    #[test]
    fn bounds_apply_independently() {
        assert_eq!(
            DateFilter::from_query(&query(None, Some("2024-01-01"), None)).unwrap(),
            DateFilter::Range {
                from: Some(day("2024-01-01")),
                to: None
            }
        );
        assert_eq!(
            DateFilter::from_query(&query(None, None, Some("2024-01-31"))).unwrap(),
            DateFilter::Range {
                from: None,
                to: Some(day("2024-01-31"))
            }
        );
        assert_eq!(
            DateFilter::from_query(&query(None, None, None)).unwrap(),
            DateFilter::None
        );
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        assert_eq!(
            DateFilter::from_query(&query(Some(""), Some(""), Some(""))).unwrap(),
            DateFilter::None
        );
    }

    #[test]
    fn bad_values_name_the_offending_parameter() {
        assert!(matches!(
            DateFilter::from_query(&query(Some("2024-13-40"), None, None)),
            Err(ApiError::InvalidDate("date"))
        ));
        assert!(matches!(
            DateFilter::from_query(&query(None, Some("nope"), None)),
            Err(ApiError::InvalidDate("date_from"))
        ));
        assert!(matches!(
            DateFilter::from_query(&query(None, Some("2024-01-01"), Some("nope"))),
            Err(ApiError::InvalidDate("date_to"))
        ));
    }

    #[test]
    fn conditions_match_the_filter_shape() {
        let mut conditions = Vec::new();
        let mut binds = Vec::new();
        DateFilter::Range {
            from: Some(day("2024-01-01")),
            to: Some(day("2024-01-31")),
        }
        .push_conditions(&mut conditions, &mut binds);
        assert_eq!(conditions, vec!["a.date >= ?", "a.date <= ?"]);
        assert_eq!(binds, vec![day("2024-01-01"), day("2024-01-31")]);
    }
}
