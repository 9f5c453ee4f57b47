use actix_web::{HttpResponse, web};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{ApiError, is_unique_violation};
use crate::model::employee::Employee;
use crate::validate;

/// Body accepted by the create endpoint. Kept for the OpenAPI document; the
/// handler itself reads raw bytes so that a missing or malformed body can be
/// reported precisely.
#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "E-1001")]
    pub employee_id: String,
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[schema(example = "ada@example.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeResponse {
    #[schema(example = 1)]
    pub id: i64,
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
    /// Count of this employee's Present records; present only where the
    /// endpoint computes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 12)]
    pub total_present_days: Option<i64>,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            employee_id: e.employee_id,
            full_name: e.full_name,
            email: e.email,
            department: e.department,
            created_at: e.created_at,
            total_present_days: None,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub results: Vec<EmployeeResponse>,
}

#[derive(sqlx::FromRow)]
struct EmployeeWithPresent {
    id: i64,
    employee_id: String,
    full_name: String,
    email: String,
    department: String,
    created_at: NaiveDateTime,
    total_present_days: i64,
}

pub(crate) async fn fetch_employee(pool: &SqlitePool, id: i64) -> Result<Employee, ApiError> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department, created_at
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::EmployeeNotFound)
}

/// List employees, each annotated with their total Present-day count.
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Employees ordered by name", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let rows = sqlx::query_as::<_, EmployeeWithPresent>(
        r#"
        SELECT e.id, e.employee_id, e.full_name, e.email, e.department, e.created_at,
               COALESCE(SUM(CASE WHEN a.status = 'P' THEN 1 ELSE 0 END), 0) AS total_present_days
        FROM employees e
        LEFT JOIN attendance a ON a.employee_id = e.id
        GROUP BY e.id
        ORDER BY e.full_name, e.employee_id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    let results = rows
        .into_iter()
        .map(|r| EmployeeResponse {
            id: r.id,
            employee_id: r.employee_id,
            full_name: r.full_name,
            email: r.email,
            department: r.department,
            created_at: r.created_at,
            total_present_days: Some(r.total_present_days),
        })
        .collect();

    Ok(HttpResponse::Ok().json(EmployeeListResponse { results }))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "error": "Missing required fields.",
            "details": { "missing": ["email"] }
        })),
        (status = 409, description = "Duplicate employee_id or email", body = Object, example = json!({
            "error": "Duplicate employee_id or email.",
            "details": { "employee_id": "E-1001", "email": "ada@example.com" }
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let data = validate::parse_json_body(&body)?;
    validate::require_fields(&data, &["employee_id", "full_name", "email", "department"])?;

    let employee_id = validate::field_str(&data, "employee_id");
    let full_name = validate::field_str(&data, "full_name");
    let email = validate::field_str(&data, "email");
    let department = validate::field_str(&data, "department");

    validate::validate_email(&email)?;

    let now = Utc::now().naive_utc();
    let result = sqlx::query_as::<_, Employee>(
        r#"
        INSERT INTO employees (employee_id, full_name, email, department, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, employee_id, full_name, email, department, created_at
        "#,
    )
    .bind(&employee_id)
    .bind(&full_name)
    .bind(&email)
    .bind(&department)
    .bind(now)
    .fetch_one(pool.get_ref())
    .await;

    match result {
        Ok(employee) => {
            info!(employee_id = %employee.employee_id, "Employee created");
            Ok(HttpResponse::Created().json(EmployeeResponse::from(employee)))
        }
        Err(e) if is_unique_violation(&e) => {
            Err(ApiError::DuplicateEmployee { employee_id, email })
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete Employee (cascades to its attendance records)
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", description = "Internal employee ID")
    ),
    responses(
        (status = 200, description = "Deleted", body = Object, example = json!({ "deleted": true })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found."
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::EmployeeNotFound);
    }

    info!(id, "Employee deleted");
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}
