use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::error::ApiError;

#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    #[schema(example = 42)]
    pub employees_count: i64,
    #[schema(example = 30)]
    pub attendance_marked_today: i64,
    #[schema(example = 27)]
    pub present_today: i64,
    #[schema(example = 3)]
    pub absent_today: i64,
}

/// Dashboard counters, computed against the server's local calendar date.
#[utoipa::path(
    get,
    path = "/api/summary",
    responses(
        (status = 200, description = "Today's headline counts", body = SummaryResponse)
    ),
    tag = "Summary"
)]
pub async fn summary(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let today = Local::now().date_naive();

    let employees_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool.get_ref())
        .await?;

    let (attendance_marked_today, present_today, absent_today): (i64, i64, i64) =
        sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(CASE WHEN status = 'P' THEN 1 ELSE 0 END), 0),
                   COALESCE(SUM(CASE WHEN status = 'A' THEN 1 ELSE 0 END), 0)
            FROM attendance
            WHERE date = ?
            "#,
        )
        .bind(today)
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(SummaryResponse {
        employees_count,
        attendance_marked_today,
        present_today,
        absent_today,
    }))
}
