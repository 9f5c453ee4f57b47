//! Static page shells. All data on these pages is fetched client-side from
//! the JSON API; the handlers carry no logic of their own.

use actix_web::{HttpResponse, Responder};

fn html(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub async fn dashboard() -> impl Responder {
    html(include_str!("../templates/dashboard.html"))
}

pub async fn employees() -> impl Responder {
    html(include_str!("../templates/employees.html"))
}

pub async fn attendance() -> impl Responder {
    html(include_str!("../templates/attendance.html"))
}
