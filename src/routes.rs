use crate::api::{attendance, employee, summary};
use crate::pages;
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("/summary").route(web::get().to(summary::summary)))
            // /api/employees
            .service(
                web::resource("/employees")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            // /api/employees/{id}
            .service(
                web::resource("/employees/{id}")
                    .route(web::delete().to(employee::delete_employee)),
            )
            // /api/employees/{id}/attendance
            .service(
                web::resource("/employees/{id}/attendance")
                    .route(web::get().to(attendance::employee_attendance))
                    .route(web::post().to(attendance::mark_attendance)),
            )
            .service(web::resource("/attendance").route(web::get().to(attendance::list_attendance))),
    )
    // page shells
    .service(web::resource("/").route(web::get().to(pages::dashboard)))
    .service(web::resource("/employees").route(web::get().to(pages::employees)))
    .service(web::resource("/attendance").route(web::get().to(pages::attendance)));
}
