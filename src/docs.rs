use crate::api::attendance::{
    AttendanceListResponse, AttendanceResponse, DateFilterQuery, EmployeeAttendanceResponse,
    MarkAttendance,
};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeResponse};
use crate::api::summary::SummaryResponse;
use crate::model::attendance::Status;
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Tracker

Records employees and one Present/Absent mark per employee per day.

### 🔹 Key Features
- **Employee Management**
  - Register, list (with total Present-day counts), and delete employees
- **Attendance Marking**
  - One mark per employee per date; re-marking overwrites the existing record
- **Reporting**
  - Dashboard summary for today, plus date-filtered history (global and per-employee)

### 📦 Response Format
- JSON-based RESTful responses
- List endpoints wrap rows in a top-level `results` array
- Errors come back as `{"error": message, "details": {...}}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::summary::summary,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::mark_attendance,
    ),
    components(
        schemas(
            Employee,
            Status,
            CreateEmployee,
            EmployeeResponse,
            EmployeeListResponse,
            DateFilterQuery,
            MarkAttendance,
            AttendanceResponse,
            AttendanceListResponse,
            EmployeeAttendanceResponse,
            SummaryResponse,
        )
    ),
    tags(
        (name = "Summary", description = "Dashboard summary APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance marking and history APIs"),
    )
)]
pub struct ApiDoc;
