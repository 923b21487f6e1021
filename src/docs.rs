use crate::dto::salary_dto::{SubmitSalaryPayload, UpdateSalaryPayload};
use crate::models::salary_detail::SalaryDetail;
use crate::models::user::User;
use utoipa::openapi::server::Server;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salary API",
        version = "0.1.0",
        description = r#"
Salary submission and administration backend.

- Users submit a local-currency salary tied to their email. The first
  submission creates the record, later ones update the local salary.
- Administrators list, inspect and edit records. `displayed_salary` is always
  `salary_in_euros + commission` once a euro salary is set, otherwise `null`.

Salary routes are relative to the server URL, which is the configured API
prefix.

Successful responses use `{ "message", "data" }`. Validation failures return
HTTP 422 with `{ "message", "errors": { field: [messages] } }`.
"#,
    ),
    paths(
        crate::routes::salary::submit_salary,
        crate::routes::salary::list_salaries,
        crate::routes::salary::get_salary,
        crate::routes::salary::update_salary
    ),
    components(schemas(SalaryDetail, User, SubmitSalaryPayload, UpdateSalaryPayload)),
    tags(
        (name = "Salary", description = "Public salary submission"),
        (name = "Admin", description = "Salary administration"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// The generated document with the salary routes mounted under `prefix`.
    pub fn with_prefix(prefix: &str) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        doc.servers = Some(vec![Server::new(prefix)]);
        doc
    }
}
