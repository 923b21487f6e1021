use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::salary_detail::SalaryDetail;

/// A salary submitter together with their single salary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Ana")]
    pub name: String,

    #[schema(example = "ana@x.com")]
    pub email: String,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,

    pub salary_detail: SalaryDetail,
}
