use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::salary_detail::SalaryChanges;
use crate::models::user::User;

/// Keyed storage for users and their salary records.
///
/// Email is unique across users. Every write touches a single user/record
/// pair atomically; readers never see a user without its salary record.
#[cfg_attr(test, mockall::automock)]
#[axum::async_trait]
pub trait SalaryStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Fails with `Error::DuplicateEmail` when the email is taken.
    async fn create(&self, name: &str, email: &str, salary_local_currency: Decimal) -> Result<User>;

    /// Applies `changes` and recomputes the displayed salary. Fails with
    /// `Error::NotFound` for an unknown id.
    async fn update(&self, id: i64, changes: &SalaryChanges) -> Result<User>;

    /// Every record, ordered by user id.
    async fn list_all(&self) -> Result<Vec<User>>;

    async fn ping(&self) -> Result<()>;
}
