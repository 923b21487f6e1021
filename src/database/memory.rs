use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::database::store::SalaryStore;
use crate::error::{Error, Result};
use crate::models::salary_detail::{SalaryChanges, SalaryDetail};
use crate::models::user::User;

#[derive(Debug, Default)]
struct Records {
    last_id: i64,
    users: BTreeMap<i64, User>,
    by_email: HashMap<String, i64>,
}

/// Process-local store. A single lock serialises writers, so the email index
/// and the user map always change together.
#[derive(Debug, Default)]
pub struct MemorySalaryStore {
    records: RwLock<Records>,
}

impl MemorySalaryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[axum::async_trait]
impl SalaryStore for MemorySalaryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let records = self.records.read().await;
        Ok(records
            .by_email
            .get(email)
            .and_then(|id| records.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.records.read().await.users.get(&id).cloned())
    }

    async fn create(&self, name: &str, email: &str, salary_local_currency: Decimal) -> Result<User> {
        let mut records = self.records.write().await;
        if records.by_email.contains_key(email) {
            return Err(Error::DuplicateEmail(email.to_string()));
        }

        records.last_id += 1;
        let id = records.last_id;
        let now = Utc::now();
        let user = User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
            salary_detail: SalaryDetail::unpriced(id, id, salary_local_currency, now),
        };

        records.by_email.insert(email.to_string(), id);
        records.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, changes: &SalaryChanges) -> Result<User> {
        let mut records = self.records.write().await;
        let user = records
            .users
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let now = Utc::now();
        user.salary_detail.apply(changes, now);
        user.updated_at = now;
        Ok(user.clone())
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        Ok(self.records.read().await.users.values().cloned().collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
