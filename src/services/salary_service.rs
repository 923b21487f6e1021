use std::sync::Arc;

use tracing::{info, warn};

use crate::database::store::SalaryStore;
use crate::dto::salary_dto::{SalarySubmission, SubmitSalaryPayload, UpdateSalaryPayload};
use crate::error::{Error, Result};
use crate::models::salary_detail::{SalaryChanges, SalaryDetail};
use crate::models::user::User;

/// Whether a submission created a new record or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
}

#[derive(Clone)]
pub struct SalaryService {
    store: Arc<dyn SalaryStore>,
}

impl SalaryService {
    pub fn new(store: Arc<dyn SalaryStore>) -> Self {
        Self { store }
    }

    /// Upsert by email: the first submission for an address creates the
    /// record, later ones only replace `salary_local_currency`.
    pub async fn submit_salary(
        &self,
        payload: SubmitSalaryPayload,
    ) -> Result<(SalaryDetail, SubmitOutcome)> {
        let submission = payload.into_submission()?;

        if let Some(existing) = self.store.find_by_email(&submission.email).await? {
            return self.resubmit(existing.id, &submission).await;
        }

        match self
            .store
            .create(
                &submission.name,
                &submission.email,
                submission.salary_local_currency,
            )
            .await
        {
            Ok(user) => {
                info!(user_id = user.id, email = %user.email, "Salary record created");
                Ok((user.salary_detail, SubmitOutcome::Created))
            }
            Err(Error::DuplicateEmail(email)) => {
                warn!(email = %email, "Concurrent first submission, applying as update");
                let existing = self
                    .store
                    .find_by_email(&submission.email)
                    .await?
                    .ok_or_else(|| {
                        Error::Internal(format!("Record for {} vanished after conflict", email))
                    })?;
                self.resubmit(existing.id, &submission).await
            }
            Err(err) => Err(err),
        }
    }

    async fn resubmit(
        &self,
        user_id: i64,
        submission: &SalarySubmission,
    ) -> Result<(SalaryDetail, SubmitOutcome)> {
        let changes = SalaryChanges::local_currency(submission.salary_local_currency);
        let user = self.store.update(user_id, &changes).await?;
        info!(user_id, "Salary resubmitted");
        Ok((user.salary_detail, SubmitOutcome::Updated))
    }

    /// Partial admin update keyed by user id. Displayed salary is recomputed
    /// from the post-update values.
    pub async fn admin_update(&self, user_id: i64, payload: UpdateSalaryPayload) -> Result<User> {
        let changes = payload.into_changes()?;
        let user = self.store.update(user_id, &changes).await?;
        info!(
            user_id,
            priced = user.salary_detail.is_priced(),
            "Salary record updated by admin"
        );
        Ok(user)
    }

    pub async fn get_salary(&self, user_id: i64) -> Result<User> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        self.store.list_all().await
    }

    pub async fn health(&self) -> Result<()> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemorySalaryStore;
    use crate::database::store::MockSalaryStore;
    use chrono::Utc;
    use mockall::Sequence;
    use rust_decimal::Decimal;

    fn service() -> SalaryService {
        SalaryService::new(Arc::new(MemorySalaryStore::new()))
    }

    fn submission(name: &str, email: &str, amount: i64) -> SubmitSalaryPayload {
        SubmitSalaryPayload {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            salary_local_currency: Some(Decimal::new(amount, 0)),
        }
    }

    fn update(
        local: Option<i64>,
        euros: Option<i64>,
        commission: Option<i64>,
    ) -> UpdateSalaryPayload {
        UpdateSalaryPayload {
            salary_local_currency: local.map(|v| Decimal::new(v, 0)),
            salary_in_euros: euros.map(|v| Decimal::new(v, 0)),
            commission: commission.map(|v| Decimal::new(v, 0)),
        }
    }

    #[tokio::test]
    async fn first_submission_creates_unpriced_record() {
        let svc = service();
        let (detail, outcome) = svc
            .submit_salary(submission("Ana", "ana@x.com", 5000))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Created);
        assert_eq!(detail.displayed_salary, None);
        assert_eq!(detail.salary_in_euros, None);
        assert_eq!(detail.commission, Decimal::new(500, 0));
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn resubmission_updates_only_local_currency() {
        let svc = service();
        svc.submit_salary(submission("Ana", "ana@x.com", 5000))
            .await
            .unwrap();
        let (detail, outcome) = svc
            .submit_salary(submission("Someone Else", "ANA@x.com", 6000))
            .await
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Updated);
        assert_eq!(detail.salary_local_currency, Decimal::new(6000, 0));

        let all = svc.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Ana");
        assert_eq!(all[0].email, "ana@x.com");
    }

    #[tokio::test]
    async fn commission_only_update_reprices() {
        let svc = service();
        let (detail, _) = svc
            .submit_salary(submission("Ana", "ana@x.com", 5000))
            .await
            .unwrap();
        svc.admin_update(detail.user_id, update(None, Some(1000), None))
            .await
            .unwrap();

        let user = svc
            .admin_update(detail.user_id, update(None, None, Some(700)))
            .await
            .unwrap();
        assert_eq!(user.salary_detail.displayed_salary, Some(Decimal::new(1700, 0)));
        assert_eq!(user.salary_detail.salary_local_currency, Decimal::new(5000, 0));
    }

    #[tokio::test]
    async fn commission_update_on_unpriced_record_keeps_null() {
        let svc = service();
        let (detail, _) = svc
            .submit_salary(submission("Ana", "ana@x.com", 5000))
            .await
            .unwrap();
        let user = svc
            .admin_update(detail.user_id, update(Some(5100), None, Some(900)))
            .await
            .unwrap();
        assert_eq!(user.salary_detail.displayed_salary, None);
        assert_eq!(user.salary_detail.commission, Decimal::new(900, 0));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_and_mutates_nothing() {
        let svc = service();
        svc.submit_salary(submission("Ana", "ana@x.com", 5000))
            .await
            .unwrap();
        let before = svc.list_all().await.unwrap();

        let err = svc
            .admin_update(999, update(None, Some(1000), None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(svc.list_all().await.unwrap(), before);

        let err = svc.get_salary(999).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg == "User not found"));
    }

    #[tokio::test]
    async fn negative_submission_creates_nothing() {
        let svc = service();
        let err = svc
            .submit_salary(submission("Ana", "ana@x.com", -5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_submission_never_reaches_the_store() {
        let store = MockSalaryStore::new();
        let svc = SalaryService::new(Arc::new(store));
        let err = svc
            .submit_salary(submission("", "nope", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn lost_creation_race_falls_back_to_update() {
        let now = Utc::now();
        let existing = User {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            created_at: now,
            updated_at: now,
            salary_detail: SalaryDetail::unpriced(3, 7, Decimal::new(4000, 0), now),
        };
        let mut updated = existing.clone();
        updated.salary_detail.salary_local_currency = Decimal::new(5000, 0);

        let mut store = MockSalaryStore::new();
        let mut seq = Sequence::new();
        store
            .expect_find_by_email()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        store
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, email, _| Err(Error::DuplicateEmail(email.to_string())));
        let found = existing.clone();
        store
            .expect_find_by_email()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(found.clone())));
        store
            .expect_update()
            .withf(|id, changes| {
                *id == 7
                    && changes.salary_local_currency == Some(Decimal::new(5000, 0))
                    && changes.salary_in_euros.is_none()
                    && changes.commission.is_none()
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _| Ok(updated.clone()));

        let svc = SalaryService::new(Arc::new(store));
        let (detail, outcome) = svc
            .submit_salary(submission("Ana", "ana@x.com", 5000))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated);
        assert_eq!(detail.salary_local_currency, Decimal::new(5000, 0));
    }

    #[tokio::test]
    async fn concurrent_first_submissions_yield_one_record() {
        let svc = service();
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let svc = svc.clone();
                tokio::spawn(async move {
                    svc.submit_salary(submission("Ana", "ana@x.com", 1000 + i))
                        .await
                        .map(|(_, outcome)| outcome)
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() == SubmitOutcome::Created {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }
}
