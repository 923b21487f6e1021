use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Commission stored on a freshly created salary record.
pub const DEFAULT_COMMISSION: Decimal = Decimal::from_parts(50_000, 0, 0, false, 2);

/// Figure shown for a record that has not been priced in euros yet. Not a
/// stored value; it only coincides with [`DEFAULT_COMMISSION`].
pub const DISPLAYED_SALARY_FALLBACK: Decimal = Decimal::from_parts(50_000, 0, 0, false, 2);

/// Largest amount a `NUMERIC(12, 2)` column accepts.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SalaryDetail {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub user_id: i64,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 5000.0)]
    pub salary_local_currency: Decimal,

    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 1000.0, nullable = true)]
    pub salary_in_euros: Option<Decimal>,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 500.0)]
    pub commission: Decimal,

    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 1500.0, nullable = true)]
    pub displayed_salary: Option<Decimal>,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a salary record. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryChanges {
    pub salary_local_currency: Option<Decimal>,
    pub salary_in_euros: Option<Decimal>,
    pub commission: Option<Decimal>,
}

impl SalaryChanges {
    pub fn local_currency(amount: Decimal) -> Self {
        Self {
            salary_local_currency: Some(amount),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.salary_local_currency.is_none()
            && self.salary_in_euros.is_none()
            && self.commission.is_none()
    }
}

/// Euro salary plus commission, or nothing while the record is unpriced.
pub fn displayed_salary(salary_in_euros: Option<Decimal>, commission: Decimal) -> Option<Decimal> {
    salary_in_euros.map(|euros| euros + commission)
}

/// Money is kept at cent precision to match the storage columns.
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

impl SalaryDetail {
    /// A new, unpriced record for a first submission.
    pub fn unpriced(id: i64, user_id: i64, salary_local_currency: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            salary_local_currency: to_cents(salary_local_currency),
            salary_in_euros: None,
            commission: DEFAULT_COMMISSION,
            displayed_salary: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the supplied fields and recomputes `displayed_salary` from the
    /// post-update euro salary and commission.
    pub fn apply(&mut self, changes: &SalaryChanges, now: DateTime<Utc>) {
        if let Some(amount) = changes.salary_local_currency {
            self.salary_local_currency = to_cents(amount);
        }
        if let Some(amount) = changes.salary_in_euros {
            self.salary_in_euros = Some(to_cents(amount));
        }
        if let Some(amount) = changes.commission {
            self.commission = to_cents(amount);
        }
        self.displayed_salary = displayed_salary(self.salary_in_euros, self.commission);
        self.updated_at = now;
    }

    pub fn is_priced(&self) -> bool {
        self.salary_in_euros.is_some()
    }

    /// What the admin table shows in the "Displayed Salary" column.
    pub fn display_amount(&self) -> Decimal {
        self.displayed_salary.unwrap_or(DISPLAYED_SALARY_FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fresh() -> SalaryDetail {
        SalaryDetail::unpriced(1, 1, dec("5000"), Utc::now())
    }

    #[test]
    fn constants_have_expected_values() {
        assert_eq!(DEFAULT_COMMISSION, dec("500.00"));
        assert_eq!(DISPLAYED_SALARY_FALLBACK, dec("500.00"));
        assert_eq!(MAX_AMOUNT, dec("9999999999.99"));
    }

    #[test]
    fn new_record_is_unpriced_with_default_commission() {
        let detail = fresh();
        assert_eq!(detail.commission, DEFAULT_COMMISSION);
        assert_eq!(detail.salary_in_euros, None);
        assert_eq!(detail.displayed_salary, None);
        assert!(!detail.is_priced());
        assert_eq!(detail.display_amount(), DISPLAYED_SALARY_FALLBACK);
    }

    #[test]
    fn pricing_computes_displayed_salary() {
        let mut detail = fresh();
        detail.apply(
            &SalaryChanges {
                salary_in_euros: Some(dec("1000")),
                commission: Some(dec("500")),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(detail.displayed_salary, Some(dec("1500")));
        assert!(detail.is_priced());
    }

    #[test]
    fn commission_change_uses_existing_euro_salary() {
        let mut detail = fresh();
        detail.apply(
            &SalaryChanges {
                salary_in_euros: Some(dec("1000")),
                ..Default::default()
            },
            Utc::now(),
        );
        detail.apply(
            &SalaryChanges {
                commission: Some(dec("700")),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(detail.displayed_salary, Some(dec("1700")));
        assert_eq!(detail.salary_local_currency, dec("5000"));
    }

    #[test]
    fn commission_change_on_unpriced_record_keeps_null() {
        let mut detail = fresh();
        detail.apply(
            &SalaryChanges {
                commission: Some(dec("900")),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(detail.commission, dec("900"));
        assert_eq!(detail.displayed_salary, None);
        assert_eq!(detail.display_amount(), DISPLAYED_SALARY_FALLBACK);
    }

    #[test]
    fn local_currency_change_leaves_price_alone() {
        let mut detail = fresh();
        detail.apply(
            &SalaryChanges {
                salary_in_euros: Some(dec("1000")),
                ..Default::default()
            },
            Utc::now(),
        );
        detail.apply(&SalaryChanges::local_currency(dec("6000")), Utc::now());
        assert_eq!(detail.salary_local_currency, dec("6000"));
        assert_eq!(detail.displayed_salary, Some(dec("1500")));
    }

    #[test]
    fn amounts_are_rounded_to_cents() {
        let mut detail = fresh();
        detail.apply(
            &SalaryChanges {
                salary_in_euros: Some(dec("1000.005")),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(detail.salary_in_euros, Some(dec("1000.00")));
    }

    #[test]
    fn serializes_money_as_numbers_and_nulls() {
        let json = serde_json::to_value(fresh()).unwrap();
        assert_eq!(json["salary_local_currency"].as_f64(), Some(5000.0));
        assert_eq!(json["commission"].as_f64(), Some(500.0));
        assert!(json["salary_in_euros"].is_null());
        assert!(json["displayed_salary"].is_null());
    }
}
