use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::salary_detail::{SalaryChanges, MAX_AMOUNT};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct SubmitSalaryPayload {
    #[validate(
        required(message = "The name field is required."),
        length(min = 1, max = 255, message = "The name field must be between 1 and 255 characters.")
    )]
    #[schema(example = "Ana")]
    pub name: Option<String>,

    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field must be a valid email address.")
    )]
    #[schema(example = "ana@x.com")]
    pub email: Option<String>,

    #[schema(value_type = f64, example = 5000.0)]
    pub salary_local_currency: Option<Decimal>,
}

/// A submission that passed validation, with the email normalised.
#[derive(Debug, Clone, PartialEq)]
pub struct SalarySubmission {
    pub name: String,
    pub email: String,
    pub salary_local_currency: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateSalaryPayload {
    #[schema(value_type = Option<f64>, example = 5200.0)]
    pub salary_local_currency: Option<Decimal>,

    #[schema(value_type = Option<f64>, example = 1000.0)]
    pub salary_in_euros: Option<Decimal>,

    #[schema(value_type = Option<f64>, example = 500.0)]
    pub commission: Option<Decimal>,
}

/// Success envelope shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

fn field_error(errors: &mut ValidationErrors, field: &'static str, code: &'static str, message: String) {
    errors.add(field, ValidationError::new(code).with_message(message.into()));
}

fn check_amount(errors: &mut ValidationErrors, field: &'static str, value: Option<Decimal>) {
    let Some(value) = value else { return };
    let label = field.replace('_', " ");
    if value < Decimal::ZERO {
        field_error(errors, field, "min", format!("The {} field must be at least 0.", label));
    } else if value > MAX_AMOUNT {
        field_error(
            errors,
            field,
            "max",
            format!("The {} field must not be greater than {}.", label, MAX_AMOUNT),
        );
    }
}

fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl SubmitSalaryPayload {
    /// Trims the name, trims and lower-cases the email.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|n| n.trim().to_string()),
            email: self.email.map(|e| e.trim().to_lowercase()),
            salary_local_currency: self.salary_local_currency,
        }
    }

    pub fn into_submission(self) -> Result<SalarySubmission, ValidationErrors> {
        let payload = self.normalized();
        let mut errors = match payload.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if payload.salary_local_currency.is_none() {
            field_error(
                &mut errors,
                "salary_local_currency",
                "required",
                "The salary local currency field is required.".to_string(),
            );
        }
        check_amount(&mut errors, "salary_local_currency", payload.salary_local_currency);

        match (payload.name, payload.email, payload.salary_local_currency) {
            (Some(name), Some(email), Some(salary_local_currency)) if errors.errors().is_empty() => {
                Ok(SalarySubmission {
                    name,
                    email,
                    salary_local_currency,
                })
            }
            _ => Err(errors),
        }
    }
}

impl UpdateSalaryPayload {
    pub fn into_changes(self) -> Result<SalaryChanges, ValidationErrors> {
        let changes = SalaryChanges {
            salary_local_currency: self.salary_local_currency,
            salary_in_euros: self.salary_in_euros,
            commission: self.commission,
        };

        let mut errors = ValidationErrors::new();
        if changes.is_empty() {
            field_error(
                &mut errors,
                "salary_detail",
                "required",
                "At least one of salary_local_currency, salary_in_euros or commission is required."
                    .to_string(),
            );
        }
        check_amount(&mut errors, "salary_local_currency", changes.salary_local_currency);
        check_amount(&mut errors, "salary_in_euros", changes.salary_in_euros);
        check_amount(&mut errors, "commission", changes.commission);
        into_result(errors)?;

        Ok(changes)
    }
}
