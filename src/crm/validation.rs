/// Input validation for CRM request bodies
///
/// Checks run before any query; the first failing field is reported.

use crate::crm::error::ValidationError;
use crate::crm::types::*;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()-]{7,20}$").expect("phone pattern compiles"));

pub const MIN_PASSWORD_LEN: usize = 8;

type Checked = Result<(), ValidationError>;

pub fn required(field: &'static str, value: &str) -> Checked {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

pub fn email(field: &'static str, value: &str) -> Checked {
    if !EMAIL.is_match(value.trim()) {
        return Err(ValidationError::new(field, "is not a valid email address"));
    }
    Ok(())
}

pub fn optional_email(field: &'static str, value: Option<&str>) -> Checked {
    match value {
        Some(value) if !value.trim().is_empty() => email(field, value),
        _ => Ok(()),
    }
}

pub fn optional_phone(field: &'static str, value: Option<&str>) -> Checked {
    match value {
        Some(value) if !value.trim().is_empty() && !PHONE.is_match(value.trim()) => {
            Err(ValidationError::new(field, "is not a valid phone number"))
        }
        _ => Ok(()),
    }
}

pub fn non_negative(field: &'static str, value: f64) -> Checked {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(field, "must be a non-negative number"));
    }
    Ok(())
}

/// Parse an optional `YYYY-MM-DD` date
pub fn optional_date(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match value {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ValidationError::new(field, "must be a date in YYYY-MM-DD form")),
    }
}

pub fn password(value: &str) -> Checked {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            "password",
            format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

impl DepartmentInput {
    pub fn validate(&self) -> Checked {
        required("name", &self.name)
    }
}

impl DesignationInput {
    pub fn validate(&self) -> Checked {
        required("name", &self.name)
    }
}

impl EmployeeInput {
    pub fn validate(&self) -> Checked {
        required("first_name", &self.first_name)?;
        required("last_name", &self.last_name)?;
        required("email", &self.email)?;
        email("email", &self.email)?;
        optional_phone("phone", self.phone.as_deref())?;
        optional_date("hire_date", self.hire_date.as_deref())?;
        if let Some(salary) = self.salary {
            non_negative("salary", salary)?;
        }
        Ok(())
    }
}

impl UserInput {
    /// `creating` makes the password mandatory
    pub fn validate(&self, creating: bool) -> Checked {
        required("name", &self.name)?;
        required("email", &self.email)?;
        email("email", &self.email)?;
        match (&self.password, creating) {
            (Some(value), _) => password(value),
            (None, true) => Err(ValidationError::new("password", "is required")),
            (None, false) => Ok(()),
        }
    }
}

impl LeadInput {
    pub fn validate(&self) -> Checked {
        required("name", &self.name)?;
        optional_email("email", self.email.as_deref())?;
        optional_phone("phone", self.phone.as_deref())?;
        non_negative("value", self.value)
    }
}

impl ProposalInput {
    pub fn validate(&self) -> Checked {
        required("title", &self.title)?;
        non_negative("amount", self.amount)?;
        optional_date("valid_until", self.valid_until.as_deref())?;
        Ok(())
    }
}

impl ProjectInput {
    pub fn validate(&self) -> Checked {
        required("name", &self.name)?;
        non_negative("budget", self.budget)?;
        let start = optional_date("start_date", self.start_date.as_deref())?;
        let end = optional_date("end_date", self.end_date.as_deref())?;
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(ValidationError::new("end_date", "must not be before start_date"));
            }
        }
        Ok(())
    }
}

impl TaskInput {
    pub fn validate(&self) -> Checked {
        required("title", &self.title)?;
        optional_date("due_date", self.due_date.as_deref())?;
        Ok(())
    }
}
