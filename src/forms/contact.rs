use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::contact::NewContactMessage;
use crate::domain::types::{ContactName, ContactPhone, EmailAddress, PageId, TypeConstraintError};

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Raw contact form as posted by the browser.
///
/// Missing fields deserialize as empty so that validation reports them.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub company_name: Option<String>,
    #[validate(length(min = 1, max = 25))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 20))]
    pub country: Option<String>,
    pub message: Option<String>,
}

/// Validated contact form contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactFormPayload {
    pub name: ContactName,
    pub company_name: Option<String>,
    pub phone: ContactPhone,
    pub email: EmailAddress,
    pub country: Option<String>,
    pub message: Option<String>,
}

impl ContactFormPayload {
    pub fn into_new_contact_message(self, page_id: PageId) -> NewContactMessage {
        NewContactMessage {
            page_id,
            name: self.name,
            company_name: self.company_name,
            phone: self.phone,
            email: self.email,
            country: self.country,
            message: self.message,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContactFormError {
    #[error("Contact form validation failed: {0}")]
    Validation(String),
    #[error("Contact form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ContactFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ContactFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ContactForm> for ContactFormPayload {
    type Error = ContactFormError;

    fn try_from(value: ContactForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: ContactName::new(value.name)?,
            company_name: optional_text(value.company_name),
            phone: ContactPhone::new(value.phone)?,
            email: EmailAddress::new(value.email)?,
            country: optional_text(value.country),
            message: optional_text(value.message),
        })
    }
}
