//! Error conversion glue between the domain, form and service layers.
//!
//! The domain layer must not depend on service error types, so the
//! conversions into [`ServiceError`] live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::contact::ContactFormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<ContactFormError> for ServiceError {
    fn from(val: ContactFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
