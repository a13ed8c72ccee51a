use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ContactName, ContactPhone, EmailAddress, PageId};

/// Contact form submission to be stored for the form page `page_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewContactMessage {
    pub page_id: PageId,
    pub name: ContactName,
    pub company_name: Option<String>,
    pub phone: ContactPhone,
    pub email: EmailAddress,
    pub country: Option<String>,
    pub message: Option<String>,
    pub created_at: NaiveDateTime,
}
