use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact::NewContactMessage as DomainNewContactMessage;

/// Insertable row of the `contact_messages` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::contact_messages)]
pub struct NewContactMessage {
    pub page_id: i32,
    pub name: String,
    pub company_name: Option<String>,
    pub phone: String,
    pub email: String,
    pub country: Option<String>,
    pub message: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<DomainNewContactMessage> for NewContactMessage {
    fn from(message: DomainNewContactMessage) -> Self {
        Self {
            page_id: message.page_id.get(),
            name: message.name.into_inner(),
            company_name: message.company_name,
            phone: message.phone.into_inner(),
            email: message.email.into_inner(),
            country: message.country,
            message: message.message,
            created_at: message.created_at,
        }
    }
}
