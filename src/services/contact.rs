use crate::domain::contact::NewContactMessage;
use crate::domain::page::Page;
use crate::domain::types::{EmailAddress, PageKind};
use crate::email::{EmailKind, EmailQueue, OutgoingEmail};
use crate::forms::contact::ContactFormPayload;
use crate::repository::ContactWriter;

use super::{ServiceError, ServiceResult};

/// Confirmation used when a form page has no thank-you text of its own.
pub const DEFAULT_THANK_YOU: &str = "Your message has been sent successfully.";

/// Store a contact submission made on `page` and queue both notifications.
/// Returns the confirmation to show the submitter.
///
/// Email delivery is fire-and-forget: a dropped or failed email never turns a
/// stored submission into an error.
pub fn submit_contact<R>(
    page: &Page,
    payload: ContactFormPayload,
    contact_email: &EmailAddress,
    repo: &R,
    queue: &EmailQueue,
) -> ServiceResult<String>
where
    R: ContactWriter + ?Sized,
{
    if page.kind != PageKind::Form || !page.live {
        return Err(ServiceError::NotFound);
    }

    let message = payload.into_new_contact_message(page.id);
    if let Err(e) = repo.create_contact_message(&message) {
        log::error!("Failed to store contact message: {e}");
        return Err(ServiceError::Internal);
    }

    queue.enqueue(notification(&message, &page.title, contact_email));
    queue.enqueue(reply(&message, &page.title));

    let thank_you = page.thank_you_text.trim();
    if thank_you.is_empty() {
        Ok(DEFAULT_THANK_YOU.to_string())
    } else {
        Ok(thank_you.to_string())
    }
}

fn details(message: &NewContactMessage) -> String {
    let optional = |value: &Option<String>| value.as_deref().unwrap_or("-").to_string();
    format!(
        "Name: {}\nCompany: {}\nPhone: {}\nEmail: {}\nCountry: {}\n\n{}",
        message.name,
        optional(&message.company_name),
        message.phone,
        message.email,
        optional(&message.country),
        message.message.as_deref().unwrap_or_default()
    )
}

fn notification(message: &NewContactMessage, form_title: &str, to: &EmailAddress) -> OutgoingEmail {
    OutgoingEmail {
        kind: EmailKind::Contact,
        to: to.clone(),
        subject: format!("{form_title}: message from {}", message.name),
        body: details(message),
    }
}

fn reply(message: &NewContactMessage, form_title: &str) -> OutgoingEmail {
    OutgoingEmail {
        kind: EmailKind::ContactReply,
        to: message.email.clone(),
        subject: format!("{form_title}: we received your message"),
        body: format!(
            "Hello {},\n\nThank you for getting in touch. We will get back to you soon.\n\n{}",
            message.name,
            details(message)
        ),
    }
}
