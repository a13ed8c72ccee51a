use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::EmailAddress;
use crate::email::EmailQueue;
use crate::forms::contact::{ContactForm, ContactFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_not_found, request_path};
use crate::services::ServiceError;
use crate::services::contact::submit_contact;
use crate::services::pages::{PageView, serve_path};

#[post("/{tail:.*}")]
pub async fn submit_contact_form(
    req: HttpRequest,
    tail: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    email_queue: web::Data<EmailQueue>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ContactForm>,
) -> impl Responder {
    let path = request_path(&tail);

    let page = match serve_path(repo.get_ref(), &path, None) {
        Ok(PageView::Form { page }) => page,
        Ok(_) | Err(ServiceError::NotFound) => {
            let context = base_context(&flash_messages, &server_config.site, req.path());
            return render_not_found(&tera, &context);
        }
        Err(err) => {
            log::error!("Failed to find contact form '{path}': {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let payload = match ContactFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(ServiceError::from(err).to_string()).send();
            return redirect(req.path());
        }
    };

    let contact_email = match EmailAddress::new(server_config.contact_email.as_str()) {
        Ok(email) => email,
        Err(err) => {
            log::error!("Configured contact email is invalid: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match submit_contact(
        &page,
        payload,
        &contact_email,
        repo.get_ref(),
        email_queue.get_ref(),
    ) {
        Ok(confirmation) => {
            FlashMessage::success(confirmation).send();
            redirect(req.path())
        }
        Err(err) => {
            log::error!("Failed to submit contact form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
