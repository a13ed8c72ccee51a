use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use log;
use tera::{Context, Tera};

use crate::models::config::SiteSettings;

pub mod api;
pub mod contact;
pub mod pages;
pub mod sitemap;

/// Map a flash message level to the CSS class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

pub fn render_not_found(tera: &Tera, context: &Context) -> HttpResponse {
    HttpResponse::NotFound().body(tera.render("main/not_found.html", context).unwrap_or_else(
        |e| {
            log::error!("Failed to render template 'main/not_found.html': {e}");
            String::new()
        },
    ))
}

/// Page template override when Tera knows it, otherwise `default`.
pub fn select_template<'a>(tera: &Tera, requested: Option<&'a str>, default: &'a str) -> &'a str {
    match requested {
        Some(name) if tera.get_template_names().any(|known| known == name) => name,
        Some(name) => {
            log::warn!("Template '{name}' is not loaded, using '{default}'");
            default
        }
        None => default,
    }
}

/// Decoded request path rebuilt from a `{tail:.*}` match.
pub fn request_path(tail: &str) -> String {
    format!("/{tail}")
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    site: &SiteSettings,
    current_path: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("settings", site);
    context.insert("current_path", current_path);
    context
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};

    use super::*;

    #[::core::prelude::v1::test]
    fn redirect_uses_see_other() {
        let response = redirect("/contact/");

        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/contact/"
        );
    }

    #[::core::prelude::v1::test]
    fn error_alerts_use_danger_class() {
        assert_eq!(alert_level_to_str(&Level::Error), "danger");
        assert_eq!(alert_level_to_str(&Level::Info), "info");
    }

    #[::core::prelude::v1::test]
    fn template_override_needs_a_loaded_template() {
        let mut tera = Tera::default();
        tera.add_raw_template("main/landing.html", "landing")
            .unwrap();

        assert_eq!(
            select_template(&tera, Some("main/landing.html"), "main/page.html"),
            "main/landing.html"
        );
        assert_eq!(
            select_template(&tera, Some("main/missing.html"), "main/page.html"),
            "main/page.html"
        );
        assert_eq!(select_template(&tera, None, "main/page.html"), "main/page.html");
    }

    #[actix_web::test]
    async fn tail_match_is_percent_decoded() {
        let app = test::init_service(App::new().route(
            "/{tail:.*}",
            web::get().to(|tail: web::Path<String>| async move { request_path(&tail) }),
        ))
        .await;

        for (uri, expected) in [
            ("/blog/tag/caf%C3%A9/", "/blog/tag/café/"),
            ("/blog/tag/web%20dev/", "/blog/tag/web dev/"),
            ("/blog/tag/c%2B%2B/", "/blog/tag/c++/"),
            ("/", "/"),
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let body = test::call_and_read_body(&app, req).await;
            assert_eq!(body, expected.as_bytes(), "decoding {uri}");
        }
    }
}
