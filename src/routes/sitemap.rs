use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use tera::{Context, Tera};

use crate::repository::DieselRepository;
use crate::services::sitemap::sitemap_entries;

#[get("/sitemap.xml")]
pub async fn show_sitemap(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let entries = match sitemap_entries(repo.get_ref()) {
        Ok(entries) => entries,
        Err(err) => {
            log::error!("Failed to build sitemap: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let base_url = {
        let info = req.connection_info();
        format!("{}://{}", info.scheme(), info.host())
    };

    let mut context = Context::new();
    context.insert("base_url", &base_url);
    context.insert("entries", &entries);

    match tera.render("sitemap.xml", &context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("application/xml; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template 'sitemap.xml': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
