use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, render_not_found, render_template, request_path, select_template,
};
use crate::services::ServiceError;
use crate::services::pages::{PageView, serve_path};

#[derive(Deserialize)]
struct PageQueryParams {
    tag: Option<String>,
}

#[get("/{tail:.*}")]
pub async fn show_page(
    req: HttpRequest,
    tail: web::Path<String>,
    params: web::Query<PageQueryParams>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let path = request_path(&tail);
    let mut context = base_context(&flash_messages, &server_config.site, req.path());

    let view = match serve_path(repo.get_ref(), &path, params.tag.as_deref()) {
        Ok(view) => view,
        Err(ServiceError::NotFound) => return render_not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to serve page '{path}': {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    context.insert("page_title", view.page_title());
    let (requested, default) = match view {
        PageView::Blog {
            index,
            index_path,
            context: blog,
            categories,
        } => {
            context.insert("page", &index);
            context.insert("index_path", &index_path);
            context.insert("posts", &blog.posts);
            context.insert("search_kind", &blog.search_kind);
            context.insert("search_term", &blog.search_term);
            context.insert("categories", &categories);
            context.insert("meta", &index.meta);
            (index.template, "blog/index.html")
        }
        PageView::Post { post } => {
            context.insert("post", &post);
            context.insert("meta", &post.meta);
            (post.template, "blog/post.html")
        }
        PageView::TagIndex { page, tag, posts } => {
            context.insert("page", &page);
            context.insert("tag", &tag);
            context.insert("posts", &posts);
            context.insert("meta", &page.meta);
            (page.template, "blog/tag_index.html")
        }
        PageView::Form { page } => {
            context.insert("page", &page);
            context.insert("meta", &page.meta);
            (page.template, "contact/form.html")
        }
        PageView::Standard { page } => {
            context.insert("page", &page);
            context.insert("meta", &page.meta);
            (page.template, "main/page.html")
        }
    };

    let template = select_template(&tera, requested.as_deref(), default);
    render_template(&tera, template, &context)
}
