use actix_web::{HttpResponse, Responder, get, web};
use log::error;

use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::blog::show_blog;

/// Resolve a blog route beneath `index_id` and return the render context as
/// JSON.
#[get("/api/v1/blog/{index_id}/{tail:.*}")]
pub async fn api_v1_blog(
    path: web::Path<(i32, String)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (index_id, tail) = path.into_inner();

    match show_blog(repo.get_ref(), index_id, &format!("/{tail}")) {
        Ok(context) => HttpResponse::Ok().json(context),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            error!("Failed to resolve blog route '{tail}' for index {index_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
