use crate::application::post_service::PostService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{BlogPostResponse, CreatePostRequest, UpdatePostRequest};
use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;
use uuid::Uuid;

#[get("/posts")]
async fn get_posts(service: web::Data<PostService>) -> Result<HttpResponse, DomainError> {
    let posts = service.get_posts().await?;
    let response: Vec<BlogPostResponse> = posts.into_iter().map(BlogPostResponse::from).collect();

    info!(count = response.len(), "posts retrieved");

    Ok(HttpResponse::Ok().json(response))
}

#[get("/posts/{id}")]
async fn get_post(
    service: web::Data<PostService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post = service.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(BlogPostResponse::from(post)))
}

#[post("/posts")]
async fn create_post(
    service: web::Data<PostService>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let req = payload.into_inner();
    let post = service
        .create_post(req.author.into(), req.title, req.content, req.created)
        .await?;

    info!(post_id = %post.id, "post created");

    Ok(HttpResponse::Created().json(BlogPostResponse::from(post)))
}

#[put("/posts/{id}")]
async fn update_post(
    service: web::Data<PostService>,
    payload: web::Json<UpdatePostRequest>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let req = payload.into_inner();

    // Bodies that echo an id must agree with the path.
    if req.id.is_some_and(|body_id| body_id != post_id) {
        return Err(DomainError::IdMismatch);
    }

    service.update_post(post_id, req.into()).await?;

    info!(post_id = %post_id, "post updated");

    Ok(HttpResponse::NoContent().finish())
}

#[delete("/posts/{id}")]
async fn delete_post(
    service: web::Data<PostService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    service.delete_post(post_id).await?;

    info!(post_id = %post_id, "post deleted");

    Ok(HttpResponse::NoContent().finish())
}
