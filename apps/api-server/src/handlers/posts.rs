//! Post handlers. Each validates its input before calling the post service.

use actix_web::{HttpResponse, web};

use postboard_core::validation::{
    CreatePostBody, ListPostsQuery, PostIdParams, UpdatePostBody, validate_update,
};
use postboard_shared::{PostResponse, QueryResultResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /v1/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostBody>,
) -> AppResult<HttpResponse> {
    let draft = body.into_inner().into_new_post()?;
    let post = state.posts.create_post(draft).await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// GET /v1/posts
pub async fn get_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let (filter, request) = query.into_inner().into_query()?;
    let page = state.posts.query_posts(filter, request).await?;

    Ok(HttpResponse::Ok().json(QueryResultResponse::from(page)))
}

/// GET /v1/posts/{postId}
pub async fn get_post(
    state: web::Data<AppState>,
    params: web::Path<PostIdParams>,
) -> AppResult<HttpResponse> {
    let id = params.post_id()?;
    let post = state
        .posts
        .get_post_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// PATCH /v1/posts/{postId}
pub async fn update_post(
    state: web::Data<AppState>,
    params: web::Path<PostIdParams>,
    body: web::Json<UpdatePostBody>,
) -> AppResult<HttpResponse> {
    let (id, changes) = validate_update(&params, body.into_inner())?;
    let post = state.posts.update_post_by_id(id, changes).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /v1/posts/{postId}
pub async fn delete_post(
    state: web::Data<AppState>,
    params: web::Path<PostIdParams>,
) -> AppResult<HttpResponse> {
    let id = params.post_id()?;
    let removed = state.posts.delete_post_by_id(id).await?;
    tracing::info!(post_id = %removed.id, "Post removed");

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use postboard_shared::ErrorResponse;
    use serde_json::{Value, json};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    const AUTHOR: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn create_then_fetch() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/v1/posts")
            .set_json(json!({ "createdBy": AUTHOR, "text": "hello" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["text"], "hello");
        assert_eq!(created["createdBy"], AUTHOR);
        assert_eq!(created["images"], json!([]));
        assert!(created["createdAt"].is_string());

        let id = created["id"].as_str().unwrap();
        let req = test::TestRequest::get()
            .uri(&format!("/v1/posts/{id}"))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);
    }

    #[actix_rt::test]
    async fn create_without_text_is_rejected() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/v1/posts")
            .set_json(json!({ "createdBy": AUTHOR }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.title, "Validation Failed");
        assert_eq!(body.errors, vec!["text: is required".to_string()]);
    }

    #[actix_rt::test]
    async fn malformed_json_is_a_problem_document() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/v1/posts")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, 400);
    }

    #[actix_rt::test]
    async fn list_paginates() {
        let app = app!();

        for i in 0..12 {
            let req = test::TestRequest::post()
                .uri("/v1/posts")
                .set_json(json!({ "createdBy": AUTHOR, "text": format!("post {i}") }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/v1/posts?limit=10&page=1&sortBy=createdAt:desc")
            .to_request();
        let page: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(page["results"].as_array().unwrap().len(), 10);
        assert_eq!(page["totalResults"], 12);
        assert_eq!(page["totalPages"], 2);
        assert_eq!(page["page"], 1);
        assert_eq!(page["limit"], 10);
    }

    #[actix_rt::test]
    async fn list_rejects_unknown_sort_field() {
        let app = app!();

        let req = test::TestRequest::get()
            .uri("/v1/posts?sortBy=title:asc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn list_rejects_a_page_too_far_to_reach() {
        let app = app!();

        let req = test::TestRequest::get()
            .uri("/v1/posts?limit=10&page=9223372036854775807")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.errors, vec!["page: is out of range".to_string()]);
    }

    #[actix_rt::test]
    async fn get_with_malformed_id_is_rejected() {
        let app = app!();

        let req = test::TestRequest::get().uri("/v1/posts/123").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn missing_post_is_not_found() {
        let app = app!();
        let id = uuid::Uuid::new_v4();

        let req = test::TestRequest::get()
            .uri(&format!("/v1/posts/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::patch()
            .uri(&format!("/v1/posts/{id}"))
            .set_json(json!({ "text": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.detail.as_deref(), Some("Post not found"));

        let req = test::TestRequest::delete()
            .uri(&format!("/v1/posts/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn update_then_delete() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/v1/posts")
            .set_json(json!({ "createdBy": AUTHOR, "text": "draft", "images": ["a.png"] }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::patch()
            .uri(&format!("/v1/posts/{id}"))
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::patch()
            .uri(&format!("/v1/posts/{id}"))
            .set_json(json!({ "text": "final" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["text"], "final");
        assert_eq!(updated["images"], json!(["a.png"]));

        let req = test::TestRequest::delete()
            .uri(&format!("/v1/posts/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/v1/posts/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn health_reports_storage() {
        let app = app!();

        let req = test::TestRequest::get().uri("/v1/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }
}
