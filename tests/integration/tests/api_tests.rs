//! API Integration Tests
//!
//! Run against the in-memory store, so no external services are needed.
//! The PostgreSQL smoke test runs only when DATABASE_URL is set.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use blog_core::Role;
use integration_tests::{
    assert_json, assert_status, fixtures::*, postgres_config, TestServer,
};
use reqwest::StatusCode;

async fn create_blog(server: &TestServer, token: &str) -> BlogResponse {
    let response = server
        .post_auth("/api/v1/blogs", token, &CreateBlogRequest::unique())
        .await
        .unwrap();
    let created: Data<BlogResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.data
}

async fn create_comment(server: &TestServer, token: &str, blog_id: &str) -> CommentResponse {
    let response = server
        .post_auth(
            &format!("/api/v1/blogs/{blog_id}/comments"),
            token,
            &CommentRequest::unique(),
        )
        .await
        .unwrap();
    let created: Data<CommentResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.data
}

async fn blog_reaction(
    server: &TestServer,
    method: &str,
    path: &str,
    token: &str,
) -> ReactionResponse {
    let response = match method {
        "PUT" => server.put_auth(path, token).await,
        _ => server.delete_auth(path, token).await,
    }
    .unwrap();
    let body: Data<ReactionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    body.data
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/blogs").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let response = server.get_auth("/api/v1/blogs", "not-a-jwt").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_TOKEN");
}

// ============================================================================
// Blog Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_list_blogs() {
    let server = TestServer::start().await.unwrap();
    let (author_id, token) = server.token(Role::User).unwrap();

    let blog = create_blog(&server, &token).await;
    assert_eq!(blog.author_id, author_id.to_string());
    assert_eq!(
        (blog.like_count, blog.dislike_count, blog.view_count, blog.comment_count),
        (0, 0, 0, 0)
    );

    let response = server
        .get_auth("/api/v1/blogs?page=1&limit=500", &token)
        .await
        .unwrap();
    let page: BlogPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.limit, 100);
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.pagination.total_pages, 1);
    assert_eq!(page.data[0].id, blog.id);
}

#[tokio::test]
async fn test_list_past_last_page_is_empty() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = server.token(Role::User).unwrap();
    create_blog(&server, &token).await;

    let response = server
        .get_auth(&format!("/api/v1/blogs?page={}", i64::MAX), &token)
        .await
        .unwrap();
    let page: BlogPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.page, i64::MAX);
    assert_eq!(page.pagination.total, 1);
}

#[tokio::test]
async fn test_list_sorted_by_likes_and_searched_by_title() {
    let server = TestServer::start().await.unwrap();
    let (_, author) = server.token(Role::User).unwrap();

    let mut ids = Vec::new();
    for title in ["Counting likes", "Counting views", "Unrelated"] {
        let request = CreateBlogRequest {
            title: title.to_string(),
            ..CreateBlogRequest::unique()
        };
        let response = server.post_auth("/api/v1/blogs", &author, &request).await.unwrap();
        let created: Data<BlogResponse> =
            assert_json(response, StatusCode::CREATED).await.unwrap();
        ids.push(created.data.id);
    }

    // only the oldest blog is liked
    let (_, reader) = server.token(Role::User).unwrap();
    let path = format!("/api/v1/blogs/{}/like", ids[0]);
    blog_reaction(&server, "PUT", &path, &reader).await;

    let response = server
        .get_auth("/api/v1/blogs?sort=likes", &author)
        .await
        .unwrap();
    let page: BlogPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data[0].id, ids[0]);
    assert_eq!(page.data[0].like_count, 1);

    let response = server
        .get_auth("/api/v1/blogs?title=counting&sort=newest", &author)
        .await
        .unwrap();
    let page: BlogPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 2);
    assert!(page.data.iter().all(|b| b.title.starts_with("Counting")));

    let response = server
        .get_auth("/api/v1/blogs?sort=random", &author)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_get_blog_counts_each_viewer_once() {
    let server = TestServer::start().await.unwrap();
    let (_, author) = server.token(Role::User).unwrap();
    let (_, reader) = server.token(Role::User).unwrap();
    let blog = create_blog(&server, &author).await;
    let path = format!("/api/v1/blogs/{}", blog.id);

    for _ in 0..3 {
        let response = server.get_auth(&path, &reader).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server.get_auth(&path, &author).await.unwrap();
    let body: Data<BlogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.view_count, 2);
}

#[tokio::test]
async fn test_malformed_blog_id_is_bad_request() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = server.token(Role::User).unwrap();

    let response = server
        .get_auth("/api/v1/blogs/not-a-uuid", &token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_only_author_or_admin_edits_blog() {
    let server = TestServer::start().await.unwrap();
    let (_, author) = server.token(Role::User).unwrap();
    let (_, stranger) = server.token(Role::User).unwrap();
    let (_, admin) = server.token(Role::Admin).unwrap();
    let blog = create_blog(&server, &author).await;
    let path = format!("/api/v1/blogs/{}", blog.id);

    let edit = serde_json::json!({ "title": "Edited" });
    let response = server.patch_auth(&path, &stranger, &edit).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "NOT_AUTHOR");

    let response = server.patch_auth(&path, &author, &edit).await.unwrap();
    let body: Data<BlogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.title, "Edited");

    let response = server.delete_auth(&path, &admin).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&path, &author).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_BLOG");
}

#[tokio::test]
async fn test_invalid_blog_body_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = server.token(Role::User).unwrap();

    let body = serde_json::json!({ "title": "", "content": "x" });
    let response = server.post_auth("/api/v1/blogs", &token, &body).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

// ============================================================================
// Blog Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_blog_like_switch_and_remove() {
    let server = TestServer::start().await.unwrap();
    let (_, author) = server.token(Role::User).unwrap();
    let (_, reader) = server.token(Role::User).unwrap();
    let blog = create_blog(&server, &author).await;
    let like = format!("/api/v1/blogs/{}/like", blog.id);
    let dislike = format!("/api/v1/blogs/{}/dislike", blog.id);

    let r = blog_reaction(&server, "PUT", &like, &reader).await;
    assert_eq!((r.state.as_str(), r.like_count, r.dislike_count), ("liked", 1, 0));
    assert!(r.changed);

    let r = blog_reaction(&server, "PUT", &like, &reader).await;
    assert_eq!((r.like_count, r.dislike_count), (1, 0));
    assert!(!r.changed);

    let r = blog_reaction(&server, "PUT", &dislike, &reader).await;
    assert_eq!(r.previous_state, "liked");
    assert_eq!((r.state.as_str(), r.like_count, r.dislike_count), ("disliked", 0, 1));

    // unlike only clears a like
    let r = blog_reaction(&server, "DELETE", &like, &reader).await;
    assert_eq!((r.state.as_str(), r.dislike_count), ("disliked", 1));
    assert!(!r.changed);

    let r = blog_reaction(&server, "DELETE", &dislike, &reader).await;
    assert_eq!((r.state.as_str(), r.like_count, r.dislike_count), ("none", 0, 0));

    let response = server
        .get_auth(&format!("/api/v1/blogs/{}/reactions/@me", blog.id), &reader)
        .await
        .unwrap();
    let mine: Data<UserReactionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.data.state, "none");
}

#[tokio::test]
async fn test_reaction_removal_requires_owner_or_admin() {
    let server = TestServer::start().await.unwrap();
    let (_, author) = server.token(Role::User).unwrap();
    let (reader_id, reader) = server.token(Role::User).unwrap();
    let (_, stranger) = server.token(Role::User).unwrap();
    let (_, admin) = server.token(Role::Admin).unwrap();
    let blog = create_blog(&server, &author).await;

    blog_reaction(&server, "PUT", &format!("/api/v1/blogs/{}/like", blog.id), &reader).await;
    let path = format!("/api/v1/blogs/{}/reactions/{}", blog.id, reader_id);

    let response = server.delete_auth(&path, &stranger).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "NOT_REACTION_OWNER");

    let r = blog_reaction(&server, "DELETE", &path, &admin).await;
    assert_eq!((r.state.as_str(), r.like_count), ("none", 0));

    let response = server.delete_auth(&path, &admin).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_REACTION");

    // own removal of nothing is a no-op
    let r = blog_reaction(&server, "DELETE", &path, &reader).await;
    assert!(!r.changed);
}

#[tokio::test]
async fn test_reacting_to_missing_blog_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = server.token(Role::User).unwrap();

    let path = format!("/api/v1/blogs/{}/like", blog_core::BlogId::new());
    let response = server.put_auth(&path, &token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_BLOG");
}

#[tokio::test]
async fn test_concurrent_likes_are_all_counted() {
    let server = std::sync::Arc::new(TestServer::start().await.unwrap());
    let (_, author) = server.token(Role::User).unwrap();
    let blog = create_blog(&server, &author).await;
    let like = format!("/api/v1/blogs/{}/like", blog.id);

    let mut handles = Vec::new();
    for _ in 0..10 {
        let server = server.clone();
        let like = like.clone();
        let (_, token) = server.token(Role::User).unwrap();
        handles.push(tokio::spawn(async move {
            let response = server.put_auth(&like, &token).await.unwrap();
            assert_status(response, StatusCode::OK).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let response = server
        .get_auth(&format!("/api/v1/blogs/{}", blog.id), &author)
        .await
        .unwrap();
    let body: Data<BlogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((body.data.like_count, body.data.dislike_count), (10, 0));
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_react_actions() {
    let server = TestServer::start().await.unwrap();
    let (_, author) = server.token(Role::User).unwrap();
    let (_, reader) = server.token(Role::User).unwrap();
    let blog = create_blog(&server, &author).await;
    let comment = create_comment(&server, &author, &blog.id).await;
    let path = format!("/api/v1/comments/{}/reactions", comment.id);

    let response = server
        .post_auth(&path, &reader, &ReactRequest { action: 1 })
        .await
        .unwrap();
    let r: Data<ReactionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(r.data.subject_type, "comment");
    assert_eq!((r.data.like_count, r.data.dislike_count), (1, 0));

    let response = server
        .post_auth(&path, &reader, &ReactRequest { action: -1 })
        .await
        .unwrap();
    let r: Data<ReactionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((r.data.like_count, r.data.dislike_count), (0, 1));

    let response = server
        .post_auth(&path, &reader, &ReactRequest { action: 2 })
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_REACTION_ACTION");

    let response = server
        .post_auth(&path, &reader, &ReactRequest { action: 0 })
        .await
        .unwrap();
    let r: Data<ReactionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((r.data.state.as_str(), r.data.like_count, r.data.dislike_count), ("none", 0, 0));

    let response = server
        .get_auth(&format!("{path}/@me"), &reader)
        .await
        .unwrap();
    let mine: Data<UserReactionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.data.state, "none");
}

#[tokio::test]
async fn test_comment_reaction_removal_requires_owner_or_admin() {
    let server = TestServer::start().await.unwrap();
    let (_, author) = server.token(Role::User).unwrap();
    let (reader_id, reader) = server.token(Role::User).unwrap();
    let (_, stranger) = server.token(Role::User).unwrap();
    let (_, admin) = server.token(Role::Admin).unwrap();
    let blog = create_blog(&server, &author).await;
    let comment = create_comment(&server, &author, &blog.id).await;

    let react = format!("/api/v1/comments/{}/reactions", comment.id);
    let response = server
        .post_auth(&react, &reader, &ReactRequest { action: -1 })
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let path = format!("/api/v1/comments/{}/reactions/{}", comment.id, reader_id);
    let response = server.delete_auth(&path, &stranger).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "NOT_REACTION_OWNER");

    let r = blog_reaction(&server, "DELETE", &path, &admin).await;
    assert_eq!(r.subject_type, "comment");
    assert_eq!((r.state.as_str(), r.dislike_count), ("none", 0));

    let response = server.delete_auth(&path, &admin).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_REACTION");

    let r = blog_reaction(&server, "DELETE", &path, &reader).await;
    assert!(!r.changed);
}

#[tokio::test]
async fn test_comment_count_follows_add_and_remove() {
    let server = TestServer::start().await.unwrap();
    let (_, author) = server.token(Role::User).unwrap();
    let (_, stranger) = server.token(Role::User).unwrap();
    let blog = create_blog(&server, &author).await;

    let first = create_comment(&server, &author, &blog.id).await;
    create_comment(&server, &stranger, &blog.id).await;

    let response = server
        .get_auth(&format!("/api/v1/blogs/{}/comments", blog.id), &author)
        .await
        .unwrap();
    let comments: Data<Vec<CommentResponse>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.data.len(), 2);
    assert!(comments.data.iter().any(|c| c.id == first.id && c.blog_id == blog.id));

    let comment_path = format!("/api/v1/comments/{}", first.id);
    let response = server.delete_auth(&comment_path, &stranger).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&comment_path, &author, &CommentRequest { content: "edited".to_string() })
        .await
        .unwrap();
    let edited: Data<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.data.content, "edited");

    let response = server.delete_auth(&comment_path, &author).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/blogs/{}", blog.id), &author)
        .await
        .unwrap();
    let body: Data<BlogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.comment_count, 1);
}

// ============================================================================
// PostgreSQL
// ============================================================================

#[tokio::test]
async fn test_postgres_like_round_trip() {
    let Some(config) = postgres_config() else {
        return;
    };

    let server = TestServer::start_with_config(config).await.unwrap();
    let (_, author) = server.token(Role::User).unwrap();
    let (_, reader) = server.token(Role::User).unwrap();
    let blog = create_blog(&server, &author).await;

    let path = format!("/api/v1/blogs/{}/like", blog.id);
    let r = blog_reaction(&server, "PUT", &path, &reader).await;
    assert_eq!((r.like_count, r.dislike_count), (1, 0));
}
