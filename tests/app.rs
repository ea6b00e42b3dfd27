//! Router-level tests.
//!
//! These drive the assembled router with `tower::ServiceExt::oneshot`.
//! The connection pool is lazy, so every request here must be one that
//! resolves before a query is attempted: auth failures, extractor
//! rejections, and clause-builder errors.

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use jobly_api::auth::{generate_jwt, Claims};

fn token(username: &str, is_admin: bool) -> String {
    generate_jwt(Claims::new(username.to_string(), is_admin)).expect("token generation")
}

fn request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn health_endpoint_is_public() -> Result<()> {
    let response = jobly_api::app()
        .oneshot(request(Method::GET, "/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await?;
    assert_eq!(payload["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_returns_service_banner() -> Result<()> {
    let response = jobly_api::app()
        .oneshot(request(Method::GET, "/").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await?;
    assert_eq!(payload["name"], "Jobly API");
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let response = jobly_api::app()
        .oneshot(request(Method::GET, "/nope").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn company_mutations_require_a_token() -> Result<()> {
    let response = jobly_api::app()
        .oneshot(
            request(Method::POST, "/companies")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"handle":"acme","name":"Acme"}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = body_json(response).await?;
    assert_eq!(payload["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    let response = jobly_api::app()
        .oneshot(
            request(Method::DELETE, "/companies/acme")
                .header(header::AUTHORIZATION, "Bearer not.a.jwt")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn non_admin_cannot_mutate() -> Result<()> {
    let response = jobly_api::app()
        .oneshot(
            request(Method::DELETE, "/jobs/1")
                .header(header::AUTHORIZATION, format!("Bearer {}", token("u1", false)))
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let payload = body_json(response).await?;
    assert_eq!(payload["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn job_id_must_be_numeric() -> Result<()> {
    let response = jobly_api::app()
        .oneshot(
            request(Method::DELETE, "/jobs/abc")
                .header(header::AUTHORIZATION, format!("Bearer {}", token("admin", true)))
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn empty_patch_body_is_a_client_error() -> Result<()> {
    // The SET-clause builder rejects an empty field map before any
    // query is issued.
    let response = jobly_api::app()
        .oneshot(
            request(Method::PATCH, "/companies/acme")
                .header(header::AUTHORIZATION, format!("Bearer {}", token("admin", true)))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = body_json(response).await?;
    assert_eq!(payload["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn patch_rejects_identity_fields() -> Result<()> {
    let response = jobly_api::app()
        .oneshot(
            request(Method::PATCH, "/companies/acme")
                .header(header::AUTHORIZATION, format!("Bearer {}", token("admin", true)))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"handle":"new-handle"}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn inverted_employee_range_is_a_client_error() -> Result<()> {
    // InvalidRange surfaces before any query is issued.
    let response = jobly_api::app()
        .oneshot(
            request(Method::GET, "/companies?minEmployees=5&maxEmployees=2")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = body_json(response).await?;
    assert_eq!(payload["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn unknown_filter_keys_are_rejected_by_the_query_layer() -> Result<()> {
    let response = jobly_api::app()
        .oneshot(request(Method::GET, "/companies?nameLike=net").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn token_request_requires_both_fields() -> Result<()> {
    let response = jobly_api::app()
        .oneshot(
            request(Method::POST, "/auth/token")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"u1"}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}
