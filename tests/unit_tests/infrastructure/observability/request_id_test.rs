use axum::Router;
use axum::body::Body;
use axum::extract::Extension;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::routing::get;
use http_body_util::BodyExt;
use tower::ServiceExt;

use logidoc::infrastructure::observability::{REQUEST_ID_HEADER, RequestId, request_id_middleware};

fn app() -> Router {
    Router::new()
        .route(
            "/echo",
            get(|Extension(RequestId(id)): Extension<RequestId>| async move { id }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

#[tokio::test]
async fn given_incoming_request_id_when_handling_then_propagates_it() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/echo")
                .header(REQUEST_ID_HEADER, "load-4821")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "load-4821");
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"load-4821");
}

#[tokio::test]
async fn given_no_request_id_when_handling_then_generates_uuid() {
    let response = app()
        .oneshot(Request::builder().uri("/echo").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&header).is_ok());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], header.as_bytes());
}
