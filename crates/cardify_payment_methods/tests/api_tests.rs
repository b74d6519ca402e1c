use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use cardify_payment_methods::routes::routes;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fixtures::{create_mock_config, created_payment_method_body, graphql_errors_body};

async fn app_for(server: &MockServer) -> Router {
    let config = create_mock_config(&format!("{}/graphql", server.uri()));
    routes(config).expect("router")
}

fn create_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_create_payment_method_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_payment_method_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = call(
        app_for(&server).await,
        create_request(
            "/payment-methods",
            json!({ "CollectiveId": 8686, "amount": 5000, "currency": "USD" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 1234,
            "name": "Gift card from Acme",
            "CollectiveId": 8686,
            "balance": 5000,
            "monthlyLimitPerMember": null,
            "currency": "USD",
            "limitedToTags": ["open source"],
            "limitedToCollectiveIds": null,
            "limitedToHostCollectiveIds": [11004],
            "code": "a1b2c3d4",
            "expiryDate": "2026-12-31T23:59:59+00:00",
            "redeemUrl": "https://cards.example.com/redeem?code=a1b2c3d4"
        })
    );
}

#[tokio::test]
async fn test_mutation_variables_are_whitelisted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "operationName": "createPaymentMethod",
            "variables": { "type": "virtualcard", "CollectiveId": 8686 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_payment_method_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = call(
        app_for(&server).await,
        create_request(
            "/payment-methods",
            json!({
                "CollectiveId": 8686,
                "amount": 5000,
                "currency": "USD",
                "CreatedByUserId": 1,
                "service": "opencollective"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent["variables"],
        json!({ "type": "virtualcard", "CollectiveId": 8686, "amount": 5000, "currency": "USD" })
    );
    assert!(sent["query"]
        .as_str()
        .unwrap()
        .contains("createPaymentMethod("));
}

#[tokio::test]
async fn test_api_key_is_forwarded_as_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(query_param("api_key", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_payment_method_body()))
        .expect(2)
        .mount(&server)
        .await;

    let mut request = create_request("/payment-methods", json!({ "CollectiveId": 8686 }));
    request
        .headers_mut()
        .insert("Api-Key", "s3cret".parse().unwrap());

    let (status, _) = call(app_for(&server).await, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        app_for(&server).await,
        create_request("/payment-methods?api_key=s3cret", json!({ "CollectiveId": 8686 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unsupported_type_never_reaches_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_payment_method_body()))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = call(
        app_for(&server).await,
        create_request("/payment-methods", json!({ "type": "creditcard", "CollectiveId": 8686 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Creation of payment methods with type creditcard not allowed" })
    );
}

#[tokio::test]
async fn test_first_graphql_error_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(graphql_errors_body(&["Invalid currency", "Second problem"])),
        )
        .mount(&server)
        .await;

    let (status, body) = call(
        app_for(&server).await,
        create_request("/payment-methods", json!({ "CollectiveId": 8686, "currency": "XYZ" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid currency" }));
}

#[tokio::test]
async fn test_top_level_error_message_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({ "error": { "message": "Rate limited" } })),
        )
        .mount(&server)
        .await;

    let (status, body) = call(
        app_for(&server).await,
        create_request("/payment-methods", json!({ "CollectiveId": 8686 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Rate limited" }));
}

#[tokio::test]
async fn test_missing_payment_method_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "createPaymentMethod": null } })),
        )
        .mount(&server)
        .await;

    let (status, body) = call(
        app_for(&server).await,
        create_request("/payment-methods", json!({ "CollectiveId": 8686 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No paymentMethod returned." }));
}

#[tokio::test]
async fn test_non_json_failure_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let (status, body) = call(
        app_for(&server).await,
        create_request("/payment-methods", json!({ "CollectiveId": 8686 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("500"));
    assert!(message.contains("Internal Server Error"));
}

#[tokio::test]
async fn test_unreachable_api_is_bad_request() {
    // Reserve a free port, then release it so nothing is listening there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("free port")
        .port();
    let config = create_mock_config(&format!("http://127.0.0.1:{}/graphql", port));

    let (status, body) = call(
        routes(config).expect("router"),
        create_request("/payment-methods", json!({ "CollectiveId": 8686 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("GraphQL API request failed:"));
}

#[tokio::test]
async fn test_loosely_typed_values_reach_api_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "type": "virtualcard", "CollectiveId": "8686", "amount": 10.5 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(created_payment_method_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = call(
        app_for(&server).await,
        create_request("/payment-methods", json!({ "CollectiveId": "8686", "amount": 10.5 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}
