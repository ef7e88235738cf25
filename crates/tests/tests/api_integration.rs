use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use plantfacts_api::{build_app, ApiConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn skill_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/skill")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_reports_locales_and_metrics() {
    let app = build_app(&ApiConfig::default()).expect("app should build");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["status"], json!("ok"));
    assert_eq!(parsed["locales"], json!(["en", "es"]));
    assert_eq!(parsed["metrics"]["requests_total"], json!(0));
}

#[tokio::test]
async fn launch_request_returns_ssml_welcome() {
    let app = build_app(&ApiConfig::default()).expect("app should build");

    let response = app
        .oneshot(skill_request(json!({
            "version": "1.0",
            "session": { "new": true, "sessionId": "amzn1.echo-api.session.abc" },
            "context": { "System": { "application": { "applicationId": "amzn1.ask.skill.1" } } },
            "request": {
                "type": "LaunchRequest",
                "requestId": "amzn1.echo-api.request.1",
                "timestamp": "2024-05-01T10:00:00Z",
                "locale": "en-US"
            }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-request-id").is_some());

    let parsed = json_body(response).await;
    let welcome = "<speak>Welcome Vite! Ask me for a plant fact.</speak>";
    assert_eq!(parsed["version"], json!("1.0"));
    assert_eq!(parsed["response"]["outputSpeech"]["type"], json!("SSML"));
    assert_eq!(parsed["response"]["outputSpeech"]["ssml"], json!(welcome));
    assert_eq!(
        parsed["response"]["reprompt"]["outputSpeech"]["ssml"],
        json!(welcome)
    );
    assert_eq!(parsed["response"]["shouldEndSession"], json!(false));
    assert!(parsed["userAgent"]
        .as_str()
        .unwrap()
        .ends_with("sample/hello-world/v1.2"));
}

#[tokio::test]
async fn session_ended_returns_empty_response() {
    let app = build_app(&ApiConfig::default()).expect("app should build");

    let response = app
        .oneshot(skill_request(json!({
            "version": "1.0",
            "request": {
                "type": "SessionEndedRequest",
                "locale": "es-ES",
                "reason": "USER_INITIATED"
            }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["response"], json!({}));
}

#[tokio::test]
async fn unsupported_request_type_speaks_error() {
    let app = build_app(&ApiConfig::default()).expect("app should build");

    let response = app
        .oneshot(skill_request(json!({
            "version": "1.0",
            "request": { "type": "CanFulfillIntentRequest", "locale": "es-MX" }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(
        parsed["response"]["outputSpeech"]["ssml"],
        json!("<speak>Lo siento, ha ocurrido un error. Por favor intenta de nuevo Vite.</speak>")
    );
}

#[tokio::test]
async fn intent_request_without_name_speaks_error() {
    let error_ssml =
        json!("<speak>Lo siento, ha ocurrido un error. Por favor intenta de nuevo Vite.</speak>");

    for request in [
        json!({ "type": "IntentRequest", "locale": "es-ES" }),
        json!({ "type": "IntentRequest", "locale": "es-ES", "intent": { "confirmationStatus": "NONE" } }),
    ] {
        let app = build_app(&ApiConfig::default()).expect("app should build");
        let response = app
            .oneshot(skill_request(json!({ "version": "1.0", "request": request })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let parsed = json_body(response).await;
        assert_eq!(parsed["response"]["outputSpeech"]["ssml"], error_ssml);
        assert_eq!(
            parsed["response"]["reprompt"]["outputSpeech"]["ssml"],
            error_ssml
        );
    }
}

#[tokio::test]
async fn malformed_envelope_is_rejected_before_the_skill() {
    let app = build_app(&ApiConfig::default()).expect("app should build");

    let response = app
        .oneshot(skill_request(json!({ "version": "1.0" })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = ApiConfig {
        body_limit_bytes: 64,
        ..ApiConfig::default()
    };
    let app = build_app(&config).expect("app should build");

    let body = json!({
        "version": "1.0",
        "request": {
            "type": "IntentRequest",
            "locale": "en-US",
            "intent": { "name": "PlantFactIntent", "confirmationStatus": "NONE" }
        }
    })
    .to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/skill")
        .header("content-type", "application/json")
        .header("content-length", body.len())
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
