/*!
 * Request contract tests, through the handler and through the axum router.
 */

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use medtranslate::api::{self, TranslateRequest};
use medtranslate::providers::mock::{MockBehavior, MockTranslator};
use medtranslate::server::router;

use crate::common;

fn request_body(text: &str, target_lang: &str) -> Vec<u8> {
    serde_json::to_vec(&TranslateRequest {
        text: Some(text.to_string()),
        target_lang: Some(target_lang.to_string()),
    })
    .unwrap()
}

#[tokio::test]
async fn test_handle_withEndToEndUtterance_shouldMatchResponseContract() {
    let state = common::create_state(MockTranslator::replying("GLOSSARY_HEART dolor, tomar 500 mg ibuprofeno"));
    let body = request_body("The patient: John has heart pain, take 500 mg ibuprofen", "es");

    let reply = api::handle(state, "POST", &body).await;

    assert_eq!(reply.status, 200);
    assert_eq!(
        reply.body,
        json!({
            "translatedText": "corazón dolor, tomar 500 mg ibuprofeno",
            "warnings": [],
            "modelUsed": "llama3-70b-8192"
        })
    );
}

#[tokio::test]
async fn test_handle_withIso6392Target_shouldUseSpanishGlossary() {
    let mock = MockTranslator::echo();
    let state = common::create_state(mock.clone());

    let reply = api::handle(state, "POST", &request_body("heart pain", "spa")).await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["translatedText"], "corazón pain");
    assert_eq!(reply.body["warnings"], json!([]));
    assert_eq!(mock.calls()[0].target_language, "Spanish");
}

#[tokio::test]
async fn test_handle_withNonPostVerbs_shouldReturn405WithoutCallingTranslator() {
    let mock = MockTranslator::echo();
    let state = common::create_state(mock.clone());

    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        let reply = api::handle(state.clone(), method, &request_body("heart", "es")).await;
        assert_eq!(reply.status, 405, "method: {}", method);
    }
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_handle_withNullFields_shouldReturn400() {
    let state = common::create_state(MockTranslator::echo());
    let reply = api::handle(state, "POST", br#"{"text":null,"targetLang":"es"}"#).await;

    assert_eq!(reply.status, 400);
    assert_eq!(reply.body, json!({"error": "Missing required fields"}));
}

#[tokio::test]
async fn test_handle_withWrongFieldType_shouldReturnInvalidBody() {
    let state = common::create_state(MockTranslator::echo());
    let reply = api::handle(state, "POST", br#"{"text":42,"targetLang":"es"}"#).await;

    assert_eq!(reply.status, 400);
    assert_eq!(reply.body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_handle_withExhaustedChain_shouldNotLeakDetails() {
    let mock = MockTranslator::empty().with_model(common::TEST_CHAIN[1], MockBehavior::Failing);
    let state = common::create_state(mock);

    let reply = api::handle(state, "POST", &request_body("heart", "es")).await;

    assert_eq!(reply.status, 502);
    assert_eq!(reply.body, json!({"error": "No translation model produced output"}));
}

#[tokio::test]
async fn test_router_postTranslate_shouldReturnJson() {
    let app = router(common::create_state(MockTranslator::echo()));
    let request = Request::builder()
        .uri("/api/translate")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(request_body("kidney", "es-ES")))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["translatedText"], "riñón");
    assert_eq!(body["modelUsed"], "llama3-70b-8192");
}

#[tokio::test]
async fn test_router_withUnsupportedLanguage_shouldReturn400() {
    let app = router(common::create_state(MockTranslator::echo()));
    let request = Request::builder()
        .uri("/api/translate")
        .method("POST")
        .body(Body::from(request_body("heart", "ja")))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
