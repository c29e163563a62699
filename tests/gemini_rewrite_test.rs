use anyhow::Result;
use httpmock::prelude::*;
use recruit_sms::{rewrite_template, GeminiRewriter, SmsError, Template};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn original() -> Template {
    Template::new(
        "00인턴 일정안내",
        "안녕하세요, %이름%님! 일시: %날짜% %시간%\n장소: %장소%",
    )
}

#[tokio::test]
async fn test_rewrite_through_gemini() -> Result<()> {
    let server = MockServer::start();

    let generate_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .query_param("key", "test-gemini-key")
            .body_contains("%이름%")
            .body_contains("친절하게");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{"text": "안녕하세요 %이름%님 :) 면접은 %날짜% %시간%, %장소%에서 진행됩니다.\n"}],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }]
            }));
    });

    let rewriter =
        GeminiRewriter::with_endpoint("test-gemini-key", "gemini-1.5-flash", server.base_url())?;
    let template = original();
    let rewritten = rewrite_template(&rewriter, &template).await?;

    generate_mock.assert();
    assert_eq!(rewritten.name, "00인턴 일정안내");
    assert_eq!(
        rewritten.body,
        "안녕하세요 %이름%님 :) 면접은 %날짜% %시간%, %장소%에서 진행됩니다."
    );
    assert_eq!(template, original());
    Ok(())
}

/// API 失敗時回傳 RewriteError，原模板不變
#[tokio::test]
async fn test_rewrite_failure_keeps_original() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(500)
            .json_body(serde_json::json!({"error": {"code": 500, "message": "internal"}}));
    });

    let rewriter =
        GeminiRewriter::with_endpoint("test-gemini-key", "gemini-1.5-flash", server.base_url())?;
    let template = original();
    let err = rewrite_template(&rewriter, &template).await.unwrap_err();

    assert!(matches!(err, SmsError::RewriteError { ref message } if message.contains("500")));
    assert_eq!(template, original());
    Ok(())
}

#[tokio::test]
async fn test_rewrite_dropping_placeholder_is_rejected() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "안녕하세요 %이름%님! 곧 연락드릴게요."}]}}]
        }));
    });

    let rewriter =
        GeminiRewriter::with_endpoint("test-gemini-key", "gemini-1.5-flash", server.base_url())?;
    let err = rewrite_template(&rewriter, &original()).await.unwrap_err();

    match err {
        SmsError::RewriteError { message } => assert!(message.contains("%장소%")),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_blocked_prompt_without_candidates() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200)
            .json_body(serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}}));
    });

    let rewriter =
        GeminiRewriter::with_endpoint("test-gemini-key", "gemini-1.5-flash", server.base_url())?;
    let err = rewrite_template(&rewriter, &original()).await.unwrap_err();

    assert!(matches!(err, SmsError::RewriteError { .. }));
    Ok(())
}
