use crate::core::render::tokens_in;
use crate::domain::model::Template;
use crate::domain::ports::TemplateRewriter;
use crate::utils::error::{Result, SmsError};

/// 呼叫改寫服務並確認所有變數標記仍在。
///
/// 失敗時回傳錯誤，呼叫端手上的原模板不受影響。
pub async fn rewrite_template<R: TemplateRewriter + ?Sized>(
    rewriter: &R,
    template: &Template,
) -> Result<Template> {
    tracing::info!("✨ Rewriting template '{}'", template.name);

    let rewritten = rewriter.rewrite(&template.body).await.map_err(|e| match e {
        SmsError::RewriteError { .. } => e,
        other => SmsError::RewriteError {
            message: other.to_string(),
        },
    })?;

    let rewritten = rewritten.trim();
    if rewritten.is_empty() {
        return Err(SmsError::RewriteError {
            message: "rewrite returned empty text".to_string(),
        });
    }

    let missing: Vec<String> = tokens_in(&template.body)
        .into_iter()
        .filter(|token| !rewritten.contains(token.as_str()))
        .collect();
    if !missing.is_empty() {
        return Err(SmsError::RewriteError {
            message: format!("rewrite dropped placeholders: {}", missing.join(", ")),
        });
    }

    tracing::debug!(
        "Rewrite changed template from {} to {} chars",
        template.body.chars().count(),
        rewritten.chars().count()
    );
    Ok(template.with_body(rewritten))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedRewriter(std::result::Result<&'static str, u16>);

    #[async_trait]
    impl TemplateRewriter for FixedRewriter {
        async fn rewrite(&self, _template: &str) -> Result<String> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(SmsError::ProviderError {
                    status,
                    code: "UNAVAILABLE".to_string(),
                    message: "model overloaded".to_string(),
                }),
            }
        }
    }

    fn template() -> Template {
        Template::new("안내", "%이름%님, %날짜% %시간%에 오세요.")
    }

    #[tokio::test]
    async fn test_rewrite_keeps_name_and_replaces_body() {
        let rewriter = FixedRewriter(Ok("  안녕하세요 %이름%님! %날짜% %시간%에 뵙겠습니다 :)\n"));
        let original = template();

        let rewritten = rewrite_template(&rewriter, &original).await.unwrap();

        assert_eq!(rewritten.name, "안내");
        assert_eq!(rewritten.body, "안녕하세요 %이름%님! %날짜% %시간%에 뵙겠습니다 :)");
        assert_eq!(original, template());
    }

    #[tokio::test]
    async fn test_rewrite_rejects_dropped_placeholders() {
        let rewriter = FixedRewriter(Ok("안녕하세요 %이름%님! 곧 뵙겠습니다."));
        let err = rewrite_template(&rewriter, &template()).await.unwrap_err();

        match err {
            SmsError::RewriteError { message } => {
                assert!(message.contains("%날짜%"));
                assert!(message.contains("%시간%"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rewrite_wraps_collaborator_failure() {
        let err = rewrite_template(&FixedRewriter(Err(503)), &template())
            .await
            .unwrap_err();
        assert!(matches!(err, SmsError::RewriteError { ref message } if message.contains("503")));
    }

    #[tokio::test]
    async fn test_rewrite_rejects_empty_answer() {
        let err = rewrite_template(&FixedRewriter(Ok("   ")), &template())
            .await
            .unwrap_err();
        assert!(matches!(err, SmsError::RewriteError { .. }));
    }
}
