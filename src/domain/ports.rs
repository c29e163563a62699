use crate::utils::error::Result;
use async_trait::async_trait;

/// 簡訊發送服務，成功時回傳服務商的訊息 ID
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, sender_id: &str, destination: &str, body: &str) -> Result<String>;
}

/// 模板改寫服務 (LLM)，必須保留所有 %變數%
#[async_trait]
pub trait TemplateRewriter: Send + Sync {
    async fn rewrite(&self, template: &str) -> Result<String>;
}
