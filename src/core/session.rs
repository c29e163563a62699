use crate::core::reconcile::reconcile;
use crate::core::render::{render, unresolved_tokens};
use crate::domain::model::{BatchReport, RecipientRecord, Template};
use crate::domain::ports::MessageSender;

/// 發送前確認畫面的一筆資料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub name: String,
    pub contact: String,
    pub text: String,
    pub unresolved: Vec<String>,
}

/// 一次操作所需的全部狀態。不可變，修改時回傳新的 Session
#[derive(Debug, Clone, Default)]
pub struct Session {
    sender_id: String,
    template: Option<Template>,
    records: Vec<RecipientRecord>,
}

impl Session {
    pub fn new(sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            ..Default::default()
        }
    }

    pub fn with_sender(self, sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            ..self
        }
    }

    pub fn with_template(self, template: Template) -> Self {
        Self {
            template: Some(template),
            ..self
        }
    }

    pub fn with_records(self, records: Vec<RecipientRecord>) -> Self {
        Self { records, ..self }
    }

    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn records(&self) -> &[RecipientRecord] {
        &self.records
    }

    /// 尚未選擇模板時沒有預覽
    pub fn preview(&self) -> Vec<Preview> {
        let Some(template) = &self.template else {
            return Vec::new();
        };

        self.records
            .iter()
            .map(|record| Preview {
                name: record.name().to_string(),
                contact: record.contact().to_string(),
                text: render(template, record).text,
                unresolved: unresolved_tokens(template, record),
            })
            .collect()
    }

    pub async fn send<S: MessageSender + ?Sized>(&self, sender: &S) -> BatchReport {
        match &self.template {
            Some(template) => reconcile(template, &self.records, &self.sender_id, sender).await,
            None => {
                tracing::warn!("No template selected, nothing to send");
                BatchReport::default()
            }
        }
    }
}
