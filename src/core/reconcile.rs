use crate::core::render::render;
use crate::domain::model::{BatchReport, RecipientRecord, SendOutcome, Template};
use crate::domain::ports::MessageSender;
use crate::utils::error::SmsError;

/// 依輸入順序逐筆渲染並發送。
///
/// 姓名與聯絡方式都不為空的收件人才會發送。
/// 每筆收件人各自得到一個結果，單筆失敗不會中斷後續發送；
/// 不做自動重試，重複呼叫會重複發送。
pub async fn reconcile<S: MessageSender + ?Sized>(
    template: &Template,
    records: &[RecipientRecord],
    sender_id: &str,
    sender: &S,
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let contact = record.contact().trim();

        // 姓名或聯絡方式為空的收件人不呼叫發送服務
        let ineligible = if contact.is_empty() {
            Some(SmsError::EmptyContact)
        } else if record.name().trim().is_empty() {
            Some(SmsError::EmptyName)
        } else {
            None
        };

        if let Some(reason) = ineligible {
            tracing::warn!(
                "⚠️ [{}/{}] {} ({}): {}",
                idx + 1,
                records.len(),
                record.name(),
                record.contact(),
                reason
            );
            outcomes.push(SendOutcome::Failure {
                contact: record.contact().to_string(),
                reason: reason.to_string(),
            });
            continue;
        }

        let message = render(template, record);
        tracing::debug!(
            "[{}/{}] Sending {} chars to {}",
            idx + 1,
            records.len(),
            message.text.chars().count(),
            contact
        );

        let outcome = match sender.send(sender_id, contact, &message.text).await {
            Ok(message_id) => {
                tracing::info!(
                    "✅ [{}/{}] Sent to {} ({}) - ID: {}",
                    idx + 1,
                    records.len(),
                    record.name(),
                    contact,
                    message_id
                );
                SendOutcome::Success {
                    contact: message.contact,
                    message_id,
                }
            }
            Err(e) => {
                tracing::error!(
                    "❌ [{}/{}] Failed to send to {} ({}): {}",
                    idx + 1,
                    records.len(),
                    record.name(),
                    contact,
                    e
                );
                SendOutcome::Failure {
                    contact: message.contact,
                    reason: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    let report = BatchReport { outcomes };
    tracing::info!(
        "📨 Batch finished: {} sent, {} failed",
        report.succeeded(),
        report.failed()
    );
    report
}
