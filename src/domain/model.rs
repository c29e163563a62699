/// 模板可用的固定變數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Name,
    Contact,
    Date,
    Time,
    Location,
    Role,
}

impl Placeholder {
    /// 逐行輸入時的欄位順序: 이름 / 연락처 / 날짜 / 시간 / 장소 / 직무
    pub const ALL: [Placeholder; 6] = [
        Placeholder::Name,
        Placeholder::Contact,
        Placeholder::Date,
        Placeholder::Time,
        Placeholder::Location,
        Placeholder::Role,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Placeholder::Name => "name",
            Placeholder::Contact => "contact",
            Placeholder::Date => "date",
            Placeholder::Time => "time",
            Placeholder::Location => "location",
            Placeholder::Role => "role",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Placeholder::Name => "이름",
            Placeholder::Contact => "연락처",
            Placeholder::Date => "날짜",
            Placeholder::Time => "시간",
            Placeholder::Location => "장소",
            Placeholder::Role => "직무",
        }
    }

    /// 模板中的標記，例如 `%이름%`
    pub fn token(self) -> String {
        format!("%{}%", self.label())
    }

    /// 英文別名，例如 `%name%`
    pub fn alias_token(self) -> String {
        format!("%{}%", self.key())
    }

    /// 表格標題對應，接受英文 key、韓文 label，以及包在 % 之間的寫法
    pub fn from_header(header: &str) -> Option<Placeholder> {
        let cleaned = header.trim().trim_matches('%').trim().to_lowercase();
        Placeholder::ALL
            .into_iter()
            .find(|p| cleaned == p.key() || cleaned == p.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub body: String,
}

impl Template {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// 以新內容建立模板，名稱不變 (例如 AI 改寫後)
    pub fn with_body(&self, body: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            body: body.into(),
        }
    }
}

/// 單一收件人。`None` 表示輸入沒有提供該欄位，`Some("")` 表示欄位存在但為空
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientRecord {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub role: Option<String>,
}

impl RecipientRecord {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            contact: Some(contact.into()),
            ..Default::default()
        }
    }

    pub fn with(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        self.set(placeholder, value);
        self
    }

    pub fn set(&mut self, placeholder: Placeholder, value: impl Into<String>) {
        *self.slot_mut(placeholder) = Some(value.into());
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        match placeholder {
            Placeholder::Name => self.name.as_deref(),
            Placeholder::Contact => self.contact.as_deref(),
            Placeholder::Date => self.date.as_deref(),
            Placeholder::Time => self.time.as_deref(),
            Placeholder::Location => self.location.as_deref(),
            Placeholder::Role => self.role.as_deref(),
        }
    }

    fn slot_mut(&mut self, placeholder: Placeholder) -> &mut Option<String> {
        match placeholder {
            Placeholder::Name => &mut self.name,
            Placeholder::Contact => &mut self.contact,
            Placeholder::Date => &mut self.date,
            Placeholder::Time => &mut self.time,
            Placeholder::Location => &mut self.location,
            Placeholder::Role => &mut self.role,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn contact(&self) -> &str {
        self.contact.as_deref().unwrap_or_default()
    }

    /// 姓名與聯絡方式都不為空才可發送
    pub fn is_eligible(&self) -> bool {
        !self.name().trim().is_empty() && !self.contact().trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub contact: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Success { contact: String, message_id: String },
    Failure { contact: String, reason: String },
}

impl SendOutcome {
    pub fn contact(&self) -> &str {
        match self {
            SendOutcome::Success { contact, .. } | SendOutcome::Failure { contact, .. } => contact,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Success { .. })
    }
}

/// 被略過的輸入列 (行號從 1 開始)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub records: Vec<RecipientRecord>,
    pub skipped: Vec<RowError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<SendOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_from_header_accepts_key_and_label() {
        assert_eq!(Placeholder::from_header("Name"), Some(Placeholder::Name));
        assert_eq!(Placeholder::from_header(" 연락처 "), Some(Placeholder::Contact));
        assert_eq!(Placeholder::from_header("%장소%"), Some(Placeholder::Location));
        assert_eq!(Placeholder::from_header("email"), None);
    }

    #[test]
    fn test_record_eligibility() {
        assert!(RecipientRecord::new("Kim", "01099990000").is_eligible());
        assert!(!RecipientRecord::new("Kim", "  ").is_eligible());
        assert!(!RecipientRecord::new("", "01099990000").is_eligible());
        assert!(!RecipientRecord::default().is_eligible());
    }

    #[test]
    fn test_batch_report_counts() {
        let report = BatchReport {
            outcomes: vec![
                SendOutcome::Success {
                    contact: "010".to_string(),
                    message_id: "M1".to_string(),
                },
                SendOutcome::Failure {
                    contact: "".to_string(),
                    reason: "empty contact".to_string(),
                },
            ],
        };
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
    }
}
