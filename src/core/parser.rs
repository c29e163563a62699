use crate::domain::model::{ParseReport, Placeholder, RecipientRecord, RowError};
use crate::utils::error::{Result, SmsError};
use std::path::Path;

/// 名單輸入：逐行 `/` 分隔，或帶標題列的表格 (CSV/TSV)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Lines(String),
    Table { text: String, delimiter: u8 },
}

impl RawInput {
    /// 依副檔名判斷輸入格式，.csv / .tsv 為表格，其餘視為逐行輸入
    pub fn detect(path: &Path, text: String) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => RawInput::Table {
                text,
                delimiter: b',',
            },
            Some("tsv") => RawInput::Table {
                text,
                delimiter: b'\t',
            },
            _ => RawInput::Lines(text),
        }
    }
}

pub fn parse(input: &RawInput) -> Result<ParseReport> {
    let report = match input {
        RawInput::Lines(text) => parse_lines(text),
        RawInput::Table { text, delimiter } => parse_table(text, *delimiter)?,
    };

    tracing::info!(
        "📋 Parsed {} recipients ({} rows skipped)",
        report.records.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// 每行一位收件人: 이름 / 연락처 / 날짜 / 시간 / 장소 / 직무
pub fn parse_lines(text: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        if !line.contains('/') {
            skip(&mut report, line_no, "expected fields separated by '/'");
            continue;
        }

        let fields: Vec<&str> = line.split('/').map(str::trim).collect();
        if fields.len() > Placeholder::ALL.len() {
            tracing::debug!(
                "Line {}: ignoring {} extra fields",
                line_no,
                fields.len() - Placeholder::ALL.len()
            );
        }

        let mut record = RecipientRecord::default();
        for (placeholder, value) in Placeholder::ALL.into_iter().zip(fields) {
            record.set(placeholder, value);
        }

        push_if_eligible(&mut report, line_no, record);
    }

    report
}

/// 表格輸入，第一列為欄位名稱 (name/이름, contact/연락처 ...)，未知欄位忽略
pub fn parse_table(text: &str, delimiter: u8) -> Result<ParseReport> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns: Vec<Option<Placeholder>> = reader
        .headers()?
        .iter()
        .map(Placeholder::from_header)
        .collect();

    for required in [Placeholder::Name, Placeholder::Contact] {
        if !columns.contains(&Some(required)) {
            return Err(SmsError::ParseError {
                message: format!(
                    "table has no '{}' ({}) column",
                    required.key(),
                    required.label()
                ),
            });
        }
    }

    let mut report = ParseReport::default();

    for (idx, row) in reader.records().enumerate() {
        // 標題列是第 1 行
        let fallback_line = idx + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                let line_no = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                skip(&mut report, line_no, &e.to_string());
                continue;
            }
        };
        let line_no = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let mut record = RecipientRecord::default();
        for (column, value) in columns.iter().zip(row.iter()) {
            if let Some(placeholder) = column {
                record.set(*placeholder, value.trim());
            }
        }

        push_if_eligible(&mut report, line_no, record);
    }

    Ok(report)
}

fn push_if_eligible(report: &mut ParseReport, line_no: usize, record: RecipientRecord) {
    if record.is_eligible() {
        report.records.push(record);
    } else {
        skip(report, line_no, "name and contact are required");
    }
}

fn skip(report: &mut ParseReport, line_no: usize, reason: &str) {
    tracing::warn!("⚠️ Skipping line {}: {}", line_no, reason);
    report.skipped.push(RowError {
        line: line_no,
        reason: reason.to_string(),
    });
}
