use crate::domain::model::{Placeholder, RecipientRecord, RenderedMessage, Template};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// 所有標記 (韓文與英文別名) 對應到的變數
static TOKEN_TABLE: LazyLock<HashMap<String, Placeholder>> = LazyLock::new(|| {
    Placeholder::ALL
        .into_iter()
        .flat_map(|p| [(p.token(), p), (p.alias_token(), p)])
        .collect()
});

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = Placeholder::ALL
        .into_iter()
        .flat_map(|p| [p.token(), p.alias_token()])
        .map(|token| regex::escape(&token))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).expect("placeholder tokens form a valid pattern")
});

/// 將模板中的變數替換為收件人資料。
///
/// 只掃描一次模板，替換進去的值不會再被當成標記處理；
/// 收件人沒有提供的欄位保留原本的標記文字。
pub fn render(template: &Template, record: &RecipientRecord) -> RenderedMessage {
    let text = TOKEN_PATTERN.replace_all(&template.body, |caps: &Captures| {
        let token = &caps[0];
        TOKEN_TABLE
            .get(token)
            .and_then(|p| record.get(*p))
            .unwrap_or(token)
            .to_string()
    });

    RenderedMessage {
        contact: record.contact().to_string(),
        text: text.into_owned(),
    }
}

/// 文字中出現的變數標記，依出現順序且不重複
pub fn tokens_in(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for m in TOKEN_PATTERN.find_iter(text) {
        if !tokens.iter().any(|t| t == m.as_str()) {
            tokens.push(m.as_str().to_string());
        }
    }
    tokens
}

/// 渲染後仍會留在訊息中的標記 (收件人缺少該欄位)
pub fn unresolved_tokens(template: &Template, record: &RecipientRecord) -> Vec<String> {
    tokens_in(&template.body)
        .into_iter()
        .filter(|token| {
            TOKEN_TABLE
                .get(token)
                .is_some_and(|p| record.get(*p).is_none())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kim() -> RecipientRecord {
        RecipientRecord {
            name: Some("Kim".to_string()),
            date: Some("March 4".to_string()),
            time: Some("2pm".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_substitutes_known_fields() {
        let template = Template::new("t", "Hello %이름%, %날짜% %시간%");
        let rendered = render(&template, &kim());
        assert_eq!(rendered.text, "Hello Kim, March 4 2pm");
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let template = Template::new("t", "%이름%님, %이름%님!");
        assert_eq!(render(&template, &kim()).text, "Kim님, Kim님!");
    }

    #[test]
    fn test_render_with_empty_record_is_identity() {
        let body = "[면접 안내] %이름%님 %날짜% %시간% %장소% %직무% %연락처% 100% 확정";
        let template = Template::new("t", body);
        let rendered = render(&template, &RecipientRecord::default());
        assert_eq!(rendered.text, body);
        assert_eq!(rendered.contact, "");
    }

    #[test]
    fn test_render_leaves_unknown_and_absent_tokens() {
        let template = Template::new("t", "%이름% %장소% %회사%");
        let rendered = render(&template, &kim());
        assert_eq!(rendered.text, "Kim %장소% %회사%");
    }

    #[test]
    fn test_render_does_not_rescan_substituted_values() {
        let record = RecipientRecord::new("%날짜%", "01099990000").with(Placeholder::Date, "%이름%");
        let template = Template::new("t", "%이름% / %날짜%");
        assert_eq!(render(&template, &record).text, "%날짜% / %이름%");
    }

    #[test]
    fn test_render_accepts_english_alias_tokens() {
        let template = Template::new("t", "Dear %name%, see you at %time%");
        assert_eq!(render(&template, &kim()).text, "Dear Kim, see you at 2pm");
    }

    #[test]
    fn test_render_present_but_empty_field_is_substituted() {
        let record = RecipientRecord::new("Kim", "010").with(Placeholder::Role, "");
        let template = Template::new("t", "[%직무%]");
        assert_eq!(render(&template, &record).text, "[]");
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = Template::new("t", "%이름% %날짜% %시간% %장소%");
        assert_eq!(render(&template, &kim()), render(&template, &kim()));
    }

    #[test]
    fn test_render_removes_tokens_for_supplied_values() {
        let record = RecipientRecord::new("Lee", "01012345678")
            .with(Placeholder::Date, "3월 4일")
            .with(Placeholder::Time, "14:00")
            .with(Placeholder::Location, "3층")
            .with(Placeholder::Role, "영상PD");
        let template = Template::new(
            "t",
            "%이름% %연락처% %날짜% %시간% %장소% %직무% %name% %contact%",
        );
        let rendered = render(&template, &record);
        for p in Placeholder::ALL {
            assert!(!rendered.text.contains(&p.token()));
            assert!(!rendered.text.contains(&p.alias_token()));
        }
    }

    #[test]
    fn test_tokens_in_is_ordered_and_distinct() {
        let tokens = tokens_in("%시간% %이름% %시간% %name% %회사%");
        assert_eq!(tokens, vec!["%시간%", "%이름%", "%name%"]);
    }

    #[test]
    fn test_unresolved_tokens() {
        let template = Template::new("t", "%이름% %장소% %직무% %장소%");
        assert_eq!(unresolved_tokens(&template, &kim()), vec!["%장소%", "%직무%"]);
    }
}
