use crate::domain::model::Template;
use crate::utils::error::{Result, SmsError};
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_TEMPLATES: [(&str, &str); 4] = [
    (
        "00인턴 일정조율",
        "[유브레인 00인턴 서류 합격 및 면접 안내]\n\n안녕하세요, %이름%님! 유브레인 경영지원실입니다.\n00인턴 진행 면접을 진행하고자 합니다.\n아래 시간 중 가능한 시간이 있으시면 회신 부탁드립니다.\n\n- 가능 시간: %날짜% %시간%\n\n조율 후 최종 면접 시간을 안내드리겠습니다.",
    ),
    (
        "00인턴 일정안내",
        "[00인턴 유브레인 면접 안내]\n\n안녕하세요, %이름%님! 유브레인 경영지원실입니다.\n00인턴 진행 면접을 진행하고자 합니다.\n\n[면접 일정]\n일시: %날짜% %시간%\n장소: %장소%\n\n도착하시면 010-9217-8817로 연락주세요.",
    ),
    (
        "정규직 일정안내",
        "<누구보다 빠르게, 남들과는 다르게>\n\n안녕하세요, %이름%님! 유브레인 경영지원실입니다.\n유브레인 %직무% 면접 평가 일정 안내드립니다.\n\n[면접 일정]\n일시: %날짜% %시간%\n장소: %장소%\n\n도착하시면 010-9217-8817로 연락주세요.",
    ),
    (
        "공통 결과안내",
        "[유브레인 면접 결과 안내]\n\n안녕하세요, %이름%님. 유브레인커뮤니케이션즈입니다.\n면접 결과는 제출하신 이력서에 써주신 메일로 발송해 드렸습니다.\n메일 확인 부탁드립니다. 감사합니다.",
    ),
];

/// 內建模板加上設定檔中的模板，保持插入順序
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn builtin() -> Self {
        Self {
            templates: BUILTIN_TEMPLATES
                .iter()
                .map(|(name, body)| Template::new(*name, *body))
                .collect(),
        }
    }

    /// 同名模板覆蓋內建內容，新名稱依字母順序加在最後
    pub fn with_overrides(mut self, custom: &HashMap<String, String>) -> Self {
        let mut names: Vec<&String> = custom.keys().collect();
        names.sort();

        for name in names {
            let body = &custom[name];
            match self.templates.iter_mut().find(|t| &t.name == name) {
                Some(existing) => {
                    tracing::debug!("Overriding built-in template '{}'", name);
                    existing.body = body.clone();
                }
                None => self.templates.push(Template::new(name.clone(), body.clone())),
            }
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }

    pub fn get(&self, name: &str) -> Result<&Template> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SmsError::UnknownTemplate {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 從檔案讀取模板，名稱取自檔名 (不含副檔名)
pub fn load_template_file<P: AsRef<Path>>(path: P) -> Result<Template> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("custom")
        .to_string();
    Ok(Template::new(name, body.trim_end()))
}
