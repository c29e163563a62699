use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 優先，其次是設定檔的 `[logging] level`，最後才看 `--verbose`
fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    match level {
        Some(level) => EnvFilter::new(format!("recruit_sms={}", level.to_ascii_lowercase())),
        None if verbose => EnvFilter::new("recruit_sms=debug,info"),
        None => EnvFilter::new("recruit_sms=info"),
    }
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 發送紀錄需要留存時使用 JSON 格式，方便逐筆稽核
pub fn init_json_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_level_overrides_verbose() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }

        assert_eq!(default_filter(true, Some("WARN")).to_string(), "recruit_sms=warn");
        assert_eq!(default_filter(false, None).to_string(), "recruit_sms=info");
    }
}
