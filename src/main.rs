use clap::Parser;
use recruit_sms::config::{CliConfig, Command, TemplateArgs};
use recruit_sms::core::parser::{parse, RawInput};
use recruit_sms::core::render::tokens_in;
use recruit_sms::core::templates::load_template_file;
use recruit_sms::utils::error::{ErrorSeverity, SmsError};
use recruit_sms::utils::validation::{validate_phone_number, validate_required_field, Validate};
use recruit_sms::utils::logger;
use recruit_sms::{
    rewrite_template, AppConfig, ParseReport, Result, SendOutcome, Session, Template,
    TemplateCatalog,
};
use std::path::Path;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 載入配置 (找不到檔案時改用環境變數)
    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config.display(), e);
            eprintln!("💡 Make sure the file is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger(cli.verbose, config.log_level().as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level().as_deref());
    }

    tracing::info!("Starting recruit-sms");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(cli.command, &config).await {
        Ok(exit_code) => {
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ recruit-sms failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

async fn run(command: Command, config: &AppConfig) -> Result<i32> {
    let catalog = TemplateCatalog::builtin().with_overrides(&config.templates);

    match command {
        Command::Templates => {
            for name in catalog.names() {
                let template = catalog.get(name)?;
                println!("{}  [{}]", name, tokens_in(&template.body).join(" "));
            }
            Ok(0)
        }

        Command::Preview {
            template,
            recipients,
            sender,
        } => {
            let template = resolve_template(&template, &catalog)?;
            let report = load_recipients(&recipients)?;
            let sender = sender.or_else(|| config.sender_number()).unwrap_or_default();
            let session = Session::new(sender)
                .with_template(template)
                .with_records(report.records.clone());

            print_preview(&session, &report);
            Ok(0)
        }

        Command::Send {
            template,
            recipients,
            sender,
            yes,
        } => {
            let sender_number = sender.or_else(|| config.sender_number());
            let sender_number = validate_required_field("sender.number (--sender)", &sender_number)?;
            validate_phone_number("sender.number", sender_number)?;

            let template = resolve_template(&template, &catalog)?;
            let report = load_recipients(&recipients)?;
            let session = Session::new(sender_number.as_str())
                .with_template(template)
                .with_records(report.records.clone());

            print_preview(&session, &report);

            if !yes {
                println!(
                    "🔍 Preview only. Re-run with --yes to send {} messages from {}",
                    session.records().len(),
                    session.sender_id()
                );
                return Ok(0);
            }

            let solapi = config.solapi_sender()?;
            let batch = session.send(&solapi).await;

            for outcome in &batch.outcomes {
                match outcome {
                    SendOutcome::Success {
                        contact,
                        message_id,
                    } => println!("✅ {} - sent (ID: {})", contact, message_id),
                    SendOutcome::Failure { contact, reason } => {
                        println!("❌ {} - failed: {}", contact, reason)
                    }
                }
            }
            println!(
                "📨 {} sent, {} failed, {} skipped at input",
                batch.succeeded(),
                batch.failed(),
                report.skipped.len()
            );

            Ok(if batch.has_failures() { 2 } else { 0 })
        }

        Command::Rewrite { template, output } => {
            let original = resolve_template(&template, &catalog)?;
            let rewriter = config.gemini_rewriter()?;
            let rewritten = rewrite_template(&rewriter, &original).await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &rewritten.body)?;
                    tracing::info!("📁 Rewritten template saved to: {}", path.display());
                    println!("✅ Rewritten template saved to: {}", path.display());
                }
                None => println!("{}", rewritten.body),
            }
            Ok(0)
        }
    }
}

fn resolve_template(args: &TemplateArgs, catalog: &TemplateCatalog) -> Result<Template> {
    match (&args.template, &args.template_file) {
        (_, Some(path)) => load_template_file(path),
        (Some(name), None) => catalog.get(name).cloned(),
        (None, None) => Err(SmsError::MissingConfigError {
            field: "--template or --template-file".to_string(),
        }),
    }
}

fn load_recipients(path: &Path) -> Result<ParseReport> {
    let text = std::fs::read_to_string(path)?;
    parse(&RawInput::detect(path, text))
}

fn print_preview(session: &Session, report: &ParseReport) {
    if session.sender_id().is_empty() {
        println!("📤 sender: (not set)\n");
    } else {
        println!("📤 sender: {}\n", session.sender_id());
    }

    for (idx, preview) in session.preview().iter().enumerate() {
        println!("── [{}] {} ({})", idx + 1, preview.name, preview.contact);
        println!("{}", preview.text);
        if !preview.unresolved.is_empty() {
            println!("⚠️ unresolved: {}", preview.unresolved.join(", "));
        }
        println!();
    }

    for row in &report.skipped {
        println!("⏭️ line {} skipped: {}", row.line, row.reason);
    }
}
