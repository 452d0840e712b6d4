use clap::Parser;
use course_advisor::utils::error::ErrorSeverity;
use course_advisor::utils::{logger, validation::Validate};
use course_advisor::{Advisor, AdvisorConfig, AssistantEngine, AssistantReply, LocalFiles, SortKey};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "course-advisor")]
#[command(about = "Classify a study-assistant message and recommend courses")]
struct Args {
    /// Message text from the user
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,

    /// Path to TOML rule configuration (built-in tables when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Course catalog (.json or .csv)
    #[arg(long)]
    catalog: Option<String>,

    /// User profile (.json)
    #[arg(long)]
    profile: Option<String>,

    /// Order of ranked items: catalog, title or difficulty
    #[arg(long, default_value = "catalog")]
    sort: SortKey,

    /// Print the reply as JSON
    #[arg(long)]
    json: bool,

    /// Show a summary of the loaded rule tables
    #[arg(long)]
    summary: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    // 載入規則表
    let loaded = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AdvisorConfig::from_file(path)
        }
        None => AdvisorConfig::builtin(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let advisor = Arc::new(Advisor::from_config(&config));
    let files = LocalFiles::new(args.catalog.clone(), args.profile.clone());

    if args.summary {
        display_config_summary(&config, &advisor, &files);
    }

    let engine = AssistantEngine::new(advisor, files.clone(), files, config);

    let text = args.text.join(" ");
    match engine.respond_sorted(&text, args.sort).await {
        Ok(reply) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
            } else {
                print_reply(&reply);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn print_reply(reply: &AssistantReply) {
    println!("🎯 Intent: {}", reply.intent);
    if let Some(message) = &reply.message {
        println!("💬 {}", message);
    }

    if reply.items.is_empty() {
        return;
    }

    println!();
    for ranked in &reply.items {
        println!(
            "  [{:>3}] {} ({}, {})",
            ranked.relevance_score, ranked.item.title, ranked.item.category, ranked.item.difficulty
        );
        println!("        {}", ranked.reason);
    }
}

fn display_config_summary(config: &AdvisorConfig, advisor: &Advisor, files: &LocalFiles) {
    let policy = advisor.scorer().policy();

    println!("📋 Configuration Summary:");
    println!(
        "  Advisor: {} v{}",
        config.advisor.name,
        config.advisor.version.as_deref().unwrap_or("-")
    );
    println!("  Intent rules: {}", advisor.classifier().rules().len());
    for rule in advisor.classifier().rules() {
        println!("    {} ← {}", rule.intent, rule.keywords.join(", "));
    }
    println!("  Fallback intent: {}", advisor.classifier().fallback());
    if advisor.expander().is_empty() {
        println!("  Synonym entries: (none, interests match literally)");
    } else {
        println!("  Synonym entries: {}", advisor.expander().len());
    }
    println!("  Reason rules: {}", config.reasons.len());
    println!("  Popular count: {}", policy.popular_count);
    println!("  Score: {} - {} × position", policy.score_base, policy.score_step);
    println!("  Catalog: {}", files.catalog_path().unwrap_or("(none)"));
    println!("  Profile: {}", files.profile_path().unwrap_or("(empty)"));
    println!();
}
