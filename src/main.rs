use clap::Parser;
use rfp_proposal_gen::utils::error::ErrorSeverity;
use rfp_proposal_gen::utils::{logger, validation, validation::Validate};
use rfp_proposal_gen::{
    ChatClient, CliConfig, LocalStorage, PromptSet, ProposalEngine, ProposalPipeline,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; the key may already be in the environment.
    dotenvy::dotenv().ok();

    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting rfp-proposal-gen CLI");
    if config.verbose {
        tracing::debug!(
            "CLI config: rfp_file={}, technology={}, model={}, api_base={}",
            config.rfp_file,
            config.technology,
            config.model,
            config.api_base
        );
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // API key 來源：--api-key 優先，否則取環境變數
    let resolved_key = config
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok());
    let api_key = match validation::validate_required_field("api_key", &resolved_key) {
        Ok(key) => key.clone(),
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!(
                "❌ LLM API key not found. Provide it via --api-key, or set OPENAI_API_KEY in your .env file."
            );
            std::process::exit(1);
        }
    };

    let prompts = match &config.prompts_file {
        Some(prompts_file) => match PromptSet::from_file(prompts_file) {
            Ok(prompts) => {
                tracing::info!("📄 Loaded prompt templates from: {}", prompts_file);
                prompts
            }
            Err(e) => {
                tracing::error!("❌ Failed to load prompts file: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => PromptSet::default(),
    };

    tracing::info!("📄 Using RFP file: {}", config.rfp_file);
    tracing::info!("🎯 Target technology: {}", config.technology);
    tracing::info!("🤖 Using LLM model: {} via {}", config.model, config.api_base);
    if let Some(output_file) = &config.output_file {
        tracing::info!("💾 Output will be saved to: {}", output_file);
    }

    // 創建存儲、LLM 客戶端和管道
    let client = ChatClient::new(
        &config.api_base,
        &api_key,
        &config.model,
        config.request_timeout,
    );
    let storage = LocalStorage::new(".".to_string());
    let pipeline = ProposalPipeline::new(storage, config, client, prompts);

    // 創建引擎並運行
    let engine = ProposalEngine::new(pipeline);

    match engine.run().await {
        Ok(destination) => {
            tracing::info!("✅ Proposal generation completed successfully!");
            println!("✅ Proposal generation completed successfully!");
            if destination != "stdout" {
                println!("📁 Output saved to: {}", destination);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Proposal generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

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

    Ok(())
}
