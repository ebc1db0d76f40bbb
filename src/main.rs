use clap::Parser;
use curricuforge::app::render_curriculum;
use curricuforge::utils::{logger, validation::Validate};
use curricuforge::{
    AcademicLevel, CliConfig, CurriculumExporter, CurriculumGenerator, ForgeError, GeminiProvider,
    GenerationSession, LocalStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting curricuforge CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置並合併 TOML / 環境變數
    let resolved = config.validate().and_then(|_| config.resolve());
    let (settings, policy) = match resolved {
        Ok(resolved) => resolved,
        Err(e) => exit_with(&e),
    };

    if !settings.has_api_key() {
        tracing::warn!("No API key found in GEMINI_API_KEY or API_KEY; the provider will reject the request");
    }

    let provider = match GeminiProvider::new(&settings) {
        Ok(provider) => provider,
        Err(e) => exit_with(&e),
    };
    tracing::debug!("Using model {} (decode policy: {:?})", provider.model(), policy);

    let params = config.params();
    if params.level.parse::<AcademicLevel>().is_err() {
        tracing::info!("Using free-text academic level: {}", params.level);
    }

    let session = GenerationSession::new(CurriculumGenerator::new(provider).with_policy(policy));

    let curriculum = match session.submit(&params).await {
        Ok(curriculum) => curriculum,
        Err(e) => {
            tracing::error!("❌ Curriculum generation failed: {}", e);
            eprintln!("❌ {}", e.user_message());
            std::process::exit(e.exit_code());
        }
    };

    if config.json {
        println!("{}", serde_json::to_string_pretty(&curriculum)?);
    } else {
        print!("{}", render_curriculum(&curriculum));
    }

    if config.export {
        let exporter = CurriculumExporter::new(LocalStorage::new(config.output_path.clone()));
        match exporter.export(&curriculum).await {
            Ok(path) => println!("📁 Exported to: {path}"),
            Err(e) => exit_with(&e),
        }
    }

    Ok(())
}

fn exit_with(e: &ForgeError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_message());
    std::process::exit(e.exit_code());
}
