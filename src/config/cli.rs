use crate::config::toml_config::TomlConfig;
use crate::config::ProviderSettings;
use crate::core::materializer::DecodePolicy;
use crate::domain::model::GenerationParams;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "curricuforge")]
#[command(about = "Generate structured course curricula with a generative AI provider")]
pub struct CliConfig {
    #[arg(long, default_value = "", help = "Subject or course title")]
    pub subject: String,

    #[arg(long, default_value = "Undergraduate", help = "Academic level (free text allowed)")]
    pub level: String,

    #[arg(long, default_value = "12 Weeks")]
    pub duration: String,

    #[arg(long, default_value = "Practical skills and theoretical foundations")]
    pub focus: String,

    #[arg(long, help = "Use a standard academic approach instead of industry alignment")]
    pub no_industry_alignment: bool,

    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Export the generated curriculum as JSON")]
    pub export: bool,

    #[arg(long, help = "Print the curriculum as JSON instead of a report")]
    pub json: bool,

    #[arg(long, help = "Accept responses with missing fields")]
    pub lenient: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            subject: self.subject.clone(),
            level: self.level.clone(),
            duration: self.duration.clone(),
            focus: self.focus.clone(),
            industry_alignment: !self.no_industry_alignment,
        }
    }

    /// 合併設定：CLI 參數 > TOML > 環境變數與預設值
    pub fn resolve(&self) -> Result<(ProviderSettings, DecodePolicy)> {
        let mut settings = ProviderSettings::from_env();
        let mut policy = DecodePolicy::default();

        if let Some(path) = &self.config {
            let toml_config = TomlConfig::from_file(path)?;
            toml_config.validate()?;
            toml_config.apply_to(&mut settings);
            if let Some(p) = toml_config.decode_policy() {
                policy = p;
            }
        }

        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if self.lenient {
            policy = DecodePolicy::Lenient;
        }

        settings.validate()?;
        Ok((settings, policy))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_form() {
        let config = CliConfig::parse_from(["curricuforge", "--subject", "Rust"]);
        let params = config.params();
        assert_eq!(params, GenerationParams::new("Rust"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_settings() {
        let config = CliConfig::parse_from([
            "curricuforge",
            "--subject",
            "Rust",
            "--no-industry-alignment",
            "--model",
            "gemini-2.5-flash",
            "--base-url",
            "http://localhost:9000",
            "--lenient",
        ]);
        assert!(!config.params().industry_alignment);

        let (settings, policy) = config.resolve().unwrap();
        assert_eq!(settings.model, "gemini-2.5-flash");
        assert_eq!(settings.base_url, "http://localhost:9000");
        assert_eq!(policy, DecodePolicy::Lenient);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = CliConfig::parse_from(["curricuforge", "--base-url", "not a url"]);
        assert!(config.resolve().is_err());
    }
}
