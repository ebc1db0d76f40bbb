use crate::core::integrity::check_references;
use crate::core::materializer::{materialize, DecodePolicy};
use crate::core::prompt::compose_prompt;
use crate::core::schema::curriculum_schema;
use crate::domain::model::{Curriculum, GenerationParams};
use crate::domain::ports::CompletionProvider;
use crate::utils::error::GenerationError;
use std::time::Instant;

pub struct CurriculumGenerator<P: CompletionProvider> {
    provider: P,
    policy: DecodePolicy,
}

impl<P: CompletionProvider> CurriculumGenerator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            policy: DecodePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// 一次請求、一次解析。不重試；呼叫端須先確認 subject 非空白
    pub async fn generate_curriculum(
        &self,
        params: &GenerationParams,
    ) -> std::result::Result<Curriculum, GenerationError> {
        let started = Instant::now();
        let prompt = compose_prompt(params);
        let schema = curriculum_schema();

        tracing::info!("Generating curriculum for subject: {}", params.subject);
        tracing::debug!(
            "Prompt composed ({} chars, industry alignment: {})",
            prompt.len(),
            params.industry_alignment
        );

        let text = self.provider.submit(&prompt, &schema).await.inspect_err(|e| {
            tracing::error!("Curriculum generation request failed: {}", e);
        })?;

        tracing::debug!(
            "Provider responded in {:?} ({} bytes)",
            started.elapsed(),
            text.as_deref().map_or(0, str::len)
        );

        let curriculum = materialize(text.as_deref(), self.policy)?;

        let report = check_references(&curriculum);
        if !report.is_clean() {
            report.log_warnings();
        }

        tracing::info!(
            "Generated \"{}\": {} modules, {} learning outcomes",
            curriculum.title,
            curriculum.modules.len(),
            curriculum.learning_outcomes.len()
        );

        Ok(curriculum)
    }
}
