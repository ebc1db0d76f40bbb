use crate::domain::model::GenerationParams;

pub const INDUSTRY_ALIGNED_PHRASE: &str =
    "Strongly emphasize industry-relevant skills and practical applications.";
pub const ACADEMIC_PHRASE: &str = "Standard academic approach.";

/// 組出送給模型的指令。五個參數原樣嵌入，不做任何清理
pub fn compose_prompt(params: &GenerationParams) -> String {
    let alignment = if params.industry_alignment {
        INDUSTRY_ALIGNED_PHRASE
    } else {
        ACADEMIC_PHRASE
    };

    format!(
        "Design a comprehensive, high-quality academic curriculum for the following:\n\
         Subject: {subject}\n\
         Academic Level: {level}\n\
         Intended Duration: {duration}\n\
         Focus Areas: {focus}\n\
         Industry Alignment: {alignment}\n\
         \n\
         The response must be a structured JSON object detailing the course title, \
         a professional description, specific learning outcomes, a series of modules \
         with detailed topics and individual durations, an assessment strategy, \
         and specific recommendations for optimization.",
        subject = params.subject,
        level = params.level,
        duration = params.duration,
        focus = params.focus,
    )
}
