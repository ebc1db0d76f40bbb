use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 表單送出的生成參數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub subject: String,
    /// 通常是 `AcademicLevel` 的標籤，但也接受自由文字
    pub level: String,
    pub duration: String,
    pub focus: String,
    pub industry_alignment: bool,
}

impl GenerationParams {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            subject: String::new(),
            level: AcademicLevel::Undergraduate.label().to_string(),
            duration: "12 Weeks".to_string(),
            focus: "Practical skills and theoretical foundations".to_string(),
            industry_alignment: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcademicLevel {
    HighSchool,
    Undergraduate,
    Graduate,
    ProfessionalCertification,
    CorporateTraining,
    Bootcamp,
}

impl AcademicLevel {
    pub const ALL: [AcademicLevel; 6] = [
        AcademicLevel::HighSchool,
        AcademicLevel::Undergraduate,
        AcademicLevel::Graduate,
        AcademicLevel::ProfessionalCertification,
        AcademicLevel::CorporateTraining,
        AcademicLevel::Bootcamp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AcademicLevel::HighSchool => "High School",
            AcademicLevel::Undergraduate => "Undergraduate",
            AcademicLevel::Graduate => "Graduate / Master's",
            AcademicLevel::ProfessionalCertification => "Professional Certification",
            AcademicLevel::CorporateTraining => "Corporate Training",
            AcademicLevel::Bootcamp => "Bootcamp",
        }
    }
}

impl fmt::Display for AcademicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AcademicLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown academic level: {wanted}"))
    }
}

/// 生成結果。缺少的欄位一律給預設值，是否允許缺欄位由 materializer 的策略決定
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Curriculum {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<String>,
    pub learning_outcomes: Vec<LearningOutcome>,
    pub modules: Vec<Module>,
    pub assessment_strategy: String,
    pub recommendations: Vec<String>,
}

impl Curriculum {
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningOutcome {
    pub id: String,
    pub text: String,
    /// 弱參照：指向同一份 Curriculum 的 `Module::id`，不保證存在
    pub mapped_modules: Vec<String>,
}

impl LearningOutcome {
    /// 回傳每個 mapped id 對應的模組，找不到的為 `None`
    pub fn resolved_modules<'a>(
        &'a self,
        curriculum: &'a Curriculum,
    ) -> Vec<(&'a str, Option<&'a Module>)> {
        self.mapped_modules
            .iter()
            .map(|id| (id.as_str(), curriculum.module(id)))
            .collect()
    }
}
