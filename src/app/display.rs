use crate::domain::model::Curriculum;
use std::fmt;

/// 終端機上的課綱報告
pub struct CurriculumReport<'a>(pub &'a Curriculum);

pub fn render_curriculum(curriculum: &Curriculum) -> String {
    CurriculumReport(curriculum).to_string()
}

impl fmt::Display for CurriculumReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;

        writeln!(f, "{}", c.title)?;
        writeln!(f, "{}", "=".repeat(c.title.chars().count().max(3)))?;
        if !c.description.is_empty() {
            writeln!(f, "{}", c.description)?;
        }

        let meta: Vec<String> = [
            c.level.as_deref().map(|l| format!("Level: {l}")),
            c.total_duration.as_deref().map(|d| format!("Duration: {d}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !meta.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", meta.join(" | "))?;
        }

        writeln!(f)?;
        writeln!(f, "LEARNING OUTCOMES ({})", c.learning_outcomes.len())?;
        if c.learning_outcomes.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for outcome in &c.learning_outcomes {
            writeln!(f, "  [{}] {}", outcome.id, outcome.text)?;
            for (id, module) in outcome.resolved_modules(c) {
                match module {
                    Some(m) => writeln!(f, "      -> {} {}", id, m.title)?,
                    None => writeln!(f, "      -> {id} (unknown module)")?,
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "MODULES ({})", c.modules.len())?;
        if c.modules.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (i, module) in c.modules.iter().enumerate() {
            if module.duration.is_empty() {
                writeln!(f, "  {}. {} [{}]", i + 1, module.title, module.id)?;
            } else {
                writeln!(
                    f,
                    "  {}. {} ({}) [{}]",
                    i + 1,
                    module.title,
                    module.duration,
                    module.id
                )?;
            }
            if !module.description.is_empty() {
                writeln!(f, "     {}", module.description)?;
            }
            for topic in &module.topics {
                writeln!(f, "     * {topic}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "ASSESSMENT STRATEGY")?;
        writeln!(f, "  {}", c.assessment_strategy)?;

        if !c.recommendations.is_empty() {
            writeln!(f)?;
            writeln!(f, "RECOMMENDATIONS")?;
            for rec in &c.recommendations {
                writeln!(f, "  * {rec}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LearningOutcome, Module};

    #[test]
    fn test_render_full_curriculum() {
        let curriculum = Curriculum {
            title: "Quantum Computing 101".to_string(),
            description: "An introduction".to_string(),
            level: Some("Undergraduate".to_string()),
            total_duration: Some("12 Weeks".to_string()),
            learning_outcomes: vec![LearningOutcome {
                id: "lo1".to_string(),
                text: "Explain qubits".to_string(),
                mapped_modules: vec!["m1".to_string(), "m7".to_string()],
            }],
            modules: vec![Module {
                id: "m1".to_string(),
                title: "Intro".to_string(),
                description: "Basics".to_string(),
                duration: "2 weeks".to_string(),
                topics: vec!["qubits".to_string()],
            }],
            assessment_strategy: "exam".to_string(),
            recommendations: vec!["Add a lab".to_string()],
        };

        let out = render_curriculum(&curriculum);

        assert!(out.starts_with("Quantum Computing 101\n"));
        assert!(out.contains("Level: Undergraduate | Duration: 12 Weeks"));
        assert!(out.contains("  [lo1] Explain qubits"));
        assert!(out.contains("-> m1 Intro"));
        assert!(out.contains("-> m7 (unknown module)"));
        assert!(out.contains("  1. Intro (2 weeks) [m1]"));
        assert!(out.contains("     * qubits"));
        assert!(out.contains("ASSESSMENT STRATEGY\n  exam"));
        assert!(out.contains("RECOMMENDATIONS\n  * Add a lab"));
    }

    #[test]
    fn test_render_empty_curriculum_does_not_panic() {
        let out = render_curriculum(&Curriculum::default());
        assert!(out.contains("LEARNING OUTCOMES (0)\n  (none)"));
        assert!(out.contains("MODULES (0)\n  (none)"));
        assert!(!out.contains("RECOMMENDATIONS"));
    }
}
