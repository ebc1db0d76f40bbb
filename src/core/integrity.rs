use crate::domain::model::Curriculum;
use std::collections::HashSet;

/// `mappedModules` 與模組 id 的一致性檢查結果。只回報，不修正
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// (outcome id, 找不到的 module id)
    pub dangling_references: Vec<(String, String)>,
    pub duplicate_module_ids: Vec<String>,
    pub duplicate_outcome_ids: Vec<String>,
    pub unmapped_modules: Vec<String>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_references.is_empty()
            && self.duplicate_module_ids.is_empty()
            && self.duplicate_outcome_ids.is_empty()
            && self.unmapped_modules.is_empty()
    }

    pub fn log_warnings(&self) {
        for (outcome, module) in &self.dangling_references {
            tracing::warn!("Outcome {} references unknown module {}", outcome, module);
        }
        if !self.duplicate_module_ids.is_empty() {
            tracing::warn!("Duplicate module ids: {}", self.duplicate_module_ids.join(", "));
        }
        if !self.duplicate_outcome_ids.is_empty() {
            tracing::warn!("Duplicate outcome ids: {}", self.duplicate_outcome_ids.join(", "));
        }
        if !self.unmapped_modules.is_empty() {
            tracing::debug!(
                "Modules not mapped by any outcome: {}",
                self.unmapped_modules.join(", ")
            );
        }
    }
}

pub fn check_references(curriculum: &Curriculum) -> IntegrityReport {
    let mut report = IntegrityReport::default();

    let mut module_ids = HashSet::new();
    for module in &curriculum.modules {
        if !module_ids.insert(module.id.as_str()) && !report.duplicate_module_ids.contains(&module.id) {
            report.duplicate_module_ids.push(module.id.clone());
        }
    }

    let mut outcome_ids = HashSet::new();
    let mut mapped = HashSet::new();
    for outcome in &curriculum.learning_outcomes {
        if !outcome_ids.insert(outcome.id.as_str())
            && !report.duplicate_outcome_ids.contains(&outcome.id)
        {
            report.duplicate_outcome_ids.push(outcome.id.clone());
        }

        for module_id in &outcome.mapped_modules {
            mapped.insert(module_id.as_str());
            if !module_ids.contains(module_id.as_str()) {
                report
                    .dangling_references
                    .push((outcome.id.clone(), module_id.clone()));
            }
        }
    }

    let mut seen = HashSet::new();
    report.unmapped_modules = curriculum
        .modules
        .iter()
        .map(|m| m.id.as_str())
        .filter(|id| !mapped.contains(id) && seen.insert(*id))
        .map(str::to_string)
        .collect();

    report
}
