use crate::domain::model::Curriculum;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

const EXPORT_PREFIX: &str = "CurricuForge_";

/// `CurricuForge_<title>.json`，連續的空白與路徑分隔符號換成一個底線
pub fn export_filename(title: &str) -> String {
    let mut name = String::with_capacity(EXPORT_PREFIX.len() + title.len() + 5);
    name.push_str(EXPORT_PREFIX);

    let mut in_separator = false;
    for ch in title.chars() {
        if ch.is_whitespace() || ch == '/' || ch == '\\' {
            if !in_separator {
                name.push('_');
            }
            in_separator = true;
        } else {
            name.push(ch);
            in_separator = false;
        }
    }

    name.push_str(".json");
    name
}

pub struct CurriculumExporter<S: Storage> {
    storage: S,
}

impl<S: Storage> CurriculumExporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 寫出縮排 2 格的 JSON，回傳寫入的路徑
    pub async fn export(&self, curriculum: &Curriculum) -> Result<String> {
        let filename = export_filename(&curriculum.title);
        let json = serde_json::to_string_pretty(curriculum)?;

        tracing::debug!("Exporting curriculum ({} bytes) as {}", json.len(), filename);
        let path = self.storage.write_file(&filename, json.as_bytes()).await?;
        tracing::info!("Curriculum exported to {}", path);

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(format!("mock://{path}"))
        }
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename("Quantum Computing 101"),
            "CurricuForge_Quantum_Computing_101.json"
        );
        assert_eq!(export_filename("  A \t B  "), "CurricuForge__A_B_.json");
        assert_eq!(export_filename("CI/CD Basics"), "CurricuForge_CI_CD_Basics.json");
        assert_eq!(export_filename(""), "CurricuForge_.json");
    }

    #[tokio::test]
    async fn test_export_writes_pretty_json() {
        let storage = MockStorage::default();
        let exporter = CurriculumExporter::new(storage.clone());
        let curriculum = Curriculum {
            title: "Rust Basics".to_string(),
            assessment_strategy: "projects".to_string(),
            ..Curriculum::default()
        };

        let path = exporter.export(&curriculum).await.unwrap();
        assert_eq!(path, "mock://CurricuForge_Rust_Basics.json");

        let files = storage.files.lock().await;
        let data = files.get("CurricuForge_Rust_Basics.json").unwrap();
        let text = String::from_utf8(data.clone()).unwrap();
        assert!(text.contains("\n  \"title\": \"Rust Basics\""));

        let decoded: Curriculum = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, curriculum);
    }
}
