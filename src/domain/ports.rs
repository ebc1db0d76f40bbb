use crate::utils::error::{GenerationError, Result};
use async_trait::async_trait;
use serde_json::Value;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// 外部文字生成服務。`schema` 只約束回傳格式，不改變提問內容
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// 回傳模型產生的原始文字；沒有文字時為 `None`
    async fn submit(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> std::result::Result<Option<String>, GenerationError>;
}

#[async_trait]
impl<P: CompletionProvider + ?Sized> CompletionProvider for std::sync::Arc<P> {
    async fn submit(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> std::result::Result<Option<String>, GenerationError> {
        (**self).submit(prompt, schema).await
    }
}
