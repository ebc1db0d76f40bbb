use crate::core::generator::CurriculumGenerator;
use crate::domain::model::{Curriculum, GenerationParams};
use crate::domain::ports::CompletionProvider;
use crate::utils::error::SessionError;
use crate::utils::validation::validate_subject;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// 介面狀態：忙碌旗標、目前的課綱、最後一次的錯誤訊息。
/// 同一時間只允許一個進行中的生成請求
pub struct GenerationSession<P: CompletionProvider> {
    generator: CurriculumGenerator<P>,
    busy: AtomicBool,
    current: RwLock<Option<Curriculum>>,
    last_error: RwLock<Option<String>>,
}

/// 離開作用域時清除忙碌旗標，成功或失敗都一樣
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<P: CompletionProvider> GenerationSession<P> {
    pub fn new(generator: CurriculumGenerator<P>) -> Self {
        Self {
            generator,
            busy: AtomicBool::new(false),
            current: RwLock::new(None),
            last_error: RwLock::new(None),
        }
    }

    pub async fn submit(&self, params: &GenerationParams) -> Result<Curriculum, SessionError> {
        // 忙碌中的送出一律忽略，不動到目前的狀態
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Submission ignored, a generation is already in flight");
            return Err(SessionError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        if let Err(e) = validate_subject(&params.subject) {
            tracing::warn!("Rejected submission: {}", e);
            self.set_error(Some(e.message.clone()));
            return Err(e.into());
        }

        self.set_error(None);

        match self.generator.generate_curriculum(params).await {
            Ok(curriculum) => {
                *self
                    .current
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(curriculum.clone());
                self.set_error(None);
                Ok(curriculum)
            }
            Err(e) => {
                self.set_error(Some(e.user_message().to_string()));
                Err(e.into())
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn current(&self) -> Option<Curriculum> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// 回到表單 ("Create New")
    pub fn reset(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        self.set_error(None);
    }

    fn set_error(&self, message: Option<String>) {
        *self
            .last_error
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = message;
    }
}
