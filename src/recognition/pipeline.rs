use std::sync::Arc;

use super::{
    classifier::{
        ClassifierAdapter,
        LoadState,
    },
    judge::{
        HeuristicJudge,
        Judge,
        ModelJudge,
        RecognitionRequest,
    },
    messages,
    stroke::StrokeCheck,
};
use crate::core::JudgedResult;

/// Judges hand-drawn kana. Uses the classifier when it can be loaded and falls
/// back to stroke counting when it cannot. Never returns an error.
#[derive(Clone)]
pub struct RecognitionPipeline {
    classifier: Arc<ClassifierAdapter>,
}

impl RecognitionPipeline {
    pub fn new(classifier: Arc<ClassifierAdapter>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &ClassifierAdapter {
        &self.classifier
    }

    async fn select_judge(&self) -> Box<dyn Judge + '_> {
        match self.classifier.ensure_loaded().await {
            LoadState::Ready => Box::new(ModelJudge::new(&self.classifier)),
            state => {
                tracing::debug!(?state, "judging by stroke count only");
                Box::new(HeuristicJudge)
            }
        }
    }

    pub async fn recognize(&self, request: &RecognitionRequest<'_>) -> JudgedResult {
        let strokes =
            StrokeCheck::evaluate(request.expected.stroke_count, request.observed_strokes);
        let judge = self.select_judge().await;

        match judge.judge(request, &strokes).await {
            Ok(result) => {
                tracing::debug!(
                    character = %request.expected.id,
                    predicted = ?result.predicted,
                    confidence = result.confidence,
                    correct = result.is_correct,
                    "drawing judged"
                );
                result
            }
            Err(error) => {
                tracing::warn!(%error, character = %request.expected.id, "recognition failed");
                JudgedResult {
                    predicted: None,
                    confidence: 0.0,
                    is_correct: false,
                    stroke_count_match: strokes.matched,
                    message: messages::UNRECOGNIZED.to_string(),
                }
            }
        }
    }
}
