use async_trait::async_trait;

use super::{
    classifier::ClassifierAdapter,
    messages,
    stroke::StrokeCheck,
    surface::DrawingSurface,
};
use crate::core::{
    CharacterSpec,
    JudgedResult,
    KanaError,
};

/// Confidence the classifier must exceed for a drawing to count as correct.
pub const CONFIDENCE_GATE: f32 = 0.5;

/// Confidence reported when only the stroke count could be checked.
pub const HEURISTIC_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct RecognitionRequest<'a> {
    pub surface: &'a DrawingSurface,
    pub expected: &'a CharacterSpec,
    pub observed_strokes: u32,
}

#[async_trait]
pub trait Judge: Send + Sync {
    async fn judge(
        &self,
        request: &RecognitionRequest<'_>,
        strokes: &StrokeCheck,
    ) -> Result<JudgedResult, KanaError>;
}

/// Judges on stroke count alone, for when no classifier is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicJudge;

#[async_trait]
impl Judge for HeuristicJudge {
    async fn judge(
        &self,
        request: &RecognitionRequest<'_>,
        strokes: &StrokeCheck,
    ) -> Result<JudgedResult, KanaError> {
        let result = match strokes.message() {
            Some(message) => JudgedResult {
                predicted: None,
                confidence: 0.0,
                is_correct: false,
                stroke_count_match: false,
                message,
            },
            None => JudgedResult {
                predicted: Some(request.expected.glyph.clone()),
                confidence: HEURISTIC_CONFIDENCE,
                is_correct: true,
                stroke_count_match: true,
                message: messages::ENCOURAGEMENT.to_string(),
            },
        };
        Ok(result)
    }
}

pub struct ModelJudge<'a> {
    classifier: &'a ClassifierAdapter,
}

impl<'a> ModelJudge<'a> {
    pub fn new(classifier: &'a ClassifierAdapter) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl Judge for ModelJudge<'_> {
    async fn judge(
        &self,
        request: &RecognitionRequest<'_>,
        strokes: &StrokeCheck,
    ) -> Result<JudgedResult, KanaError> {
        let prediction =
            self.classifier.classify(request.surface, request.expected.variant).await?;

        let expected = request.expected.glyph.as_str();
        let predicted = prediction.label;
        let confidence = prediction.confidence;
        let is_correct = predicted.as_deref() == Some(expected) && confidence > CONFIDENCE_GATE;

        let message =
            messages::select(is_correct, confidence, strokes, predicted.as_deref(), expected);

        Ok(JudgedResult {
            predicted,
            confidence,
            is_correct,
            stroke_count_match: strokes.matched,
            message,
        })
    }
}
