use std::{
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use chrono::{
    TimeZone,
    Utc,
};
use kana_master::{
    core::{
        ExerciseMode,
        ManualClock,
        Outcome,
    },
    kana::labels::index_of,
    mastery::{
        GrowthLevel,
        JsonFileStore,
        KanaStore,
        MasteryEngine,
    },
    reading::check_reading,
    recognition::{
        ClassifierAdapter,
        DrawingSurface,
        KanaModel,
        ModelLoader,
        RecognitionPipeline,
        RecognitionRequest,
        Tensor,
        TensorArena,
    },
    stats::StatisticsReporter,
    KanaCatalog,
    KanaError,
    ScriptVariant,
};

/// Always recognises the same label with a fixed confidence.
struct StubModel {
    index: usize,
    confidence: f32,
}

#[async_trait]
impl KanaModel for StubModel {
    async fn predict(&self, _batch: &Tensor, arena: &TensorArena) -> Result<Tensor, KanaError> {
        let mut probabilities = vec![0.0; kana_master::kana::LABEL_COUNT];
        probabilities[self.index] = self.confidence;
        arena.tensor(probabilities, &[1, kana_master::kana::LABEL_COUNT])
    }
}

struct StubLoader {
    index: usize,
    confidence: f32,
}

#[async_trait]
impl ModelLoader for StubLoader {
    async fn load(&self) -> Result<Arc<dyn KanaModel>, KanaError> {
        Ok(Arc::new(StubModel { index: self.index, confidence: self.confidence }))
    }
}

fn temp_store_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("kana-session-{}", uuid::Uuid::new_v4()))
        .join("progress.json")
}

fn scribble() -> DrawingSurface {
    let mut surface = DrawingSurface::new(280, 280);
    surface.fill_rect(60, 120, 160, 12, [0, 0, 0, 255]);
    surface.fill_rect(130, 50, 12, 180, [0, 0, 0, 255]);
    surface
}

#[tokio::test]
async fn test_drawing_to_statistics() {
    let catalog = KanaCatalog::standard();
    let path = temp_store_path();
    let store = Arc::new(JsonFileStore::open(&path).await.unwrap());
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap()));
    let engine = MasteryEngine::new(store.clone(), clock.clone());
    let reporter = StatisticsReporter::with_timezone(store.clone(), clock.clone(), Utc);

    let a_index = index_of(ScriptVariant::Hiragana, "あ").unwrap();
    let classifier =
        Arc::new(ClassifierAdapter::new(Arc::new(StubLoader { index: a_index, confidence: 0.92 })));
    let pipeline = RecognitionPipeline::new(classifier.clone());
    let surface = scribble();

    // Drawn あ, recognised as あ
    let a = catalog.get("hiragana-a").unwrap();
    let result = pipeline
        .recognize(&RecognitionRequest { surface: &surface, expected: a, observed_strokes: 3 })
        .await;
    assert!(result.is_correct);
    assert_eq!(result.predicted.as_deref(), Some("あ"));
    engine.record_judgement(a, &result, Duration::from_secs(5)).await.unwrap();

    // Meant お, still recognised as あ
    let o = catalog.get("hiragana-o").unwrap();
    let result = pipeline
        .recognize(&RecognitionRequest { surface: &surface, expected: o, observed_strokes: 3 })
        .await;
    assert!(!result.is_correct);
    assert!(result.message.contains("あ"));
    engine.record_judgement(o, &result, Duration::from_secs(7)).await.unwrap();
    assert_eq!(classifier.arena().live(), 0);

    // Without a model, only the stroke count is judged
    let fallback = RecognitionPipeline::new(Arc::new(ClassifierAdapter::without_model()));
    let ka = catalog.get("hiragana-ka").unwrap();
    let result = fallback
        .recognize(&RecognitionRequest { surface: &surface, expected: ka, observed_strokes: 5 })
        .await;
    assert!(!result.is_correct);
    assert_eq!(result.confidence, 0.0);
    assert!(result.message.contains("too many"));
    engine.record_judgement(ka, &result, Duration::from_secs(9)).await.unwrap();

    // Reading exercise on the next day
    clock.advance(chrono::Duration::days(1));
    let ga = catalog.get("katakana-ga").unwrap();
    let outcome = check_reading(&catalog, ga, "ka").unwrap();
    assert_eq!(outcome, Outcome::Approximate);
    engine
        .record_attempt(&ga.id, ExerciseMode::Reading, outcome, Duration::from_secs(3))
        .await
        .unwrap();

    let overview = reporter.overview(10, 7).await.unwrap();
    assert_eq!(overview.total_attempts, 4);
    assert_eq!(overview.total_study_time, Duration::from_secs(24));
    assert_eq!(overview.growth.get(GrowthLevel::FirstSteps), 4);
    assert_eq!(overview.today.count, 1);
    assert_eq!(overview.today.elapsed, Duration::from_secs(3));
    let counts: Vec<u32> = overview.daily.iter().map(|d| d.count).collect();
    assert_eq!(counts, vec![0, 0, 0, 0, 0, 3, 1]);
    assert_eq!(overview.recent[0].character_id, "katakana-ga");

    let a_record = engine.record("hiragana-a").await.unwrap().unwrap();
    assert_eq!(a_record.correct(ExerciseMode::Writing), 1);
    let o_record = engine.record("hiragana-o").await.unwrap().unwrap();
    assert_eq!(o_record.correct(ExerciseMode::Writing), 0);

    // Progress survives a restart
    drop(engine);
    drop(reporter);
    drop(store);
    let reopened = Arc::new(JsonFileStore::open(&path).await.unwrap());
    assert_eq!(reopened.event_count().await.unwrap(), 4);
    assert_eq!(reopened.all_records().await.unwrap().len(), 4);

    let engine = MasteryEngine::new(reopened.clone(), clock);
    engine.reset().await.unwrap();
    assert!(engine.record("hiragana-a").await.unwrap().is_none());
    assert_eq!(reopened.event_count().await.unwrap(), 0);

    if let Some(dir) = path.parent() {
        tokio::fs::remove_dir_all(dir).await.unwrap();
    }
}
