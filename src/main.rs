use std::{
    sync::Arc,
    time::Duration,
};

use kana_master::{
    core::SystemClock,
    mastery::{
        JsonFileStore,
        KanaStore,
        MasteryEngine,
    },
    recognition::{
        ArtifactLoader,
        ClassifierAdapter,
    },
    stats::StatisticsReporter,
    KanaCatalog,
    KanaError,
    Settings,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: kana-master [stats | reset | model]";

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}h {:02}m {:02}s", secs / 3600, (secs / 60) % 60, secs % 60)
}

async fn print_stats(settings: &Settings, store: Arc<dyn KanaStore>) -> Result<(), KanaError> {
    let catalog = KanaCatalog::standard();
    let reporter = StatisticsReporter::new(store, Arc::new(SystemClock));
    let overview = reporter.overview(settings.recent_limit, settings.daily_window).await?;

    println!("Progress ({} kana studied of {})", overview.growth.total(), catalog.len());
    for (level, count) in overview.growth.iter() {
        println!("  {} {:>4}", level, count);
    }

    println!("\nLast {} days", overview.daily.len());
    for day in &overview.daily {
        println!("  {}  {:>4}  {}", day.date, day.count, "■".repeat(day.count.min(40) as usize));
    }

    println!("\nToday: {} attempts, {}", overview.today.count, format_duration(overview.today.elapsed));
    println!(
        "Total: {} attempts, {}",
        overview.total_attempts,
        format_duration(overview.total_study_time)
    );

    if !overview.recent.is_empty() {
        println!("\nRecent");
        for event in &overview.recent {
            let glyph = catalog.get(&event.character_id).map_or("?", |spec| spec.glyph.as_str());
            println!(
                "  {}  {}  {:?} {:?}",
                event.timestamp.with_timezone(&chrono::Local).format("%m-%d %H:%M"),
                glyph,
                event.mode,
                event.outcome
            );
        }
    }
    Ok(())
}

async fn check_model(settings: &Settings) {
    let path = settings.model_path();
    let classifier = ClassifierAdapter::new(Arc::new(ArtifactLoader::new(&path)));
    if classifier.ensure_loaded().await.is_ready() {
        println!("Classifier ready: {}", path.display());
    } else {
        println!("Classifier unavailable ({}); drawings are judged by stroke count", path.display());
    }
}

async fn run(command: &str, settings: &Settings) -> Result<(), KanaError> {
    match command {
        "stats" => {
            let store = Arc::new(JsonFileStore::open(settings.store_path()).await?);
            print_stats(settings, store).await
        }
        "reset" => {
            let store = Arc::new(JsonFileStore::open(settings.store_path()).await?);
            MasteryEngine::with_system_clock(store).reset().await?;
            println!("All progress has been cleared.");
            Ok(())
        }
        "model" => {
            check_model(settings).await;
            Ok(())
        }
        other => Err(KanaError::InvalidInput(format!("unknown command '{}'\n{}", other, USAGE))),
    }
}

#[tokio::main]
async fn main() {
    // The configured filter is not known yet, so report settings problems at warn
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_writer(std::io::stderr)
        .finish();
    let settings = tracing::subscriber::with_default(bootstrap, Settings::load);
    init_tracing(&settings);

    let command = std::env::args().nth(1).unwrap_or_else(|| "stats".to_string());
    if let Err(e) = run(&command, &settings).await {
        tracing::error!(error = %e, command = %command, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
