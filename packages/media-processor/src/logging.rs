use tracing_subscriber::EnvFilter;

const LOG_TARGETS: &[&str] = &["media_processor", "media_core", "tower_http"];

/// tracing の購読者を初期化する
///
/// RUST_LOG が設定されていればそれを使い、なければ `level` を各クレートに適用する
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_string(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn build_filter_string(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
