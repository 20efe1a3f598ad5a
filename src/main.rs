mod analysis;
mod config;
mod export;
mod extract;
mod logging;
mod models;
mod pipeline;
mod report;
mod run;
mod session;
mod summary;
mod ui;

use anyhow::Result;

use crate::analysis::HttpAnalyzer;
use crate::config::Config;
use crate::extract::AutoExtractor;
use crate::pipeline::Pipeline;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load()?;

    match config::data_dir().and_then(|dir| logging::init(&dir)) {
        Ok(path) => tracing::info!(log = %path.display(), "atlaudit starting"),
        Err(e) => eprintln!("Warning: logging disabled: {e:#}"),
    }

    let pipeline = build_pipeline(&config)?;

    match args.len() {
        1 => run::as_tui(&config, pipeline),
        2.. => run::as_cli(&args, &config, pipeline),
        _ => {
            eprintln!("Usage: atlaudit [command]");
            Ok(())
        }
    }
}

fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let analyzer = HttpAnalyzer::new(&config.api_base_url, config.request_timeout())?;
    let extractor = AutoExtractor::new(config.command_extractor());
    Ok(Pipeline::new(
        Box::new(analyzer),
        Box::new(extractor),
        config.document_mode,
    ))
}
