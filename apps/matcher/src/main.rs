use anyhow::{bail, Context, Result};
use tracing::info;

use matcher::{telemetry, Config, MatchEngine};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    telemetry::init(&config.rust_log)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [resume_path, job_path] = args.as_slice() else {
        bail!("Usage: matcher <resume.txt> <job_description.txt>");
    };

    let engine = MatchEngine::from_config(&config).context("Failed to build match engine")?;
    info!(
        "Match engine ready (vocabulary {} with {} skills)",
        engine.vocabulary().version(),
        engine.vocabulary().len()
    );

    let resume = tokio::fs::read_to_string(resume_path)
        .await
        .with_context(|| format!("Failed to read resume from '{resume_path}'"))?;
    let job = tokio::fs::read_to_string(job_path)
        .await
        .with_context(|| format!("Failed to read job description from '{job_path}'"))?;

    let weights = config.weights()?;
    let result = engine
        .match_texts_async(resume, job, weights.hard(), weights.semantic())
        .await?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
