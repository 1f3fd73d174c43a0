use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use reelcast::scene::UnsplashSource;
use reelcast::script::GeminiGenerator;
use reelcast::speech::{FfprobeProbe, GoogleTranslateTts};
use reelcast::{Pipeline, ReelResult, RunConfig, RunReport, Services};

#[derive(Parser, Debug)]
#[command(name = "reelcast", version, about = "Turn a topic into a narrated vertical short video")]
struct Cli {
    /// Video topic. Prompted for interactively when omitted.
    #[arg(long)]
    topic: Option<String>,

    /// JSON run configuration. Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving the script file and the final video.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Target narration length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Caption font file.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Render scene images sequentially.
    #[arg(long, default_value_t = false)]
    no_parallel: bool,

    /// Unsplash API access key.
    #[arg(long, env = "UNSPLASH_ACCESS_KEY", hide_env_values = true)]
    unsplash_key: Option<String>,

    /// Gemini API key. Without it the template script is used.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_key: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(unsplash_key) = cli.unsplash_key.clone().filter(|k| !k.trim().is_empty()) else {
        println!("Error: Please set UNSPLASH_ACCESS_KEY (environment or --unsplash-key)");
        println!("Get one from: https://unsplash.com/developers");
        return Ok(ExitCode::FAILURE);
    };

    let config = build_config(&cli)?;
    let topic = match cli.topic.clone() {
        Some(t) => t,
        None => prompt_topic()?,
    };

    let client = reelcast::net::blocking_client(config.http_timeout())?;
    let text = GeminiGenerator::new(client.clone(), cli.gemini_key.clone(), &config.gemini_model);
    let speech = GoogleTranslateTts::new(client.clone(), &config.language, config.slow_speech);
    let images = UnsplashSource::new(client, unsplash_key);
    let probe = FfprobeProbe;

    let pipeline = Pipeline::new(
        &config,
        Services {
            text: &text,
            speech: &speech,
            probe: &probe,
            images: &images,
        },
    );

    let outcome = pipeline.run(&topic, &mut |stage| println!("{stage}"));
    let code = report(&outcome, &mut std::io::stdout().lock()).context("write run summary")?;
    Ok(ExitCode::from(code))
}

/// Print the run summary (or the failure) and return the process exit status.
fn report(outcome: &ReelResult<RunReport>, out: &mut dyn Write) -> std::io::Result<u8> {
    match outcome {
        Ok(report) => {
            if report.script_fallback {
                writeln!(out, "Script generation failed, used the template script")?;
            }
            writeln!(out, "\nVideo created successfully: {}", report.video_path.display())?;
            writeln!(out, "Script saved to: {}", report.script_path.display())?;
            writeln!(out, "Total duration: {:.1} seconds", report.duration_secs)?;
            writeln!(out, "Segments: {}", report.segments)?;
            Ok(0)
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            writeln!(out, "\nAn error occurred: {e}")?;
            Ok(1)
        }
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => RunConfig::from_path(path)?,
        None => RunConfig::default(),
    };
    if let Some(dir) = cli.out_dir.clone() {
        config.out_dir = dir;
    }
    if let Some(secs) = cli.duration {
        config.target_duration_secs = secs;
    }
    if let Some(font) = cli.font.clone() {
        config.font_path = font;
    }
    if cli.no_parallel {
        config.parallel = false;
    }
    config.validate()?;
    Ok(config)
}

fn prompt_topic() -> anyhow::Result<String> {
    print!("Enter a topic for your short video: ");
    std::io::stdout().flush().context("flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read topic from stdin")?;
    Ok(line.trim().to_owned())
}

#[cfg(test)]
#[path = "../../tests/unit/bin/reelcast.rs"]
mod tests;
