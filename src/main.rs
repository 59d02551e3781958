use std::io::{self, BufRead};
use std::path::PathBuf;

use eyre::{Result, WrapErr, bail};
use log::{debug, info, warn};

mod cli;

use cli::Cli;
use ytsum::config::Config;
use ytsum::models::Model;
use ytsum::output::{self, Stats};
use ytsum::select::TranscriptSelector;
use ytsum::summarize::Summarizer;
use ytsum::youtube::InnerTube;

const SUPPORTED_FORMATS: &str = "Supported formats:\n  \
    https://www.youtube.com/watch?v=ID\n  \
    https://youtu.be/ID\n  \
    https://www.youtube.com/embed/ID\n  \
    <11-character video ID>";

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytsum.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytsum")
        .join("logs")
}

fn build_after_help() -> String {
    let models = Model::ALL
        .iter()
        .map(|m| format!("  {:<18} {m}", m.key()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\nMODELS:\n{models}\n\nThe API key is read from ${} or api_key in {}\nLogs are written to: {}",
        ytsum::config::API_KEY_ENV,
        ytsum::config::config_path().display(),
        log_dir().join("ytsum.log").display()
    )
}

fn read_input(cli: &Cli) -> Result<String> {
    if let Some(ref url) = cli.url {
        return Ok(url.clone());
    }
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            return Ok(line);
        }
    }
    bail!("no URL or video ID provided\n\nUsage: ytsum <URL>\n       echo <URL> | ytsum");
}

fn resolve_model(cli: &Cli, config: &Config) -> Result<Model> {
    if let Some(model) = cli.model {
        return Ok(model);
    }
    match config.default_model {
        Some(ref key) => key.parse::<Model>().wrap_err("invalid default_model in config file"),
        None => Ok(Model::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    if cli.list_models {
        for model in Model::ALL {
            println!("{:<18} {model}", model.key());
        }
        return Ok(());
    }

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring unreadable config: {e}");
        Config::default()
    });

    if cli.verbose {
        let config_path = ytsum::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    let model = resolve_model(&cli, &config)?;
    debug!("Using model {} ({})", model.key(), model.api_id());

    let input = read_input(&cli)?;
    let input = input.trim();

    let video_id = ytsum::extract_video_id(input).map_err(|e| eyre::eyre!("{e}\n\n{SUPPORTED_FORMATS}"))?;
    eprintln!("Video ID: {video_id}\nWatch: {}", video_id.watch_url());

    eprintln!("Fetching transcript...");
    let selector = TranscriptSelector::new(InnerTube::new(reqwest::Client::new()), &config);
    let transcript = match selector.select(&video_id).await {
        Ok(t) => t,
        Err(e @ ytsum::Error::NoTranscript { .. }) => {
            eprintln!("Hint: check that the video has captions available");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    eprintln!("Transcript obtained ({} chars)", transcript.text.chars().count());
    if cli.verbose {
        eprintln!("Language: {}", transcript.language);
    }

    eprintln!("Generating summary with {}...", model.label());
    let summarizer = Summarizer::new(&config)?;
    let summary = summarizer.summarize(&transcript.text, &model).await?;
    eprintln!("Done!");

    println!("{summary}");

    if let Some(ref dir) = cli.download {
        let now = chrono::Local::now().naive_local();
        let path = dir.join(output::report_filename(&video_id, now));
        let report = output::render_report(&video_id, &model, &summary, now);
        std::fs::write(&path, report).wrap_err_with(|| format!("failed to write {}", path.display()))?;
        eprintln!("Summary saved to: {}", path.display());
    }

    if cli.share {
        println!("\nShare: {}", output::share_link(&summary, input));
    }

    if cli.verbose {
        eprintln!("Stats: {}", Stats::new(&transcript.text, &summary));
    }

    Ok(())
}
