use clap::Parser;

use shop_audit::CollectorConfig;
use shop_audit::collector;
use shop_audit::error::Result;
use shop_audit::report::ReportWriter;
use shop_audit::session::StoreSession;

mod args;
use args::{Args, Command, resolve_config};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    println!("Note: this tool requires a running WebDriver server (e.g. chromedriver).");
    println!(
        "Set WEBDRIVER_URL or --webdriver-url if not using {}",
        config.webdriver_url
    );

    let outcome = match &args.command {
        Command::Jackets => run_jackets(config).await,
        Command::Videos { min_age_days } => run_videos(config, *min_age_days).await,
    };

    if let Err(e) = outcome {
        ::log::error!("Run failed: {}", e);
        std::process::exit(1);
    }
}

/// Shop menu -> Men's -> Jackets, then collect every page and write the report
async fn run_jackets(config: CollectorConfig) -> Result<()> {
    let output_dir = config.output_dir.clone();
    let page_cap = config.page_cap;

    let mut session = StoreSession::connect(config).await?;
    let outcome = drive_jackets(&mut session, page_cap, &output_dir).await;

    // The session ends whether the run succeeded or not; otherwise a failed
    // step leaves it alive on the WebDriver server until it times out
    let closed = session.close().await;
    first_failure(outcome, closed)
}

async fn drive_jackets(
    session: &mut StoreSession,
    page_cap: Option<u32>,
    output_dir: &str,
) -> Result<()> {
    session.goto_home().await?;
    session.open_mens_shop().await?;
    session.open_jackets().await?;

    let result = collector::collect(session, page_cap).await?;
    println!("Collected {} jacket records", result.len());

    let path = ReportWriter::new(output_dir).write(&result)?;
    println!("Report written to {}", path.display());
    Ok(())
}

/// Menu hover -> New & Features, then count and validate the video feeds
async fn run_videos(config: CollectorConfig, min_age_days: i64) -> Result<()> {
    let mut session = StoreSession::connect(config).await?;
    let outcome = drive_videos(&mut session, min_age_days).await;

    let closed = session.close().await;
    first_failure(outcome, closed)
}

async fn drive_videos(session: &mut StoreSession, min_age_days: i64) -> Result<()> {
    session.goto_home().await?;
    session.hover_menu().await?;
    session.open_new_and_features().await?;

    let survey = session.survey_video_feeds(min_age_days).await?;
    survey.validate()?;

    println!("Total video feeds: {}", survey.total);
    println!(
        "Feeds older than {} days: {}",
        min_age_days, survey.older_than_cutoff
    );
    Ok(())
}

/// The run error is the one worth reporting; a close failure only surfaces
/// when the run itself succeeded
fn first_failure<T>(outcome: Result<T>, closed: Result<()>) -> Result<T> {
    let value = outcome?;
    closed?;
    Ok(value)
}
