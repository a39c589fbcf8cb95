//! next-date predictor CLI
//!
//! Reads a plan identifier from stdin, fetches the plan's return history and
//! prints the predicted next transaction date.
//!
//! stdout carries only the result line; logs go to stderr (`RUST_LOG`).

use std::error::Error as _;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use predictor_core::{
    HistoryClient, HttpHistoryClient, MockHistoryClient, Prediction, Predictor, PredictorConfig,
    PredictorError,
};

/// Exit status when no prediction was attempted (bad config or input)
const SETUP_FAILURE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let outcome = run(BufReader::new(tokio::io::stdin())).await;
    match &outcome {
        Ok(report) => {
            if let Some(line) = &report.line {
                println!("{line}");
            }
        }
        Err(err) => error!("{err:#}"),
    }
    ExitCode::from(exit_status(&outcome))
}

async fn run(input: impl AsyncBufRead + Unpin) -> anyhow::Result<Report> {
    let config = PredictorConfig::from_env().context("invalid predictor configuration")?;
    predict_from(&config, input).await
}

async fn predict_from(
    config: &PredictorConfig,
    input: impl AsyncBufRead + Unpin,
) -> anyhow::Result<Report> {
    let selector = config.selector().context("invalid plan categories")?;
    let plan = read_plan(input).await?;

    let report = match history_client(config) {
        Ok(history) => {
            info!(source = history.name(), %plan, "running prediction");
            let predictor = Predictor::new(history, selector);
            Report::from_outcome(&predictor.predict(&plan).await)
        }
        Err(err) => Report::from_error(&err),
    };
    Ok(report)
}

fn history_client(config: &PredictorConfig) -> predictor_core::Result<Arc<dyn HistoryClient>> {
    if config.offline {
        info!("offline mode, serving sample histories");
        return Ok(Arc::new(MockHistoryClient::with_samples()));
    }
    Ok(Arc::new(HttpHistoryClient::new(config)?))
}

/// First whitespace-separated token of the first non-blank line
async fn read_plan(input: impl AsyncBufRead + Unpin) -> anyhow::Result<String> {
    let mut lines = input.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read plan identifier from stdin")?
    {
        if let Some(token) = line.split_whitespace().next() {
            return Ok(token.to_string());
        }
    }
    bail!("no investment plan identifier on stdin")
}

fn exit_status(outcome: &anyhow::Result<Report>) -> u8 {
    outcome.as_ref().map_or(SETUP_FAILURE, Report::exit_status)
}

/// What gets printed on stdout and how the process exits
#[derive(Debug, PartialEq, Eq)]
struct Report {
    line: Option<String>,
    failed: bool,
}

impl Report {
    fn from_outcome(outcome: &predictor_core::Result<Prediction>) -> Self {
        match outcome {
            Ok(prediction) => Self {
                line: prediction.render(),
                failed: false,
            },
            Err(err) => Self::from_error(err),
        }
    }

    fn from_error(err: &PredictorError) -> Self {
        error!(code = %err.code(), cause = %error_chain(err), "prediction failed");
        Self {
            line: Some(err.render()),
            failed: true,
        }
    }

    /// 1 for a reported prediction error, 0 otherwise
    const fn exit_status(&self) -> u8 {
        if self.failed { 1 } else { 0 }
    }
}

fn error_chain(err: &PredictorError) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
