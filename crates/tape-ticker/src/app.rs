//! Ticker orchestration.
//!
//! Wires follower -> stages -> filter -> formatter and drives the loop.
//! The loop has no normal termination: it runs until cancelled (ctrl-c or
//! the shutdown token), or until a fatal error in any stage. There is no
//! per-line retry; once the read cursor has advanced there is no unit of
//! redo, so a stage failure aborts the whole run.

use crate::config::TickerConfig;
use crate::error::{AppError, AppResult};
use std::io::Write;
use std::time::Duration;
use tape_core::Portfolio;
use tape_feed::{filter_symbols, FeedResult, FileFollower, RecordPipeline, RecordSpec};
use tape_format::{TableFormat, TableWriter};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Capacity of the line channel between the follower task and the loop.
const FEED_CHANNEL_CAPACITY: usize = 256;

/// Main application.
#[derive(Debug)]
pub struct Ticker {
    config: TickerConfig,
    portfolio: Portfolio,
    pipeline: RecordPipeline,
    format: TableFormat,
    shutdown: CancellationToken,
}

impl Ticker {
    /// Build the ticker: load the portfolio, validate the stage
    /// configuration, resolve the output format.
    ///
    /// Every configuration error surfaces here, before any row flows.
    pub fn new(config: TickerConfig) -> AppResult<Self> {
        config.validate()?;

        let format: TableFormat = config.format.parse()?;

        let portfolio_path = config
            .portfolio
            .clone()
            .ok_or_else(|| AppError::Config("no portfolio file given".to_string()))?;
        let portfolio = tape_csv::read_portfolio(&portfolio_path)?;
        info!(
            path = %portfolio_path.display(),
            holdings = portfolio.len(),
            "Portfolio loaded"
        );

        let spec = RecordSpec::new(
            config.columns.clone(),
            config.types.clone(),
            config.labels.clone(),
        )?
        .with_delimiter(config.delimiter_byte()?)
        .with_convert_policy(config.on_convert_error);

        Ok(Self {
            config,
            portfolio,
            pipeline: RecordPipeline::new(spec),
            format,
            shutdown: CancellationToken::new(),
        })
    }

    /// Handle for stopping the ticker from outside.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Run against the process's standard output.
    pub async fn run(self) -> AppResult<()> {
        self.run_with(std::io::stdout()).await
    }

    /// Run against an arbitrary output sink.
    pub async fn run_with<W>(self, out: W) -> AppResult<()>
    where
        W: Write + Send + 'static,
    {
        let Self {
            config,
            portfolio,
            pipeline,
            format,
            shutdown,
        } = self;
        let mut writer = TableWriter::new(format, out);

        let feed_path = config
            .feed
            .clone()
            .ok_or_else(|| AppError::Config("no feed file given".to_string()))?;
        let poll_interval = Duration::from_millis(config.poll_interval_ms);
        let mut follower =
            FileFollower::open(&feed_path, poll_interval, shutdown.clone()).await?;
        if let Some(ms) = config.max_idle_ms {
            follower = follower.with_max_idle(Duration::from_millis(ms));
        }
        info!(feed = %feed_path.display(), format = %format, "Following feed");

        // The follower owns the file handle on its own task; lines and
        // fatal feed errors flow through a bounded channel, and the loop
        // below fully processes one record before receiving the next.
        let (line_tx, mut line_rx) = mpsc::channel::<FeedResult<String>>(FEED_CHANNEL_CAPACITY);
        let follow_handle = tokio::spawn(async move {
            loop {
                match follower.next_line().await {
                    Ok(Some(line)) => {
                        if line_tx.send(Ok(line)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        let _ = line_tx.send(Err(err)).await;
                        break;
                    }
                }
            }
        });

        let result =
            Self::ticker_loop(&config, &portfolio, &pipeline, &mut writer, &mut line_rx, &shutdown)
                .await;

        shutdown.cancel();
        // Unblock the follower task if it is parked on a full channel.
        line_rx.close();
        let _ = follow_handle.await;
        result
    }

    async fn ticker_loop<W: Write>(
        config: &TickerConfig,
        portfolio: &Portfolio,
        pipeline: &RecordPipeline,
        writer: &mut TableWriter<W>,
        line_rx: &mut mpsc::Receiver<FeedResult<String>>,
        shutdown: &CancellationToken,
    ) -> AppResult<()> {
        let headings: Vec<&str> = config.headings.iter().map(String::as_str).collect();
        writer.headings(&headings)?;

        let mut rows_emitted = 0u64;
        loop {
            tokio::select! {
                maybe_line = line_rx.recv() => {
                    match maybe_line {
                        Some(Ok(line)) => {
                            let Some(record) = pipeline.process(&line)? else {
                                continue;
                            };
                            if !filter_symbols(&record, portfolio, &config.name_field) {
                                continue;
                            }
                            let fields: Vec<String> = config
                                .labels
                                .iter()
                                .map(|label| {
                                    record
                                        .get(label)
                                        .map(ToString::to_string)
                                        .unwrap_or_default()
                                })
                                .collect();
                            writer.row(&fields)?;
                            rows_emitted += 1;
                        }
                        Some(Err(err)) => return Err(AppError::Feed(err)),
                        // Follower stopped: cancellation or idle limit.
                        None => break,
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    shutdown.cancel();
                    break;
                }
            }
        }

        info!(rows_emitted, "Ticker stopped");
        Ok(())
    }
}
