//! Application wiring and the main event loop.
//!
//! A reader task decodes JSON-lines events into a bounded channel. The
//! engine is owned by the consumer side of that channel, so every event
//! is handled to completion before the next one is looked at.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use pairmm_feed::{EngineEvent, EventParser};
use pairmm_mm::{Engine, EngineSnapshot, RecordingGateway};
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Counters kept by the reader task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReaderStats {
    pub lines_read: u64,
    /// Lines decoded into an event.
    pub events_parsed: u64,
    pub parse_errors: u64,
}

/// Live reader counters, shared so an interrupted run still reports them.
#[derive(Debug, Default)]
struct ReaderCounters {
    lines_read: AtomicU64,
    events_parsed: AtomicU64,
    parse_errors: AtomicU64,
}

impl ReaderCounters {
    fn snapshot(&self) -> ReaderStats {
        ReaderStats {
            lines_read: self.lines_read.load(Ordering::Relaxed),
            events_parsed: self.events_parsed.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
        }
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub events_handled: u64,
    pub reader: ReaderStats,
    pub interrupted: bool,
    pub engine: EngineSnapshot,
}

/// Main application.
pub struct Application {
    config: AppConfig,
    gateway: Arc<RecordingGateway>,
}

impl Application {
    /// Create a new application. Fails on invalid configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            gateway: Arc::new(RecordingGateway::new()),
        })
    }

    /// Gateway receiving every outbound request.
    pub fn gateway(&self) -> Arc<RecordingGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run until the event source is exhausted or Ctrl-C is received.
    pub async fn run<R>(self, reader: R) -> AppResult<RunSummary>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        self.run_until(reader, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run until the event source is exhausted or `shutdown` completes.
    pub async fn run_until<R, S>(self, reader: R, shutdown: S) -> AppResult<RunSummary>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        S: Future<Output = ()>,
    {
        info!(
            capacity = self.config.event_channel_capacity,
            first_order_id = self.config.maker.first_order_id,
            "Starting application"
        );

        let (event_tx, mut event_rx) =
            mpsc::channel::<EngineEvent>(self.config.event_channel_capacity);
        let counters = Arc::new(ReaderCounters::default());
        let reader_handle = tokio::spawn(read_events(reader, event_tx, Arc::clone(&counters)));

        let mut engine = Engine::new(self.config.maker.clone(), Arc::clone(&self.gateway));
        let mut events_handled = 0u64;
        let mut interrupted = false;

        tokio::pin!(shutdown);

        info!("Entering main event loop");
        loop {
            tokio::select! {
                maybe_event = event_rx.recv() => match maybe_event {
                    Some(event) => {
                        engine.handle(event);
                        events_handled += 1;
                    }
                    None => break,
                },

                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    interrupted = true;
                    break;
                }
            }
        }

        if interrupted {
            reader_handle.abort();
        } else {
            reader_handle
                .await
                .map_err(|e| AppError::Reader(e.to_string()))??;
        }

        let summary = RunSummary {
            events_handled,
            reader: counters.snapshot(),
            interrupted,
            engine: engine.snapshot(),
        };
        info!(
            events_handled,
            lines_read = summary.reader.lines_read,
            position = summary.engine.position,
            requests_sent = self.gateway.len(),
            "Shutting down"
        );
        Ok(summary)
    }
}

/// Decode lines from `reader` and forward events until EOF or the
/// receiver is dropped. Malformed lines are logged and skipped.
async fn read_events<R>(
    reader: R,
    event_tx: mpsc::Sender<EngineEvent>,
    counters: Arc<ReaderCounters>,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut parser = EventParser::new();

    while let Some(line) = lines.next_line().await? {
        let parsed = parser.parse_line(&line);
        counters.lines_read.store(parser.lines_read(), Ordering::Relaxed);

        match parsed {
            Ok(Some(event)) => {
                counters.events_parsed.fetch_add(1, Ordering::Relaxed);
                if event_tx.send(event).await.is_err() {
                    warn!("Event receiver closed, stopping reader");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Skipping malformed event line");
                counters.parse_errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;
    use tokio::io::{AsyncWriteExt, BufReader};
    use tokio::sync::oneshot;

    const ERROR_LINE: &str = "{\"type\":\"error\",\"order_id\":0,\"message\":\"x\"}\n";

    fn reader(text: &str) -> Cursor<Vec<u8>> {
        Cursor::new(text.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn test_read_events_counts_lines_and_errors() {
        let (tx, mut rx) = mpsc::channel(8);
        let counters = Arc::new(ReaderCounters::default());
        let input = format!("# header\n{ERROR_LINE}not json\n\n");
        read_events(reader(&input), tx, Arc::clone(&counters))
            .await
            .unwrap();

        let stats = counters.snapshot();
        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.events_parsed, 1);
        assert_eq!(stats.parse_errors, 1);
        assert!(matches!(rx.recv().await, Some(EngineEvent::Error { .. })));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_read_events_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let counters = Arc::new(ReaderCounters::default());
        let input = format!("{ERROR_LINE}{ERROR_LINE}");
        read_events(reader(&input), tx, Arc::clone(&counters))
            .await
            .unwrap();

        let stats = counters.snapshot();
        assert_eq!(stats.lines_read, 1);
        assert_eq!(stats.events_parsed, 1);
    }

    #[tokio::test]
    async fn test_run_empty_input() {
        let app = Application::new(AppConfig::default()).unwrap();
        let gateway = app.gateway();
        let summary = app.run(reader("")).await.unwrap();

        assert_eq!(summary.events_handled, 0);
        assert!(!summary.interrupted);
        assert_eq!(summary.engine.position, 0);
        assert!(gateway.is_empty());
    }

    #[tokio::test]
    async fn test_interrupted_run_keeps_reader_stats() {
        // Writer half stays open, so the reader never sees EOF
        let (mut writer, read_half) = tokio::io::duplex(1024);
        writer
            .write_all(format!("# session\n{ERROR_LINE}{ERROR_LINE}").as_bytes())
            .await
            .unwrap();

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let app = Application::new(AppConfig::default()).unwrap();
        let run = tokio::spawn(app.run_until(BufReader::new(read_half), async {
            let _ = stop_rx.await;
        }));

        // Let the reader drain what was written before stopping
        tokio::time::sleep(Duration::from_millis(100)).await;
        stop_tx.send(()).unwrap();
        let summary = run.await.unwrap().unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.reader.lines_read, 3);
        assert_eq!(summary.reader.events_parsed, 2);
        assert_eq!(summary.events_handled, 2);
        drop(writer);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = AppConfig {
            event_channel_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(Application::new(config), Err(AppError::Config(_))));
    }
}
