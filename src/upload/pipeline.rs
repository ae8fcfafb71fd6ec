use super::client::ConversionClient;
use super::download::DownloadTarget;
use super::types::{ConversionUpdate, SelectedFile};
use crate::error::ConversionError;
use crate::utils::filename::pdf_file_name;
use reqwest::Response;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// One submit-to-download cycle, run on the tokio runtime.
#[derive(Clone)]
pub struct ConversionJob {
    client: ConversionClient,
    target: DownloadTarget,
    tick_interval: Duration,
}

impl ConversionJob {
    pub fn new(client: ConversionClient, target: DownloadTarget, tick_interval: Duration) -> Self {
        Self {
            client,
            target,
            tick_interval,
        }
    }

    /// Always ends with exactly one `Downloaded` or `Failed` update.
    pub async fn run(self, file: SelectedFile, updates: Sender<ConversionUpdate>) {
        let ticker = Ticker::start(self.tick_interval, updates.clone());
        let response = self.client.submit(&file).await;
        ticker.stop();

        let result = match response {
            Ok(response) => self.finish(&file, response, &updates).await,
            Err(e) => Err(e),
        };

        let update = match result {
            Ok(path) => ConversionUpdate::Downloaded(path),
            Err(e) => {
                log::warn!("Conversion of {} failed: {}", file.name, e);
                ConversionUpdate::Failed(e.to_string())
            }
        };
        updates.send(update).unwrap_or_default();
    }

    async fn finish(
        &self,
        file: &SelectedFile,
        response: Response,
        updates: &Sender<ConversionUpdate>,
    ) -> Result<PathBuf, ConversionError> {
        if response.status().is_success() {
            updates
                .send(ConversionUpdate::ResponseReceived)
                .unwrap_or_default();
        }

        let pdf = ConversionClient::read_pdf(response).await?;
        self.target.save(&pdf_file_name(&file.name), pdf).await
    }
}

/// Cosmetic progress ticks. Aborted when stopped or dropped.
struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    fn start(period: Duration, updates: Sender<ConversionUpdate>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                log::trace!("progress tick");
                if updates.send(ConversionUpdate::Tick).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
