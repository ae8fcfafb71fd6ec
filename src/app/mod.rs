mod controller;
mod state;
mod ui;

use crate::config::UploaderConfig;
use crate::error::UploaderError;
use crate::upload::{ConversionClient, ConversionJob, DownloadTarget, SelectedFile};
use eframe::{egui, App};
use std::sync::mpsc as std_mpsc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

pub use controller::UploadController;
pub use state::{
    DropZone, ErrorBanner, ProgressState, SessionPhase, UploadState, CONVERTING_TEXT, DONE_TEXT,
};

const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct DocxUploader {
    // Declared first so session tasks are aborted before the runtime drops.
    controller: UploadController,
    client: ConversionClient,
    downloads: DownloadTarget,
    tick_interval: Duration,
    server_url: String,
    server_version: Option<String>,
    version_receiver: Option<std_mpsc::Receiver<Option<String>>>,
    runtime: Runtime,
}

impl DocxUploader {
    pub fn new(config: UploaderConfig) -> Result<Self, UploaderError> {
        log::info!(
            "Initializing DOCX to PDF uploader (server {}, downloads to {})",
            config.server_url,
            config.download_dir.display()
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("docx-pdf-worker")
            .build()
            .map_err(UploaderError::Runtime)?;
        let client = ConversionClient::new(&config).map_err(UploaderError::HttpClient)?;

        let mut app = Self {
            controller: UploadController::new(config.reset_delay),
            client,
            downloads: DownloadTarget::new(config.download_dir.clone()),
            tick_interval: config.tick_interval,
            server_url: config.server_url.clone(),
            server_version: None,
            version_receiver: None,
            runtime,
        };
        app.request_server_version();
        Ok(app)
    }

    fn request_server_version(&mut self) {
        let (sender, receiver) = std_mpsc::channel();
        self.version_receiver = Some(receiver);

        let client = self.client.clone();
        self.runtime.spawn(async move {
            let version = match client.fetch_version().await {
                Ok(version) => version,
                Err(e) => {
                    log::debug!("Server version unavailable: {}", e);
                    None
                }
            };
            sender.send(version).unwrap_or_default();
        });
    }

    pub fn start_conversion(&mut self) {
        let Some((file, sender)) = self.controller.begin_submission() else {
            return;
        };

        let job = ConversionJob::new(
            self.client.clone(),
            self.downloads.clone(),
            self.tick_interval,
        );
        let task = self.runtime.spawn(job.run(file, sender));
        self.controller.attach_task(task);
    }

    /// Maps egui's per-frame drag state onto the drop zone.
    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });

        match dropped.first() {
            Some(first) => apply_drop(&mut self.controller, first),
            None => self.controller.set_drag_hover(hovering),
        }
    }

    fn update_state(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.controller.poll(now);

        if let Some(receiver) = &self.version_receiver {
            if let Ok(version) = receiver.try_recv() {
                if let Some(version) = &version {
                    log::info!("Conversion server version {}", version);
                }
                self.server_version = version;
                self.version_receiver = None;
            }
        }

        if let Some(due) = self.controller.reset_due_in(now) {
            ctx.request_repaint_after(due.min(BUSY_REPAINT_INTERVAL));
        } else if self.controller.is_busy() || self.version_receiver.is_some() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}

fn apply_drop(controller: &mut UploadController, file: &egui::DroppedFile) {
    match selected_from_drop(file) {
        Ok(selected) => controller.drop_files(vec![selected]),
        Err(e) => {
            controller.set_drag_hover(false);
            controller.reject_unreadable(&dropped_name(file), &e);
        }
    }
}

fn dropped_name(file: &egui::DroppedFile) -> String {
    if !file.name.is_empty() {
        return file.name.clone();
    }
    file.path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn selected_from_drop(file: &egui::DroppedFile) -> std::io::Result<SelectedFile> {
    if let Some(path) = &file.path {
        return SelectedFile::from_path(path);
    }
    if let Some(bytes) = &file.bytes {
        return Ok(SelectedFile::from_bytes(file.name.clone(), bytes.clone()));
    }
    Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "dropped item has no readable content",
    ))
}

impl App for DocxUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_drag_and_drop(ctx);
        self.update_state(ctx);
        self.render(ctx);
    }
}
