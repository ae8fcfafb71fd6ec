use docx_pdf_uploader::{DocxUploader, UploaderConfig, UploaderError};
use eframe::CreationContext;

fn run() -> Result<(), UploaderError> {
    let config = UploaderConfig::from_env()?;
    let app = DocxUploader::new(config)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 560.0])
            .with_min_inner_size([400.0, 460.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Word to PDF Converter",
        options,
        Box::new(move |_cc: &CreationContext<'_>| Box::new(app)),
    )
    .map_err(|e| UploaderError::Window(e.to_string()))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
