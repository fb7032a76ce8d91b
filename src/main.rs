//! GUI entry point

use anyhow::{anyhow, Result};
use flexi_logger::{Logger, WriteMode};

use gomoku::ui::GomokuApp;

fn main() -> Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .start()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(|cc| Ok(Box::new(GomokuApp::new(cc)))),
    )
    .map_err(|e| anyhow!("gui error: {e}"))
}
