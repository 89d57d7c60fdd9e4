mod app;
mod chart;
mod cli;
mod data;
mod state;
mod ui;
mod view;

use app::AstroHoopsApp;
use clap::Parser;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let args = cli::Args::parse();
    log::info!("Starting with data file {}", args.data.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Astro Hoops – Venus Cycle & Horoscope",
        options,
        Box::new(move |_cc| Ok(Box::new(AstroHoopsApp::new(args.data)))),
    )
}
