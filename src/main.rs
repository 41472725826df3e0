use std::path::PathBuf;

use eframe::egui;
use games_market_dash::app::GamesDashApp;
use games_market_dash::state::AppState;
use games_market_dash::ui::panels;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path argument: load once before the first frame.
    let mut state = AppState::default();
    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        panels::load_dataset(&mut state, &path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Games Market – Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(GamesDashApp::new(state)))),
    )
}
