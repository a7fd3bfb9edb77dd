#![deny(missing_docs)]

//! Entry point for the kneegrade desktop client.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use kneegrade::egui_app::controller::EguiController;
use kneegrade::egui_app::ui::{DEFAULT_VIEWPORT_SIZE, EguiApp, MIN_VIEWPORT_SIZE};
use kneegrade::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let controller = EguiController::from_saved_config();
    let title = controller
        .as_ref()
        .map(|controller| controller.ui.title.clone())
        .unwrap_or_else(|_| "kneegrade".to_string());

    let viewport = egui::ViewportBuilder::default()
        .with_title(title.as_str())
        .with_inner_size(DEFAULT_VIEWPORT_SIZE)
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| match controller {
            Ok(controller) => Ok(Box::new(EguiApp::new(controller))),
            Err(err) => {
                tracing::error!("Failed to start: {err}");
                Ok(Box::new(LaunchError {
                    message: format!("Failed to load config: {err}"),
                }))
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
