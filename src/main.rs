//! pointer-sonifier - Pointer Position Sonification
//!
//! Opens a window and plays a tone that follows the mouse:
//! - Left/right sets stereo pan and volume
//! - Up/down sets pitch
//! - Click anywhere to start or stop the tone
//! - Ctrl/Cmd + Shift + P stops it

use eframe::egui;

use pointer_sonifier::render::{Hud, HudReadout};
use pointer_sonifier::settings::AppSettings;
use pointer_sonifier::{input, CpalBackend, CpalVoice, Sonifier, Viewport, Voice};

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting pointer-sonifier");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title("pointer-sonifier"),
        ..Default::default()
    };

    eframe::run_native(
        "pointer-sonifier",
        options,
        Box::new(|cc| Ok(Box::new(SonifierApp::new(cc)))),
    )
}

/// Main application state
struct SonifierApp {
    /// None when the audio output could not be opened
    sonifier: Option<Sonifier<CpalVoice>>,
    settings: AppSettings,
    hud: Hud,
    status: String,
}

impl SonifierApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();
        let backend = CpalBackend::new(settings.output_device.clone());

        let (sonifier, status) = match Sonifier::new(settings.sonifier, &backend) {
            Ok(mut sonifier) => {
                sonifier.setup();
                let status = format!(
                    "{} wave on {}",
                    sonifier.config().waveform,
                    sonifier.voice().device_name()
                );
                (Some(sonifier), status)
            }
            Err(e) => {
                log::error!("Audio unavailable: {}", e);
                (None, format!("Audio unavailable: {}", e))
            }
        };

        let mut hud = Hud::new();
        hud.settings.show_grid = settings.show_hud;

        Self {
            sonifier,
            settings,
            hud,
            status,
        }
    }
}

impl eframe::App for SonifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Sampled every frame so resizes apply to the next event
        let screen = ctx.screen_rect();
        let viewport = Viewport::new(screen.width() as f64, screen.height() as f64);

        let events = ctx.input(|i| input::events_from_egui(&i.events));
        if let Some(sonifier) = &mut self.sonifier {
            for event in events {
                sonifier.handle_event(event, viewport);
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let readout = match &self.sonifier {
                    Some(s) => HudReadout {
                        position: s.position(),
                        playing: s.is_playing(),
                        pan: s.voice().pan(),
                        volume: s.voice().volume(),
                        frequency: s.voice().frequency(),
                        status: &self.status,
                    },
                    None => HudReadout {
                        position: None,
                        playing: false,
                        pan: 0.0,
                        volume: 0.0,
                        frequency: 0.0,
                        status: &self.status,
                    },
                };
                self.hud.show(ui, viewport, &self.settings.sonifier, &readout);
            });
    }
}

impl Drop for SonifierApp {
    fn drop(&mut self) {
        if let Some(sonifier) = &mut self.sonifier {
            sonifier.teardown();
        }
        self.settings.save();
        log::info!("pointer-sonifier stopped");
    }
}
