//! Pointer HUD
//!
//! Draws the sonifier's view of the window: a grid labeled with the
//! pitch of each row and the pan of each column, a crosshair at the
//! pointer, and a readout of what the voice is currently doing.
//!
//! ## Coordinate System
//!
//! Everything is in window pixels, the same space pointer events use.
//! The grid labels are computed with the same mapping the voice uses, so
//! what you read is what you hear.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke};

use crate::config::SonifierConfig;
use crate::mapping::{self, Viewport};
use crate::sonifier::PointerPosition;

/// Grid divisions in each direction
const DIVISIONS: usize = 8;

/// Display settings for the HUD
#[derive(Clone)]
pub struct HudSettings {
    /// Crosshair and readout color
    pub color: Color32,

    /// Background color
    pub background: Color32,

    /// Whether to draw the labeled grid
    pub show_grid: bool,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(100, 255, 100),
            background: Color32::from_rgb(10, 20, 10),
            show_grid: true,
        }
    }
}

/// What the voice is doing this frame
pub struct HudReadout<'a> {
    pub position: Option<PointerPosition>,
    pub playing: bool,
    pub pan: f64,
    pub volume: f64,
    pub frequency: f64,
    pub status: &'a str,
}

/// Full-window pointer HUD
#[derive(Default)]
pub struct Hud {
    pub settings: HudSettings,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the HUD over the whole available area
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        viewport: Viewport,
        config: &SonifierConfig,
        readout: &HudReadout<'_>,
    ) -> egui::Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, self.settings.background);

        if self.settings.show_grid {
            self.draw_grid(&painter, rect, viewport, config);
        }

        if let Some(pos) = readout.position {
            self.draw_crosshair(&painter, rect, pos, readout.playing);
        }

        self.draw_readout(&painter, rect, readout);

        response
    }

    fn draw_grid(&self, painter: &egui::Painter, rect: Rect, viewport: Viewport, config: &SonifierConfig) {
        let grid_color = Color32::from_rgba_unmultiplied(60, 80, 60, 100);
        let label_color = Color32::from_rgba_unmultiplied(120, 160, 120, 180);
        let stroke = Stroke::new(0.5, grid_color);
        let font = FontId::monospace(10.0);

        for (i, (x_label, y_label)) in grid_labels(viewport, config).into_iter().enumerate() {
            let t = i as f32 / DIVISIONS as f32;

            let x = rect.left() + t * rect.width();
            painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
            painter.text(
                Pos2::new(x + 2.0, rect.bottom() - 2.0),
                Align2::LEFT_BOTTOM,
                x_label,
                font.clone(),
                label_color,
            );

            let y = rect.top() + t * rect.height();
            painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
            painter.text(
                Pos2::new(rect.left() + 2.0, y + 2.0),
                Align2::LEFT_TOP,
                y_label,
                font.clone(),
                label_color,
            );
        }
    }

    fn draw_crosshair(&self, painter: &egui::Painter, rect: Rect, pos: PointerPosition, playing: bool) {
        let center = Pos2::new(pos.x as f32, pos.y as f32);
        if !rect.contains(center) {
            return;
        }

        let alpha = if playing { 255 } else { 90 };
        let color = Color32::from_rgba_unmultiplied(
            self.settings.color.r(),
            self.settings.color.g(),
            self.settings.color.b(),
            alpha,
        );
        let stroke = Stroke::new(1.0, color);

        painter.line_segment([Pos2::new(center.x, rect.top()), Pos2::new(center.x, rect.bottom())], stroke);
        painter.line_segment([Pos2::new(rect.left(), center.y), Pos2::new(rect.right(), center.y)], stroke);
        painter.circle_stroke(center, 8.0, Stroke::new(1.5, color));
    }

    fn draw_readout(&self, painter: &egui::Painter, rect: Rect, readout: &HudReadout<'_>) {
        let text = format!(
            "{}\n{}\n{}",
            if readout.playing { "▶ Playing" } else { "⏹ Stopped (click to play)" },
            format_parameters(readout),
            readout.status
        );
        painter.text(
            rect.right_top() + egui::vec2(-8.0, 8.0),
            Align2::RIGHT_TOP,
            text,
            FontId::monospace(13.0),
            self.settings.color,
        );
    }
}

/// One-line summary of the voice parameters
fn format_parameters(readout: &HudReadout<'_>) -> String {
    let position = match readout.position {
        Some(p) => format!("({}, {})", p.x, p.y),
        None => "(-, -)".to_string(),
    };
    format!(
        "{} {:.0}Hz pan {:+.3} vol {:.3}",
        position, readout.frequency, readout.pan, readout.volume
    )
}

/// (pan label, frequency label) for each grid line, left/top first
fn grid_labels(viewport: Viewport, config: &SonifierConfig) -> Vec<(String, String)> {
    (0..=DIVISIONS)
        .map(|i| {
            let t = i as f64 / DIVISIONS as f64;
            let pan = mapping::compute_pan(t * viewport.width, viewport, config);
            let frequency = mapping::compute_frequency(t * viewport.height, viewport, config);
            (format!("{:+.2}", pan), format!("{}Hz", frequency))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_labels_follow_mapping() {
        let labels = grid_labels(Viewport::new(1000.0, 500.0), &SonifierConfig::default());
        assert_eq!(labels.len(), DIVISIONS + 1);
        assert_eq!(labels[0], ("-1.00".to_string(), "880Hz".to_string()));
        assert_eq!(labels[DIVISIONS / 2], ("+0.00".to_string(), "550Hz".to_string()));
        assert_eq!(labels[DIVISIONS], ("+1.00".to_string(), "220Hz".to_string()));
    }

    #[test]
    fn test_format_parameters() {
        let readout = HudReadout {
            position: Some(PointerPosition { x: 500, y: 250 }),
            playing: true,
            pan: 0.0,
            volume: 0.35,
            frequency: 550.0,
            status: "",
        };
        assert_eq!(format_parameters(&readout), "(500, 250) 550Hz pan +0.000 vol 0.350");
    }

    #[test]
    fn test_format_without_position() {
        let readout = HudReadout {
            position: None,
            playing: false,
            pan: -1.0,
            volume: 0.1,
            frequency: 440.0,
            status: "",
        };
        assert!(format_parameters(&readout).starts_with("(-, -)"));
    }
}
