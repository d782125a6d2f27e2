use egui::{Color32, Context, RichText, ScrollArea, Ui};

use shellmorph::shell::MeshVariant;

use crate::ui::state::UiState;
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub toggle_fullscreen: bool,
    pub save_view: bool,
    pub reset_camera: bool,
}

/// Per-frame numbers shown in the statistics block.
pub struct FrameStats {
    pub fps: f32,
    pub passes: usize,
    pub vertices: u32,
    pub indices: u32,
    pub variant: MeshVariant,
}

pub fn draw_side_panel(ctx: &Context, state: &mut UiState, stats: &FrameStats) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(280.0)
        .max_width(360.0)
        .default_width(300.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(16.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new("Shell Morphospace").strong());
                ui.add_space(4.0);
                ui.label(RichText::new("Logarithmic coiling, Raup model").color(TEXT_MUTED).size(11.0));
                ui.add_space(16.0);

                section_header(ui, "ORIENTATION");
                egui::Grid::new("orientation").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
                    ui.label("Pitch");
                    ui.add(egui::Slider::new(&mut state.scene.pitch_deg, 0.0..=180.0).suffix("°"));
                    ui.end_row();

                    ui.label("Roll");
                    ui.add(egui::Slider::new(&mut state.scene.roll_deg, 0.0..=360.0).suffix("°"));
                    ui.end_row();

                    ui.label("Opacity");
                    ui.add(egui::Slider::new(&mut state.scene.shell_opacity, 0.0..=1.0));
                    ui.end_row();
                });
                ui.add_space(16.0);

                section_header(ui, "LAYERS");
                layer_controls(ui, state);
                ui.add_space(16.0);

                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "VIEW");
                ui.horizontal(|ui| {
                    if ui.button("Fullscreen").clicked() {
                        actions.toggle_fullscreen = true;
                    }
                    if ui.button("Reset camera").clicked() {
                        actions.reset_camera = true;
                    }
                });
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.checkbox(&mut state.vsync_enabled, "VSync");
                    ui.checkbox(&mut state.show_stats, "Stats");
                    ui.checkbox(&mut state.show_help, "Help");
                });
                ui.add_space(8.0);
                if ui
                    .add(egui::Button::new(RichText::new("Save view").color(BG_DEEP))
                        .fill(ACCENT_NACRE)
                        .min_size(egui::vec2(ui.available_width(), 28.0)))
                    .clicked()
                {
                    actions.save_view = true;
                }
                ui.add_space(16.0);

                if state.show_stats {
                    ui.separator();
                    ui.add_space(12.0);
                    stats_panel(ui, stats);
                }
            });
        });

    actions
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn layer_controls(ui: &mut Ui, state: &mut UiState) {
    let archimedean = state.scene.archimedean;
    ui.add_enabled(
        !archimedean,
        egui::Checkbox::new(&mut state.scene.multispiral, "Multispiral"),
    )
    .on_disabled_hover_text("Unavailable on an archimedean spiral");
    ui.checkbox(&mut state.scene.generating_curve, "Generating curves");

    let mut enabled = archimedean;
    if ui.checkbox(&mut enabled, "Archimedean").changed() {
        state.set_archimedean(enabled);
    }
}

fn stats_panel(ui: &mut Ui, stats: &FrameStats) {
    section_header(ui, "STATISTICS");
    egui::Frame::default()
        .fill(BG_WIDGET)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id = Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

            let fps_color = if stats.fps >= 60.0 {
                ACCENT_KELP
            } else if stats.fps >= 30.0 {
                ACCENT_AMBER
            } else {
                ACCENT_CORAL
            };

            egui::Grid::new("stats").num_columns(2).spacing([20.0, 4.0]).show(ui, |ui| {
                ui.label(RichText::new("FPS").color(TEXT_MUTED));
                ui.label(RichText::new(format!("{:.0}", stats.fps)).color(fps_color));
                ui.end_row();

                ui.label(RichText::new("Mesh").color(TEXT_MUTED));
                ui.label(RichText::new(stats.variant.label()).color(TEXT_PRIMARY));
                ui.end_row();

                ui.label(RichText::new("Vertices").color(TEXT_MUTED));
                ui.label(RichText::new(fmt_num(stats.vertices as usize)).color(ACCENT_NACRE));
                ui.end_row();

                ui.label(RichText::new("Indices").color(TEXT_MUTED));
                ui.label(RichText::new(fmt_num(stats.indices as usize)).color(ACCENT_NACRE));
                ui.end_row();

                ui.label(RichText::new("Passes").color(TEXT_MUTED));
                ui.label(RichText::new(stats.passes.to_string()).color(TEXT_PRIMARY));
                ui.end_row();
            });
        });
}

pub fn draw_help_overlay(ctx: &Context, distance: f32) {
    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(180))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id = Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(RichText::new("LMB+Drag - Orbit | Scroll - Zoom | F11 - Fullscreen").color(TEXT_MUTED));
                    ui.label(RichText::new(format!("Distance: {:.2}", distance)).color(TEXT_MUTED));
                });
        });
}

fn fmt_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(999), "999");
        assert_eq!(fmt_num(131_328), "131.3K");
        assert_eq!(fmt_num(2_500_000), "2.50M");
    }
}
