use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

pub const BG_DEEP: Color32 = Color32::from_rgb(8, 12, 16);
pub const BG_PANEL: Color32 = Color32::from_rgb(14, 20, 26);
pub const BG_WIDGET: Color32 = Color32::from_rgb(24, 32, 40);
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(34, 46, 56);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(196, 190, 178);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 126, 130);

pub const ACCENT_NACRE: Color32 = Color32::from_rgb(214, 196, 232);
pub const ACCENT_KELP: Color32 = Color32::from_rgb(86, 168, 112);
pub const ACCENT_AMBER: Color32 = Color32::from_rgb(214, 160, 72);
pub const ACCENT_CORAL: Color32 = Color32::from_rgb(214, 96, 84);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgba_premultiplied(60, 72, 84, 90);

/// Dark visuals with a shell-toned palette laid over egui's defaults.
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_DEEP;
    visuals.faint_bg_color = BG_WIDGET;
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.window_rounding = Rounding::same(6.0);
    visuals.warn_fg_color = ACCENT_AMBER;
    visuals.error_fg_color = ACCENT_CORAL;
    visuals.selection.bg_fill = ACCENT_NACRE.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT_NACRE);

    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        widget.rounding = Rounding::same(4.0);
    }
    visuals.widgets.inactive.bg_fill = BG_WIDGET;
    visuals.widgets.inactive.weak_bg_fill = BG_WIDGET;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.hovered.bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.weak_bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT_NACRE);
    visuals.widgets.active.bg_stroke = Stroke::new(2.0, ACCENT_NACRE);
    visuals.slider_trailing_fill = true;

    style.visuals = visuals;
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.slider_width = 160.0;

    style.text_styles = [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
    ]
    .into();

    ctx.set_style(style);
}
