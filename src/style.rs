use egui::{Color32, Context, Stroke, Style, Visuals};

pub fn configure_style(ctx: &Context, theme: &str) {
    let mut style = Style::default();

    // Roomy spacing; the viewer should read like a printed page.
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);

    ctx.set_style(style);

    let mut visuals = if theme == "dark" {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow::NONE;

    if !visuals.dark_mode {
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.0, Color32::TRANSPARENT);
        visuals.widgets.hovered.bg_fill = Color32::from_gray(238);
        visuals.widgets.active.bg_fill = Color32::from_gray(228);

        visuals.selection.bg_fill = Color32::from_rgb(204, 232, 225);
        visuals.selection.stroke = Stroke::new(1.0, Color32::from_gray(110));
    }

    ctx.set_visuals(visuals);
}
