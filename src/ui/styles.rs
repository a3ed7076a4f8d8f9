use {
    crate::{
        config::PLOT_CONFIG,
        ui::{UI_CONFIG, UI_TEXT},
    },
    eframe::egui::{Color32, RichText, Ui},
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

pub(crate) fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(6.0);
    ui.heading(RichText::new(text.into()).color(UI_CONFIG.colors.heading));
    ui.separator();
}

pub fn apply_opacity(color: Color32, factor: f32) -> Color32 {
    color.linear_multiply(factor)
}

pub fn get_outcome_color(value: f64) -> Color32 {
    if value > 0.0 {
        PLOT_CONFIG.color_profit
    } else if value < 0.0 {
        PLOT_CONFIG.color_loss
    } else {
        PLOT_CONFIG.color_text_subdued
    }
}

pub fn format_pct(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Sum of fractional gains, shown in reais like the header metric.
pub fn format_brl(value: f64) -> String {
    format!("R$ {:.2}", value)
}

pub(crate) trait UiStyleExt {
    fn label_subdued(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    /// Large value with a small caption underneath, for the header row.
    fn metric_card(&mut self, label: &str, value: &str, color: Color32);
    fn label_subheader(&mut self, text: impl Into<String>);
    fn banner(&mut self, accent: Color32, title: &str, body: &str);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(PLOT_CONFIG.color_text_subdued));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0; // Tight spacing
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn metric_card(&mut self, label: &str, value: &str, color: Color32) {
        UI_CONFIG.card_frame().show(self, |ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(value).size(20.0).strong().color(color));
                ui.label_subdued(label);
            });
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }

    fn banner(&mut self, accent: Color32, title: &str, body: &str) {
        UI_CONFIG.banner_frame(accent).show(self, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(title).strong().color(accent));
                ui.label(RichText::new(body).color(PLOT_CONFIG.color_text_primary));
            });
        });
        self.add_space(4.0);
    }
}

pub(crate) fn warning_title() -> String {
    format!("{}:", UI_TEXT.warning_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting() {
        assert_eq!(format_pct(0.5234), "52.34%");
        assert_eq!(format_brl(-0.031), "R$ -0.03");
        assert_eq!(get_outcome_color(0.0), PLOT_CONFIG.color_text_subdued);
        assert_eq!(get_outcome_color(0.2), PLOT_CONFIG.color_profit);
    }
}
