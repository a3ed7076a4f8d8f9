use eframe::egui::{Color32, CornerRadius, Frame, Margin, Stroke};

pub use crate::ui::ui_text::UI_TEXT;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub card: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_width: f32,
    pub backtest_table_height: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(255, 215, 0),
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(20, 24, 32),
        side_panel: Color32::from_rgb(25, 25, 25),
        card: Color32::from_rgb(32, 36, 44),
    },
    side_panel_width: 220.0,
    backtest_table_height: 320.0,
};

impl UiConfig {
    /// Frame for Left panel (Standard padding)
    pub fn side_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    /// Frame for the metrics header
    pub fn top_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    /// Frame for Bottom Status bar (Tighter vertical padding)
    pub fn bottom_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::symmetric(8, 4),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(10),
            ..Default::default()
        }
    }

    /// Boxed group behind each header metric
    pub fn card_frame(&self) -> Frame {
        Frame {
            fill: self.colors.card,
            stroke: Stroke::new(1.0, crate::config::PLOT_CONFIG.color_widget_border),
            inner_margin: Margin::symmetric(12, 6),
            corner_radius: CornerRadius::same(4),
            ..Default::default()
        }
    }

    /// Warning and failure strips above the charts
    pub fn banner_frame(&self, accent: Color32) -> Frame {
        Frame {
            fill: accent.linear_multiply(0.15),
            stroke: Stroke::new(1.0, accent),
            inner_margin: Margin::symmetric(10, 6),
            corner_radius: CornerRadius::same(4),
            ..Default::default()
        }
    }
}
