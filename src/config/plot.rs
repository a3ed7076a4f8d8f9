//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    /// Height of each chart in the central panel
    pub chart_height: f32,
    /// Width of the closing price and cumulative profit lines
    pub line_width: f32,

    // --- SERIES COLORS ---
    pub color_close_line: Color32,
    pub color_cumulative_profit: Color32,
    pub color_scatter: Color32,
    pub scatter_radius: f32,
    /// 0.0 = invisible, 1.0 = fully opaque
    pub scatter_opacity_pct: f32,
    pub color_target_down: Color32,
    pub color_target_up: Color32,
    pub bar_width: f64,

    // --- SEMANTIC COLORS ---
    pub color_profit: Color32,
    pub color_loss: Color32,
    pub color_info: Color32,
    pub color_warning: Color32,

    pub color_text_neutral: Color32, // Main values (white)
    pub color_text_primary: Color32,
    pub color_text_subdued: Color32,

    // UI WIDGET STYLES
    pub color_widget_background: Color32,
    pub color_widget_border: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    chart_height: 260.0,
    line_width: 1.5,

    color_close_line: Color32::from_rgb(0, 191, 255),
    color_cumulative_profit: Color32::from_rgb(34, 139, 34), // Forest Green
    color_scatter: Color32::from_rgb(255, 165, 0),
    scatter_radius: 2.0,
    scatter_opacity_pct: 0.5,
    color_target_down: Color32::from_rgb(239, 83, 80),  // TradingView Red
    color_target_up: Color32::from_rgb(38, 166, 154),   // TradingView Green
    bar_width: 0.6,

    // SEMANTICS
    color_profit: Color32::from_rgb(100, 255, 100),
    color_loss: Color32::from_rgb(255, 80, 80),
    color_info: Color32::from_rgb(173, 216, 230), // Light Blue
    color_warning: Color32::from_rgb(255, 215, 0), // Gold/Yellow

    color_text_primary: Color32::WHITE,
    color_text_neutral: Color32::LIGHT_GRAY,
    color_text_subdued: Color32::GRAY,

    // UI WIDGETS
    color_widget_background: Color32::from_black_alpha(40),
    color_widget_border: Color32::from_gray(60),
};
