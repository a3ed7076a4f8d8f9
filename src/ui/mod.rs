mod backtest_table;
mod charts;
mod metrics_panel;
mod settings_panel;
mod styles;
mod ui_config;
mod ui_text;

pub(crate) use backtest_table::render_backtest_table;
pub(crate) use charts::{ChartKind, render_chart};
pub(crate) use metrics_panel::render_metrics_header;
pub(crate) use settings_panel::{DateInputs, Panel, SettingsEvent, SettingsPanel};
pub(crate) use styles::{
    UiStyleExt, apply_opacity, format_brl, format_pct, get_outcome_color, section_heading,
    warning_title,
};
pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
