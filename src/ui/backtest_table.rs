use {
    crate::{
        config::PLOT_CONFIG,
        models::{BacktestReport, LabeledDataset},
        ui::{UI_CONFIG, UI_TEXT, format_pct, get_outcome_color},
        utils::TimeUtils,
    },
    eframe::egui::{Align, Layout, RichText, Ui},
    egui_extras::{Column, TableBuilder},
};

fn optional_pct(value: Option<f64>) -> RichText {
    match value {
        Some(v) => RichText::new(format_pct(v)).color(get_outcome_color(v)),
        None => RichText::new("-").color(PLOT_CONFIG.color_text_subdued),
    }
}

/// One line per test day: close, actual and predicted label, return and simulated gain.
pub(crate) fn render_backtest_table(ui: &mut Ui, report: &BacktestReport, test: &LabeledDataset) {
    let rows = &report.rows;
    let actual = test.rows();

    TableBuilder::new(ui)
        .id_salt("backtest_table")
        .striped(true)
        .resizable(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .max_scroll_height(UI_CONFIG.backtest_table_height)
        .header(20.0, |mut header| {
            for title in [
                &UI_TEXT.col_date,
                &UI_TEXT.col_close,
                &UI_TEXT.col_actual,
                &UI_TEXT.col_predicted,
                &UI_TEXT.col_return,
                &UI_TEXT.col_gain,
            ] {
                header.col(|ui| {
                    ui.strong(title.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let idx = row.index();
                let r = &rows[idx];
                row.col(|ui| {
                    ui.label(TimeUtils::format_date(r.point.date));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", r.point.close));
                });
                row.col(|ui| {
                    ui.label(actual.get(idx).map(|a| a.target.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(r.predicted.to_string());
                });
                row.col(|ui| {
                    ui.label(optional_pct(r.period_return));
                });
                row.col(|ui| {
                    ui.label(optional_pct(r.gain));
                });
            });
        });
}
