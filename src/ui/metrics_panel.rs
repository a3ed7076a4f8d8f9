use {
    crate::{
        config::PLOT_CONFIG,
        engine::PipelineRun,
        ui::{UI_TEXT, UiStyleExt, format_brl, format_pct, get_outcome_color},
    },
    eframe::egui::{Grid, RichText, Ui},
};

/// Headline numbers, the secondary scores and the confusion grid, in one row.
pub(crate) fn render_metrics_header(ui: &mut Ui, run: &PipelineRun) {
    let evaluation = &run.evaluation;
    let summary = &run.backtest.summary;

    ui.horizontal(|ui| {
        ui.metric_card(
            &UI_TEXT.metric_accuracy,
            &format_pct(evaluation.accuracy),
            PLOT_CONFIG.color_text_primary,
        );
        ui.metric_card(
            &UI_TEXT.metric_total_return,
            &format_brl(summary.total_gain),
            get_outcome_color(summary.total_gain),
        );
        ui.metric_card(
            &UI_TEXT.metric_profitable_ops,
            &summary.profitable_periods.to_string(),
            PLOT_CONFIG.color_info,
        );

        ui.separator();

        ui.vertical(|ui| {
            for (label, value) in [
                (&UI_TEXT.metric_precision, evaluation.precision),
                (&UI_TEXT.metric_recall, evaluation.recall),
                (&UI_TEXT.metric_f1, evaluation.f1),
                (&UI_TEXT.metric_specificity, evaluation.specificity),
            ] {
                ui.metric(label, &format_pct(value), PLOT_CONFIG.color_text_neutral);
            }
        });

        ui.separator();

        render_confusion_grid(ui, run);
    });
}

fn render_confusion_grid(ui: &mut Ui, run: &PipelineRun) {
    let grid = run.evaluation.confusion.as_grid();
    ui.vertical(|ui| {
        ui.label_subheader(UI_TEXT.confusion_heading.as_str());
        Grid::new("confusion_grid")
            .striped(true)
            .spacing([12.0, 2.0])
            .show(ui, |ui| {
                ui.label_subdued(format!(
                    "{} \\ {}",
                    UI_TEXT.confusion_actual, UI_TEXT.confusion_predicted
                ));
                ui.label_subdued("0");
                ui.label_subdued("1");
                ui.end_row();

                for (actual, row) in grid.iter().enumerate() {
                    ui.label_subdued(actual.to_string());
                    for (predicted, count) in row.iter().enumerate() {
                        let color = if actual == predicted {
                            PLOT_CONFIG.color_profit
                        } else {
                            PLOT_CONFIG.color_loss
                        };
                        ui.label(RichText::new(count.to_string()).strong().color(color));
                    }
                    ui.end_row();
                }
            });
    });
}
