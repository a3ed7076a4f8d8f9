use {
    crate::{
        config::PLOT_CONFIG,
        engine::PipelineRun,
        ui::{UI_TEXT, UiStyleExt, apply_opacity},
        utils::TimeUtils,
    },
    eframe::egui::Ui,
    egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points},
    serde::{Deserialize, Serialize},
    std::{collections::BTreeSet, ops::RangeInclusive},
    strum_macros::EnumIter,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
pub enum ChartKind {
    ClosingPrice,
    TargetDistribution,
    CumulativeProfit,
    VolumeVsPrice,
}

impl ChartKind {
    pub fn default_selection() -> BTreeSet<ChartKind> {
        BTreeSet::from([ChartKind::ClosingPrice, ChartKind::CumulativeProfit])
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ChartKind::ClosingPrice => &UI_TEXT.chart_closing_price,
            ChartKind::TargetDistribution => &UI_TEXT.chart_target_distribution,
            ChartKind::CumulativeProfit => &UI_TEXT.chart_cumulative_profit,
            ChartKind::VolumeVsPrice => &UI_TEXT.chart_volume_vs_price,
        };
        write!(f, "{}", text)
    }
}

fn date_axis_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    TimeUtils::plot_x_to_date(mark.value)
        .map(TimeUtils::format_date)
        .unwrap_or_default()
}

pub(crate) fn render_chart(ui: &mut Ui, kind: ChartKind, run: &PipelineRun) {
    ui.label_subheader(kind.to_string());
    match kind {
        ChartKind::ClosingPrice => closing_price(ui, run),
        ChartKind::TargetDistribution => target_distribution(ui, run),
        ChartKind::CumulativeProfit => cumulative_profit(ui, run),
        ChartKind::VolumeVsPrice => volume_vs_price(ui, run),
    }
    ui.add_space(12.0);
}

fn closing_price(ui: &mut Ui, run: &PipelineRun) {
    let points: Vec<[f64; 2]> = run
        .points
        .iter()
        .map(|p| [TimeUtils::date_to_plot_x(p.date), p.close])
        .collect();

    Plot::new("closing_price_plot")
        .height(PLOT_CONFIG.chart_height)
        .x_axis_formatter(date_axis_label)
        .y_axis_label(UI_TEXT.plot_close_axis.as_str())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(run.settings.symbol.as_str(), PlotPoints::new(points))
                    .color(PLOT_CONFIG.color_close_line)
                    .width(PLOT_CONFIG.line_width),
            );
        });
}

fn target_distribution(ui: &mut Ui, run: &PipelineRun) {
    let (down, up) = run.dataset.class_counts();
    let bars = vec![
        Bar::new(0.0, down as f64)
            .width(PLOT_CONFIG.bar_width)
            .name("0")
            .fill(PLOT_CONFIG.color_target_down),
        Bar::new(1.0, up as f64)
            .width(PLOT_CONFIG.bar_width)
            .name("1")
            .fill(PLOT_CONFIG.color_target_up),
    ];

    Plot::new("target_distribution_plot")
        .height(PLOT_CONFIG.chart_height)
        .y_axis_label(UI_TEXT.plot_count_axis.as_str())
        .x_axis_formatter(|mark, _| match mark.value {
            v if v == 0.0 => "0".to_string(),
            v if v == 1.0 => "1".to_string(),
            _ => String::new(),
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Target", bars));
        });
}

fn cumulative_profit(ui: &mut Ui, run: &PipelineRun) {
    let points: Vec<[f64; 2]> = run
        .backtest
        .cumulative_gains()
        .into_iter()
        .map(|(date, total)| [TimeUtils::date_to_plot_x(date), total])
        .collect();

    Plot::new("cumulative_profit_plot")
        .height(PLOT_CONFIG.chart_height)
        .x_axis_formatter(date_axis_label)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(UI_TEXT.chart_cumulative_profit.as_str(), PlotPoints::new(points))
                    .color(PLOT_CONFIG.color_cumulative_profit)
                    .width(PLOT_CONFIG.line_width),
            );
        });
}

fn volume_vs_price(ui: &mut Ui, run: &PipelineRun) {
    let points: Vec<[f64; 2]> = run.points.iter().map(|p| [p.volume, p.close]).collect();

    Plot::new("volume_vs_price_plot")
        .height(PLOT_CONFIG.chart_height)
        .x_axis_label(UI_TEXT.plot_volume_axis.as_str())
        .y_axis_label(UI_TEXT.plot_close_axis.as_str())
        .legend(Legend::default())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(UI_TEXT.chart_volume_vs_price.as_str(), PlotPoints::new(points))
                    .radius(PLOT_CONFIG.scatter_radius)
                    .color(apply_opacity(
                        PLOT_CONFIG.color_scatter,
                        PLOT_CONFIG.scatter_opacity_pct,
                    )),
            );
        });
}
