use std::sync::LazyLock;

pub struct UiText {
    pub app_heading: String,

    // --- Settings panel ---
    pub settings_heading: String,
    pub split_heading: String,
    pub split_by_year: String,
    pub split_chronological: String,
    pub train_years_label: String,
    pub test_year_label: String,
    pub test_fraction_label: String,
    pub range_heading: String,
    pub start_label: String,
    pub end_label: String,
    pub date_hint: String,
    pub invalid_date: String,
    pub neighbors_label: String,
    pub charts_heading: String,
    pub refresh_button: String,
    pub refresh_hover: String,

    // --- Header metrics ---
    pub metric_accuracy: String,
    pub metric_total_return: String,
    pub metric_profitable_ops: String,
    pub metric_precision: String,
    pub metric_recall: String,
    pub metric_f1: String,
    pub metric_specificity: String,
    pub confusion_heading: String,
    pub confusion_actual: String,
    pub confusion_predicted: String,

    // --- Charts ---
    pub chart_closing_price: String,
    pub chart_target_distribution: String,
    pub chart_cumulative_profit: String,
    pub chart_volume_vs_price: String,
    pub plot_close_axis: String,
    pub plot_volume_axis: String,
    pub plot_count_axis: String,

    // --- Backtest table ---
    pub backtest_heading: String,
    pub col_date: String,
    pub col_close: String,
    pub col_actual: String,
    pub col_predicted: String,
    pub col_return: String,
    pub col_gain: String,

    // --- Status / central panel ---
    pub status_fetching: String,
    pub status_idle: String,
    pub status_source: String,
    pub status_fetched_at: String,
    pub status_memo: String,
    pub cp_waiting: String,
    pub error_heading: String,
    pub warning_prefix: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_heading: "B3 Dashboard".to_string(),

    settings_heading: "Settings".to_string(),
    split_heading: "Train / test split".to_string(),
    split_by_year: "By calendar year".to_string(),
    split_chronological: "Chronological".to_string(),
    train_years_label: "Training years".to_string(),
    test_year_label: "Test year".to_string(),
    test_fraction_label: "Held-out share".to_string(),
    range_heading: "Download range".to_string(),
    start_label: "Start".to_string(),
    end_label: "End".to_string(),
    date_hint: "YYYY-MM-DD".to_string(),
    invalid_date: "Invalid date".to_string(),
    neighbors_label: "Neighbors (k)".to_string(),
    charts_heading: "Charts".to_string(),
    refresh_button: "Refresh data".to_string(),
    refresh_hover: "Download again, ignoring cached prices".to_string(),

    metric_accuracy: "Accuracy".to_string(),
    metric_total_return: "Total return".to_string(),
    metric_profitable_ops: "Profitable operations".to_string(),
    metric_precision: "Precision".to_string(),
    metric_recall: "Recall".to_string(),
    metric_f1: "F1".to_string(),
    metric_specificity: "Specificity".to_string(),
    confusion_heading: "Confusion matrix".to_string(),
    confusion_actual: "Actual".to_string(),
    confusion_predicted: "Predicted".to_string(),

    chart_closing_price: "Closing price".to_string(),
    chart_target_distribution: "Target distribution".to_string(),
    chart_cumulative_profit: "Cumulative profit".to_string(),
    chart_volume_vs_price: "Volume x Price".to_string(),
    plot_close_axis: "Close".to_string(),
    plot_volume_axis: "Volume".to_string(),
    plot_count_axis: "Days".to_string(),

    backtest_heading: "Backtest (test segment)".to_string(),
    col_date: "Date".to_string(),
    col_close: "Close".to_string(),
    col_actual: "Actual".to_string(),
    col_predicted: "Predicted".to_string(),
    col_return: "Return".to_string(),
    col_gain: "Gain".to_string(),

    status_fetching: "Downloading".to_string(),
    status_idle: "Idle".to_string(),
    status_source: "Source".to_string(),
    status_fetched_at: "Fetched".to_string(),
    status_memo: "Memo".to_string(),
    cp_waiting: "Waiting for price data...".to_string(),
    error_heading: "Run halted".to_string(),
    warning_prefix: "Warning".to_string(),
});
