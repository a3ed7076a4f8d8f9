//! Headless run of the dashboard pipeline, printed as tables.
//!
//! cargo run --bin analyze -- --test-year 2025 --train-years 2023,2024
//! cargo run --bin analyze -- --test-fraction 0.3 --neighbors 7 --rows 20

use {
    anyhow::Result,
    b3_dashboard::{
        DiskCache, FEATURE_NAMES, RunSettings, SplitPolicy, TestFraction, TrainYears, YahooChartProvider,
        run_from_source,
    },
    chrono::NaiveDate,
    clap::Parser,
    tabled::{Table, Tabled},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Train and backtest the next-day direction classifier")]
struct Args {
    /// Ticker as listed on Yahoo Finance
    #[arg(long)]
    symbol: Option<String>,

    /// First day to download (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day to download, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// `combined` or a comma separated list of years
    #[arg(long)]
    train_years: Option<TrainYears>,

    #[arg(long)]
    test_year: Option<i32>,

    /// Hold out the last share of rows instead of splitting by year
    #[arg(long, conflicts_with_all = ["train_years", "test_year"])]
    test_fraction: Option<TestFraction>,

    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    neighbors: Option<usize>,

    /// Ignore the local price cache
    #[arg(long, default_value_t = false)]
    refresh: bool,

    /// Backtest rows to print
    #[arg(long, default_value_t = 10)]
    rows: usize,
}

impl Args {
    fn into_settings(self) -> RunSettings {
        let defaults = RunSettings::default();

        let split = match self.test_fraction {
            Some(test_fraction) => SplitPolicy::Chronological { test_fraction },
            None => match defaults.split.clone() {
                SplitPolicy::YearRange {
                    train_years,
                    test_year,
                } => SplitPolicy::YearRange {
                    train_years: self.train_years.unwrap_or(train_years),
                    test_year: self.test_year.unwrap_or(test_year),
                },
                chronological => chronological,
            },
        };

        RunSettings {
            symbol: self.symbol.unwrap_or(defaults.symbol),
            start: self.start.unwrap_or(defaults.start),
            end: self.end.unwrap_or(defaults.end),
            split,
            neighbors: self.neighbors.unwrap_or(defaults.neighbors),
        }
    }
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct ConfusionRow {
    #[tabled(rename = "Actual \\ Predicted")]
    actual: &'static str,
    #[tabled(rename = "0")]
    predicted_down: usize,
    #[tabled(rename = "1")]
    predicted_up: usize,
}

#[derive(Tabled)]
struct ScalerRow {
    #[tabled(rename = "Feature")]
    feature: &'static str,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Std dev")]
    std_dev: String,
}

#[derive(Tabled)]
struct BacktestLine {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Predicted")]
    predicted: String,
    #[tabled(rename = "Return")]
    period_return: String,
    #[tabled(rename = "Gain")]
    gain: String,
}

fn pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn optional_pct(value: Option<f64>) -> String {
    value.map(pct).unwrap_or_else(|| "-".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let rows = args.rows;
    let refresh = args.refresh;
    let settings = args.into_settings();
    let provider = YahooChartProvider::new()?;
    let disk = DiskCache::default();

    let (run, origin) = match run_from_source(&provider, Some(&disk), &settings, refresh).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Run halted at {}: {}", e.stage, e.kind);
            std::process::exit(1);
        }
    };

    for warning in &run.warnings {
        println!("Warning: {}", warning);
    }

    let (down, up) = run.dataset.class_counts();
    let e = &run.evaluation;
    let s = run.backtest.summary;

    let summary = vec![
        MetricRow {
            name: "Symbol",
            value: run.settings.symbol.clone(),
        },
        MetricRow {
            name: "Source",
            value: origin.to_string(),
        },
        MetricRow {
            name: "Split",
            value: run.settings.split.to_string(),
        },
        MetricRow {
            name: "Rows (labeled)",
            value: format!("{} ({})", run.points.len(), run.dataset.len()),
        },
        MetricRow {
            name: "Train / test",
            value: format!("{} / {}", run.split.train.len(), run.split.test.len()),
        },
        MetricRow {
            name: "Targets 0 / 1",
            value: format!("{} / {}", down, up),
        },
        MetricRow {
            name: "Neighbors",
            value: run.model.classifier.k().to_string(),
        },
    ];
    println!("{}", Table::new(summary));

    let scaler = &run.model.scaler;
    let scaler_rows: Vec<ScalerRow> = FEATURE_NAMES
        .iter()
        .zip(scaler.means().iter().zip(scaler.std_devs()))
        .map(|(&feature, (mean, std_dev))| ScalerRow {
            feature,
            mean: format!("{:.4}", mean),
            std_dev: format!("{:.4}", std_dev),
        })
        .collect();
    println!("{}", Table::new(scaler_rows));

    let metrics = vec![
        MetricRow {
            name: "Accuracy",
            value: pct(e.accuracy),
        },
        MetricRow {
            name: "Precision",
            value: pct(e.precision),
        },
        MetricRow {
            name: "Recall",
            value: pct(e.recall),
        },
        MetricRow {
            name: "F1",
            value: pct(e.f1),
        },
        MetricRow {
            name: "Specificity",
            value: pct(e.specificity),
        },
    ];
    println!("{}", Table::new(metrics));

    let grid = e.confusion.as_grid();
    let confusion = vec![
        ConfusionRow {
            actual: "0",
            predicted_down: grid[0][0],
            predicted_up: grid[0][1],
        },
        ConfusionRow {
            actual: "1",
            predicted_down: grid[1][0],
            predicted_up: grid[1][1],
        },
    ];
    println!("{}", Table::new(confusion));

    let backtest = vec![
        MetricRow {
            name: "Total return (R$)",
            value: format!("{:.2}", s.total_gain),
        },
        MetricRow {
            name: "Mean gain",
            value: pct(s.mean_gain),
        },
        MetricRow {
            name: "Positive gains",
            value: pct(s.total_positive_gain),
        },
        MetricRow {
            name: "Negative gains",
            value: pct(s.total_negative_gain),
        },
        MetricRow {
            name: "Profitable / losing periods",
            value: format!("{} / {}", s.profitable_periods, s.losing_periods),
        },
    ];
    println!("{}", Table::new(backtest));

    let lines: Vec<BacktestLine> = run
        .backtest
        .rows
        .iter()
        .take(rows)
        .map(|r| BacktestLine {
            date: r.point.date.format("%Y-%m-%d").to_string(),
            close: format!("{:.2}", r.point.close),
            predicted: r.predicted.to_string(),
            period_return: optional_pct(r.period_return),
            gain: optional_pct(r.gain),
        })
        .collect();
    if !lines.is_empty() {
        println!("{}", Table::new(lines));
    }

    Ok(())
}
