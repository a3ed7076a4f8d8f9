use {
    eframe::{
        Frame, Storage,
        egui::{CentralPanel, Context, RichText, ScrollArea, SidePanel, TopBottomPanel, Visuals},
    },
    serde::{Deserialize, Serialize},
    std::{
        collections::BTreeSet,
        sync::mpsc::{self, Receiver, Sender},
        time::Duration,
    },
};

use crate::{
    Cli,
    app::AppState,
    config::{DF, PLOT_CONFIG, RunSettings},
    data::{DiskCache, FetchedSeries, PriceCache, SeriesOrigin, YahooChartProvider},
    engine::{
        FailureKind, FetchRequest, FetchResult, PipelineError, Stage, classify_source_result,
        run_pipeline, spawn_fetch_worker,
    },
    ui::{
        ChartKind, DateInputs, Panel, SettingsEvent, SettingsPanel, UI_CONFIG, UI_TEXT,
        UiStyleExt, render_backtest_table, render_chart, render_metrics_header, section_heading,
        warning_title,
    },
    utils::TimeUtils,
};

#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct App {
    pub(crate) settings: RunSettings, // persists across sessions.
    pub(crate) charts: BTreeSet<ChartKind>,
    #[serde(skip)]
    pub(crate) dates: DateInputs,
    #[serde(skip)]
    memo: PriceCache,
    #[serde(skip)]
    state: AppState,
    #[serde(skip)]
    request_tx: Option<Sender<FetchRequest>>,
    #[serde(skip)]
    result_rx: Option<Receiver<FetchResult>>,
    /// Origin and download time of the series behind the current run.
    #[serde(skip)]
    last_fetch: Option<(SeriesOrigin, i64)>,
}

impl Default for App {
    fn default() -> Self {
        let settings = RunSettings::default();
        Self {
            dates: DateInputs::from_settings(&settings),
            settings,
            charts: ChartKind::default_selection(),
            memo: PriceCache::new(),
            state: AppState::default(),
            request_tx: None,
            result_rx: None,
            last_fetch: None,
        }
    }
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let mut app: App = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };
        app.dates = DateInputs::from_settings(&app.settings);

        match YahooChartProvider::new() {
            Ok(provider) => {
                let (request_tx, request_rx) = mpsc::channel();
                let (result_tx, result_rx) = mpsc::channel();
                spawn_fetch_worker(
                    Box::new(provider),
                    Some(DiskCache::default()),
                    request_rx,
                    result_tx,
                );
                app.request_tx = Some(request_tx);
                app.result_rx = Some(result_rx);
                app.request_run(args.refresh);
            }
            Err(e) => {
                log::error!("Market data provider unavailable: {:#}", e);
                app.state = AppState::Failed(PipelineError::new(
                    Stage::DataRetrieval,
                    FailureKind::Source(format!("{:#}", e)),
                ));
            }
        }

        app
    }

    /// Runs from the memo when possible, otherwise asks the worker for the series.
    fn request_run(&mut self, refresh: bool) {
        let key = self.settings.fetch_key();
        if let Some(series) = self.memo.lookup(&key, refresh) {
            self.run_with(series);
            return;
        }

        let Some(tx) = &self.request_tx else {
            return;
        };
        if tx
            .send(FetchRequest {
                key: key.clone(),
                refresh,
            })
            .is_err()
        {
            log::error!("Fetch worker has stopped; cannot request {}", key);
            self.state = AppState::Failed(PipelineError::new(
                Stage::DataRetrieval,
                FailureKind::Source("fetch worker stopped".to_string()),
            ));
            return;
        }
        self.state = AppState::Fetching { key };
    }

    fn run_with(&mut self, series: FetchedSeries) {
        self.last_fetch = Some((series.origin, series.fetched_at_ms));
        let outcome = classify_source_result(Ok(series.points))
            .and_then(|points| run_pipeline(points, &self.settings));
        self.state = match outcome {
            Ok(run) => AppState::Ready(Box::new(run)),
            Err(e) => {
                log::error!("{}", e);
                AppState::Failed(e)
            }
        };
    }

    fn poll_worker(&mut self) {
        let Some(rx) = &self.result_rx else {
            return;
        };
        let responses: Vec<FetchResult> = rx.try_iter().collect();

        for response in responses {
            if DF.log_worker {
                log::info!("Fetched {} in {}ms", response.key, response.duration_ms);
            }
            let wanted = self.settings.fetch_key();
            match self.memo.accept(&wanted, &response.key, response.result) {
                None => {}
                Some(Ok(series)) => self.run_with(series),
                Some(Err(e)) => {
                    let err = classify_source_result(Err(e))
                        .err()
                        .unwrap_or_else(|| PipelineError::new(Stage::DataRetrieval, FailureKind::NoData));
                    log::error!("{}", err);
                    self.state = AppState::Failed(err);
                }
            }
        }
    }

    fn render_left_panel(&mut self, ctx: &Context) {
        let busy = self.state.is_fetching();
        let events = SidePanel::left("settings_panel")
            .exact_width(UI_CONFIG.side_panel_width)
            .resizable(false)
            .frame(UI_CONFIG.side_panel_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .show(ui, |ui| {
                        SettingsPanel::new(&mut self.settings, &mut self.dates, &mut self.charts, busy)
                            .render(ui)
                    })
                    .inner
            })
            .inner;

        for event in events {
            match event {
                SettingsEvent::RunSettingsChanged => self.request_run(false),
                SettingsEvent::RefreshRequested => self.request_run(true),
            }
        }
    }

    fn render_top_panel(&self, ctx: &Context) {
        TopBottomPanel::top("metrics_header")
            .frame(UI_CONFIG.top_panel_frame())
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading(
                    RichText::new(format!("{} - {}", UI_TEXT.app_heading, self.settings.symbol))
                        .color(UI_CONFIG.colors.heading),
                );
                ui.label_subdued(self.settings.split.to_string());
                if let Some(run) = self.state.run() {
                    ui.add_space(4.0);
                    render_metrics_header(ui, run);
                }
            });
    }

    fn render_status_panel(&self, ctx: &Context) {
        TopBottomPanel::bottom("status_panel")
            .frame(UI_CONFIG.bottom_panel_frame())
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let status = match &self.state {
                        AppState::Fetching { key } => format!("{} {}...", UI_TEXT.status_fetching, key),
                        AppState::Ready(run) => format!(
                            "{} rows, {} train / {} test",
                            run.points.len(),
                            run.split.train.len(),
                            run.split.test.len()
                        ),
                        AppState::Failed(e) => e.to_string(),
                        AppState::Idle => UI_TEXT.status_idle.clone(),
                    };
                    ui.label_subdued(status);
                    ui.separator();
                    if let Some((origin, fetched_at_ms)) = self.last_fetch {
                        ui.metric(&UI_TEXT.status_source, &origin.to_string(), PLOT_CONFIG.color_info);
                        ui.metric(
                            &UI_TEXT.status_fetched_at,
                            &TimeUtils::format_timestamp_ms(fetched_at_ms),
                            PLOT_CONFIG.color_text_neutral,
                        );
                        ui.separator();
                    }
                    ui.metric(
                        &UI_TEXT.status_memo,
                        &format!(
                            "{} cached, {} hits / {} misses",
                            self.memo.len(),
                            self.memo.hits(),
                            self.memo.misses()
                        ),
                        PLOT_CONFIG.color_text_neutral,
                    );
                });
            });
    }

    fn render_central_panel(&self, ctx: &Context) {
        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    for warning in self.settings.validate() {
                        ui.banner(PLOT_CONFIG.color_warning, &warning_title(), &warning.to_string());
                    }

                    match &self.state {
                        AppState::Idle | AppState::Fetching { .. } => {
                            ui.add_space(20.0);
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(UI_TEXT.cp_waiting.as_str());
                            });
                        }
                        AppState::Failed(e) => {
                            ui.banner(PLOT_CONFIG.color_loss, &UI_TEXT.error_heading, &e.to_string());
                        }
                        AppState::Ready(run) => {
                            for kind in &self.charts {
                                render_chart(ui, *kind, run);
                            }
                            section_heading(ui, UI_TEXT.backtest_heading.as_str());
                            render_backtest_table(ui, &run.backtest, &run.split.test);
                        }
                    }
                });
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        self.poll_worker();

        self.render_left_panel(ctx);
        self.render_top_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        if self.state.is_fetching() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        if DF.log_settings {
            log::info!("SAVE [App]: {:?}", self.settings);
        }
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.extreme_bg_color = PLOT_CONFIG.color_widget_background;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}
