use {
    crate::{
        config::{DF, PLOT_CONFIG, RunSettings, SplitPolicy, TestFraction, TrainYears},
        ui::{ChartKind, UI_TEXT, UiStyleExt, section_heading},
        utils::TimeUtils,
    },
    chrono::{Datelike, NaiveDate},
    eframe::egui::{ComboBox, DragValue, RichText, Slider, TextEdit, Ui},
    std::collections::BTreeSet,
    strum::IntoEnumIterator,
};

pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Anything feeding the pipeline changed: re-run.
    RunSettingsChanged,
    RefreshRequested,
}

/// Text buffers for the date fields, so half-typed dates don't clobber the settings.
#[derive(Debug, Clone, Default)]
pub struct DateInputs {
    pub start: String,
    pub end: String,
}

impl DateInputs {
    pub fn from_settings(settings: &RunSettings) -> Self {
        Self {
            start: TimeUtils::format_date(settings.start),
            end: TimeUtils::format_date(settings.end),
        }
    }
}

pub struct SettingsPanel<'a> {
    settings: &'a mut RunSettings,
    dates: &'a mut DateInputs,
    charts: &'a mut BTreeSet<ChartKind>,
    busy: bool,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(
        settings: &'a mut RunSettings,
        dates: &'a mut DateInputs,
        charts: &'a mut BTreeSet<ChartKind>,
        busy: bool,
    ) -> Self {
        Self {
            settings,
            dates,
            charts,
            busy,
        }
    }

    fn split_section(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;
        ui.label_subheader(UI_TEXT.split_heading.as_str());

        let mut by_year = self.settings.split.is_year_range();
        let before = by_year;
        ui.radio_value(&mut by_year, true, UI_TEXT.split_by_year.as_str());
        ui.radio_value(&mut by_year, false, UI_TEXT.split_chronological.as_str());
        if by_year != before {
            self.settings.split = if by_year {
                SplitPolicy::default()
            } else {
                SplitPolicy::chronological_default()
            };
            changed = true;
        }

        let first_year = self.settings.start.year();
        let last_year = self.settings.end.year();

        match &mut self.settings.split {
            SplitPolicy::YearRange {
                train_years,
                test_year,
            } => {
                ui.label_subdued(UI_TEXT.train_years_label.as_str());
                ComboBox::from_id_salt("train_years")
                    .selected_text(train_years.to_string())
                    .show_ui(ui, |ui| {
                        for choice in TrainYears::choices() {
                            let text = choice.to_string();
                            changed |= ui.selectable_value(train_years, choice, text).changed();
                        }
                    });

                ui.label_subdued(UI_TEXT.test_year_label.as_str());
                let mut years: BTreeSet<i32> = (first_year.min(last_year)..=last_year.max(first_year)).collect();
                years.insert(*test_year);
                ComboBox::from_id_salt("test_year")
                    .selected_text(test_year.to_string())
                    .show_ui(ui, |ui| {
                        for year in years {
                            changed |= ui.selectable_value(test_year, year, year.to_string()).changed();
                        }
                    });
            }
            SplitPolicy::Chronological { test_fraction } => {
                let mut value = test_fraction.value();
                let response = ui.add(
                    Slider::new(&mut value, TestFraction::MIN..=TestFraction::MAX)
                        .text(UI_TEXT.test_fraction_label.as_str())
                        .custom_formatter(|v, _| format!("{:.0}%", v * 100.0)),
                );
                if response.changed() {
                    *test_fraction = TestFraction::new(value);
                    changed = true;
                }
            }
        }
        changed
    }

    fn date_field(ui: &mut Ui, label: &str, buffer: &mut String, target: &mut NaiveDate) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label_subdued(label);
            let response = ui.add(
                TextEdit::singleline(buffer)
                    .hint_text(UI_TEXT.date_hint.as_str())
                    .desired_width(90.0),
            );
            if response.lost_focus() {
                if let Ok(date) = TimeUtils::parse_date(buffer) {
                    if date != *target {
                        *target = date;
                        changed = true;
                    }
                }
            }
        });
        if TimeUtils::parse_date(buffer).is_err() {
            ui.label(
                RichText::new(UI_TEXT.invalid_date.as_str())
                    .small()
                    .color(PLOT_CONFIG.color_loss),
            );
        }
        changed
    }

    fn range_section(&mut self, ui: &mut Ui) -> bool {
        ui.label_subheader(UI_TEXT.range_heading.as_str());
        let start_changed = Self::date_field(
            ui,
            &UI_TEXT.start_label,
            &mut self.dates.start,
            &mut self.settings.start,
        );
        let end_changed = Self::date_field(
            ui,
            &UI_TEXT.end_label,
            &mut self.dates.end,
            &mut self.settings.end,
        );
        start_changed || end_changed
    }

    fn neighbors_section(&mut self, ui: &mut Ui) -> bool {
        ui.horizontal(|ui| {
            ui.label_subdued(UI_TEXT.neighbors_label.as_str());
            ui.add(DragValue::new(&mut self.settings.neighbors).range(1..=50))
                .changed()
        })
        .inner
    }

    fn charts_section(&mut self, ui: &mut Ui) {
        ui.label_subheader(UI_TEXT.charts_heading.as_str());
        for kind in ChartKind::iter() {
            let mut shown = self.charts.contains(&kind);
            if ui.checkbox(&mut shown, kind.to_string()).changed() {
                if shown {
                    self.charts.insert(kind);
                } else {
                    self.charts.remove(&kind);
                }
            }
        }
    }
}

impl Panel for SettingsPanel<'_> {
    type Event = SettingsEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.settings_heading.as_str());

        ui.label(
            RichText::new(&self.settings.symbol)
                .strong()
                .color(PLOT_CONFIG.color_info),
        );
        ui.add_space(6.0);

        let mut changed = self.split_section(ui);
        ui.add_space(8.0);
        changed |= self.range_section(ui);
        ui.add_space(8.0);
        changed |= self.neighbors_section(ui);
        ui.add_space(8.0);

        self.charts_section(ui);
        ui.add_space(12.0);

        if changed {
            if DF.log_settings {
                log::info!("Settings changed: {:?}", self.settings);
            }
            events.push(SettingsEvent::RunSettingsChanged);
        }

        let refresh = ui
            .add_enabled(!self.busy, eframe::egui::Button::new(UI_TEXT.refresh_button.as_str()))
            .on_hover_text(UI_TEXT.refresh_hover.as_str());
        if refresh.clicked() {
            events.push(SettingsEvent::RefreshRequested);
        }

        events
    }
}
