use crate::conditions;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Maximum number of daily summaries produced per run.
pub const FORECAST_DAYS: usize = 5;

/// Condition assumed for samples that carry none.
const DEFAULT_CONDITION: &str = "Clear";

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One three-hour forecast sample from the provider, temperatures in Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastSample {
    pub timestamp_utc: DateTime<Utc>,
    pub min_temperature_c: Option<f64>,
    pub max_temperature_c: Option<f64>,
    pub rain_volume_3h_mm: Option<f64>,
    pub snow_volume_3h_mm: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub condition_code: Option<String>,
    pub icon_code: Option<String>,
}

impl RawForecastSample {
    /// Calendar date of the sample in UTC.
    pub fn date_key(&self) -> NaiveDate {
        self.timestamp_utc.date_naive()
    }

    fn precipitation_volume(&self) -> f64 {
        self.rain_volume_3h_mm.unwrap_or(0.0) + self.snow_volume_3h_mm.unwrap_or(0.0)
    }

    fn has_rain(&self) -> bool {
        self.rain_volume_3h_mm.is_some_and(|v| v > 0.0)
    }

    fn has_snow(&self) -> bool {
        self.snow_volume_3h_mm.is_some_and(|v| v > 0.0)
    }

    fn condition(&self) -> &str {
        self.condition_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .unwrap_or(DEFAULT_CONDITION)
    }
}

/// Running per-day accumulator.
///
/// A fresh bucket holds no values; folding the first sample into it yields
/// exactly that sample's min/max/probability, and every later sample merges
/// only the fields it actually carries.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub min_temperature_c: Option<f64>,
    pub max_temperature_c: Option<f64>,
    pub max_precipitation_probability: Option<f64>,
    pub total_precipitation_mm: f64,
    pub saw_rain: bool,
    pub saw_snow: bool,
    /// Condition code occurrence counts in first-seen order.
    pub condition_counts: Vec<(String, u32)>,
    pub icon_code: Option<String>,
}

impl DailyBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            min_temperature_c: None,
            max_temperature_c: None,
            max_precipitation_probability: None,
            total_precipitation_mm: 0.0,
            saw_rain: false,
            saw_snow: false,
            condition_counts: Vec::new(),
            icon_code: None,
        }
    }

    pub fn absorb(&mut self, sample: &RawForecastSample) {
        self.min_temperature_c = merge(self.min_temperature_c, sample.min_temperature_c, f64::min);
        self.max_temperature_c = merge(self.max_temperature_c, sample.max_temperature_c, f64::max);
        self.max_precipitation_probability = merge(
            self.max_precipitation_probability,
            sample.precipitation_probability,
            f64::max,
        );

        self.total_precipitation_mm += sample.precipitation_volume();
        self.saw_rain |= sample.has_rain();
        self.saw_snow |= sample.has_snow();

        let condition = sample.condition();
        match self
            .condition_counts
            .iter()
            .position(|entry| entry.0 == condition)
        {
            Some(index) => self.condition_counts[index].1 += 1,
            None => self.condition_counts.push((condition.to_string(), 1)),
        }

        if self.icon_code.is_none() {
            if let Some(icon) = sample.icon_code.as_deref().filter(|s| !s.is_empty()) {
                self.icon_code = Some(icon.to_string());
            }
        }
    }

    /// Most frequent condition code; the first-seen code wins ties.
    pub fn dominant_condition(&self) -> &str {
        let mut best: Option<(&str, u32)> = None;
        for (code, count) in &self.condition_counts {
            match best {
                Some((_, best_count)) if *count <= best_count => {}
                _ => best = Some((code.as_str(), *count)),
            }
        }
        best.map(|(code, _)| code).unwrap_or(DEFAULT_CONDITION)
    }

    pub fn precipitation_kind(&self) -> PrecipitationKind {
        match (self.saw_rain, self.saw_snow) {
            (true, true) => PrecipitationKind::RainAndSnow,
            (false, true) => PrecipitationKind::Snow,
            (true, false) => PrecipitationKind::Rain,
            (false, false) => PrecipitationKind::None,
        }
    }

    pub fn summarize(&self) -> DailySummary {
        let condition = self.dominant_condition().to_string();
        let condition_label = conditions::describe(Some(condition.as_str())).to_string();
        let condition_emoji = conditions::emoji(Some(condition.as_str()));

        DailySummary {
            date: self.date,
            weekday_label: weekday_label(self.date),
            min_temperature_c: self.min_temperature_c,
            max_temperature_c: self.max_temperature_c,
            precipitation_probability_percent: (self
                .max_precipitation_probability
                .unwrap_or(0.0)
                * 100.0)
                .round() as i32,
            precipitation_mm: (self.total_precipitation_mm * 10.0).round() / 10.0,
            precipitation_kind: self.precipitation_kind(),
            condition,
            condition_label,
            condition_emoji,
            icon_code: self.icon_code.clone(),
        }
    }
}

fn merge(current: Option<f64>, incoming: Option<f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    match (current, incoming) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (None, b) => b,
        (a, None) => a,
    }
}

/// Kind of precipitation observed during a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecipitationKind {
    RainAndSnow,
    Snow,
    Rain,
    None,
}

impl PrecipitationKind {
    pub fn label(&self) -> &'static str {
        match self {
            PrecipitationKind::RainAndSnow => "rain and snow",
            PrecipitationKind::Snow => "snow",
            PrecipitationKind::Rain => "rain",
            PrecipitationKind::None => "no precipitation",
        }
    }
}

/// Finalized forecast for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub weekday_label: &'static str,
    pub min_temperature_c: Option<f64>,
    pub max_temperature_c: Option<f64>,
    pub precipitation_probability_percent: i32,
    /// Total rain plus snow, rounded to one decimal.
    pub precipitation_mm: f64,
    pub precipitation_kind: PrecipitationKind,
    pub condition: String,
    pub condition_label: String,
    pub condition_emoji: &'static str,
    pub icon_code: Option<String>,
}

impl DailySummary {
    /// Date formatted as `YYYY-MM-DD`.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Weekday label for a calendar date, Sunday first.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize]
}

/// Group samples into UTC calendar days.
pub fn bucket_by_day(samples: &[RawForecastSample]) -> BTreeMap<NaiveDate, DailyBucket> {
    let mut buckets: BTreeMap<NaiveDate, DailyBucket> = BTreeMap::new();
    for sample in samples {
        let date = sample.date_key();
        buckets
            .entry(date)
            .or_insert_with(|| DailyBucket::new(date))
            .absorb(sample);
    }
    buckets
}

/// Aggregate raw samples into at most [`FORECAST_DAYS`] daily summaries,
/// ascending by date.
pub fn aggregate(samples: &[RawForecastSample]) -> Vec<DailySummary> {
    let buckets = bucket_by_day(samples);

    debug!(
        "Aggregated {} samples into {} days",
        samples.len(),
        buckets.len()
    );

    buckets
        .values()
        .take(FORECAST_DAYS)
        .map(DailyBucket::summarize)
        .collect()
}
