use {
    chrono::{Datelike, NaiveDate},
    serde::{Deserialize, Serialize},
};

pub const FEATURE_COUNT: usize = 5;
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["Open", "High", "Low", "Close", "Volume"];

/// Model input for one trading day, in `FEATURE_NAMES` order.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// One daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn features(&self) -> FeatureVector {
        [self.open, self.high, self.low, self.close, self.volume]
    }

    /// Fractional change from this close to `next`'s close.
    /// `None` when this close is not a usable divisor.
    pub fn return_to(&self, next: &PricePoint) -> Option<f64> {
        if self.close == 0.0 || !self.close.is_finite() {
            return None;
        }
        Some((next.close - self.close) / self.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(close: f64) -> PricePoint {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        PricePoint::new(date, close - 1.0, close + 1.0, close - 2.0, close, 1_000.0)
    }

    #[test]
    fn test_features_order() {
        let p = bar(10.0);
        assert_eq!(p.features(), [9.0, 11.0, 8.0, 10.0, 1_000.0]);
        assert_eq!(p.year(), 2024);
    }

    #[test]
    fn test_return_to() {
        let r = bar(10.0).return_to(&bar(11.0)).unwrap();
        assert!((r - 0.1).abs() < 1e-10);
        assert!(bar(0.0).return_to(&bar(1.0)).is_none());
    }
}
