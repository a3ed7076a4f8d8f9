use crate::{
    domain::{FEATURE_COUNT, FeatureVector},
    utils::mean_and_stddev,
};

/// Per-feature standardization fitted on training rows only.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    means: FeatureVector,
    std_devs: FeatureVector,
}

impl StandardScaler {
    /// Relative threshold below which a feature counts as constant.
    const CONSTANT_EPSILON: f64 = 1e-12;

    /// Population mean and standard deviation of each column.
    pub fn fit(rows: &[FeatureVector]) -> Self {
        let mut means = [0.0; FEATURE_COUNT];
        let mut std_devs = [0.0; FEATURE_COUNT];
        for col in 0..FEATURE_COUNT {
            let column: Vec<f64> = rows.iter().map(|r| r[col]).collect();
            (means[col], std_devs[col]) = mean_and_stddev(&column);
        }
        Self { means, std_devs }
    }

    pub fn means(&self) -> &FeatureVector {
        &self.means
    }

    pub fn std_devs(&self) -> &FeatureVector {
        &self.std_devs
    }

    // Constant columns divide by one, so they centre to zero instead of NaN.
    fn scale(&self, col: usize) -> f64 {
        let std = self.std_devs[col];
        if !std.is_finite() || std <= Self::CONSTANT_EPSILON * self.means[col].abs().max(1.0) {
            1.0
        } else {
            std
        }
    }

    pub fn transform_one(&self, row: &FeatureVector) -> FeatureVector {
        std::array::from_fn(|col| (row[col] - self.means[col]) / self.scale(col))
    }

    pub fn transform(&self, rows: &[FeatureVector]) -> Vec<FeatureVector> {
        rows.iter().map(|r| self.transform_one(r)).collect()
    }
}
