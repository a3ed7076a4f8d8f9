use {
    crate::domain::{FeatureVector, Label, PricePoint},
    serde::{Deserialize, Serialize},
};

/// A trading day paired with whether the following close finished higher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledRow {
    pub point: PricePoint,
    pub target: Label,
}

/// Date-ordered labeled rows. The last fetched day never appears here because it has no next close.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledDataset {
    rows: Vec<LabeledRow>,
}

impl LabeledDataset {
    pub fn new(rows: Vec<LabeledRow>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0].point.date < w[1].point.date));
        Self { rows }
    }

    pub fn rows(&self) -> &[LabeledRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn features(&self) -> Vec<FeatureVector> {
        self.rows.iter().map(|r| r.point.features()).collect()
    }

    pub fn targets(&self) -> Vec<Label> {
        self.rows.iter().map(|r| r.target).collect()
    }

    pub fn points(&self) -> Vec<PricePoint> {
        self.rows.iter().map(|r| r.point).collect()
    }

    /// `(down, up)` counts, for the target distribution chart.
    pub fn class_counts(&self) -> (usize, usize) {
        let up = self.rows.iter().filter(|r| r.target.is_up()).count();
        (self.rows.len() - up, up)
    }

    /// Order-preserving subset.
    pub fn filtered(&self, keep: impl Fn(&LabeledRow) -> bool) -> Self {
        Self {
            rows: self.rows.iter().filter(|r| keep(r)).copied().collect(),
        }
    }

    /// Splits at `mid`: `[0, mid)` and `[mid, len)`.
    pub fn split_at(&self, mid: usize) -> (Self, Self) {
        let (head, tail) = self.rows.split_at(mid.min(self.rows.len()));
        (
            Self {
                rows: head.to_vec(),
            },
            Self {
                rows: tail.to_vec(),
            },
        )
    }
}
