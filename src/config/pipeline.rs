/// Defaults for a dashboard run.
pub struct PipelineDefaults {
    pub symbol: &'static str,
    /// (year, month, day), inclusive
    pub start: (i32, u32, u32),
    /// (year, month, day), inclusive
    pub end: (i32, u32, u32),
    pub neighbors: usize,
    pub test_fraction: f64,
    /// Years offered as individual training buckets; "combined" means all of them.
    pub train_year_options: &'static [i32],
    pub test_year: i32,
}

pub const PIPELINE: PipelineDefaults = PipelineDefaults {
    symbol: "PETR4.SA",
    start: (2023, 1, 1),
    end: (2025, 12, 31),
    neighbors: 5,
    test_fraction: 0.3,
    train_year_options: &[2023, 2024],
    test_year: 2025,
};
