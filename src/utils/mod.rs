mod maths_utils;
mod perf;
mod time_utils;

pub use time_utils::{AppInstant, TimeUtils};

pub(crate) use maths_utils::{euclidean_distance, mean_and_stddev, running_sum, safe_ratio};
