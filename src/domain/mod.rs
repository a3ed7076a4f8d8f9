// Domain types and value objects
mod fetch_key;
mod label;
mod price_point;

pub use fetch_key::{DataInterval, FetchKey};
pub use label::Label;
pub use price_point::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, PricePoint};
