//! Averaging Strategies
//!
//! Plan category decides how many trailing dates feed the prediction.

mod averaging;
mod selector;

pub use averaging::{AveragingStrategy, predict_next};
pub use selector::StrategySelector;
