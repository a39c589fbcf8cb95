//! # predictor-core
//!
//! Predicts an investment plan's next transaction date from its return
//! history.
//!
//! ## How it works
//!
//! 1. Fetch the plan's history (`GET <base-url>/<plan>`)
//! 2. Reject histories with no return records
//! 3. Pick the averaging strategy from the plan's category
//! 4. Reflect the last date of the trailing window around the window mean
//!
//! ## Example: bi-average plan
//!
//! ```text
//! returns   01-01-2017   01-02-2017   01-03-2017
//! window                 └──────────────────┘     (last 2)
//! mean                         15-02-2017
//! next                                  01-03 + 14 days = 15-03-2017
//! ```
//!
//! | Category   | Window | Default plans               |
//! |------------|--------|-----------------------------|
//! | bi-average | 2      | LOWCAP, MIDCAP, HIGHCAP     |
//! | tri-average| 3      | SHORTTERM, MIDTERM, LONGTERM|

pub mod config;
pub mod dates;
pub mod error;
pub mod history;
pub mod model;
pub mod predictor;
pub mod strategy;

pub use config::{ConfigError, PredictorConfig};
pub use error::{ErrorCode, PredictorError, Result};
pub use history::{HistoryClient, HttpHistoryClient, MockHistoryClient};
pub use model::{InvestmentHistory, InvestmentPlan, PlanCategory, TransactionRecord};
pub use predictor::{Prediction, Predictor};
pub use strategy::{AveragingStrategy, StrategySelector};
