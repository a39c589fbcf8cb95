//! History Sources
//!
//! Where an investment plan's return history comes from.

mod http;
mod mock;

pub use http::HttpHistoryClient;
pub use mock::MockHistoryClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::InvestmentHistory;

/// History client trait (Strategy pattern)
///
/// Implement this for each history source: the HTTP endpoint, fixtures, etc.
#[async_trait]
pub trait HistoryClient: Send + Sync {
    /// Fetch and decode the transaction history for a plan
    async fn fetch_history(&self, plan: &str) -> Result<InvestmentHistory>;

    /// Source name
    fn name(&self) -> &str;
}
