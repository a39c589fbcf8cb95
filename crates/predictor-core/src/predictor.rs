//! Next-Date Predictor
//!
//! Linear pipeline: fetch history, reject empty histories, pick the plan's
//! averaging strategy, compute the next date.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::dates::format_date;
use crate::error::{PredictorError, Result};
use crate::history::HistoryClient;
use crate::strategy::{AveragingStrategy, StrategySelector};

/// Outcome of a successful run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prediction {
    NextDate {
        plan: String,
        strategy: AveragingStrategy,
        date: NaiveDateTime,
    },
    /// Plan belongs to no category; nothing was computed
    NoStrategy { plan: String },
}

impl Prediction {
    /// Output line, or `None` when there is nothing to report
    pub fn render(&self) -> Option<String> {
        match self {
            Self::NextDate { date, .. } => Some(format!("Next Date : {}", format_date(*date))),
            Self::NoStrategy { .. } => None,
        }
    }

    pub const fn date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::NextDate { date, .. } => Some(*date),
            Self::NoStrategy { .. } => None,
        }
    }
}

pub struct Predictor {
    history: Arc<dyn HistoryClient>,
    selector: StrategySelector,
}

impl Predictor {
    pub fn new(history: Arc<dyn HistoryClient>, selector: StrategySelector) -> Self {
        Self { history, selector }
    }

    pub async fn predict(&self, plan: &str) -> Result<Prediction> {
        let history = self.history.fetch_history(plan).await?;
        debug!(
            source = self.history.name(),
            plan,
            records = history.returns.len(),
            "history fetched"
        );

        if history.returns.is_empty() {
            return Err(PredictorError::NoTransactionsFound { plan: plan.into() });
        }

        let Some(strategy) = self.selector.select(plan) else {
            warn!(plan, "plan has no averaging strategy, skipping prediction");
            return Ok(Prediction::NoStrategy { plan: plan.into() });
        };

        let skipped = history.skipped_dates();
        if skipped > 0 {
            warn!(plan, skipped, "ignoring records with missing or unparseable dates");
        }

        let dates = history.transaction_dates();
        if dates.is_empty() {
            return Err(PredictorError::NoTransactionsFound { plan: plan.into() });
        }

        info!(
            plan,
            strategy = strategy.name(),
            dates = dates.len(),
            total_returns = %history.total_returns(),
            "predicting next date"
        );

        let date = strategy
            .next_date(&dates)
            .ok_or_else(|| PredictorError::unknown("Predicted date is out of range"))?;

        Ok(Prediction::NextDate {
            plan: plan.into(),
            strategy,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PredictorConfig;
    use crate::error::ErrorCode;
    use crate::history::MockHistoryClient;
    use reqwest::StatusCode;

    fn predictor(mock: MockHistoryClient) -> (Predictor, Arc<MockHistoryClient>) {
        let mock = Arc::new(mock);
        let selector = PredictorConfig::default().selector().unwrap();
        (Predictor::new(mock.clone(), selector), mock)
    }

    fn history(dates: &[&str]) -> String {
        let returns: Vec<String> = dates
            .iter()
            .map(|d| format!(r#"{{ "tranDate": "{d}", "tranAmount": "10" }}"#))
            .collect();
        format!(r#"{{ "name": "n", "investmentType": "t", "returns": [{}] }}"#, returns.join(","))
    }

    #[tokio::test]
    async fn test_bi_average_prediction() {
        let (predictor, _) = predictor(MockHistoryClient::new().with_body(
            "LOWCAP",
            history(&["01-01-2017", "01-02-2017", "01-03-2017"]),
        ));

        let prediction = predictor.predict("LOWCAP").await.unwrap();
        // Feb has 28 days: mean of Feb 1 and Mar 1 is Feb 15, so the next date is Mar 15
        assert_eq!(
            prediction.render().as_deref(),
            Some("Next Date : 15-03-2017 00:00:00")
        );
        assert!(matches!(
            prediction,
            Prediction::NextDate { strategy: AveragingStrategy::BiAverage, .. }
        ));
    }

    #[tokio::test]
    async fn test_tri_average_prediction() {
        let (predictor, _) = predictor(MockHistoryClient::new().with_body(
            "LONGTERM",
            history(&["01-01-2017", "02-01-2017", "03-01-2017", "04-01-2017 12:00:00"]),
        ));

        let prediction = predictor.predict("LONGTERM").await.unwrap();
        // Window Jan 2, Jan 3, Jan 4 12:00 has mean Jan 3 04:00, reflected to Jan 5 20:00
        assert_eq!(
            prediction.render().as_deref(),
            Some("Next Date : 05-01-2017 20:00:00")
        );
    }

    #[tokio::test]
    async fn test_unknown_plan_computes_nothing() {
        let (predictor, mock) = predictor(
            MockHistoryClient::new().with_body("UNKNOWN", history(&["01-01-2017"])),
        );

        let prediction = predictor.predict("UNKNOWN").await.unwrap();
        assert_eq!(prediction, Prediction::NoStrategy { plan: "UNKNOWN".into() });
        assert!(prediction.render().is_none());
        assert!(prediction.date().is_none());
        assert_eq!(mock.requests().await, vec!["UNKNOWN"]);
    }

    #[tokio::test]
    async fn test_empty_history_rejected() {
        let (predictor, _) = predictor(
            MockHistoryClient::new()
                .with_body("MIDCAP", r#"{ "name": "n", "returns": [] }"#)
                .with_body("MIDTERM", r#"{ "name": "n" }"#),
        );

        for plan in ["MIDCAP", "MIDTERM"] {
            let err = predictor.predict(plan).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::NoTransactionsFound);
        }
    }

    #[tokio::test]
    async fn test_empty_history_rejected_before_strategy_lookup() {
        let (predictor, _) = predictor(
            MockHistoryClient::new().with_body("UNKNOWN", r#"{ "returns": [] }"#),
        );
        let err = predictor.predict("UNKNOWN").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoTransactionsFound);
    }

    #[tokio::test]
    async fn test_unparseable_dates_are_skipped() {
        let (predictor, _) = predictor(MockHistoryClient::new().with_body(
            "HIGHCAP",
            history(&["01-01-2017", "garbage", "03-01-2017", "2017-01-09"]),
        ));

        let prediction = predictor.predict("HIGHCAP").await.unwrap();
        assert_eq!(
            prediction.render().as_deref(),
            Some("Next Date : 04-01-2017 00:00:00")
        );
    }

    #[tokio::test]
    async fn test_all_dates_unparseable() {
        let (predictor, _) = predictor(
            MockHistoryClient::new().with_body("HIGHCAP", history(&["soon", "later"])),
        );
        let err = predictor.predict("HIGHCAP").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoTransactionsFound);
    }

    #[tokio::test]
    async fn test_status_not_ok_propagates() {
        let (predictor, _) = predictor(
            MockHistoryClient::new().with_status("LOWCAP", StatusCode::INTERNAL_SERVER_ERROR),
        );
        let err = predictor.predict("LOWCAP").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StatusNotOk);
        assert_eq!(
            err.render(),
            "Error occured with error code = 3 . Error Message = URL returned with status not OK"
        );
    }

    #[tokio::test]
    async fn test_invalid_json_propagates() {
        let (predictor, _) =
            predictor(MockHistoryClient::new().with_body("LOWCAP", r#"{ "returns": 42 }"#));
        let err = predictor.predict("LOWCAP").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidJson);
    }

    #[tokio::test]
    async fn test_single_record_predicts_same_date() {
        let (predictor, _) = predictor(
            MockHistoryClient::new().with_body("SHORTTERM", history(&["07-07-2017 07:07:07"])),
        );
        let prediction = predictor.predict("SHORTTERM").await.unwrap();
        assert_eq!(
            prediction.render().as_deref(),
            Some("Next Date : 07-07-2017 07:07:07")
        );
    }
}
