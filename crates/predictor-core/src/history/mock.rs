//! Mock History Client
//!
//! For testing and offline runs. Serves canned JSON bodies or statuses per
//! plan and decodes them exactly like the HTTP client does.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use tokio::sync::Mutex;

use super::HistoryClient;
use crate::error::{PredictorError, Result};
use crate::model::{InvestmentHistory, InvestmentPlan};

#[derive(Clone, Debug)]
enum Canned {
    Body(String),
    Status(StatusCode),
}

/// Mock history source with static responses
pub struct MockHistoryClient {
    responses: HashMap<String, Canned>,
    /// Answer unregistered plans with a sample history instead of 404
    serve_samples: bool,
    requests: Mutex<Vec<String>>,
}

impl Default for MockHistoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHistoryClient {
    /// Empty mock; every plan answers 404
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            serve_samples: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Mock that serves a sample history for any plan identifier
    pub fn with_samples() -> Self {
        Self {
            serve_samples: true,
            ..Self::new()
        }
    }

    pub fn with_body(mut self, plan: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(plan.into(), Canned::Body(body.into()));
        self
    }

    pub fn with_status(mut self, plan: impl Into<String>, status: StatusCode) -> Self {
        self.responses.insert(plan.into(), Canned::Status(status));
        self
    }

    /// Plans requested so far, in order
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }

    fn url(plan: &str) -> String {
        format!("mock://history/{plan}")
    }
}

#[async_trait]
impl HistoryClient for MockHistoryClient {
    async fn fetch_history(&self, plan: &str) -> Result<InvestmentHistory> {
        self.requests.lock().await.push(plan.to_string());

        let canned = match self.responses.get(plan) {
            Some(canned) => canned.clone(),
            None if self.serve_samples => Canned::Body(sample_history(plan)),
            None => Canned::Status(StatusCode::NOT_FOUND),
        };

        match canned {
            Canned::Status(status) if status != StatusCode::OK => Err(PredictorError::StatusNotOk {
                url: Self::url(plan),
                status,
            }),
            Canned::Status(_) => Err(PredictorError::unknown("Unknown error")),
            Canned::Body(body) => {
                serde_json::from_str(&body).map_err(|source| PredictorError::InvalidJson {
                    url: Self::url(plan),
                    source,
                })
            }
        }
    }

    fn name(&self) -> &str {
        "MockHistory"
    }
}

/// Quarterly returns for the default bi-average plans, monthly for the rest
fn sample_history(plan: &str) -> String {
    let quarterly = plan
        .parse::<InvestmentPlan>()
        .is_ok_and(|plan| InvestmentPlan::bi_average_defaults().contains(&plan));
    let returns = if quarterly {
        json!([
            { "tranDate": "01-01-2017", "tranAmount": "120.00" },
            { "tranDate": "01-04-2017", "tranAmount": "118.40" },
            { "tranDate": "01-07-2017 09:30:00", "tranAmount": "125.10" }
        ])
    } else {
        json!([
            { "tranDate": "05-01-2017", "tranAmount": "40.00" },
            { "tranDate": "05-02-2017", "tranAmount": "41.25" },
            { "tranDate": "05-03-2017", "tranAmount": "39.80" },
            { "tranDate": "05-04-2017 18:00:00", "tranAmount": "42.10" }
        ])
    };

    json!({
        "name": format!("{plan} sample"),
        "investmentType": plan,
        "investmentDate": "01-12-2016",
        "returns": returns
    })
    .to_string()
}
