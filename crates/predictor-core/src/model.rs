//! Domain Models
//!
//! The investment history document returned by the history endpoint, plus
//! the plan identifiers and categories used to pick an averaging strategy.
//! Amounts stay as `rust_decimal` values when parsed - never f64 for money.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::dates::deserialize_optional_date;

/// Known investment plans
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvestmentPlan {
    LowCap,
    MidCap,
    HighCap,
    ShortTerm,
    MidTerm,
    LongTerm,
}

impl InvestmentPlan {
    pub const ALL: [Self; 6] = [
        Self::LowCap,
        Self::MidCap,
        Self::HighCap,
        Self::ShortTerm,
        Self::MidTerm,
        Self::LongTerm,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowCap => "LOWCAP",
            Self::MidCap => "MIDCAP",
            Self::HighCap => "HIGHCAP",
            Self::ShortTerm => "SHORTTERM",
            Self::MidTerm => "MIDTERM",
            Self::LongTerm => "LONGTERM",
        }
    }

    /// Plans whose next date averages the last two transactions
    pub const fn bi_average_defaults() -> [Self; 3] {
        [Self::LowCap, Self::MidCap, Self::HighCap]
    }

    /// Plans whose next date averages the last three transactions
    pub const fn tri_average_defaults() -> [Self; 3] {
        [Self::ShortTerm, Self::MidTerm, Self::LongTerm]
    }
}

impl fmt::Display for InvestmentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plan| plan.as_str() == s)
            .ok_or_else(|| format!("unknown investment plan: {s}"))
    }
}

/// Which averaging window a plan uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanCategory {
    BiAverage,
    TriAverage,
}

type JsonObject = serde_json::Map<String, serde_json::Value>;

/// A single historical return event
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct TransactionRecord {
    /// When the return was paid; `None` if the token did not parse
    pub tran_date: Option<NaiveDateTime>,

    /// Amount as sent by the endpoint
    pub tran_amount: Option<String>,
}

impl TransactionRecord {
    pub fn amount(&self) -> Option<Decimal> {
        self.tran_amount
            .as_deref()
            .and_then(|text| Decimal::from_str(text.trim()).ok())
    }
}

/// Transaction history for one investment plan
///
/// Only a JSON object decodes; arrays are rejected rather than read positionally.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct InvestmentHistory {
    pub name: Option<String>,

    pub investment_type: Option<String>,

    pub investment_date: Option<NaiveDateTime>,

    /// Return events in the order the endpoint sent them
    pub returns: Vec<TransactionRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordFields {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    tran_date: Option<NaiveDateTime>,

    #[serde(default, deserialize_with = "deserialize_amount_text")]
    tran_amount: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryFields {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    investment_type: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_date")]
    investment_date: Option<NaiveDateTime>,

    #[serde(default, deserialize_with = "deserialize_returns")]
    returns: Vec<TransactionRecord>,
}

impl TryFrom<JsonObject> for TransactionRecord {
    type Error = serde_json::Error;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        let fields: RecordFields = serde_json::from_value(serde_json::Value::Object(object))?;
        Ok(Self {
            tran_date: fields.tran_date,
            tran_amount: fields.tran_amount,
        })
    }
}

impl TryFrom<JsonObject> for InvestmentHistory {
    type Error = serde_json::Error;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        let fields: HistoryFields = serde_json::from_value(serde_json::Value::Object(object))?;
        Ok(Self {
            name: fields.name,
            investment_type: fields.investment_type,
            investment_date: fields.investment_date,
            returns: fields.returns,
        })
    }
}

impl InvestmentHistory {
    /// Dates that parsed, in source order
    pub fn transaction_dates(&self) -> Vec<NaiveDateTime> {
        self.returns.iter().filter_map(|r| r.tran_date).collect()
    }

    /// Records whose date was missing or unparseable
    pub fn skipped_dates(&self) -> usize {
        self.returns.iter().filter(|r| r.tran_date.is_none()).count()
    }

    pub fn total_returns(&self) -> Decimal {
        self.returns.iter().filter_map(TransactionRecord::amount).sum()
    }
}

fn deserialize_returns<'de, D>(deserializer: D) -> Result<Vec<TransactionRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TransactionRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts the amount as a JSON string or number and keeps its text
fn deserialize_amount_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
