//! Strategy Selection
//!
//! Maps a plan identifier to its averaging strategy through two disjoint
//! membership sets supplied at construction.

use std::collections::BTreeSet;

use super::AveragingStrategy;
use crate::config::ConfigError;
use crate::model::PlanCategory;

#[derive(Clone, Debug)]
pub struct StrategySelector {
    bi_average: BTreeSet<String>,
    tri_average: BTreeSet<String>,
}

impl StrategySelector {
    /// Build a selector, rejecting plans listed in both categories
    pub fn new<B, T>(bi_average: B, tri_average: T) -> Result<Self, ConfigError>
    where
        B: IntoIterator,
        B::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let bi_average: BTreeSet<String> = bi_average.into_iter().map(Into::into).collect();
        let tri_average: BTreeSet<String> = tri_average.into_iter().map(Into::into).collect();

        let overlap: Vec<String> = bi_average.intersection(&tri_average).cloned().collect();
        if !overlap.is_empty() {
            return Err(ConfigError::OverlappingPlans(overlap.join(",")));
        }

        Ok(Self {
            bi_average,
            tri_average,
        })
    }

    pub fn category(&self, plan: &str) -> Option<PlanCategory> {
        if self.bi_average.contains(plan) {
            Some(PlanCategory::BiAverage)
        } else if self.tri_average.contains(plan) {
            Some(PlanCategory::TriAverage)
        } else {
            None
        }
    }

    pub fn select(&self, plan: &str) -> Option<AveragingStrategy> {
        self.category(plan).map(AveragingStrategy::for_category)
    }
}
