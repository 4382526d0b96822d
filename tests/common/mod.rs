//! Shared fixtures for integration tests.

#![allow(dead_code)]

use census_fields::categories::{CategoryConfig, RawCategory};
use census_fields::census::{RawTable, SurveySource};
use census_fields::planner::QueryPlan;
use census_fields::resolver::Partition;
use census_fields::utils::error::QueryError;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory survey source answering from canned tables
#[derive(Default)]
pub struct MockSource {
    pub responses: HashMap<Partition, RawTable>,
    pub calls: RefCell<Vec<QueryPlan>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, dataset: &str, year: u16, table: RawTable) -> Self {
        self.responses.insert(Partition::new(dataset, year), table);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl SurveySource for MockSource {
    fn fetch(&self, plan: &QueryPlan) -> Result<RawTable, QueryError> {
        self.calls.borrow_mut().push(plan.clone());
        self.responses
            .get(&plan.partition)
            .cloned()
            .ok_or_else(|| QueryError::HttpStatus {
                status: 400,
                body: format!("error: unknown variable for {}", plan.partition),
            })
    }
}

pub fn geoids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

pub fn config(categories: Vec<(&str, RawCategory)>) -> CategoryConfig {
    categories
        .into_iter()
        .map(|(name, category)| (name.to_string(), category))
        .collect()
}

/// `population` from the 2020 decennial census, density only
pub fn population_category() -> RawCategory {
    RawCategory::new("decennial_dhc")
        .with_field("2020", vec!["P1_001N"])
        .with_universe("default", "DENSITY_ONLY")
}

/// `income` from ACS 5-year 2023: a median without ratio or density and a
/// poverty count over its universe
pub fn income_category() -> RawCategory {
    RawCategory::new("acs5")
        .with_years(vec![2023])
        .with_field("median", vec!["B19013_001"])
        .with_field("050PercentPoverty", vec!["C17002_002"])
        .with_universe("default", "C17002_001")
        .with_universe("median", "NO_DENSITY_OR_RATIO")
}
