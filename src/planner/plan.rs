//! Group resolved fields into one survey query per partition.

use super::geography::{geography_clause, GeoClause, GeoLevel};
use crate::resolver::{Partition, ResolvedField};
use crate::utils::config::NAME_COLUMN;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Where and how to query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    pub level: GeoLevel,

    /// Two-digit state FIPS code
    pub state_fips: String,

    /// Request geography names (only honoured at place level)
    pub include_names: bool,
}

/// One external query: a partition, its variables and geography
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    pub partition: Partition,

    /// Every code needed by the partition's fields, sorted and deduplicated
    pub variables: BTreeSet<String>,

    pub geography: GeoClause,

    /// Geography hierarchy, outermost first; its columns form the identifier
    pub hierarchy: Vec<String>,
}

impl QueryPlan {
    pub fn requests_names(&self) -> bool {
        self.variables.contains(NAME_COLUMN)
    }
}

/// Build the minimal set of queries for a list of resolved fields.
///
/// Plans are returned in partition order (dataset, then year), independent
/// of field order.
pub fn plan_queries(fields: &[ResolvedField], options: &PlanOptions) -> Vec<QueryPlan> {
    let add_names = options.include_names && options.level == GeoLevel::Place;
    let geography = geography_clause(options.level, &options.state_fips);
    let hierarchy: Vec<String> = options
        .level
        .hierarchy()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut variables_by_partition: BTreeMap<&Partition, BTreeSet<String>> = BTreeMap::new();

    for field in fields {
        let variables = variables_by_partition.entry(&field.partition).or_default();
        variables.extend(field.sum_codes.iter().cloned());

        if let Some(code) = field.universe.code() {
            variables.insert(code.to_string());
        }
        if add_names {
            variables.insert(NAME_COLUMN.to_string());
        }
    }

    variables_by_partition
        .into_iter()
        .map(|(partition, variables)| {
            debug!("Planned {}: {} variables", partition, variables.len());
            QueryPlan {
                partition: partition.clone(),
                variables,
                geography: geography.clone(),
                hierarchy: hierarchy.clone(),
            }
        })
        .collect()
}
