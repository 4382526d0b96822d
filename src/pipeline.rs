//! End-to-end collection: categories in, one aggregated table out.
//!
//! Every configuration check runs before the first query, so a bad
//! category never costs a network round trip.

use crate::aggregator::{aggregate, AggregateOptions};
use crate::categories::{normalize_categories, CategoryConfig};
use crate::census::{RawTable, SurveySource};
use crate::planner::{plan_queries, GeoLevel, PlanOptions, QueryPlan};
use crate::resolver::{density_columns, resolve_categories_with, resolve_fields_with, Partition, ResolvedField};
use crate::table::Frame;
use crate::utils::error::{CensusError, ConfigError};
use log::info;
use std::collections::BTreeMap;

/// What to collect and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusRequest {
    /// Two-digit state FIPS code
    pub state_fips: String,
    pub level: GeoLevel,

    /// Emit `_ratio` columns
    pub compute_ratios: bool,

    /// Request the `NAME` attribute (place level only)
    pub add_place_names: bool,
}

impl CensusRequest {
    pub fn new(state_fips: impl Into<String>, level: GeoLevel) -> Self {
        Self {
            state_fips: state_fips.into(),
            level,
            compute_ratios: true,
            add_place_names: false,
        }
    }

    fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            level: self.level,
            state_fips: self.state_fips.clone(),
            include_names: self.add_place_names,
        }
    }
}

/// Resolved fields and the queries that will fetch them
#[derive(Debug, Clone)]
pub struct CollectionPlan {
    pub fields: Vec<ResolvedField>,
    pub queries: Vec<QueryPlan>,
    pub year_prefixed: bool,
}

/// Normalize, resolve and plan without touching the network.
///
/// # Errors
/// Any `ConfigError` of the category configuration.
pub fn plan_collection(categories: &CategoryConfig, request: &CensusRequest) -> Result<CollectionPlan, ConfigError> {
    let normalized = normalize_categories(categories)?;
    let fields = resolve_fields_with(&normalized, request.compute_ratios)?;
    let queries = plan_queries(&fields, &request.plan_options());

    info!(
        "{} categories, {} fields, {} queries",
        normalized.categories.len(),
        fields.len(),
        queries.len()
    );

    Ok(CollectionPlan {
        fields,
        queries,
        year_prefixed: normalized.year_prefixed,
    })
}

/// Collect every field of `categories` for one state and level.
///
/// Partitions are fetched one after another in partition order and merged
/// in that same order.
///
/// # Errors
/// * `CensusError::Config` - invalid configuration (raised before any fetch)
/// * `CensusError::Query` - a partition query failed; the run is aborted
/// * `CensusError::Aggregate` - a value could not be computed
pub fn collect_census_fields<S: SurveySource + ?Sized>(
    source: &S,
    categories: &CategoryConfig,
    request: &CensusRequest,
) -> Result<Frame, CensusError> {
    let plan = plan_collection(categories, request)?;

    let mut responses: BTreeMap<Partition, RawTable> = BTreeMap::new();
    for query in &plan.queries {
        let table = source.fetch(query).map_err(|source| CensusError::Query {
            partition: query.partition.to_string(),
            source,
        })?;
        responses.insert(query.partition.clone(), table);
    }

    let options = AggregateOptions {
        compute_ratios: request.compute_ratios,
    };
    Ok(aggregate(&plan.fields, &responses, options)?)
}

/// Value columns of `categories` that are eligible for a density column.
///
/// Ratio columns do not affect eligibility, so their names are not checked.
pub fn density_fields_for(categories: &CategoryConfig) -> Result<Vec<String>, ConfigError> {
    Ok(density_columns(&resolve_categories_with(categories, false)?))
}
