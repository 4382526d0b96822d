//! HTTP client for the Census data API.

use super::types::RawTable;
use crate::planner::QueryPlan;
use crate::utils::config::{CENSUS_API_BASE_URL, DEFAULT_QUERY_TIMEOUT, NAME_COLUMN};
use crate::utils::error::QueryError;
use indexmap::IndexMap;
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;

/// Anything that can answer a planned survey query.
///
/// A failure is fatal for the partition; implementations must not return
/// partial tables.
pub trait SurveySource {
    fn fetch(&self, plan: &QueryPlan) -> Result<RawTable, QueryError>;
}

/// Census data API client
pub struct CensusClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CensusClient {
    /// Create a new client against the public API
    pub fn new(api_key: Option<String>) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(DEFAULT_QUERY_TIMEOUT)
            .build()
            .map_err(QueryError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: CENSUS_API_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Point the client at another API root (mirrors, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self, plan: &QueryPlan) -> String {
        endpoint(&self.base_url, plan)
    }
}

impl SurveySource for CensusClient {
    fn fetch(&self, plan: &QueryPlan) -> Result<RawTable, QueryError> {
        let url = self.endpoint(plan);
        let params = query_params(plan, self.api_key.as_deref());

        info!(
            "Querying {} ({} variables, {})",
            plan.partition,
            plan.variables.len(),
            plan.geography.for_target
        );
        debug!("GET {} {:?}", url, redact_key(&params));

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .map_err(QueryError::RequestFailed)?;

        // The API answers 204 when the geography has no units
        if response.status() == StatusCode::NO_CONTENT {
            debug!("No rows for {}", plan.partition);
            return Ok(empty_table(plan));
        }

        if !response.status().is_success() {
            return Err(QueryError::HttpStatus {
                status: response.status().as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        // Invalid keys come back as an HTML page with status 200
        let text = response.text().map_err(QueryError::RequestFailed)?;
        let body: Value = serde_json::from_str(&text).map_err(|_| {
            QueryError::InvalidResponse(format!(
                "expected a JSON array, got: {}",
                text.chars().take(200).collect::<String>()
            ))
        })?;

        let table = parse_response(&body, plan)?;
        info!("Received {} rows for {}", table.len(), plan.partition);
        Ok(table)
    }
}

/// `{base}/{year}/{dataset}`
pub fn endpoint(base_url: &str, plan: &QueryPlan) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        plan.partition.year,
        plan.partition.dataset
    )
}

/// Query string pairs: `get`, `for`, one `in` per constraint, `key`
pub fn query_params(plan: &QueryPlan, api_key: Option<&str>) -> Vec<(String, String)> {
    let get = plan
        .variables
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",");

    let mut params = vec![
        ("get".to_string(), get),
        ("for".to_string(), plan.geography.for_target.clone()),
    ];
    for constraint in &plan.geography.in_constraints {
        params.push(("in".to_string(), constraint.clone()));
    }
    if let Some(key) = api_key {
        params.push(("key".to_string(), key.to_string()));
    }

    params
}

fn redact_key(params: &[(String, String)]) -> Vec<(&str, &str)> {
    params
        .iter()
        .map(|(k, v)| {
            if k == "key" {
                (k.as_str(), "***")
            } else {
                (k.as_str(), v.as_str())
            }
        })
        .collect()
}

/// Parse the API's array-of-rows JSON into a raw table.
///
/// The first row holds headers. The identifier of each row is the
/// concatenation of its geography columns in hierarchy order.
///
/// # Errors
/// * `QueryError::InvalidResponse` - not an array of string rows
/// * `QueryError::MissingGeography` - a hierarchy column is absent
pub fn parse_response(body: &Value, plan: &QueryPlan) -> Result<RawTable, QueryError> {
    let rows = body
        .as_array()
        .ok_or_else(|| QueryError::InvalidResponse("response is not an array".to_string()))?;

    let (header_row, data_rows) = rows
        .split_first()
        .ok_or_else(|| QueryError::InvalidResponse("response has no header row".to_string()))?;

    let headers: Vec<String> = header_row
        .as_array()
        .ok_or_else(|| QueryError::InvalidResponse("header row is not an array".to_string()))?
        .iter()
        .map(|h| {
            h.as_str()
                .map(str::to_string)
                .ok_or_else(|| QueryError::InvalidResponse(format!("non-string header: {}", h)))
        })
        .collect::<Result<_, _>>()?;

    let geo_indices = plan
        .hierarchy
        .iter()
        .map(|geo| {
            headers
                .iter()
                .position(|h| h == geo)
                .ok_or_else(|| QueryError::MissingGeography(geo.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let name_index = headers.iter().position(|h| h == NAME_COLUMN);

    let mut geoids = Vec::with_capacity(data_rows.len());
    let mut names = name_index.map(|_| Vec::with_capacity(data_rows.len()));
    let mut columns: IndexMap<String, Vec<Option<String>>> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !geo_indices.contains(i) && Some(*i) != name_index)
        .map(|(_, h)| (h.clone(), Vec::with_capacity(data_rows.len())))
        .collect();

    for (row_number, row) in data_rows.iter().enumerate() {
        let cells = row
            .as_array()
            .filter(|cells| cells.len() == headers.len())
            .ok_or_else(|| {
                QueryError::InvalidResponse(format!(
                    "row {} does not have {} cells",
                    row_number + 1,
                    headers.len()
                ))
            })?;

        let geoid: String = geo_indices
            .iter()
            .map(|&i| cell_text(&cells[i]).unwrap_or_default())
            .collect();
        geoids.push(geoid);

        if let (Some(names), Some(i)) = (names.as_mut(), name_index) {
            names.push(cell_text(&cells[i]).unwrap_or_default());
        }

        for (i, header) in headers.iter().enumerate() {
            if let Some(column) = columns.get_mut(header) {
                column.push(cell_text(&cells[i]));
            }
        }
    }

    Ok(RawTable {
        geoids,
        names,
        columns,
    })
}

/// A response without rows still carries every requested column
fn empty_table(plan: &QueryPlan) -> RawTable {
    let mut table = RawTable::new(Vec::new());
    if plan.requests_names() {
        table.names = Some(Vec::new());
    }
    for code in plan.variables.iter().filter(|c| c.as_str() != NAME_COLUMN) {
        table.columns.insert(code.clone(), Vec::new());
    }
    table
}

fn cell_text(cell: &Value) -> Option<String> {
    match cell {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{geography_clause, GeoLevel};
    use crate::resolver::Partition;

    fn tract_plan() -> QueryPlan {
        QueryPlan {
            partition: Partition::new("acs/acs5", 2023),
            variables: ["B01001_001E".to_string()].into_iter().collect(),
            geography: geography_clause(GeoLevel::Tract, "25"),
            hierarchy: vec!["state".into(), "county".into(), "tract".into()],
        }
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            endpoint("https://api.census.gov/data/", &tract_plan()),
            "https://api.census.gov/data/2023/acs/acs5"
        );
    }

    #[test]
    fn test_redact_key() {
        let params = query_params(&tract_plan(), Some("secret"));
        let redacted = redact_key(&params);
        assert!(redacted.contains(&("key", "***")));
        assert!(!redacted.iter().any(|(_, v)| *v == "secret"));
    }

    #[test]
    fn test_empty_table_has_requested_columns() {
        let table = empty_table(&tract_plan());
        assert!(table.is_empty());
        assert!(table.column("B01001_001E").is_some());
        assert!(table.names.is_none());
    }
}
