//! Raw survey response tables.

use indexmap::IndexMap;

/// One partition's response: a row per geographic unit, a column per code.
///
/// Values are kept as returned by the API; numeric coercion happens during
/// aggregation so failures can name the code and unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    /// Identifier per row (concatenated geography codes)
    pub geoids: Vec<String>,

    /// Geography names, when requested
    pub names: Option<Vec<String>>,

    /// Code -> value per row; `None` where the API returned null
    pub columns: IndexMap<String, Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(geoids: Vec<String>) -> Self {
        Self {
            geoids,
            names: None,
            columns: IndexMap::new(),
        }
    }

    pub fn with_names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Add a column of present values
    pub fn with_column<S: Into<String>>(mut self, code: impl Into<String>, values: Vec<S>) -> Self {
        let values = values.into_iter().map(|v| Some(v.into())).collect();
        self.columns.insert(code.into(), values);
        self
    }

    pub fn len(&self) -> usize {
        self.geoids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geoids.is_empty()
    }

    pub fn column(&self, code: &str) -> Option<&[Option<String>]> {
        self.columns.get(code).map(Vec::as_slice)
    }
}
