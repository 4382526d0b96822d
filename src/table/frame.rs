//! Wide numeric table keyed by geographic identifier.
//!
//! Cells are `Option<f64>`: `None` means the row did not exist on that side
//! of an outer join, `Some(NaN)` is a computed not-a-number (e.g. 0/0).

use crate::utils::config::{GEOID_COLUMN, NAME_COLUMN};
use crate::utils::error::AggregateError;
use log::debug;
use std::collections::BTreeMap;

/// Join key of a row: identifier plus name when joining on names
pub type RowKey = (String, Option<String>);

/// A named numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Identifier column, optional name column, then value columns in order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    geoids: Vec<String>,
    names: Option<Vec<Option<String>>>,
    columns: Vec<Column>,
}

impl Frame {
    pub fn new(geoids: Vec<String>) -> Self {
        Self {
            geoids,
            names: None,
            columns: Vec::new(),
        }
    }

    pub fn with_names(geoids: Vec<String>, names: Vec<String>) -> Self {
        Self {
            geoids,
            names: Some(names.into_iter().map(Some).collect()),
            columns: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.geoids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geoids.is_empty()
    }

    pub fn geoids(&self) -> &[String] {
        &self.geoids
    }

    pub fn names(&self) -> Option<&[Option<String>]> {
        self.names.as_deref()
    }

    pub fn has_names(&self) -> bool {
        self.names.is_some()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// All column names: identifier, name (if present), value columns
    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec![GEOID_COLUMN.to_string()];
        if self.has_names() {
            names.push(NAME_COLUMN.to_string());
        }
        names.extend(self.columns.iter().map(|c| c.name.clone()));
        names
    }

    pub fn row_index(&self, geoid: &str) -> Option<usize> {
        self.geoids.iter().position(|g| g == geoid)
    }

    /// Cell lookup by column and identifier; `None` if either is absent
    pub fn value(&self, column: &str, geoid: &str) -> Option<Option<f64>> {
        let row = self.row_index(geoid)?;
        self.column(column).map(|c| c.values[row])
    }

    /// Append a value column at the end
    pub fn push_column(&mut self, column: Column) -> Result<(), AggregateError> {
        self.check_column(&column)?;
        self.columns.push(column);
        Ok(())
    }

    /// Insert a value column directly after `after` (or at the end if absent)
    pub fn insert_column_after(&mut self, after: &str, column: Column) -> Result<(), AggregateError> {
        self.check_column(&column)?;
        match self.columns.iter().position(|c| c.name == after) {
            Some(i) => self.columns.insert(i + 1, column),
            None => self.columns.push(column),
        }
        Ok(())
    }

    fn check_column(&self, column: &Column) -> Result<(), AggregateError> {
        if column.values.len() != self.len() {
            return Err(AggregateError::LengthMismatch {
                column: column.name.clone(),
                expected: self.len(),
                actual: column.values.len(),
            });
        }
        if column.name == GEOID_COLUMN || column.name == NAME_COLUMN || self.has_column(&column.name) {
            return Err(AggregateError::DuplicateColumn(column.name.clone()));
        }
        Ok(())
    }

    /// Reorder value columns: those named in `order` first, in that order,
    /// then any others in their current order
    pub fn reorder(&mut self, order: &[String]) {
        let mut remaining = std::mem::take(&mut self.columns);
        let mut ordered = Vec::with_capacity(remaining.len());

        for name in order {
            if let Some(i) = remaining.iter().position(|c| &c.name == name) {
                ordered.push(remaining.remove(i));
            }
        }
        ordered.extend(remaining);
        self.columns = ordered;
    }

    /// Join keys of every row
    pub fn row_keys(&self, on_names: bool) -> Vec<RowKey> {
        self.geoids
            .iter()
            .enumerate()
            .map(|(i, geoid)| {
                let name = if on_names {
                    self.names.as_ref().and_then(|n| n[i].clone())
                } else {
                    None
                };
                (geoid.clone(), name)
            })
            .collect()
    }

    /// Full outer join on identifier (and name when `on_names`).
    ///
    /// Rows are the union of both sides sorted by key; a key repeated on
    /// either side yields one row per matching pair. Columns are this
    /// frame's followed by `other`'s. Cells for rows missing on one side are
    /// `None`.
    ///
    /// # Errors
    /// * `AggregateError::DuplicateColumn` - both sides carry a column
    pub fn outer_join(&self, other: &Frame, on_names: bool) -> Result<Frame, AggregateError> {
        self.outer_join_rows(other, on_names).map(|(frame, _)| frame)
    }

    /// Like `outer_join`, also returning the source row on each side for
    /// every joined row
    pub fn outer_join_rows(
        &self,
        other: &Frame,
        on_names: bool,
    ) -> Result<(Frame, Vec<(Option<usize>, Option<usize>)>), AggregateError> {
        for column in &other.columns {
            if self.has_column(&column.name) {
                return Err(AggregateError::DuplicateColumn(column.name.clone()));
            }
        }

        let rows = outer_join_keys(&self.row_keys(on_names), &other.row_keys(on_names));

        let mut geoids = Vec::with_capacity(rows.len());
        let mut names = Vec::with_capacity(rows.len());
        for ((geoid, key_name), left, right) in &rows {
            geoids.push(geoid.clone());
            let name = key_name.clone().or_else(|| {
                left.and_then(|i| self.name_at(i))
                    .or_else(|| right.and_then(|i| other.name_at(i)))
            });
            names.push(name);
        }

        let sources: Vec<(Option<usize>, Option<usize>)> =
            rows.into_iter().map(|(_, l, r)| (l, r)).collect();

        let columns = self
            .columns
            .iter()
            .map(|c| (c, sources.iter().map(|(l, _)| *l).collect::<Vec<_>>()))
            .chain(
                other
                    .columns
                    .iter()
                    .map(|c| (c, sources.iter().map(|(_, r)| *r).collect::<Vec<_>>())),
            )
            .map(|(column, indices)| {
                let values = indices
                    .into_iter()
                    .map(|i| i.and_then(|i| column.values[i]))
                    .collect();
                Column::new(column.name.clone(), values)
            })
            .collect();

        let frame = Frame {
            geoids,
            names: (self.has_names() || other.has_names()).then_some(names),
            columns,
        };
        Ok((frame, sources))
    }

    fn name_at(&self, row: usize) -> Option<String> {
        self.names.as_ref().and_then(|n| n[row].clone())
    }
}

/// Pair up two key lists as a full outer join, sorted by key.
///
/// Each entry holds the key and its row index on either side. A key found
/// on both sides pairs every left row with every right row, left order
/// first; a key found on one side keeps each of its rows.
pub fn outer_join_keys(left: &[RowKey], right: &[RowKey]) -> Vec<(RowKey, Option<usize>, Option<usize>)> {
    let mut merged: BTreeMap<&RowKey, (Vec<usize>, Vec<usize>)> = BTreeMap::new();

    for (i, key) in left.iter().enumerate() {
        merged.entry(key).or_default().0.push(i);
    }
    for (i, key) in right.iter().enumerate() {
        merged.entry(key).or_default().1.push(i);
    }

    let mut rows = Vec::with_capacity(left.len().max(right.len()));
    for (key, (lefts, rights)) in merged {
        if lefts.len() > 1 || rights.len() > 1 {
            debug!(
                "Identifier {} repeated ({} left, {} right rows)",
                key.0,
                lefts.len(),
                rights.len()
            );
        }

        match (lefts.is_empty(), rights.is_empty()) {
            (false, false) => {
                for &l in &lefts {
                    for &r in &rights {
                        rows.push((key.clone(), Some(l), Some(r)));
                    }
                }
            }
            (false, true) => rows.extend(lefts.iter().map(|&l| (key.clone(), Some(l), None))),
            (true, false) => rows.extend(rights.iter().map(|&r| (key.clone(), None, Some(r)))),
            (true, true) => {}
        }
    }

    rows
}
