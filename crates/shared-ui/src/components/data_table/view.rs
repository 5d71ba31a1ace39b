//! Search / sort / paginate engine behind [`TabularView`](super::TabularView).
//!
//! Everything here is plain data: the component keeps a [`TableViewState`] in a
//! signal and asks it for a [`Projection`] on every render.

use dioxus::prelude::Element;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A single field value inside a [`Row`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

static NULL_CELL: CellValue = CellValue::Null;

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Default display text. Null renders as an empty string.
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Numeric reading of the value; text is parsed after trimming.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Null | CellValue::Bool(_) => None,
        }
    }

    fn matches_term(&self, lowered_term: &str) -> bool {
        if self.is_null() {
            return false;
        }
        self.display().to_lowercase().contains(lowered_term)
    }

    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Natural ordering: numbers numerically (Int and Float mix), text by code
    /// point, `false < true`. Values of different kinds are grouped by kind
    /// (null, bool, number, text) so the ordering stays total.
    pub fn natural_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (a, b) if a.kind_rank() == 2 && b.kind_rank() == 2 => {
                let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                x.total_cmp(&y)
            }
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::Text(s.clone())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<u32> for CellValue {
    fn from(i: u32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n.as_f64().map_or(CellValue::Null, CellValue::Float),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }
}

/// One record of the table: field key to value. Missing keys read as `Null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> &CellValue {
        self.cells.get(key).unwrap_or(&NULL_CELL)
    }

    /// Build a row from the top-level fields of any serializable struct or map.
    /// Values that do not serialize to an object give an empty row.
    pub fn from_serialize<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(serde_json::Value::Object(map)) => Self {
                cells: map
                    .iter()
                    .map(|(key, value)| (key.clone(), CellValue::from(value)))
                    .collect(),
            },
            _ => Self::default(),
        }
    }
}

/// Comparison policy for a sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKind {
    /// [`CellValue::natural_cmp`].
    #[default]
    Natural,
    /// Compare the display text by code point.
    Text,
    /// Compare as numbers; values that do not parse sort after all numbers.
    Numeric,
}

impl SortKind {
    pub fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        match self {
            SortKind::Natural => a.natural_cmp(b),
            SortKind::Text => a.display().cmp(&b.display()),
            SortKind::Numeric => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

/// Custom cell renderer: receives the cell value and the whole row.
pub type CellRenderer = Rc<dyn Fn(&CellValue, &Row) -> Element>;

/// Describes one column: which field it reads, its header, and how it sorts and renders.
#[derive(Clone)]
pub struct ColumnDef {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub sort_kind: SortKind,
    /// Display-only override; never used for search or sort.
    pub render: Option<CellRenderer>,
}

impl ColumnDef {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            sort_kind: SortKind::default(),
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn sort_kind(mut self, kind: SortKind) -> Self {
        self.sort_kind = kind;
        self
    }

    pub fn render(mut self, render: impl Fn(&CellValue, &Row) -> Element + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }
}

impl PartialEq for ColumnDef {
    fn eq(&self, other: &Self) -> bool {
        let same_render = match (&self.render, &other.render) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.key == other.key
            && self.label == other.label
            && self.sortable == other.sortable
            && self.sort_kind == other.sort_kind
            && same_render
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("sort_kind", &self.sort_kind)
            .field("render", &self.render.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Marker appended to the active column header.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => " ↑",
            SortDirection::Desc => " ↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: Option<String>,
    pub direction: SortDirection,
}

/// Presentation options fixed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub searchable: bool,
    pub pagination: bool,
    pub items_per_page: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            searchable: true,
            pagination: true,
            items_per_page: 10,
        }
    }
}

impl ViewOptions {
    /// Page size, never below one.
    pub fn per_page(&self) -> usize {
        self.items_per_page.max(1)
    }
}

/// Ephemeral per-instance state: search term, current page, sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableViewState {
    pub search: String,
    /// 1-based.
    pub page: usize,
    pub sort: SortConfig,
}

impl Default for TableViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            sort: SortConfig::default(),
        }
    }
}

impl TableViewState {
    /// Update the search term. A changed term starts again from page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search {
            self.search = term;
            self.page = 1;
        }
    }

    /// Header click. Same key flips direction, a new key starts ascending,
    /// non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, column: &ColumnDef) {
        if !column.sortable {
            return;
        }
        self.sort = match &self.sort.key {
            Some(key) if *key == column.key => SortConfig {
                key: Some(column.key.clone()),
                direction: self.sort.direction.toggled(),
            },
            _ => SortConfig {
                key: Some(column.key.clone()),
                direction: SortDirection::Asc,
            },
        };
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Step back from `shown`, the page the last projection displayed. The
    /// stored page may be out of range after the data shrank.
    pub fn previous_page(&mut self, shown: usize) {
        self.page = shown.saturating_sub(1).max(1);
    }

    /// Step forward from `shown`, staying within `total_pages`.
    pub fn next_page(&mut self, shown: usize, total_pages: usize) {
        self.page = (shown + 1).min(total_pages).max(1);
    }

    /// Run filter, then sort, then paginate over `rows`.
    pub fn project(&self, columns: &[ColumnDef], rows: &[Row], options: &ViewOptions) -> Projection {
        let mut indices = filter_rows(columns, rows, &self.search);
        sort_rows(&mut indices, columns, rows, &self.sort);

        let total_rows = indices.len();
        let per_page = options.per_page();
        let total_pages = total_rows.div_ceil(per_page);

        if !options.pagination {
            return Projection {
                rows: indices,
                total_rows,
                total_pages,
                page: 1,
                start_index: 0,
            };
        }

        let page = if total_pages >= 1 {
            self.page.clamp(1, total_pages)
        } else {
            self.page
        };
        let start_index = (page - 1) * per_page;
        let rows = indices.into_iter().skip(start_index).take(per_page).collect();

        Projection {
            rows,
            total_rows,
            total_pages,
            page,
            start_index,
        }
    }
}

/// Indices of the rows where at least one column contains `term`, ignoring case.
/// An empty term keeps every row.
pub fn filter_rows(columns: &[ColumnDef], rows: &[Row], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..rows.len()).collect();
    }
    let lowered = term.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| columns.iter().any(|col| row.get(&col.key).matches_term(&lowered)))
        .map(|(index, _)| index)
        .collect()
}

/// Stable sort of `indices` by the configured key. Descending reverses the
/// comparison, so equal values keep their input order in both directions.
pub fn sort_rows(indices: &mut [usize], columns: &[ColumnDef], rows: &[Row], sort: &SortConfig) {
    let Some(key) = sort.key.as_deref() else {
        return;
    };
    let kind = columns
        .iter()
        .find(|col| col.key == key)
        .map(|col| col.sort_kind)
        .unwrap_or_default();

    indices.sort_by(|&a, &b| {
        let ordering = kind.compare(rows[a].get(key), rows[b].get(key));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// The slice of rows to display plus the numbers the page controls need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Indices into the caller's rows, in display order.
    pub rows: Vec<usize>,
    /// Row count after filtering.
    pub total_rows: usize,
    pub total_pages: usize,
    /// Page actually shown (the requested page clamped into range).
    pub page: usize,
    pub start_index: usize,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Controls are only worth showing with more than one page.
    pub fn shows_controls(&self, options: &ViewOptions) -> bool {
        options.pagination && self.total_pages > 1
    }

    /// "Showing 21 to 25 of 25 entries".
    pub fn summary(&self, options: &ViewOptions) -> String {
        let end = (self.start_index + options.per_page()).min(self.total_rows);
        format!(
            "Showing {} to {} of {} entries",
            self.start_index + 1,
            end,
            self.total_rows
        )
    }
}
