//! Table arguments and outline example tables.
//!
//! The canonical form of a table is an ordered list of `(line, cells)` rows
//! with a uniform column count. Hash views and the padded string rendering
//! are derived from it; the column widths used for rendering are computed on
//! first use and cached.

use std::fmt;
use std::sync::OnceLock;

use derive_more::Deref;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{KeywordNode, NodeType, TaggedNode, Tags};
use crate::error::NodeError;

type Row = (usize, Vec<String>);

/// Multi-line table argument of a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Row>", into = "Vec<Row>")]
pub struct TableNode {
    rows: Vec<Row>,
    widths: OnceLock<Vec<usize>>,
}

impl TableNode {
    /// Build a table from `(line, cells)` rows.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::RaggedTable`] naming the first row whose column
    /// count differs from the first row's.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_tree::TableNode;
    ///
    /// let table = TableNode::new([
    ///     (3, vec!["name".into(), "email".into()]),
    ///     (4, vec!["everzet".into(), "ever.zet@gmail.com".into()]),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.row_line(1).unwrap(), 4);
    /// assert!(TableNode::new([(1, vec!["a".into(), "b".into()]), (2, vec!["1".into()])]).is_err());
    /// ```
    pub fn new<I>(rows: I) -> Result<Self, NodeError>
    where
        I: IntoIterator<Item = Row>,
    {
        let rows: Vec<Row> = rows.into_iter().collect();
        if let Some((_, first)) = rows.first() {
            let expected = first.len();
            if let Some((line, cells)) = rows.iter().find(|(_, cells)| cells.len() != expected) {
                return Err(NodeError::RaggedTable {
                    line: *line,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(Self {
            rows,
            widths: OnceLock::new(),
        })
    }

    /// Build a single-column table, one row per item.
    ///
    /// Rows are numbered from 1 since the items have no source line.
    #[must_use]
    pub fn from_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index + 1, vec![item.into()]))
                .collect(),
            widths: OnceLock::new(),
        }
    }

    /// Number of rows, header included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Return `true` for a table without rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Line of the first row.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.rows.first().map(|(line, _)| *line)
    }

    /// Cells of every row, in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[String]> {
        self.rows.iter().map(|(_, cells)| cells.as_slice())
    }

    /// Source line of every row, in order.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.rows.iter().map(|(line, _)| *line)
    }

    /// First row, conventionally the header.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|(_, cells)| cells.as_slice())
    }

    /// Cells of row `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::RowOutOfRange`] when the row does not exist.
    pub fn row(&self, index: usize) -> Result<&[String], NodeError> {
        self.rows
            .get(index)
            .map(|(_, cells)| cells.as_slice())
            .ok_or(NodeError::RowOutOfRange(index))
    }

    /// Cells of column `index`, top to bottom.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::RowOutOfRange`] for an empty table and
    /// [`NodeError::ColumnOutOfRange`] when the column does not exist.
    pub fn column(&self, index: usize) -> Result<Vec<&str>, NodeError> {
        if index >= self.row(0)?.len() {
            return Err(NodeError::ColumnOutOfRange(index));
        }
        Ok(self
            .rows()
            .filter_map(|cells| cells.get(index).map(String::as_str))
            .collect())
    }

    /// Source line of row `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::RowOutOfRange`] when the row does not exist.
    pub fn row_line(&self, index: usize) -> Result<usize, NodeError> {
        self.rows
            .get(index)
            .map(|(line, _)| *line)
            .ok_or(NodeError::RowOutOfRange(index))
    }

    /// Map every data row onto the header cells.
    ///
    /// A header cell that repeats keeps the value of its rightmost column.
    #[must_use]
    pub fn columns_hash(&self) -> Vec<IndexMap<String, String>> {
        let Some((header, data)) = self.rows.split_first() else {
            return Vec::new();
        };
        data.iter()
            .map(|(_, cells)| {
                header
                    .1
                    .iter()
                    .cloned()
                    .zip(cells.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// Map the first cell of every row onto the remaining cells.
    #[must_use]
    pub fn rows_hash(&self) -> IndexMap<String, Vec<String>> {
        self.rows
            .iter()
            .filter_map(|(_, cells)| cells.split_first())
            .map(|(key, rest)| (key.clone(), rest.to_vec()))
            .collect()
    }

    /// Render row `index` as `| a | b |`, padded to the column widths.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::RowOutOfRange`] when the row does not exist.
    pub fn row_as_string(&self, index: usize) -> Result<String, NodeError> {
        self.row(index).map(|cells| self.render_row(cells))
    }

    /// Render every row, separated by newlines.
    #[must_use]
    pub fn table_as_string(&self) -> String {
        self.rows()
            .map(|cells| self.render_row(cells))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Append the data rows of `other` to a copy of this table.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::IncompatibleTables`] when the header rows differ.
    pub fn merged_with(&self, other: &Self) -> Result<Self, NodeError> {
        if self.header() != other.header() {
            return Err(NodeError::IncompatibleTables);
        }
        let rows = self
            .rows
            .iter()
            .chain(other.rows.iter().skip(1))
            .cloned()
            .collect();
        Ok(Self {
            rows,
            widths: OnceLock::new(),
        })
    }

    /// `(line, cells)` pairs of every row.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows.iter().map(|(line, cells)| (*line, cells.as_slice()))
    }

    /// Copy of the table with `map` applied to every cell.
    pub(crate) fn map_cells(&self, mut map: impl FnMut(&str) -> String) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|(line, cells)| (*line, cells.iter().map(|cell| map(cell)).collect()))
                .collect(),
            widths: OnceLock::new(),
        }
    }

    pub(crate) fn render_row(&self, cells: &[String]) -> String {
        let widths = self.widths();
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(column, value)| {
                let width = widths.get(column).copied().unwrap_or(0);
                format!(" {value:<width$} ")
            })
            .collect();
        format!("|{}|", padded.join("|"))
    }

    fn widths(&self) -> &[usize] {
        self.widths.get_or_init(|| {
            let mut widths = Vec::new();
            for (_, cells) in &self.rows {
                for (column, cell) in cells.iter().enumerate() {
                    let length = cell.chars().count();
                    match widths.get_mut(column) {
                        Some(width) => *width = length.max(*width),
                        None => widths.push(length),
                    }
                }
            }
            widths
        })
    }
}

impl PartialEq for TableNode {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for TableNode {}

impl fmt::Display for TableNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.table_as_string())
    }
}

impl TryFrom<Vec<Row>> for TableNode {
    type Error = NodeError;

    fn try_from(rows: Vec<Row>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<TableNode> for Vec<Row> {
    fn from(table: TableNode) -> Self {
        table.rows
    }
}

impl KeywordNode for TableNode {
    fn node_type(&self) -> NodeType {
        NodeType::Table
    }

    fn keyword(&self) -> &str {
        ""
    }

    fn line(&self) -> usize {
        self.line().unwrap_or(0)
    }
}

/// Examples block of a scenario outline: a table plus its own keyword and
/// tags.
///
/// The tags are scoped to this table only; they are not inherited from the
/// owning outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref)]
pub struct ExampleTableNode {
    #[deref]
    table: TableNode,
    keyword: String,
    tags: Tags,
    line: Option<usize>,
}

impl ExampleTableNode {
    /// Wrap `table` as an examples block introduced by `keyword`.
    #[must_use]
    pub fn new(table: TableNode, keyword: impl Into<String>) -> Self {
        Self {
            table,
            keyword: keyword.into(),
            tags: Tags::new(),
            line: None,
        }
    }

    /// Attach tags scoped to this table.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Record the line of the `Examples:` header.
    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Borrow the underlying table.
    #[must_use]
    pub const fn table(&self) -> &TableNode {
        &self.table
    }
}

impl KeywordNode for ExampleTableNode {
    fn node_type(&self) -> NodeType {
        NodeType::ExampleTable
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn line(&self) -> usize {
        self.line.or_else(|| self.table.line()).unwrap_or(0)
    }
}

impl TaggedNode for ExampleTableNode {
    fn tags(&self) -> &Tags {
        &self.tags
    }
}
