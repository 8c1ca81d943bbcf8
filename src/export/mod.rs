//! Spreadsheet export of the collections.
//!
//! Each collection is first flattened into a [`Table`] (a header row plus data
//! rows), which is then rendered as CSV ([`delimited`]) or as a single-sheet
//! XLSX workbook ([`workbook`]).

pub mod delimited;
pub mod workbook;

use crate::views::Snapshot;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export: {0} is empty")]
    NoData(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn optional(value: Option<impl ToString>) -> Self {
        value.map_or(Cell::Empty, |v| Cell::Text(v.to_string()))
    }

    /// The cell as it appears in a CSV field.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// Which collection to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Projects,
    Tasks,
    Resources,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Collection::Projects => "projects",
            Collection::Tasks => "tasks",
            Collection::Resources => "resources",
        })
    }
}

/// Output format, usually picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Guesses the format from `path`'s extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// A header row and data rows of equal width.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Flattens one collection of `snapshot`, keeping its display order.
    pub fn from_snapshot(snapshot: &Snapshot, collection: Collection) -> Self {
        match collection {
            Collection::Projects => Self::projects(snapshot),
            Collection::Tasks => Self::tasks(snapshot),
            Collection::Resources => Self::resources(snapshot),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn projects(snapshot: &Snapshot) -> Self {
        let rows = snapshot
            .projects
            .iter()
            .map(|p| {
                vec![
                    Cell::text(p.id.to_string()),
                    Cell::text(&p.name),
                    Cell::text(&p.department),
                    Cell::optional(p.sponsor.as_ref()),
                    Cell::text(p.status.label()),
                    Cell::text(&p.description),
                    Cell::optional(p.duration_start),
                    Cell::optional(p.duration_end),
                    Cell::optional(p.skillset.as_ref()),
                    Cell::Number(p.attachments.len() as f64),
                ]
            })
            .collect();
        Self {
            headers: vec![
                "id",
                "name",
                "department",
                "sponsor",
                "status",
                "description",
                "duration_start",
                "duration_end",
                "skillset",
                "attachments",
            ],
            rows,
        }
    }

    fn tasks(snapshot: &Snapshot) -> Self {
        let rows = snapshot
            .tasks
            .iter()
            .map(|t| {
                vec![
                    Cell::text(t.id.to_string()),
                    Cell::text(snapshot.consumer_name(&t.project_id)),
                    Cell::text(&t.title),
                    Cell::text(&t.description),
                    Cell::text(t.status.label()),
                    Cell::Number(t.estimated_hours),
                    Cell::Number(t.actual_hours),
                    Cell::Number(t.sub_tasks.len() as f64),
                    Cell::text(t.created.to_rfc3339()),
                ]
            })
            .collect();
        Self {
            headers: vec![
                "id",
                "project",
                "title",
                "description",
                "status",
                "estimated_hours",
                "actual_hours",
                "sub_tasks",
                "created",
            ],
            rows,
        }
    }

    fn resources(snapshot: &Snapshot) -> Self {
        let rows = snapshot
            .resources
            .iter()
            .map(|r| {
                let allocations = r
                    .allocated
                    .iter()
                    .map(|(consumer, units)| format!("{}: {units}", snapshot.consumer_name(consumer)))
                    .collect::<Vec<_>>()
                    .join("; ");
                vec![
                    Cell::text(r.id.to_string()),
                    Cell::text(&r.name),
                    Cell::Number(f64::from(r.total)),
                    Cell::Number(r.allocated_units() as f64),
                    Cell::Number(r.available_units() as f64),
                    Cell::optional(r.skillset.as_ref()),
                    Cell::text(allocations),
                ]
            })
            .collect();
        Self {
            headers: vec![
                "id",
                "name",
                "total",
                "allocated",
                "available",
                "skillset",
                "allocations",
            ],
            rows,
        }
    }
}

/// Renders `collection` of `snapshot` in `format`.
///
/// # Errors
/// `NoData` if the collection is empty.
pub fn export(
    snapshot: &Snapshot,
    collection: Collection,
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    let table = Table::from_snapshot(snapshot, collection);
    if table.is_empty() {
        return Err(ExportError::NoData(collection.to_string()));
    }
    match format {
        ExportFormat::Csv => delimited::to_csv(&table),
        ExportFormat::Xlsx => workbook::to_xlsx(&table),
    }
}

/// Like [`export`], writing the bytes to `path`.
pub fn export_to_file(
    snapshot: &Snapshot,
    collection: Collection,
    format: ExportFormat,
    path: &Path,
) -> Result<usize, ExportError> {
    let bytes = export(snapshot, collection, format)?;
    fs::write(path, &bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(%collection, ?format, path = %path.display(), bytes = bytes.len(), "Exported");
    Ok(bytes.len())
}
