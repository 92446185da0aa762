// Table Renderer - pure projection of (category, FetchState) into a display table

use crate::category::ResourceCategory;
use crate::fetcher::FetchState;
use crate::record::ResourceRecord;
use crate::registry::{self, ResourceType};

#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Idle,
    Loading,
    Error(String),
    /// Successful fetch that returned no records.
    Empty,
    Table(RenderedTable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTable {
    pub category: ResourceCategory,
    pub headers: Vec<&'static str>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Stable identity for the row within its listing.
    pub key: String,
    /// Position of the source record in the fetched listing.
    pub index: usize,
    pub cells: Vec<String>,
}

pub fn render_table(category: ResourceCategory, state: &FetchState) -> TableView {
    match state {
        FetchState::Idle => TableView::Idle,
        FetchState::Loading => TableView::Loading,
        FetchState::Error(message) => TableView::Error(message.clone()),
        FetchState::Success(records) if records.is_empty() => TableView::Empty,
        FetchState::Success(records) => {
            let resource_type = registry::resolve(category);
            TableView::Table(RenderedTable {
                category,
                headers: resource_type.headers(),
                rows: records
                    .iter()
                    .enumerate()
                    .map(|(index, record)| project_row(resource_type, record, index))
                    .collect(),
            })
        }
    }
}

pub fn project_row(resource_type: &ResourceType, record: &ResourceRecord, index: usize) -> TableRow {
    let cells = resource_type
        .columns
        .iter()
        .map(|column| {
            record
                .first_display(column.fields)
                .unwrap_or_else(|| column.fallback.to_string())
        })
        .collect();

    let key = record
        .first_display(resource_type.row_key)
        .unwrap_or_else(|| format!("#{}", index));

    TableRow { key, index, cells }
}
