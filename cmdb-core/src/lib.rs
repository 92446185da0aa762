//! Core of the CMDB resource browser.
//!
//! Everything here is GUI-agnostic: the category registry, the generation-tagged
//! fetch state machine, the HTTP client and the table projection. The egui shell
//! in `cmdb-ui` only wires these together and draws the result.

pub mod category;
pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod menu;
pub mod record;
pub mod registry;
pub mod render;

pub use category::ResourceCategory;
pub use client::{InventoryClient, RecordSource};
pub use config::{CmdbConfig, ConfigError};
pub use error::{InventoryError, Result};
pub use fetcher::{
    run_fetch, CommitOutcome, CompletionInbox, FetchCompletion, FetchState, FetchTicket,
    ResourceFetcher,
};
pub use menu::{CategoryMenu, DismissEvent, DismissListener, ListenerRegistry};
pub use record::{parse_records, ResourceRecord};
pub use registry::{resolve, resolve_tag, selectable, ColumnDef, ResourceType};
pub use render::{render_table, RenderedTable, TableRow, TableView};

// Re-export for convenience
pub mod prelude {
    pub use super::category::ResourceCategory;
    pub use super::client::{InventoryClient, RecordSource};
    pub use super::config::CmdbConfig;
    pub use super::error::InventoryError;
    pub use super::fetcher::{
        run_fetch, CommitOutcome, CompletionInbox, FetchCompletion, FetchState, FetchTicket,
        ResourceFetcher,
    };
    pub use super::menu::{CategoryMenu, DismissEvent};
    pub use super::record::ResourceRecord;
    pub use super::render::{render_table, TableView};
}
