// Resource State Manager - bridges async fetches into the egui frame loop
// Fetch tasks push tagged completions into the inbox; update_from_async()
// drains it once per frame and the fetcher decides what commits.

use crate::wasm_utils;
use cmdb_core::prelude::*;
use cmdb_core::registry;

const NO_CLIENT: &str = "No inventory client configured";

/// Row picked in the table. Only meaningful for the generation it was picked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSelection {
    pub generation: u64,
    pub index: usize,
    pub key: String,
}

pub struct ResourceStateManager {
    client: Option<InventoryClient>,
    fetcher: ResourceFetcher,
    inbox: CompletionInbox,
    repaint: Option<egui::Context>,
    selection: Option<RowSelection>,
    view: TableView,
}

impl ResourceStateManager {
    pub fn new(client: Option<InventoryClient>) -> Self {
        Self {
            client,
            fetcher: ResourceFetcher::new(),
            inbox: CompletionInbox::new(),
            repaint: None,
            selection: None,
            view: TableView::Idle,
        }
    }

    pub fn from_config(config: &CmdbConfig) -> Self {
        let client = match InventoryClient::from_config(config) {
            Ok(client) => {
                log::info!("✅ [STATE] Inventory client ready at {}", client.base_url());
                Some(client)
            }
            Err(e) => {
                log::error!("❌ [STATE] Failed to create inventory client: {}", e);
                None
            }
        };
        Self::new(client)
    }

    /// Context to wake when a fetch task finishes, so results show up without
    /// waiting for the next input event.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn client(&self) -> Option<&InventoryClient> {
        self.client.as_ref()
    }

    /// Swap the client and reload the selected category from the new backend.
    pub fn set_client(&mut self, client: InventoryClient) {
        log::info!("🔄 [STATE] Switching inventory client to {}", client.base_url());
        self.client = Some(client);
        self.refresh();
    }

    // === Fetch Operations ===

    /// Returns whether a request was issued.
    pub fn select_category(&mut self, category: ResourceCategory) -> bool {
        match self.fetcher.select(category) {
            Some(ticket) => {
                self.rebuild_view();
                self.dispatch(ticket);
                true
            }
            None => false,
        }
    }

    pub fn refresh(&mut self) -> bool {
        match self.fetcher.refresh() {
            Some(ticket) => {
                self.rebuild_view();
                self.dispatch(ticket);
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, ticket: FetchTicket) {
        self.selection = None;

        let client = match &self.client {
            Some(c) => c.clone(),
            None => {
                log::error!("❌ [STATE] No client available for {}", ticket.category);
                self.inbox.push(FetchCompletion {
                    ticket,
                    result: Err(InventoryError::Network(NO_CLIENT.to_string())),
                });
                return;
            }
        };

        let inbox = self.inbox.clone();
        let repaint = self.repaint.clone();

        wasm_utils::console_log(&format!(
            "📡 [STATE] GET {} (generation {})",
            client.url_for(ticket.endpoint()),
            ticket.generation
        ));
        wasm_utils::spawn_async(async move {
            let completion = run_fetch(&client, ticket).await;
            inbox.push(completion);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Commit whatever finished since the last frame. Returns how many
    /// completions were accepted.
    pub fn update_from_async(&mut self) -> usize {
        if self.inbox.is_empty() {
            return 0;
        }
        let committed = self.fetcher.drain(&self.inbox);
        if committed > 0 {
            self.rebuild_view();
            if let Some(category) = self.fetcher.category() {
                wasm_utils::console_log(&format!(
                    "✅ [STATE] {} committed (generation {})",
                    category,
                    self.fetcher.generation()
                ));
            }
        }
        committed
    }

    /// The table is projected once per state change, not once per frame.
    fn rebuild_view(&mut self) {
        self.view = self.fetcher.view();
    }

    // === Views ===

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn selected_category(&self) -> Option<ResourceCategory> {
        self.fetcher.category()
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.state().is_loading()
    }

    pub fn generation(&self) -> u64 {
        self.fetcher.generation()
    }

    pub fn records(&self) -> Option<&[ResourceRecord]> {
        self.fetcher.state().records()
    }

    /// Full URL of the listing currently shown, if a client and category exist.
    pub fn endpoint_url(&self) -> Option<String> {
        let category = self.fetcher.category()?;
        let client = self.client.as_ref()?;
        Some(client.url_for(registry::resolve(category).endpoint))
    }

    // === Row Selection ===

    pub fn select_row(&mut self, index: usize, key: &str) {
        self.selection = Some(RowSelection {
            generation: self.fetcher.generation(),
            index,
            key: key.to_string(),
        });
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&RowSelection> {
        self.selection
            .as_ref()
            .filter(|selection| selection.generation == self.fetcher.generation())
    }

    pub fn selected_record(&self) -> Option<&ResourceRecord> {
        let selection = self.selection()?;
        self.records()?.get(selection.index)
    }
}
