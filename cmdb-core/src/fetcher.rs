// Resource Fetcher - owns the FetchState for the selected category
// Selection is synchronous (state goes to Loading immediately); the network call
// runs elsewhere and reports back through a tagged FetchCompletion. Only the
// completion carrying the current generation is allowed to commit.

use crate::category::ResourceCategory;
use crate::client::RecordSource;
use crate::error::Result;
use crate::record::ResourceRecord;
use crate::registry;
use crate::render::{render_table, TableView};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(Vec<ResourceRecord>),
    Error(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn records(&self) -> Option<&[ResourceRecord]> {
        match self {
            FetchState::Success(records) => Some(records),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Identity of one issued request: the generation it belongs to and the
/// category it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub category: ResourceCategory,
}

impl FetchTicket {
    pub fn endpoint(&self) -> &'static str {
        registry::resolve(self.category).endpoint
    }
}

#[derive(Debug, Clone)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: Result<Vec<ResourceRecord>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// Result belonged to an older generation (or was a duplicate) and was dropped.
    Discarded,
}

#[derive(Debug, Default)]
pub struct ResourceFetcher {
    category: Option<ResourceCategory>,
    generation: u64,
    state: FetchState,
}

impl ResourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to a category. Returns the request to issue, or `None` when the
    /// category is already the selected one.
    pub fn select(&mut self, category: ResourceCategory) -> Option<FetchTicket> {
        if self.category == Some(category) {
            log::debug!("[FETCH] {} already selected, no request issued", category);
            return None;
        }
        Some(self.begin(category))
    }

    /// Re-issue the request for the selected category. `None` before the
    /// first selection.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        let category = self.category?;
        Some(self.begin(category))
    }

    fn begin(&mut self, category: ResourceCategory) -> FetchTicket {
        self.generation += 1;
        self.category = Some(category);
        self.state = FetchState::Loading;

        log::info!(
            "🔄 [FETCH] Loading {} (generation {})",
            category,
            self.generation
        );

        FetchTicket {
            generation: self.generation,
            category,
        }
    }

    pub fn complete(&mut self, completion: FetchCompletion) -> CommitOutcome {
        let FetchCompletion { ticket, result } = completion;

        if ticket.generation != self.generation || !self.state.is_loading() {
            log::debug!(
                "[FETCH] Discarding result for {} (generation {}, current {})",
                ticket.category,
                ticket.generation,
                self.generation
            );
            return CommitOutcome::Discarded;
        }

        self.state = match result {
            Ok(records) => {
                log::info!("✅ [FETCH] {} loaded {} records", ticket.category, records.len());
                FetchState::Success(records)
            }
            Err(error) => {
                log::error!("❌ [FETCH] {} failed: {}", ticket.category, error);
                FetchState::Error(error.to_string())
            }
        };
        CommitOutcome::Committed
    }

    /// Feed every queued completion to [`ResourceFetcher::complete`]. Returns
    /// how many of them committed.
    pub fn drain(&mut self, inbox: &CompletionInbox) -> usize {
        inbox
            .drain()
            .into_iter()
            .map(|completion| self.complete(completion))
            .filter(|outcome| *outcome == CommitOutcome::Committed)
            .count()
    }

    pub fn category(&self) -> Option<ResourceCategory> {
        self.category
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Table for the current state, shaped by the schema of the category the
    /// current request was issued for.
    pub fn view(&self) -> TableView {
        match self.category {
            Some(category) => render_table(category, &self.state),
            None => TableView::Idle,
        }
    }
}

/// Hand-off queue between spawned fetch tasks and the UI thread.
#[derive(Debug, Clone, Default)]
pub struct CompletionInbox {
    queue: Arc<Mutex<VecDeque<FetchCompletion>>>,
}

impl CompletionInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, completion: FetchCompletion) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(completion);
    }

    pub fn drain(&self) -> Vec<FetchCompletion> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Perform the single GET for a ticket and tag the outcome with it.
pub async fn run_fetch<S>(source: &S, ticket: FetchTicket) -> FetchCompletion
where
    S: RecordSource + ?Sized,
{
    let endpoint = ticket.endpoint();
    log::debug!(
        "📡 [FETCH] GET {} for {} (generation {})",
        endpoint,
        ticket.category,
        ticket.generation
    );
    let result = source.fetch_records(endpoint).await;
    FetchCompletion { ticket, result }
}
