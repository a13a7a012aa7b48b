//! Suggestion hub: latest-card state with out-of-order guarding.
//!
//! Each suggestion kind gets an isolated card slot. Fetches may overlap
//! freely ("refresh all" runs every kind concurrently); a slot accepts a
//! resolution only if no newer fetch of the same kind has started since,
//! so a slow stale response can never overwrite a fresh one. In-flight
//! calls are not aborted -- their results are simply discarded on
//! arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::break_rec::{suggest_break, BreakRecommendation, BreakRequest};
use super::memory_tips::{fetch_memory_tips, MemoryTipsResponse};
use super::reminders::{suggest_reminders, ReminderRequest, ReminderResponse};
use super::time_blocks::{suggest_time_blocks, TimeBlockRequest, TimeBlockResponse};
use crate::llm::GenerationProvider;

/// Break card as presented to the caller: either an accepted triple or
/// an error indicator (this kind has no fallback content).
#[derive(Debug, Clone)]
pub enum BreakCard {
    Ready(BreakRecommendation),
    Unavailable(String),
}

/// Latest-value slot guarded by a monotonically increasing fetch token.
struct CardSlot<T> {
    seq: AtomicU64,
    inner: Mutex<SlotState<T>>,
}

struct SlotState<T> {
    committed: u64,
    value: Option<T>,
}

impl<T: Clone> CardSlot<T> {
    fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
            inner: Mutex::new(SlotState {
                committed: 0,
                value: None,
            }),
        }
    }

    /// Start a fetch, returning its token.
    fn begin(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commit a resolution. Returns false if a newer fetch already
    /// committed, in which case the value is discarded.
    fn commit(&self, token: u64, value: T) -> bool {
        let mut state = self.inner.lock().expect("slot lock poisoned");
        if token < state.committed {
            debug!(token, committed = state.committed, "stale resolution discarded");
            return false;
        }
        state.committed = token;
        state.value = Some(value);
        true
    }

    fn latest(&self) -> Option<T> {
        self.inner.lock().expect("slot lock poisoned").value.clone()
    }
}

/// Owner of the latest suggestion cards.
pub struct SuggestionHub {
    provider: Arc<dyn GenerationProvider>,
    time_blocks: CardSlot<TimeBlockResponse>,
    reminders: CardSlot<ReminderResponse>,
    break_rec: CardSlot<BreakCard>,
    memory_tips: CardSlot<MemoryTipsResponse>,
}

impl SuggestionHub {
    /// Create a hub around a generation provider.
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            time_blocks: CardSlot::new(),
            reminders: CardSlot::new(),
            break_rec: CardSlot::new(),
            memory_tips: CardSlot::new(),
        }
    }

    /// Fetch a fresh time-block card and store it unless superseded.
    pub async fn refresh_time_blocks(&self, request: TimeBlockRequest) -> TimeBlockResponse {
        let token = self.time_blocks.begin();
        let response = suggest_time_blocks(self.provider.as_ref(), &request).await;
        self.time_blocks.commit(token, response.clone());
        response
    }

    /// Fetch a fresh reminder card and store it unless superseded.
    pub async fn refresh_reminders(&self, request: ReminderRequest) -> ReminderResponse {
        let token = self.reminders.begin();
        let response = suggest_reminders(self.provider.as_ref(), &request).await;
        self.reminders.commit(token, response.clone());
        response
    }

    /// Fetch a fresh break card and store it unless superseded.
    pub async fn refresh_break(&self, request: BreakRequest) -> BreakCard {
        let token = self.break_rec.begin();
        let card = match suggest_break(self.provider.as_ref(), &request).await {
            Ok(rec) => BreakCard::Ready(rec),
            Err(e) => BreakCard::Unavailable(e.to_string()),
        };
        self.break_rec.commit(token, card.clone());
        card
    }

    /// Refresh the memory-tip card from the curated static list.
    pub fn refresh_memory_tips(&self) -> MemoryTipsResponse {
        let token = self.memory_tips.begin();
        let response = fetch_memory_tips();
        self.memory_tips.commit(token, response.clone());
        response
    }

    /// Refresh every card concurrently. Kinds resolve independently with
    /// no ordering dependency between them.
    pub async fn refresh_all(
        &self,
        time_blocks: TimeBlockRequest,
        reminders: ReminderRequest,
        break_rec: BreakRequest,
    ) {
        let (_, _, _) = tokio::join!(
            self.refresh_time_blocks(time_blocks),
            self.refresh_reminders(reminders),
            self.refresh_break(break_rec),
        );
        self.refresh_memory_tips();
    }

    /// Latest committed time-block card, if any fetch has resolved.
    pub fn latest_time_blocks(&self) -> Option<TimeBlockResponse> {
        self.time_blocks.latest()
    }

    /// Latest committed reminder card.
    pub fn latest_reminders(&self) -> Option<ReminderResponse> {
        self.reminders.latest()
    }

    /// Latest committed break card.
    pub fn latest_break(&self) -> Option<BreakCard> {
        self.break_rec.latest()
    }

    /// Latest committed memory-tip card.
    pub fn latest_memory_tips(&self) -> Option<MemoryTipsResponse> {
        self.memory_tips.latest()
    }
}
