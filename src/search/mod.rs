//! Search engine for employee profiles
//!
//! Semantic ranking over a similarity index, with keyword coverage as the
//! fallback path. Either path is used for a whole ranking pass, never mixed.
//!
//! State (profile store + index) is replaced wholesale. Readers take an
//! `Arc` of the current state and drop the lock at once; writers build the
//! complete new state, provider calls included, before swapping it in.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, info};

use crate::answer::{self, Answer};
use crate::core::{Profile, ProfileStore};
use crate::error::Result;
use crate::ingest::IngestReport;
use crate::provider::Provider;

pub mod index;
pub mod keyword;
pub mod ranker;

pub use index::SimilarityIndex;
pub use keyword::{keyword_score, tokenize};
pub use ranker::{RankPath, ScoredProfile, domain_bonus, top_k};

/// Immutable view of the profiles and the index derived from them.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    pub store: ProfileStore,
    pub index: Option<SimilarityIndex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStatus {
    pub profiles: usize,
    pub index_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dim: Option<usize>,
}

/// One ranking pass: results plus the path that scored them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub path: RankPath,
    pub results: Vec<ScoredProfile>,
}

impl Ranking {
    pub fn profiles(&self) -> Vec<Profile> {
        self.results.iter().map(|r| r.profile.clone()).collect()
    }
}

pub struct SearchEngine {
    provider: Arc<dyn Provider>,
    state: RwLock<Arc<EngineState>>,
    writer: Mutex<()>,
    max_candidates: usize,
}

impl SearchEngine {
    /// Load `profiles` and build the initial index.
    pub fn new(provider: Arc<dyn Provider>, profiles: Vec<Profile>) -> Self {
        let store = ProfileStore::from_profiles(profiles);
        let index = SimilarityIndex::rebuild(provider.as_ref(), &store);
        info!(
            profiles = store.len(),
            index_present = index.is_some(),
            provider = provider.name(),
            "search engine ready"
        );
        Self {
            provider,
            state: RwLock::new(Arc::new(EngineState { store, index })),
            writer: Mutex::new(()),
            max_candidates: answer::PROMPT_CANDIDATES,
        }
    }

    /// Cap on candidates sent to the generation provider.
    #[must_use]
    pub const fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Current state. Cheap; holds no lock after returning.
    pub fn snapshot(&self) -> Arc<EngineState> {
        self.state.read().clone()
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    pub fn status(&self) -> EngineStatus {
        let state = self.snapshot();
        EngineStatus {
            profiles: state.store.len(),
            index_present: state.index.is_some(),
            dim: state.index.as_ref().map(SimilarityIndex::dim),
        }
    }

    /// All profiles in store order.
    pub fn profiles(&self) -> Vec<Profile> {
        self.snapshot().store.as_slice().to_vec()
    }

    /// Top `k` profiles for `query`, best first.
    pub fn search(&self, query: &str, k: usize) -> Vec<Profile> {
        self.search_scored(query, k).profiles()
    }

    /// Top `k` with score breakdown and the path used.
    pub fn search_scored(&self, query: &str, k: usize) -> Ranking {
        let state = self.snapshot();
        let profiles = state.store.as_slice();

        let semantic = state
            .index
            .as_ref()
            .and_then(|index| index.score(self.provider.as_ref(), query));

        let (path, base) = match semantic {
            Some(similarities) => (RankPath::Semantic, similarities),
            None => (
                RankPath::Keyword,
                profiles
                    .iter()
                    .map(|profile| keyword_score(&profile.project(), query))
                    .collect(),
            ),
        };

        let results = top_k(profiles, &base, k);
        debug!(%path, k, returned = results.len(), "ranking complete");
        Ranking { path, results }
    }

    /// Rank, then compose a recommendation over the candidates.
    pub fn answer(&self, query: &str, k: usize) -> Answer {
        let candidates = self.search(query, k);
        answer::compose(
            self.provider.as_ref(),
            query,
            candidates,
            self.max_candidates,
        )
    }

    /// Upsert `records` by id and rebuild the index over the new collection.
    pub fn ingest(&self, records: Vec<Profile>) -> IngestReport {
        let _writer = self.writer.lock();
        let (store, report) = self.stage(records);
        self.install(store);
        report
    }

    /// Like [`ingest`](Self::ingest), but hands the merged collection to
    /// `persist` before it becomes visible. A `persist` error leaves the
    /// engine unchanged. Runs under the writer lock, so persisted states are
    /// ordered the same way as swaps.
    pub fn ingest_and_persist<F>(&self, records: Vec<Profile>, persist: F) -> Result<IngestReport>
    where
        F: FnOnce(&[Profile]) -> Result<()>,
    {
        let _writer = self.writer.lock();
        let (store, report) = self.stage(records);
        persist(store.as_slice())?;
        self.install(store);
        Ok(report)
    }

    /// Rebuild the index over the current collection.
    pub fn reindex(&self) -> EngineStatus {
        let _writer = self.writer.lock();
        let store = self.snapshot().store.clone();
        self.install(store);
        self.status()
    }

    /// Whether the provider answers its health probe.
    pub fn is_provider_healthy(&self) -> bool {
        self.provider.is_healthy()
    }

    fn stage(&self, records: Vec<Profile>) -> (ProfileStore, IngestReport) {
        let added = records.len();
        let mut store = self.snapshot().store.clone();
        store.upsert(records);
        let total = store.len();
        info!(added, total, "profiles ingested");
        (store, IngestReport { added, total })
    }

    fn install(&self, store: ProfileStore) {
        let index = SimilarityIndex::rebuild(self.provider.as_ref(), &store);
        let next = Arc::new(EngineState { store, index });
        *self.state.write() = next;
    }
}
