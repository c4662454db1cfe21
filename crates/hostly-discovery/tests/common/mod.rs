//! In-memory collaborators shared by the aggregator and matcher tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hostly_core::{
    CanonicalCategory, ExternalSuggestion, GeoPoint, ResolvedSuggestion, SourceSystem,
    TransitLine, TransitStop,
};
use hostly_discovery::{SourceAdapter, StoreError, SuggestionStore, TransitStore};
use tokio::sync::Barrier;

/// Test-side failure carried inside [`StoreError`].
#[derive(Debug)]
pub struct InjectedFailure(pub &'static str);

impl std::fmt::Display for InjectedFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "injected failure: {}", self.0)
    }
}

impl std::error::Error for InjectedFailure {}

// ---------------------------------------------------------------------------
// Suggestion store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StoredSuggestion {
    pub id: i64,
    pub property_id: i64,
    pub category_id: i64,
    pub suggestion: ResolvedSuggestion,
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    categories: HashMap<(i64, CanonicalCategory), i64>,
    suggestions: Vec<StoredSuggestion>,
    ensure_calls: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    fail_categories: bool,
    fail_insert_titles: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_categories() -> Self {
        Self {
            fail_categories: true,
            ..Self::default()
        }
    }

    pub fn failing_inserts_for(titles: &[&str]) -> Self {
        Self {
            fail_insert_titles: titles.iter().map(|t| (*t).to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn suggestions(&self) -> Vec<StoredSuggestion> {
        self.state.lock().unwrap().suggestions.clone()
    }

    pub fn category_count(&self) -> usize {
        self.state.lock().unwrap().categories.len()
    }

    pub fn ensure_calls(&self) -> usize {
        self.state.lock().unwrap().ensure_calls
    }
}

#[async_trait]
impl SuggestionStore for MemoryStore {
    async fn find_suggestion_by_external_id(
        &self,
        property_id: i64,
        source: SourceSystem,
        external_id: &str,
    ) -> Result<Option<i64>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .suggestions
            .iter()
            .find(|s| {
                s.property_id == property_id
                    && s.suggestion.suggestion.source_system == source
                    && s.suggestion.suggestion.external_id.as_deref() == Some(external_id)
            })
            .map(|s| s.id))
    }

    async fn ensure_category(
        &self,
        property_id: i64,
        category: CanonicalCategory,
    ) -> Result<i64, StoreError> {
        if self.fail_categories {
            return Err(StoreError::backend(
                "ensure_category",
                InjectedFailure("categories unavailable"),
            ));
        }
        let mut state = self.state.lock().unwrap();
        state.ensure_calls += 1;
        if let Some(id) = state.categories.get(&(property_id, category)) {
            return Ok(*id);
        }
        state.next_id += 1;
        let id = state.next_id;
        state.categories.insert((property_id, category), id);
        Ok(id)
    }

    async fn insert_suggestion(
        &self,
        property_id: i64,
        category_id: i64,
        suggestion: &ResolvedSuggestion,
    ) -> Result<i64, StoreError> {
        if self
            .fail_insert_titles
            .iter()
            .any(|t| *t == suggestion.suggestion.title)
        {
            return Err(StoreError::backend(
                "insert_suggestion",
                InjectedFailure("row rejected"),
            ));
        }
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.suggestions.push(StoredSuggestion {
            id,
            property_id,
            category_id,
            suggestion: suggestion.clone(),
        });
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Transit store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryTransit {
    pub stops: Vec<TransitStop>,
    pub lines_by_stop: HashMap<i64, Vec<TransitLine>>,
    pub fail: bool,
}

impl MemoryTransit {
    pub fn add_stop(&mut self, stop: TransitStop, lines: Vec<TransitLine>) {
        self.lines_by_stop.insert(stop.id, lines);
        self.stops.push(stop);
    }
}

#[async_trait]
impl TransitStore for MemoryTransit {
    async fn find_stops_all(&self) -> Result<Vec<TransitStop>, StoreError> {
        if self.fail {
            return Err(StoreError::backend(
                "find_stops_all",
                InjectedFailure("stops unavailable"),
            ));
        }
        Ok(self.stops.clone())
    }

    async fn find_lines_for_stop(&self, stop_id: i64) -> Result<Vec<TransitLine>, StoreError> {
        Ok(self.lines_by_stop.get(&stop_id).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Scripted adapters
// ---------------------------------------------------------------------------

/// Returns a fixed list and counts invocations.
pub struct ScriptedAdapter {
    name: &'static str,
    results: Vec<ExternalSuggestion>,
    calls: AtomicUsize,
    gate: Option<Arc<Barrier>>,
}

impl ScriptedAdapter {
    pub fn new(name: &'static str, results: Vec<ExternalSuggestion>) -> Arc<Self> {
        Arc::new(Self {
            name,
            results,
            calls: AtomicUsize::new(0),
            gate: None,
        })
    }

    /// Waits on `gate` before answering, so a run only completes when every
    /// adapter sharing the barrier is in flight at once.
    pub fn gated(
        name: &'static str,
        results: Vec<ExternalSuggestion>,
        gate: Arc<Barrier>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            results,
            calls: AtomicUsize::new(0),
            gate: Some(gate),
        })
    }

    /// Behaves like an adapter whose provider failed: empty list.
    pub fn failing(name: &'static str) -> Arc<Self> {
        Self::new(name, Vec::new())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for ScriptedAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, _location: GeoPoint, _hint: &str) -> Vec<ExternalSuggestion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.wait().await;
        }
        self.results.clone()
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn bariloche() -> GeoPoint {
    GeoPoint::new(-41.1335, -71.3103).unwrap()
}

pub fn suggestion(
    title: &str,
    external_id: Option<&str>,
    source: SourceSystem,
    hint: &str,
) -> ExternalSuggestion {
    ExternalSuggestion {
        title: title.to_string(),
        description: "Found via test".to_string(),
        address: "Mitre 100".to_string(),
        map_link: "https://www.google.com/maps/search/?api=1&query=-41.13,-71.31".to_string(),
        rating: Some(4.5),
        review_count: Some(10),
        external_id: external_id.map(str::to_string),
        source_system: source,
        raw_category_hint: hint.to_string(),
        location: None,
    }
}

pub fn transit_line(id: i64, number: &str, highlight: Option<&str>) -> TransitLine {
    TransitLine {
        id,
        number: number.to_string(),
        name: format!("Linea {number}"),
        highlight_destinations: highlight.map(str::to_string),
    }
}

/// A stop `meters` due north of `origin`.
pub fn stop_north_of(origin: GeoPoint, id: i64, name: &str, meters: f64) -> TransitStop {
    let degrees = meters / hostly_core::EARTH_RADIUS_METERS * (180.0 / std::f64::consts::PI);
    TransitStop {
        id,
        name: name.to_string(),
        location: GeoPoint::new(origin.latitude + degrees, origin.longitude).unwrap(),
        is_hub: false,
    }
}
