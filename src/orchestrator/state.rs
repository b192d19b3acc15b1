//! Per-provider state and the aggregate view published to renderers.

use std::fmt;

use crate::provider::ProviderId;

/// Tag identifying one dispatch cycle.
///
/// Results carry the generation they were launched under and are dropped if a
/// newer dispatch has happened since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of one provider within one generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProviderState {
    /// Nothing dispatched yet.
    #[default]
    Idle,
    Pending,
    /// Formatted result. May be empty, in which case renderers show nothing.
    Succeeded(String),
    Failed(String),
    /// Disabled in configuration.
    Skipped,
}

impl ProviderState {
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the state is final for the current generation.
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_) | Self::Skipped)
    }

    /// The formatted text, if the provider produced a non-empty result.
    pub fn result(&self) -> Option<&str> {
        match self {
            Self::Succeeded(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// One row of the aggregate view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: ProviderId,
    pub title: &'static str,
    pub state: ProviderState,
}

/// Snapshot of every provider's state for the current generation.
///
/// The entry set is always exactly the provider registry, in registry order.
/// Disabled and failing providers stay in the view with `Skipped`/`Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateView {
    generation: Generation,
    query: Option<String>,
    entries: Vec<Entry>,
}

impl Default for AggregateView {
    fn default() -> Self {
        Self {
            generation: Generation::default(),
            query: None,
            entries: ProviderId::ALL
                .into_iter()
                .map(|id| Entry {
                    id,
                    title: id.title(),
                    state: ProviderState::Idle,
                })
                .collect(),
        }
    }
}

impl AggregateView {
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// The text dispatched in the current generation.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: ProviderId) -> &Entry {
        &self.entries[id as usize]
    }

    pub fn state(&self, id: ProviderId) -> &ProviderState {
        &self.entry(id).state
    }

    /// True while any provider of the current generation is still pending.
    pub fn is_loading(&self) -> bool {
        self.entries.iter().any(|entry| entry.state.is_pending())
    }

    /// True once a dispatch happened and every provider has settled.
    pub fn is_complete(&self) -> bool {
        self.query.is_some() && self.entries.iter().all(|entry| entry.state.is_settled())
    }

    /// Starts a new generation for `query`, resetting every entry to Idle.
    pub(crate) fn begin(&mut self, query: &str) -> Generation {
        self.generation = self.generation.next();
        self.query = Some(query.to_string());
        for entry in &mut self.entries {
            entry.state = ProviderState::Idle;
        }
        self.generation
    }

    pub(crate) fn set(&mut self, id: ProviderId, state: ProviderState) {
        self.entries[id as usize].state = state;
    }
}
