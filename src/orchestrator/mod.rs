//! Multi-provider translation orchestration.
//!
//! ## Model
//!
//! - [`Orchestrator::dispatch`] starts a new [`Generation`], marks every
//!   provider `Pending`, `Skipped` or `Failed` up front, and spawns one task per
//!   enabled provider.
//! - Each task formats its result and applies it only if its generation is
//!   still current. Late results from an earlier generation are dropped.
//! - The [`AggregateView`] lives inside a `tokio::sync::watch` channel. Every
//!   applied change is a publish, and subscribers always see the latest
//!   snapshot. A subscriber that falls behind skips intermediate snapshots.
//! - A provider whose adapter panics settles as `Failed` like any other error.
//!
//! Superseded provider calls are not aborted. They run to completion and still
//! consume network and quota. Only their results are ignored.

mod debounce;
mod projector;
mod state;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::format::CaseFormat;
use crate::provider::{Backend, ProviderId, Registry, Translator};

pub use debounce::{Debouncer, MULTI_PROVIDER_WINDOW, SINGLE_PROVIDER_WINDOW, default_window};
pub use projector::{order, rank};
pub use state::{AggregateView, Entry, Generation, ProviderState};

/// Something that accepts debounced input.
pub trait Dispatch: Send + Sync + 'static {
    fn dispatch(&self, text: &str);
}

/// Fans one input out to every enabled provider and tracks the outcomes.
pub struct Orchestrator {
    registry: Arc<Registry>,
    format: CaseFormat,
    view: Arc<watch::Sender<AggregateView>>,
}

impl Orchestrator {
    pub fn new(registry: Registry, format: CaseFormat) -> Self {
        let (view, _) = watch::channel(AggregateView::default());
        Self {
            registry: Arc::new(registry),
            format,
            view: Arc::new(view),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub const fn format(&self) -> CaseFormat {
        self.format
    }

    /// Subscribes to view updates. The receiver starts at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<AggregateView> {
        self.view.subscribe()
    }

    /// A copy of the current view.
    pub fn view(&self) -> AggregateView {
        self.view.borrow().clone()
    }

    /// Starts a new generation for `text`.
    ///
    /// Returns `None` without touching any state when `text` is blank.
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, text: &str) -> Option<Generation> {
        if text.trim().is_empty() {
            debug!("ignoring blank dispatch");
            return None;
        }

        let mut launches: Vec<(ProviderId, Arc<dyn Translator>)> = Vec::new();
        let mut generation = Generation::default();

        self.view.send_modify(|view| {
            generation = view.begin(text);
            for entry in self.registry.entries() {
                let state = match &entry.backend {
                    Backend::Disabled => ProviderState::Skipped,
                    Backend::Misconfigured(message) => ProviderState::Failed(message.clone()),
                    Backend::Ready(translator) => {
                        launches.push((entry.id, Arc::clone(translator)));
                        ProviderState::Pending
                    }
                };
                view.set(entry.id, state);
            }
        });

        info!(%generation, providers = launches.len(), "dispatching translation");

        for (id, translator) in launches {
            self.launch(generation, id, translator, text.to_string());
        }
        Some(generation)
    }

    fn launch(
        &self,
        generation: Generation,
        id: ProviderId,
        translator: Arc<dyn Translator>,
        text: String,
    ) {
        let view = Arc::clone(&self.view);
        let format = self.format;

        tokio::spawn(async move {
            // A panicking adapter must still settle its slot.
            let call = tokio::spawn(async move { translator.translate(&text).await });
            let state = match call.await {
                Ok(Ok(raw)) => ProviderState::Succeeded(format.apply(&raw)),
                Ok(Err(e)) => {
                    debug!(provider = %id, %generation, error = %e, "provider failed");
                    ProviderState::Failed(e.to_string())
                }
                Err(e) => {
                    warn!(provider = %id, %generation, error = %e, "provider task aborted");
                    ProviderState::Failed(format!("{id} translator panicked"))
                }
            };
            settle(&view, generation, id, state);
        });
    }

    /// Waits until `generation` has no pending providers or has been superseded,
    /// then returns the view at that moment.
    pub async fn settled(&self, generation: Generation) -> AggregateView {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        rx.wait_for(|view| view.generation() != generation || !view.is_loading())
            .await
            .map_or_else(|_| self.view(), |view| view.clone())
    }
}

impl Dispatch for Orchestrator {
    fn dispatch(&self, text: &str) {
        Self::dispatch(self, text);
    }
}

/// Applies a settled result if its generation is still current.
///
/// Returns whether the result was applied (and therefore published).
fn settle(
    view: &watch::Sender<AggregateView>,
    generation: Generation,
    id: ProviderId,
    state: ProviderState,
) -> bool {
    view.send_if_modified(|current| {
        if current.generation() != generation {
            debug!(
                provider = %id,
                stale = %generation,
                current = %current.generation(),
                "discarding stale result"
            );
            return false;
        }
        debug!(provider = %id, %generation, ?state, "provider settled");
        current.set(id, state);
        true
    })
}
