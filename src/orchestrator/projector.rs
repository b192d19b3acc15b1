//! Display ordering over the aggregate view.

use super::state::{AggregateView, ProviderState};
use crate::provider::ProviderId;

/// Display priority of a state; lower sorts first.
pub fn rank(state: &ProviderState) -> u8 {
    match state {
        ProviderState::Succeeded(text) if !text.is_empty() => 0,
        ProviderState::Idle | ProviderState::Skipped | ProviderState::Succeeded(_) => 1,
        ProviderState::Pending => 2,
        ProviderState::Failed(_) => 3,
    }
}

/// Orders the providers of `view` for display.
///
/// The sort is stable, so ties keep registry declaration order.
pub fn order(view: &AggregateView) -> Vec<ProviderId> {
    let mut entries: Vec<_> = view.entries().iter().collect();
    entries.sort_by_key(|entry| rank(&entry.state));
    entries.into_iter().map(|entry| entry.id).collect()
}
