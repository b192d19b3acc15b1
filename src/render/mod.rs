//! Presentation of published views.
//!
//! A [`Renderer`] receives every published [`AggregateView`] together with the
//! projector's display order. Successful entries expose the two user
//! [`Action`]s, copy and paste.

mod actions;
mod terminal;

use crate::orchestrator::AggregateView;
use crate::provider::ProviderId;

pub use actions::{Action, osc52_sequence};
pub use terminal::TerminalRenderer;

/// Consumer of view snapshots.
pub trait Renderer {
    fn render(&mut self, view: &AggregateView, order: &[ProviderId]);
}

/// Top result in display order, if any provider produced a non-empty result.
pub fn best_result<'a>(view: &'a AggregateView, order: &[ProviderId]) -> Option<(ProviderId, &'a str)> {
    order
        .iter()
        .find_map(|id| view.state(*id).result().map(|text| (*id, text)))
}
