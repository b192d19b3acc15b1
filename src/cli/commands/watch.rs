//! Live mode: every stdin line is an input change, debounced before dispatch.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{oneshot, watch};
use tracing::info;

use super::load_orchestrator;
use crate::config::ResolveOptions;
use crate::orchestrator::{AggregateView, Debouncer, default_window, order};
use crate::render::{Renderer, TerminalRenderer};
use crate::ui::Style;

/// Runs live mode until stdin closes and returns the process exit code.
///
/// A line still waiting in the debouncer at end of input is dispatched, and
/// the command exits once that generation has settled.
pub async fn run_watch(options: ResolveOptions) -> Result<i32> {
    let (resolved, orchestrator) = load_orchestrator(&options)?;

    let enabled = orchestrator.registry().enabled_count();
    if enabled == 0 {
        eprintln!(
            "{} No translation providers are enabled. Run 'namecast configure' first.",
            Style::error("✗")
        );
        return Ok(exitcode::CONFIG);
    }

    let window = resolved.debounce.unwrap_or_else(|| default_window(enabled));
    info!(
        providers = enabled,
        window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
        "watching stdin"
    );

    let orchestrator = Arc::new(orchestrator);
    let (shutdown, shutdown_rx) = oneshot::channel();
    let renderer = tokio::spawn(render_loop(
        orchestrator.subscribe(),
        shutdown_rx,
        TerminalRenderer::stdout(),
    ));

    let debouncer = Debouncer::new(Arc::clone(&orchestrator), window);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        debouncer.notify(&line);
    }

    debouncer.finish().await;
    let last = orchestrator.view().generation();
    orchestrator.settled(last).await;

    let _ = shutdown.send(());
    renderer.await.context("Render task failed")?;

    Ok(exitcode::OK)
}

/// Renders the latest snapshot after each publish until `shutdown` fires,
/// then renders the final snapshot if it has not been shown yet.
///
/// Publishes that land while a render is in progress collapse into one
/// render of the newest view; intermediate snapshots are never drawn.
pub async fn render_loop<R: Renderer>(
    mut rx: watch::Receiver<AggregateView>,
    mut shutdown: oneshot::Receiver<()>,
    mut renderer: R,
) -> R {
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = &mut shutdown => {
                if rx.has_changed().unwrap_or(false) {
                    render_latest(&mut rx, &mut renderer);
                }
                break;
            }
        }
        render_latest(&mut rx, &mut renderer);
    }
    renderer
}

fn render_latest<R: Renderer>(rx: &mut watch::Receiver<AggregateView>, renderer: &mut R) {
    let view = rx.borrow_and_update().clone();
    renderer.render(&view, &order(&view));
}
