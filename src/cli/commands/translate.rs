//! One-shot translation: dispatch the query once and wait for every provider.

use anyhow::Result;
use inquire::Select;
use std::fmt;
use std::io;
use tracing::debug;

use super::load_orchestrator;
use crate::config::ResolveOptions;
use crate::input::InputReader;
use crate::orchestrator::{AggregateView, Orchestrator, ProviderState, order};
use crate::provider::ProviderId;
use crate::render::{Action, Renderer, TerminalRenderer, best_result};
use crate::ui::{Spinner, Style, handle_prompt_cancellation};

pub struct TranslateOptions {
    pub text: Option<String>,
    pub resolve: ResolveOptions,
    pub print: bool,
    pub copy: bool,
    pub pick: bool,
}

/// Runs a one-shot translation and returns the process exit code.
///
/// The input bypasses the debouncer; there is nothing to coalesce.
pub async fn run_translate(options: TranslateOptions) -> Result<i32> {
    let (_, orchestrator) = load_orchestrator(&options.resolve)?;

    if orchestrator.registry().enabled_count() == 0 {
        eprintln!("{}", no_providers_message());
        return Ok(exitcode::CONFIG);
    }

    let text = InputReader::read(options.text.as_deref())?;
    let view = match translate_once(&orchestrator, &text).await {
        Some(view) => view,
        None => {
            debug!("input is blank, nothing to translate");
            return Ok(exitcode::OK);
        }
    };

    let order = order(&view);
    let best = best_result(&view, &order);

    if options.pick {
        if best.is_none() {
            TerminalRenderer::new(io::stderr()).render(&view, &order);
            return Ok(exitcode::UNAVAILABLE);
        }
        handle_prompt_cancellation(|| pick(&view, &order))?;
        return Ok(exitcode::OK);
    }

    if options.print {
        match best {
            Some((_, text)) => println!("{text}"),
            None => TerminalRenderer::new(io::stderr()).render(&view, &order),
        }
    } else {
        TerminalRenderer::stdout().render(&view, &order);
    }

    let Some((id, text)) = best else {
        eprintln!("{} No provider returned a translation", Style::error("✗"));
        return Ok(exitcode::UNAVAILABLE);
    };

    if options.copy {
        Action::Copy.perform(text);
        eprintln!(
            "{} Copied {} from {}",
            Style::success("✓"),
            Style::value(text),
            Style::secondary(id.title())
        );
    }

    Ok(exitcode::OK)
}

/// Dispatches `text` and follows every publish until the generation settles.
///
/// Returns `None` for blank input.
pub async fn translate_once(orchestrator: &Orchestrator, text: &str) -> Option<AggregateView> {
    let mut rx = orchestrator.subscribe();
    let generation = orchestrator.dispatch(text)?;
    let spinner = Spinner::new("Translating...");

    loop {
        let view = rx.borrow_and_update().clone();
        if view.generation() != generation || !view.is_loading() {
            spinner.stop();
            return Some(view);
        }
        spinner.set_message(progress_message(&view));
        if rx.changed().await.is_err() {
            spinner.stop();
            return Some(orchestrator.view());
        }
    }
}

/// Spinner text such as `Translating... 2/4`.
pub fn progress_message(view: &AggregateView) -> String {
    let active = view
        .entries()
        .iter()
        .filter(|entry| !matches!(entry.state, ProviderState::Skipped));
    let (mut settled, mut total) = (0, 0);
    for entry in active {
        total += 1;
        if entry.state.is_settled() {
            settled += 1;
        }
    }
    format!("Translating... {settled}/{total}")
}

fn no_providers_message() -> String {
    format!(
        "{} No translation providers are enabled.\n\n\
         Enable one with:\n  \
         - namecast configure\n  \
         - [providers.<name>] enabled = true in config.toml",
        Style::error("✗")
    )
}

/// A successful entry offered in the picker.
struct Candidate<'a> {
    id: ProviderId,
    text: &'a str,
}

impl fmt::Display for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  ({})", self.text, self.id.title())
    }
}

fn pick(view: &AggregateView, order: &[ProviderId]) -> Result<()> {
    let candidates: Vec<Candidate<'_>> = order
        .iter()
        .filter_map(|id| {
            view.state(*id)
                .result()
                .map(|text| Candidate { id: *id, text })
        })
        .collect();

    let candidate = Select::new("Result:", candidates).prompt()?;
    let action = Select::new("Action:", Action::ALL.to_vec()).prompt()?;
    debug!(provider = %candidate.id, %action, "picked");
    action.perform(candidate.text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_message_ignores_skipped() {
        let mut view = AggregateView::default();
        view.begin("hello");
        for id in ProviderId::ALL {
            view.set(id, ProviderState::Skipped);
        }
        view.set(ProviderId::Google, ProviderState::Succeeded("HELLO".into()));
        view.set(ProviderId::Glm, ProviderState::Pending);
        view.set(ProviderId::Tencent, ProviderState::Failed("boom".into()));

        assert_eq!(progress_message(&view), "Translating... 2/3");
    }

    #[test]
    fn test_candidate_display() {
        let candidate = Candidate {
            id: ProviderId::Deepseek,
            text: "helloWorld",
        };
        assert_eq!(candidate.to_string(), "helloWorld  (Deepseek Translate)");
    }
}
