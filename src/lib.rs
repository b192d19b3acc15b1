//! # namecast - multi-provider identifier translation
//!
//! `namecast` turns a short phrase in any language into a code identifier.
//! The phrase goes to every enabled translation provider at once, each result
//! is converted into one case format, and results are shown as they arrive.
//!
//! ## Features
//!
//! - **Concurrent providers**: Google, OpenAI, Deepseek, GLM and Tencent
//! - **Case formats**: `CONSTANT_CASE`, `snake_case`, `camelCase`
//! - **Live mode**: debounced input with stale results discarded by generation
//! - **Actions**: copy to the terminal clipboard or paste to stdout
//!
//! ## Quick Start
//!
//! ```bash
//! # One-shot, constant case
//! namecast "用户 名称"
//!
//! # Snake case, print the top result only
//! namecast -f snake --print "nombre de usuario"
//!
//! # Live mode: each stdin line is an edit of the query
//! namecast watch -f camel
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/namecast/config.toml`:
//!
//! ```toml
//! [namecast]
//! format = "snake"
//! to = "en"
//!
//! [providers.deepseek]
//! enabled = true
//! api_key_env = "DEEPSEEK_API_KEY"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// Case formats applied to every result.
pub mod format;

/// Query input from arguments and stdin.
pub mod input;

/// Dispatch, debouncing, generations and display order.
pub mod orchestrator;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Translation provider adapters and the provider registry.
pub mod provider;

/// Rendering of published views and user actions.
pub mod render;

/// Terminal UI components (spinner, colors, prompts).
pub mod ui;
