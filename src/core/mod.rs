//! # Core Application Logic
//!
//! This module contains the search screen's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    API     │      │  Platform  │
//!     │  Adapter   │      │ (country   │      │   (link    │
//!     │ (ratatui)  │      │  source)   │      │  opener)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all screen state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered configuration (file, env, CLI)

pub mod action;
pub mod config;
pub mod state;
