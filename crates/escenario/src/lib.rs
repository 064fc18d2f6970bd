//! Escenario: declarative page-object binding for acceptance-test scenarios.
//!
//! Page types declare their elements; the runtime binds declarations to live
//! UI handles, keeps a per-scenario page registry with a current page, and
//! gives every scenario an isolated variable store with `{name}` template
//! substitution.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     ESCENARIO Architecture                       │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌──────────────┐    ┌───────────────┐       │
//! │   │ Scenario   │    │ Page         │    │ UI-automation │       │
//! │   │ steps      │───►│ registry &   │───►│ library       │       │
//! │   │ (BDD)      │    │ page objects │    │ (handles)     │       │
//! │   └─────┬──────┘    └──────────────┘    └───────────────┘       │
//! │         │           ┌──────────────┐                            │
//! │         └──────────►│ Scoped       │  one store per scenario    │
//! │                     │ variables    │  thread, no sharing        │
//! │                     └──────────────┘                            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The browser side stays behind the [`ElementHandle`] trait: Escenario asks
//! handles about visibility, presence, and text, and waits on them. It never
//! drives the DOM itself.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod config;
mod context;
mod element;
mod page;
mod registry;
mod result;
mod variables;

/// Element declarations and resolution
pub mod resolver;

/// Mock element handles for testing step definitions without a browser
pub mod mock;

/// Wait conditions, options, and polling
pub mod wait;

pub use config::{Config, APPEAR_TIMEOUT_ENV, POLL_INTERVAL_ENV};
pub use context::{
    with_current, PageCatalog, ScenarioContext, ScenarioScope, ScenarioSink, TracingSink,
};
pub use element::{ElementHandle, ElementRef};
pub use page::{Page, PageObject};
pub use registry::PageRegistry;
pub use resolver::{ElementDecl, FieldValue, NamedElement, ResolvedElements};
pub use result::{EscenarioError, EscenarioResult};
pub use variables::ScopedVariables;
pub use wait::{Condition, WaitOptions, DEFAULT_APPEAR_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS};
