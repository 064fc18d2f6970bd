//! Scenario context.
//!
//! One [`ScenarioContext`] per running scenario: the scoped variable store,
//! a freshly built page registry, and the diagnostic sink of the BDD runner.
//! The context is a plain value: thread it into step definitions directly,
//! or bind it to the executing thread with [`ScenarioScope`] and reach it
//! through [`with_current`]. There is no process-wide current context;
//! scenarios running on different threads never share state.

use crate::config::Config;
use crate::page::{Page, PageObject};
use crate::registry::PageRegistry;
use crate::result::{EscenarioError, EscenarioResult};
use crate::variables::ScopedVariables;
use serde_json::Value;
use std::cell::RefCell;

/// Diagnostic output seam of the BDD scenario runner
pub trait ScenarioSink: Send + Sync {
    /// Append one line to the scenario's report
    fn write(&self, message: &str);
}

/// Default sink: routes scenario diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ScenarioSink for TracingSink {
    fn write(&self, message: &str) {
        tracing::info!(target: "escenario::scenario", "{message}");
    }
}

type PageFactory = Box<dyn Fn() -> Box<dyn Page> + Send + Sync>;

/// Catalog of every page type a test suite declares.
///
/// Built once at suite startup; each scenario context builds its own fresh
/// [`PageRegistry`] from it, because the automation library may rebuild
/// handles between scenarios.
#[derive(Default)]
pub struct PageCatalog {
    factories: Vec<PageFactory>,
}

impl std::fmt::Debug for PageCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCatalog")
            .field("pages", &self.factories.len())
            .finish()
    }
}

impl PageCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page constructor
    pub fn add<F>(&mut self, factory: F)
    where
        F: Fn() -> Box<dyn Page> + Send + Sync + 'static,
    {
        self.factories.push(Box::new(factory));
    }

    /// Add a page type constructible via `Default`
    pub fn register<P: Page + Default>(&mut self) {
        self.add(|| Box::new(P::default()));
    }

    /// Number of declared page types
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build a fresh registry holding one bound page per declared type.
    ///
    /// Any page configuration error surfaces here and should abort the
    /// suite.
    pub fn build_registry(&self, config: &Config) -> EscenarioResult<PageRegistry> {
        let mut registry = PageRegistry::with_wait_options(config.wait_options());
        for factory in &self.factories {
            registry.register(factory())?;
        }
        Ok(registry)
    }
}

/// Everything one running scenario works with
pub struct ScenarioContext {
    sink: Box<dyn ScenarioSink>,
    variables: ScopedVariables,
    pages: PageRegistry,
}

impl std::fmt::Debug for ScenarioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioContext")
            .field("variables", &self.variables.len())
            .field("pages", &self.pages.count())
            .finish()
    }
}

impl ScenarioContext {
    /// Create a context for one scenario: fresh variables, fresh registry
    pub fn new(
        catalog: &PageCatalog,
        config: &Config,
        sink: Box<dyn ScenarioSink>,
    ) -> EscenarioResult<Self> {
        Ok(Self {
            sink,
            variables: ScopedVariables::new(),
            pages: catalog.build_registry(config)?,
        })
    }

    /// Create a context with default configuration and the tracing sink
    pub fn with_defaults(catalog: &PageCatalog) -> EscenarioResult<Self> {
        Self::new(catalog, &Config::default(), Box::new(TracingSink))
    }

    /// Write one diagnostic line to the scenario report
    pub fn write(&self, message: impl std::fmt::Display) {
        self.sink.write(&message.to_string());
    }

    /// Get a variable; missing names are an error
    pub fn get_var(&self, name: &str) -> EscenarioResult<&Value> {
        self.variables
            .get(name)
            .ok_or_else(|| EscenarioError::VariableNotFound {
                name: name.to_string(),
            })
    }

    /// Get a variable, or `None` if unbound
    #[must_use]
    pub fn try_get_var(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Bind a variable, overwriting any previous binding
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.put(name, value);
    }

    /// The scenario's variable store
    #[must_use]
    pub fn variables(&self) -> &ScopedVariables {
        &self.variables
    }

    /// The scenario's variable store, mutable
    pub fn variables_mut(&mut self) -> &mut ScopedVariables {
        &mut self.variables
    }

    /// Substitute `{name}` tokens from the scenario's variables
    #[must_use]
    pub fn replace_variables(&self, template: &str) -> String {
        self.variables.replace_variables(template)
    }

    /// The scenario's page registry
    #[must_use]
    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    /// The scenario's page registry, mutable
    pub fn pages_mut(&mut self) -> &mut PageRegistry {
        &mut self.pages
    }

    /// The current page
    pub fn current_page(&self) -> EscenarioResult<&PageObject> {
        self.pages.current_page()
    }

    /// Make the named page current
    pub fn set_current_page(&mut self, name: &str) -> EscenarioResult<()> {
        self.pages.set_current_page(name)
    }

    /// Navigate to the page of type `P`, waiting for it to appear
    pub fn get_page<P: Page>(&mut self) -> EscenarioResult<&PageObject> {
        self.pages.get_page::<P>(true)
    }

    /// Navigate to the page of type `P`, optionally waiting for it to appear
    pub fn get_page_with<P: Page>(&mut self, check_appeared: bool) -> EscenarioResult<&PageObject> {
        self.pages.get_page::<P>(check_appeared)
    }

    /// Activate the named page and make it current
    pub fn get_page_by_name(&mut self, name: &str) -> EscenarioResult<&PageObject> {
        self.pages.activate(name)
    }
}

thread_local! {
    static CURRENT: RefCell<Option<ScenarioContext>> = const { RefCell::new(None) };
}

/// RAII binding of a [`ScenarioContext`] to the executing thread.
///
/// The context is reachable through [`with_current`] until the scope is
/// dropped or [`ScenarioScope::take`] recovers it. One scope per thread at a
/// time: entering a new one replaces (and drops) any context still bound.
#[derive(Debug)]
pub struct ScenarioScope {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl ScenarioScope {
    /// Bind `context` to the current thread
    pub fn enter(context: ScenarioContext) -> Self {
        CURRENT.with(|cell| {
            if cell.borrow().is_some() {
                tracing::warn!("replacing a scenario context still bound to this thread");
            }
            *cell.borrow_mut() = Some(context);
        });
        Self {
            _not_send: std::marker::PhantomData,
        }
    }

    /// Unbind and return the context without waiting for drop
    #[must_use]
    pub fn take(self) -> Option<ScenarioContext> {
        let context = CURRENT.with(|cell| cell.borrow_mut().take());
        std::mem::forget(self);
        context
    }
}

impl Drop for ScenarioScope {
    fn drop(&mut self) {
        CURRENT.with(|cell| cell.borrow_mut().take());
    }
}

/// Run `f` against the context bound to this thread.
///
/// Fails with [`EscenarioError::NoScenarioBound`] outside a
/// [`ScenarioScope`].
pub fn with_current<R>(f: impl FnOnce(&mut ScenarioContext) -> R) -> EscenarioResult<R> {
    CURRENT.with(|cell| {
        let mut bound = cell.borrow_mut();
        bound
            .as_mut()
            .map(f)
            .ok_or(EscenarioError::NoScenarioBound)
    })
}
