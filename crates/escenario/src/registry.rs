//! Page registry.
//!
//! One registry per scenario context: logical page name → [`PageObject`],
//! plus the mutable "current page" reference scenario steps navigate
//! through. Registration happens once at context startup; activation
//! re-attaches a page because handles may be rebuilt per navigation.

use crate::page::{Page, PageObject};
use crate::result::{EscenarioError, EscenarioResult};
use crate::wait::WaitOptions;
use std::collections::HashMap;

/// Registry of bound pages with a current-page reference
#[derive(Debug, Default)]
pub struct PageRegistry {
    pages: HashMap<String, PageObject>,
    current: Option<String>,
    wait_options: WaitOptions,
}

impl PageRegistry {
    /// Create an empty registry with default wait options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given wait options
    #[must_use]
    pub fn with_wait_options(wait_options: WaitOptions) -> Self {
        Self {
            pages: HashMap::new(),
            current: None,
            wait_options,
        }
    }

    /// Register a page under its own declared name.
    ///
    /// Binds and resolves the page immediately, so element configuration
    /// errors fail suite startup. Registering a second page under an
    /// already-taken name is a configuration error.
    pub fn register(&mut self, page: Box<dyn Page>) -> EscenarioResult<()> {
        let bound = PageObject::new(page, self.wait_options.clone())?;
        let name = bound.name().to_string();
        if self.pages.contains_key(&name) {
            return Err(EscenarioError::DuplicatePage { name });
        }
        tracing::debug!(page = %name, "registered page");
        self.pages.insert(name, bound);
        Ok(())
    }

    /// Exact lookup by page name
    pub fn get(&self, name: &str) -> EscenarioResult<&PageObject> {
        self.pages.get(name).ok_or_else(|| EscenarioError::PageNotFound {
            name: name.to_string(),
        })
    }

    /// Exact lookup by page name, mutable
    pub fn get_mut(&mut self, name: &str) -> EscenarioResult<&mut PageObject> {
        self.pages
            .get_mut(name)
            .ok_or_else(|| EscenarioError::PageNotFound {
                name: name.to_string(),
            })
    }

    /// Typed lookup: the page registered under `name`, viewed as a `P`
    pub fn get_as<P: Page>(&self, name: &str) -> EscenarioResult<&P> {
        let page = self.get(name)?;
        page.downcast_ref::<P>()
            .ok_or_else(|| EscenarioError::PageTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<P>().to_string(),
            })
    }

    /// The page most recently made current
    pub fn current_page(&self) -> EscenarioResult<&PageObject> {
        let name = self.current.as_deref().ok_or(EscenarioError::NoCurrentPage)?;
        self.get(name)
    }

    /// Make the named page current, unconditionally replacing any previous one
    pub fn set_current_page(&mut self, name: &str) -> EscenarioResult<()> {
        if !self.pages.contains_key(name) {
            return Err(EscenarioError::PageNotFound {
                name: name.to_string(),
            });
        }
        tracing::debug!(page = %name, "current page set");
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Re-attach the named page and make it current.
    ///
    /// The by-name navigation path for scenario steps.
    pub fn activate(&mut self, name: &str) -> EscenarioResult<&PageObject> {
        self.get_mut(name)?.attach()?;
        self.current = Some(name.to_string());
        Ok(&self.pages[name])
    }

    /// Resolve the page of concrete type `P`, re-attach it, optionally wait
    /// for it to appear, and make it current.
    ///
    /// The primary navigation entry point for typed step definitions.
    pub fn get_page<P: Page>(&mut self, check_appeared: bool) -> EscenarioResult<&PageObject> {
        let name = self
            .pages
            .values()
            .find(|page| page.is_page::<P>())
            .map(|page| page.name().to_string())
            .ok_or_else(|| EscenarioError::PageNotFound {
                name: std::any::type_name::<P>().to_string(),
            })?;

        let page = self.pages.get_mut(&name).ok_or_else(|| {
            EscenarioError::PageNotFound { name: name.clone() }
        })?;
        page.attach()?;
        if check_appeared {
            page.appeared()?;
        }
        self.current = Some(name.clone());
        Ok(&self.pages[&name])
    }

    /// Names of all registered pages
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.pages.keys().map(String::as_str).collect()
    }

    /// Number of registered pages
    #[must_use]
    pub fn count(&self) -> usize {
        self.pages.len()
    }
}
