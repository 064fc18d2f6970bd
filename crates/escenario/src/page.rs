//! Page objects.
//!
//! A page type implements [`Page`] to describe one UI screen or component:
//! its logical name and its element declarations. The runtime wraps each page
//! in a [`PageObject`], which owns the resolved name→element map and the
//! primary element set, and exposes the operations scenario steps drive:
//! lookup by name, text extraction, and the bulk appear/disappear waits.

use crate::element::{readable_text, ElementRef};
use crate::resolver::{self, ElementDecl, NamedElement};
use crate::result::{EscenarioError, EscenarioResult};
use crate::wait::{self, Condition, WaitOptions};
use std::any::Any;
use std::collections::HashMap;

/// One UI screen or component, described declaratively.
///
/// # Example
///
/// ```ignore
/// struct LoginPage {
///     username: DriverElement,
///     password: DriverElement,
///     submit: DriverElement,
/// }
///
/// impl Page for LoginPage {
///     fn name(&self) -> &str {
///         "Login page"
///     }
///
///     fn elements(&self) -> Vec<ElementDecl> {
///         vec![
///             ElementDecl::element(self.username.handle()).named("Username"),
///             ElementDecl::element(self.password.handle()).named("Password"),
///             ElementDecl::element(self.submit.handle()).named("Submit"),
///         ]
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait Page: Any + Send + Sync {
    /// Logical page name, unique within a registry
    fn name(&self) -> &str;

    /// Fresh element declarations with the currently injected handles.
    ///
    /// Called on every (re-)attachment; the automation library is
    /// responsible for the handles being live at that point.
    fn elements(&self) -> Vec<ElementDecl>;

    /// Upcast for typed page lookup
    fn as_any(&self) -> &dyn Any;

    /// Concrete type name for diagnostics
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A bound page: the user's [`Page`] plus its resolved element views.
pub struct PageObject {
    page: Box<dyn Page>,
    name: String,
    named: HashMap<String, NamedElement>,
    primary: Vec<ElementRef>,
    wait_options: WaitOptions,
}

impl std::fmt::Debug for PageObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageObject")
            .field("name", &self.name)
            .field("type", &self.page.type_name())
            .field("named", &self.named.len())
            .field("primary", &self.primary.len())
            .finish()
    }
}

impl PageObject {
    /// Bind a page, resolving its declarations immediately.
    ///
    /// Configuration errors (empty page name, duplicate element names, named
    /// non-element fields) surface here, at registry build time.
    pub fn new(page: Box<dyn Page>, wait_options: WaitOptions) -> EscenarioResult<Self> {
        let name = page.name().to_string();
        if name.is_empty() {
            return Err(EscenarioError::UnnamedPage {
                type_name: page.type_name().to_string(),
            });
        }
        let resolved = resolver::resolve(&name, &page.elements())?;
        Ok(Self {
            page,
            name,
            named: resolved.named,
            primary: resolved.primary,
            wait_options,
        })
    }

    /// Logical page name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logical names of all bound elements
    #[must_use]
    pub fn named_element_names(&self) -> Vec<&str> {
        self.named.keys().map(String::as_str).collect()
    }

    /// Number of primary (non-optional) elements
    #[must_use]
    pub fn primary_count(&self) -> usize {
        self.primary.len()
    }

    /// Typed view of the underlying page
    #[must_use]
    pub fn downcast_ref<P: Page>(&self) -> Option<&P> {
        self.page.as_any().downcast_ref()
    }

    /// Whether the underlying page is a `P`
    #[must_use]
    pub fn is_page<P: Page>(&self) -> bool {
        self.page.as_any().is::<P>()
    }

    /// Re-read declarations and rebuild both element views.
    ///
    /// The automation library may rebuild handles per navigation, so the
    /// registry re-attaches a page every time it becomes active.
    pub fn attach(&mut self) -> EscenarioResult<&mut Self> {
        let resolved = resolver::resolve(&self.name, &self.page.elements())?;
        self.named = resolved.named;
        self.primary = resolved.primary;
        tracing::debug!(page = %self.name, "attached page");
        Ok(self)
    }

    /// Get a single element by its logical name
    pub fn get_element(&self, name: &str) -> EscenarioResult<ElementRef> {
        match self.named.get(name) {
            Some(NamedElement::Single(handle)) => Ok(handle.clone()),
            _ => Err(EscenarioError::ElementNotFound {
                name: name.to_string(),
                page: self.name.clone(),
            }),
        }
    }

    /// Get an element list by its logical name
    pub fn get_elements_list(&self, name: &str) -> EscenarioResult<Vec<ElementRef>> {
        match self.named.get(name) {
            Some(NamedElement::List(handles)) => Ok(handles.clone()),
            _ => Err(EscenarioError::NotAnElementList {
                name: name.to_string(),
                page: self.name.clone(),
            }),
        }
    }

    /// Text of a named element: input value for `input` tags, inner text otherwise
    pub fn get_element_text(&self, name: &str) -> EscenarioResult<String> {
        let element = self.get_element(name)?;
        Ok(readable_text(element.as_ref()))
    }

    /// Texts of a named element list, order preserved
    pub fn get_elements_list_texts(&self, name: &str) -> EscenarioResult<Vec<String>> {
        let elements = self.get_elements_list(name)?;
        Ok(elements
            .iter()
            .map(|element| readable_text(element.as_ref()))
            .collect())
    }

    /// Wait until every primary element is visible.
    ///
    /// Waits run concurrently; the first timeout (in declaration order)
    /// fails the call. A page with no primary elements succeeds immediately.
    /// Returns the page for chaining.
    pub fn appeared(&self) -> EscenarioResult<&Self> {
        tracing::debug!(page = %self.name, elements = self.primary.len(), "waiting for page to appear");
        wait::wait_elements_until(&self.primary, Condition::Visible, &self.wait_options)?;
        Ok(self)
    }

    /// Wait until every primary element is gone from the page.
    pub fn disappeared(&self) -> EscenarioResult<&Self> {
        tracing::debug!(page = %self.name, elements = self.primary.len(), "waiting for page to disappear");
        wait::wait_elements_until(&self.primary, Condition::Absent, &self.wait_options)?;
        Ok(self)
    }

    /// Apply one wait condition to an explicit set of handles
    pub fn wait_elements_until(
        &self,
        condition: Condition,
        timeout_ms: u64,
        elements: &[ElementRef],
    ) -> EscenarioResult<()> {
        let options = self.wait_options.clone().with_timeout(timeout_ms);
        wait::wait_elements_until(elements, condition, &options)
    }

    /// Apply one wait condition to elements resolved by name.
    ///
    /// List-typed names are flattened; names bound to nothing are skipped.
    pub fn wait_named_until(
        &self,
        condition: Condition,
        timeout_ms: u64,
        names: &[&str],
    ) -> EscenarioResult<()> {
        let mut elements = Vec::new();
        for name in names {
            match self.named.get(*name) {
                Some(NamedElement::Single(handle)) => elements.push(handle.clone()),
                Some(NamedElement::List(handles)) => elements.extend(handles.iter().cloned()),
                None => {}
            }
        }
        self.wait_elements_until(condition, timeout_ms, &elements)
    }

    /// Find the first element in a list whose rendered text equals `text`
    pub fn find_by_visible_text(
        elements: &[ElementRef],
        text: &str,
    ) -> EscenarioResult<ElementRef> {
        elements
            .iter()
            .find(|element| element.text() == text)
            .cloned()
            .ok_or_else(|| EscenarioError::NoElementWithText {
                text: text.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockElement;
    use std::time::Duration;

    struct LoginPage {
        username: MockElement,
        password: MockElement,
        submit: MockElement,
        banner: MockElement,
        menu: Vec<MockElement>,
    }

    impl LoginPage {
        fn sample() -> Self {
            Self {
                username: MockElement::new("input").visible().with_value("admin"),
                password: MockElement::new("input").visible(),
                submit: MockElement::new("button").visible().with_text("Sign in"),
                banner: MockElement::new("div").hidden().with_text("Promo"),
                menu: vec![
                    MockElement::new("li").visible().with_text("Home"),
                    MockElement::new("li").visible().with_text("Profile"),
                    MockElement::new("li").visible().with_text("Logout"),
                ],
            }
        }
    }

    impl Page for LoginPage {
        fn name(&self) -> &str {
            "Login page"
        }

        fn elements(&self) -> Vec<ElementDecl> {
            vec![
                ElementDecl::element(self.username.clone().into_ref()).named("Username"),
                ElementDecl::element(self.password.clone().into_ref()).named("Password"),
                ElementDecl::element(self.submit.clone().into_ref()).named("Submit"),
                ElementDecl::element(self.banner.clone().into_ref())
                    .named("Promo banner")
                    .optional(),
                ElementDecl::collection(self.menu.iter().map(|e| e.clone().into_ref()).collect())
                    .named("Menu items"),
            ]
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn bound() -> PageObject {
        let options = WaitOptions::new().with_timeout(200).with_poll_interval(10);
        PageObject::new(Box::new(LoginPage::sample()), options).unwrap()
    }

    mod binding_tests {
        use super::*;

        #[test]
        fn test_new_resolves_elements() {
            let page = bound();
            assert_eq!(page.name(), "Login page");
            // banner is optional, menu flattens to three
            assert_eq!(page.primary_count(), 6);
            assert_eq!(page.named_element_names().len(), 5);
        }

        #[test]
        fn test_empty_name_is_configuration_error() {
            struct Nameless;
            impl Page for Nameless {
                fn name(&self) -> &str {
                    ""
                }
                fn elements(&self) -> Vec<ElementDecl> {
                    Vec::new()
                }
                fn as_any(&self) -> &dyn Any {
                    self
                }
            }

            let err = PageObject::new(Box::new(Nameless), WaitOptions::new()).unwrap_err();
            assert!(matches!(err, EscenarioError::UnnamedPage { .. }));
        }

        #[test]
        fn test_attach_rebuilds_maps() {
            let mut page = bound();
            let before: Vec<String> = {
                let mut names: Vec<_> = page
                    .named_element_names()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                names.sort();
                names
            };
            page.attach().unwrap();
            let mut after: Vec<_> = page
                .named_element_names()
                .iter()
                .map(ToString::to_string)
                .collect();
            after.sort();
            assert_eq!(before, after);
        }

        #[test]
        fn test_downcast() {
            let page = bound();
            assert!(page.is_page::<LoginPage>());
            let login: &LoginPage = page.downcast_ref().unwrap();
            assert_eq!(login.menu.len(), 3);
        }

        #[test]
        fn test_debug_names_the_page() {
            let page = bound();
            let debug = format!("{page:?}");
            assert!(debug.contains("Login page"));
        }
    }

    mod lookup_tests {
        use super::*;

        #[test]
        fn test_get_element() {
            let page = bound();
            let submit = page.get_element("Submit").unwrap();
            assert_eq!(submit.text(), "Sign in");
        }

        #[test]
        fn test_get_element_missing() {
            let page = bound();
            let err = page.get_element("Missing").err().unwrap();
            assert!(matches!(err, EscenarioError::ElementNotFound { .. }));
        }

        #[test]
        fn test_get_element_on_list_name_fails() {
            let page = bound();
            assert!(page.get_element("Menu items").is_err());
        }

        #[test]
        fn test_get_elements_list() {
            let page = bound();
            let menu = page.get_elements_list("Menu items").unwrap();
            assert_eq!(menu.len(), 3);
        }

        #[test]
        fn test_get_elements_list_on_single_name_fails() {
            let page = bound();
            let err = page.get_elements_list("Submit").err().unwrap();
            assert!(matches!(err, EscenarioError::NotAnElementList { .. }));
        }

        #[test]
        fn test_element_text_input_rule() {
            let page = bound();
            assert_eq!(page.get_element_text("Username").unwrap(), "admin");
            assert_eq!(page.get_element_text("Submit").unwrap(), "Sign in");
        }

        #[test]
        fn test_elements_list_texts_order() {
            let page = bound();
            let texts = page.get_elements_list_texts("Menu items").unwrap();
            assert_eq!(texts, vec!["Home", "Profile", "Logout"]);
        }
    }

    mod wait_tests {
        use super::*;

        #[test]
        fn test_appeared_all_visible() {
            let page = bound();
            assert!(page.appeared().is_ok());
        }

        #[test]
        fn test_appeared_chains() {
            let page = bound();
            let chained = page.appeared().unwrap();
            assert_eq!(chained.name(), "Login page");
        }

        #[test]
        fn test_appeared_ignores_hidden_optional() {
            // banner is hidden but optional, so appeared() must not wait on it
            let page = bound();
            assert!(page.appeared().is_ok());
        }

        #[test]
        fn test_appeared_times_out_on_hidden_primary() {
            let sample = LoginPage::sample();
            sample.submit.set_visible(false);
            let options = WaitOptions::new().with_timeout(100).with_poll_interval(10);
            let page = PageObject::new(Box::new(sample), options).unwrap();
            let err = page.appeared().unwrap_err();
            assert!(matches!(err, EscenarioError::WaitTimeout { .. }));
        }

        #[test]
        fn test_appeared_vacuous_without_primaries() {
            struct EmptyPage;
            impl Page for EmptyPage {
                fn name(&self) -> &str {
                    "Empty page"
                }
                fn elements(&self) -> Vec<ElementDecl> {
                    Vec::new()
                }
                fn as_any(&self) -> &dyn Any {
                    self
                }
            }

            let options = WaitOptions::new().with_timeout(100);
            let page = PageObject::new(Box::new(EmptyPage), options).unwrap();
            let start = std::time::Instant::now();
            assert!(page.appeared().is_ok());
            assert!(start.elapsed() < Duration::from_millis(100));
        }

        #[test]
        fn test_disappeared_when_elements_removed() {
            let sample = LoginPage::sample();
            let all = [
                sample.username.clone(),
                sample.password.clone(),
                sample.submit.clone(),
            ];
            let menu = sample.menu.clone();
            let options = WaitOptions::new().with_timeout(200).with_poll_interval(10);
            let page = PageObject::new(Box::new(sample), options).unwrap();

            for element in all.iter().chain(menu.iter()) {
                element.set_present(false);
            }
            assert!(page.disappeared().is_ok());
        }

        #[test]
        fn test_wait_named_until_flattens_and_skips_unknown() {
            let page = bound();
            let result =
                page.wait_named_until(Condition::Visible, 100, &["Menu items", "No such name"]);
            assert!(result.is_ok());
        }

        #[test]
        fn test_wait_elements_until_explicit_handles() {
            let page = bound();
            let submit = page.get_element("Submit").unwrap();
            assert!(page
                .wait_elements_until(Condition::Visible, 100, &[submit])
                .is_ok());
        }
    }

    mod visible_text_tests {
        use super::*;

        #[test]
        fn test_find_by_visible_text_returns_match() {
            let page = bound();
            let menu = page.get_elements_list("Menu items").unwrap();
            let profile = PageObject::find_by_visible_text(&menu, "Profile").unwrap();
            assert_eq!(profile.text(), "Profile");
        }

        #[test]
        fn test_find_by_visible_text_no_match() {
            let page = bound();
            let menu = page.get_elements_list("Menu items").unwrap();
            let err = PageObject::find_by_visible_text(&menu, "Settings").err().unwrap();
            assert!(matches!(
                err,
                EscenarioError::NoElementWithText { text } if text == "Settings"
            ));
        }
    }
}
