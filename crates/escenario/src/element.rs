//! Element handle seam.
//!
//! The UI-automation library owning the real DOM access sits behind
//! [`ElementHandle`]. Escenario never locates or manipulates elements itself;
//! it only asks handles about their state and text, and waits on them.
//!
//! Handles are cheap shared references ([`ElementRef`]): the same handle may
//! appear in a page's named map and in its primary set, and bulk waits fan
//! out over handles from multiple threads.

use crate::result::EscenarioResult;
use crate::wait::{Condition, WaitOptions};
use std::sync::Arc;

/// Shared reference to a live UI element handle.
pub type ElementRef = Arc<dyn ElementHandle>;

/// One live UI element, as supplied by the automation library.
///
/// Implementors provide the state and text probes; the `wait_*` methods have
/// default polling implementations and may be overridden with the library's
/// native waits.
///
/// # Example
///
/// ```ignore
/// struct DriverElement { /* automation-library handle */ }
///
/// impl ElementHandle for DriverElement {
///     fn tag_name(&self) -> String { /* ... */ }
///     fn value(&self) -> String { /* ... */ }
///     fn inner_text(&self) -> String { /* ... */ }
///     fn text(&self) -> String { /* ... */ }
///     fn is_visible(&self) -> bool { /* ... */ }
///     fn is_present(&self) -> bool { /* ... */ }
/// }
/// ```
pub trait ElementHandle: Send + Sync {
    /// Lowercase tag name of the underlying element (e.g. `"input"`)
    fn tag_name(&self) -> String;

    /// Current value of an input control
    fn value(&self) -> String;

    /// Rendered inner text of the element
    fn inner_text(&self) -> String;

    /// Visible text of the element, as the automation library renders it
    fn text(&self) -> String;

    /// Whether the element is currently visible
    fn is_visible(&self) -> bool;

    /// Whether the element currently exists in the page
    fn is_present(&self) -> bool;

    /// Wait until `condition` holds for this element.
    ///
    /// Polls with the default interval; fails with
    /// [`EscenarioError::WaitTimeout`](crate::EscenarioError::WaitTimeout)
    /// once `timeout_ms` elapses.
    fn wait_until(&self, condition: Condition, timeout_ms: u64) -> EscenarioResult<()> {
        let options = WaitOptions::new().with_timeout(timeout_ms);
        crate::wait::wait_element_until(self, condition, &options)
    }

    /// Wait until `condition` stops holding for this element.
    fn wait_while(&self, condition: Condition, timeout_ms: u64) -> EscenarioResult<()> {
        let options = WaitOptions::new().with_timeout(timeout_ms);
        crate::wait::wait_element_until(self, condition.negated(), &options)
    }
}

/// Text of an element as a scenario author reads it: the control value for
/// `input` tags, the rendered inner text otherwise.
pub(crate) fn readable_text<E: ElementHandle + ?Sized>(element: &E) -> String {
    if element.tag_name() == "input" {
        element.value()
    } else {
        element.inner_text()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockElement;

    #[test]
    fn test_readable_text_input_uses_value() {
        let input = MockElement::new("input")
            .with_value("typed")
            .with_text("label");
        assert_eq!(readable_text(&input), "typed");
    }

    #[test]
    fn test_readable_text_other_uses_inner_text() {
        let div = MockElement::new("div").with_text("rendered");
        assert_eq!(readable_text(&div), "rendered");
    }

    #[test]
    fn test_wait_until_visible_immediate() {
        let element = MockElement::new("div").visible();
        assert!(element.wait_until(Condition::Visible, 100).is_ok());
    }

    #[test]
    fn test_wait_until_times_out() {
        let element = MockElement::new("div").hidden();
        let result = element.wait_until(Condition::Visible, 100);
        assert!(result.is_err());
    }

    #[test]
    fn test_wait_while_present() {
        let element = MockElement::new("div").visible();
        element.set_present(false);
        assert!(element.wait_while(Condition::Present, 100).is_ok());
    }
}
