//! Mock element handles.
//!
//! [`MockElement`] stands in for the automation library in tests: state is
//! shared behind an `Arc`, so a test can keep a clone, hand another clone to
//! a page declaration, and flip visibility while a wait is in flight,
//! including from a second thread.

use crate::element::{ElementHandle, ElementRef};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct MockState {
    tag: String,
    text: Mutex<String>,
    value: Mutex<String>,
    visible: AtomicBool,
    present: AtomicBool,
}

/// A fake element with shared, mutable state
#[derive(Debug, Clone)]
pub struct MockElement {
    state: Arc<MockState>,
}

impl MockElement {
    /// Create a present, invisible element with the given tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            state: Arc::new(MockState {
                tag: tag.into(),
                text: Mutex::new(String::new()),
                value: Mutex::new(String::new()),
                visible: AtomicBool::new(false),
                present: AtomicBool::new(true),
            }),
        }
    }

    /// Mark the element visible
    #[must_use]
    pub fn visible(self) -> Self {
        self.set_visible(true);
        self
    }

    /// Mark the element invisible
    #[must_use]
    pub fn hidden(self) -> Self {
        self.set_visible(false);
        self
    }

    /// Mark the element as removed from the page
    #[must_use]
    pub fn absent(self) -> Self {
        self.set_present(false);
        self
    }

    /// Set the rendered text
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Set the input value
    #[must_use]
    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Flip visibility at any point, from any thread
    pub fn set_visible(&self, visible: bool) {
        self.state.visible.store(visible, Ordering::SeqCst);
    }

    /// Flip presence at any point, from any thread
    pub fn set_present(&self, present: bool) {
        self.state.present.store(present, Ordering::SeqCst);
    }

    /// Replace the rendered text
    pub fn set_text(&self, text: impl Into<String>) {
        *self.state.text.lock().expect("mock text lock") = text.into();
    }

    /// Replace the input value
    pub fn set_value(&self, value: impl Into<String>) {
        *self.state.value.lock().expect("mock value lock") = value.into();
    }

    /// Shared handle for page declarations
    #[must_use]
    pub fn into_ref(self) -> ElementRef {
        Arc::new(self)
    }
}

impl ElementHandle for MockElement {
    fn tag_name(&self) -> String {
        self.state.tag.clone()
    }

    fn value(&self) -> String {
        self.state.value.lock().expect("mock value lock").clone()
    }

    fn inner_text(&self) -> String {
        self.state.text.lock().expect("mock text lock").clone()
    }

    fn text(&self) -> String {
        self.inner_text()
    }

    fn is_visible(&self) -> bool {
        self.state.visible.load(Ordering::SeqCst)
    }

    fn is_present(&self) -> bool {
        self.state.present.load(Ordering::SeqCst)
    }
}
