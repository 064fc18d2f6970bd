//! Wait mechanisms.
//!
//! Synchronous polling waits over element handles, and the fan-out/join bulk
//! wait backing [`PageObject::appeared`](crate::PageObject::appeared) and
//! [`PageObject::disappeared`](crate::PageObject::disappeared).

use crate::element::{ElementHandle, ElementRef};
use crate::result::{EscenarioError, EscenarioResult};
use std::time::{Duration, Instant};

/// Default timeout for appear/disappear waits (5 seconds)
pub const DEFAULT_APPEAR_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// CONDITIONS
// =============================================================================

/// State an element can be waited on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Element exists and is visible
    Visible,
    /// Element does not exist, or exists but is not visible
    Hidden,
    /// Element exists in the page, visible or not
    Present,
    /// Element does not exist in the page
    Absent,
}

impl Condition {
    /// Check the condition against a live element
    pub fn holds<E: ElementHandle + ?Sized>(self, element: &E) -> bool {
        match self {
            Self::Visible => element.is_present() && element.is_visible(),
            Self::Hidden => !element.is_present() || !element.is_visible(),
            Self::Present => element.is_present(),
            Self::Absent => !element.is_present(),
        }
    }

    /// The opposite condition
    #[must_use]
    pub const fn negated(self) -> Self {
        match self {
            Self::Visible => Self::Hidden,
            Self::Hidden => Self::Visible,
            Self::Present => Self::Absent,
            Self::Absent => Self::Present,
        }
    }

    /// Name used in timeout errors and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_APPEAR_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Wait until `condition` holds for one element.
///
/// Polls at the configured interval; the condition is checked once before the
/// first sleep, so an already-satisfied wait returns immediately.
pub fn wait_element_until<E: ElementHandle + ?Sized>(
    element: &E,
    condition: Condition,
    options: &WaitOptions,
) -> EscenarioResult<()> {
    let start = Instant::now();
    loop {
        if condition.holds(element) {
            return Ok(());
        }
        if start.elapsed() >= options.timeout() {
            tracing::debug!(condition = %condition, timeout_ms = options.timeout_ms, "wait timed out");
            return Err(EscenarioError::WaitTimeout {
                condition: condition.as_str().to_string(),
                ms: options.timeout_ms,
            });
        }
        std::thread::sleep(options.poll_interval());
    }
}

/// Wait until `condition` holds for every element, concurrently.
///
/// One scoped thread per element; all waits are joined before returning, so
/// no wait outlives the call. On failure the first error in slice order is
/// surfaced (the joins behind it have already completed or timed out).
pub fn wait_elements_until(
    elements: &[ElementRef],
    condition: Condition,
    options: &WaitOptions,
) -> EscenarioResult<()> {
    if elements.is_empty() {
        return Ok(());
    }
    if elements.len() == 1 {
        return wait_element_until(elements[0].as_ref(), condition, options);
    }

    std::thread::scope(|scope| {
        let tasks: Vec<_> = elements
            .iter()
            .map(|element| {
                scope.spawn(move || wait_element_until(element.as_ref(), condition, options))
            })
            .collect();

        let mut first_failure = None;
        for task in tasks {
            match task.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    first_failure.get_or_insert(err);
                }
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        first_failure.map_or(Ok(()), Err)
    })
}

/// Sleep for a fixed duration. Prefer condition waits.
pub fn pause(duration_ms: u64) {
    std::thread::sleep(Duration::from_millis(duration_ms));
}

// =============================================================================
// TESTS
// =============================================================================
