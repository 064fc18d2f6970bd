//! Result and error types for Escenario.

use thiserror::Error;

/// Result type for Escenario operations
pub type EscenarioResult<T> = Result<T, EscenarioError>;

/// Errors that can occur in Escenario
#[derive(Debug, Error)]
pub enum EscenarioError {
    /// Two declarations on one page share a logical name
    #[error("More than one element named {name:?} on page {page:?}")]
    DuplicateElementName {
        /// Duplicated logical name
        name: String,
        /// Page the declarations belong to
        page: String,
    },

    /// A named declaration is not an element handle or a list of handles
    #[error(
        "Named field {field:?} on page {page:?} must be an element or an element list, but is {type_name}"
    )]
    InvalidNamedField {
        /// Logical name of the offending declaration
        field: String,
        /// Page the declaration belongs to
        page: String,
        /// Declared type of the field
        type_name: String,
    },

    /// Two page types registered under the same logical name
    #[error("Page {name:?} is already registered")]
    DuplicatePage {
        /// Duplicated page name
        name: String,
    },

    /// A page type declares no logical name
    #[error("Page type {type_name} declares no name")]
    UnnamedPage {
        /// Concrete type of the page
        type_name: String,
    },

    /// A configuration property could not be parsed
    #[error("Property {key:?} has invalid value {value:?}")]
    InvalidProperty {
        /// Property key
        key: String,
        /// Rejected raw value
        value: String,
    },

    /// No element with the given name on the page
    #[error("There is no element {name:?} on page {page:?}")]
    ElementNotFound {
        /// Requested logical name
        name: String,
        /// Page that was searched
        page: String,
    },

    /// The named element exists but is not a list
    #[error("There is no element list {name:?} on page {page:?}")]
    NotAnElementList {
        /// Requested logical name
        name: String,
        /// Page that was searched
        page: String,
    },

    /// No page with the given name in the registry
    #[error("There is no page {name:?}")]
    PageNotFound {
        /// Requested page name
        name: String,
    },

    /// No element in the list renders the given text
    #[error("No element with text {text:?} in the list")]
    NoElementWithText {
        /// Text that was searched for
        text: String,
    },

    /// No scenario variable bound under the given name
    #[error("There is no variable named {name:?}")]
    VariableNotFound {
        /// Requested variable name
        name: String,
    },

    /// No page has been made current yet
    #[error("No current page has been set")]
    NoCurrentPage,

    /// No scenario context is bound to the calling thread
    #[error("No scenario context is bound to this thread")]
    NoScenarioBound,

    /// The stored page is not of the requested type
    #[error("Page {name:?} is not a {expected}")]
    PageTypeMismatch {
        /// Name of the stored page
        name: String,
        /// Requested concrete type
        expected: String,
    },

    /// A wait did not complete within its timeout
    #[error("Waiting for {condition} timed out after {ms}ms")]
    WaitTimeout {
        /// Condition that was waited for
        condition: String,
        /// Timeout in milliseconds
        ms: u64,
    },
}
