//! Element declarations and resolution.
//!
//! A page type describes its elements as an explicit list of [`ElementDecl`]s
//! instead of annotated fields: each declaration carries the field's current
//! value, an optional logical name, and an optional-flag. [`resolve`] turns
//! one page's declarations into the two views the runtime works with: the
//! name→element map and the primary (non-optional) element set.

use crate::element::ElementRef;
use crate::result::{EscenarioError, EscenarioResult};
use std::collections::{HashMap, HashSet};

/// Current value of one declared page field
#[derive(Clone)]
pub enum FieldValue {
    /// A single element handle
    Element(ElementRef),
    /// An ordered list of element handles
    Collection(Vec<ElementRef>),
    /// Any non-element field (kept for completeness; never a named element)
    Data {
        /// Declared type of the field, for configuration error messages
        type_name: String,
    },
}

impl FieldValue {
    /// Human-readable type label
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Element(_) => "element",
            Self::Collection(_) => "element list",
            Self::Data { type_name } => type_name,
        }
    }
}

impl std::fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Element(_) => f.write_str("Element"),
            Self::Collection(list) => write!(f, "Collection[{}]", list.len()),
            Self::Data { type_name } => write!(f, "Data({type_name})"),
        }
    }
}

/// One declared field of a page object
#[derive(Debug, Clone)]
pub struct ElementDecl {
    name: Option<String>,
    optional: bool,
    value: FieldValue,
}

impl ElementDecl {
    /// Declare a single element handle
    #[must_use]
    pub fn element(handle: ElementRef) -> Self {
        Self {
            name: None,
            optional: false,
            value: FieldValue::Element(handle),
        }
    }

    /// Declare an ordered list of element handles
    #[must_use]
    pub fn collection(handles: Vec<ElementRef>) -> Self {
        Self {
            name: None,
            optional: false,
            value: FieldValue::Collection(handles),
        }
    }

    /// Declare a non-element field
    #[must_use]
    pub fn data(type_name: impl Into<String>) -> Self {
        Self {
            name: None,
            optional: false,
            value: FieldValue::Data {
                type_name: type_name.into(),
            },
        }
    }

    /// Give the declaration a logical name for lookup from scenario steps
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Exempt the declaration from bulk presence checks
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Logical name, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the declaration is exempt from bulk presence checks
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Current field value
    #[must_use]
    pub const fn value(&self) -> &FieldValue {
        &self.value
    }
}

/// A named entry in a resolved page: one handle or an ordered list
#[derive(Clone)]
pub enum NamedElement {
    /// Single element handle
    Single(ElementRef),
    /// Ordered list of element handles
    List(Vec<ElementRef>),
}

impl std::fmt::Debug for NamedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(_) => f.write_str("Single"),
            Self::List(list) => write!(f, "List[{}]", list.len()),
        }
    }
}

/// Output of [`resolve`]: the two element views of one page
#[derive(Default)]
pub struct ResolvedElements {
    /// Logical name → element or list
    pub named: HashMap<String, NamedElement>,
    /// All non-optional handles, declaration order, lists flattened
    pub primary: Vec<ElementRef>,
}

impl std::fmt::Debug for ResolvedElements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedElements")
            .field("named", &self.named)
            .field("primary", &format_args!("[{}]", self.primary.len()))
            .finish()
    }
}

/// Resolve one page's declarations.
///
/// Validates before binding: duplicate logical names and named non-element
/// fields are configuration errors, reported against `page_name`. Resolution
/// has no side effects and may be re-invoked to refresh bindings after the
/// page is re-attached.
pub fn resolve(page_name: &str, declarations: &[ElementDecl]) -> EscenarioResult<ResolvedElements> {
    let mut seen = HashSet::new();
    for decl in declarations {
        let Some(name) = decl.name() else { continue };
        if !seen.insert(name) {
            return Err(EscenarioError::DuplicateElementName {
                name: name.to_string(),
                page: page_name.to_string(),
            });
        }
        if let FieldValue::Data { type_name } = decl.value() {
            return Err(EscenarioError::InvalidNamedField {
                field: name.to_string(),
                page: page_name.to_string(),
                type_name: type_name.clone(),
            });
        }
    }

    let mut resolved = ResolvedElements::default();
    for decl in declarations {
        if let Some(name) = decl.name() {
            // Data values were rejected by the validation pass above.
            let entry = match decl.value() {
                FieldValue::Element(handle) => Some(NamedElement::Single(handle.clone())),
                FieldValue::Collection(handles) => Some(NamedElement::List(handles.clone())),
                FieldValue::Data { .. } => None,
            };
            if let Some(entry) = entry {
                resolved.named.insert(name.to_string(), entry);
            }
        }
        if !decl.is_optional() {
            match decl.value() {
                FieldValue::Element(handle) => resolved.primary.push(handle.clone()),
                FieldValue::Collection(handles) => resolved.primary.extend(handles.iter().cloned()),
                FieldValue::Data { .. } => {}
            }
        }
    }

    tracing::debug!(
        page = page_name,
        named = resolved.named.len(),
        primary = resolved.primary.len(),
        "resolved page elements"
    );
    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::element::ElementHandle;
    use crate::mock::MockElement;
    use std::sync::Arc;

    fn handle(text: &str) -> ElementRef {
        Arc::new(MockElement::new("div").visible().with_text(text))
    }

    mod declaration_tests {
        use super::*;

        #[test]
        fn test_element_declaration_defaults() {
            let decl = ElementDecl::element(handle("a"));
            assert!(decl.name().is_none());
            assert!(!decl.is_optional());
        }

        #[test]
        fn test_named_optional_chaining() {
            let decl = ElementDecl::element(handle("a"))
                .named("Close button")
                .optional();
            assert_eq!(decl.name(), Some("Close button"));
            assert!(decl.is_optional());
        }

        #[test]
        fn test_data_type_name() {
            let decl = ElementDecl::data("String");
            assert_eq!(decl.value().type_name(), "String");
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_binds_named_elements() {
            let decls = vec![
                ElementDecl::element(handle("a")).named("First"),
                ElementDecl::collection(vec![handle("b"), handle("c")]).named("Rows"),
            ];
            let resolved = resolve("Test page", &decls).unwrap();
            assert!(matches!(
                resolved.named.get("First"),
                Some(NamedElement::Single(_))
            ));
            assert!(matches!(
                resolved.named.get("Rows"),
                Some(NamedElement::List(list)) if list.len() == 2
            ));
        }

        #[test]
        fn test_primary_preserves_declaration_order_and_flattens() {
            let decls = vec![
                ElementDecl::element(handle("first")).named("First"),
                ElementDecl::collection(vec![handle("second"), handle("third")]),
                ElementDecl::element(handle("fourth")),
            ];
            let resolved = resolve("Test page", &decls).unwrap();
            let texts: Vec<String> = resolved.primary.iter().map(|e| e.text()).collect();
            assert_eq!(texts, vec!["first", "second", "third", "fourth"]);
        }

        #[test]
        fn test_optional_excluded_from_primary_but_named() {
            let decls = vec![
                ElementDecl::element(handle("a")).named("Banner").optional(),
                ElementDecl::element(handle("b")).named("Body"),
            ];
            let resolved = resolve("Test page", &decls).unwrap();
            assert_eq!(resolved.primary.len(), 1);
            assert!(resolved.named.contains_key("Banner"));
        }

        #[test]
        fn test_data_fields_dropped_from_primary() {
            let decls = vec![
                ElementDecl::element(handle("a")),
                ElementDecl::data("RowCount"),
            ];
            let resolved = resolve("Test page", &decls).unwrap();
            assert_eq!(resolved.primary.len(), 1);
        }

        #[test]
        fn test_duplicate_name_is_configuration_error() {
            let decls = vec![
                ElementDecl::element(handle("a")).named("Same"),
                ElementDecl::element(handle("b")).named("Same"),
            ];
            let err = resolve("Test page", &decls).unwrap_err();
            assert!(matches!(
                err,
                EscenarioError::DuplicateElementName { name, page }
                    if name == "Same" && page == "Test page"
            ));
        }

        #[test]
        fn test_named_data_is_configuration_error() {
            let decls = vec![ElementDecl::data("String").named("Rows")];
            let err = resolve("Test page", &decls).unwrap_err();
            assert!(matches!(
                err,
                EscenarioError::InvalidNamedField { field, type_name, .. }
                    if field == "Rows" && type_name == "String"
            ));
        }

        #[test]
        fn test_resolution_is_idempotent() {
            let decls = vec![
                ElementDecl::element(handle("a")).named("First"),
                ElementDecl::collection(vec![handle("b")]).named("Rows"),
                ElementDecl::element(handle("c")).optional(),
            ];
            let first = resolve("Test page", &decls).unwrap();
            let second = resolve("Test page", &decls).unwrap();

            let mut first_keys: Vec<_> = first.named.keys().collect();
            let mut second_keys: Vec<_> = second.named.keys().collect();
            first_keys.sort();
            second_keys.sort();
            assert_eq!(first_keys, second_keys);
            assert_eq!(first.primary.len(), second.primary.len());
        }
    }
}
