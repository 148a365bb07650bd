//! DOM accessor protocol.
//!
//! The table model reads the page only through [`DomAccessor`]. Element
//! handles are opaque: the model passes them back to the accessor and never
//! looks inside.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DomError;

/// Opaque reference to an element of the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(String);

impl ElementHandle {
    /// Wrap a backend-specific identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Backend-specific identifier. Only the accessor that issued the handle
    /// knows how to interpret it.
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Read/write primitives over the rendered page.
///
/// Absence is expressed with `None` or empty values. `Err` is reserved for
/// failures of the accessor itself (lost session, script failure).
#[async_trait]
pub trait DomAccessor: Send + Sync {
    /// First element matching `selector`, searched under `scope` or the document.
    async fn query(
        &self,
        selector: &str,
        scope: Option<&ElementHandle>,
    ) -> Result<Option<ElementHandle>, DomError>;

    /// All elements matching `selector`, in document order.
    async fn query_all(
        &self,
        selector: &str,
        scope: Option<&ElementHandle>,
    ) -> Result<Vec<ElementHandle>, DomError>;

    /// Rendered text of the element, trimmed.
    async fn text(&self, element: &ElementHandle) -> Result<String, DomError>;

    /// Attribute value, `None` if the attribute is not set.
    async fn attr(&self, element: &ElementHandle, name: &str) -> Result<Option<String>, DomError>;

    /// Whether the element is rendered with a non-empty box.
    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, DomError>;

    /// Click the element.
    async fn click(&self, element: &ElementHandle) -> Result<(), DomError>;

    /// Clear an input element and type `text` into it.
    async fn fill(&self, element: &ElementHandle, text: &str) -> Result<(), DomError>;

    /// Wait until `selector` matches, up to `timeout`. Returns `None` on timeout.
    async fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Option<ElementHandle>, DomError>;

    /// Text of the first match of `selector`, or an empty string.
    async fn text_of(
        &self,
        selector: &str,
        scope: Option<&ElementHandle>,
    ) -> Result<String, DomError> {
        match self.query(selector, scope).await? {
            Some(element) => self.text(&element).await,
            None => Ok(String::new()),
        }
    }

    /// Drop every element handle returned so far.
    ///
    /// Implementations backed by remote objects free them here. Handles must
    /// not be used after this call.
    async fn release(&self) -> Result<(), DomError> {
        Ok(())
    }

    /// The `class` attribute split on whitespace.
    async fn class_list(&self, element: &ElementHandle) -> Result<Vec<String>, DomError> {
        Ok(self
            .attr(element, "class")
            .await?
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default())
    }
}
