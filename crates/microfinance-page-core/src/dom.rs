use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("form field #{id} is missing")]
    MissingField { id: String },
    #[error("failed to create {tag} element")]
    CreateElement { tag: &'static str },
    #[error("element is not an HtmlElement")]
    NotHtmlElement,
    #[error("failed to insert element: {0}")]
    Insert(String),
    #[error("failed to set style property {property}")]
    Style { property: String },
}

/// The slice of the document the page controller touches.
///
/// Lookups go through stable identifiers (selectors and element ids) so the
/// controller can run against the live document or an in-memory fake.
pub trait PageDom {
    type Element: Clone;

    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn query(&self, selector: &str) -> Option<Self::Element>;
    /// Current value of the form control with this id, `None` if absent.
    fn field_value(&self, id: &str) -> Option<String>;
    fn create_banner(&self, class_name: &str, text: &str) -> Result<Self::Element, DomError>;
    fn prepend(&self, container: &Self::Element, child: &Self::Element) -> Result<(), DomError>;
    fn set_style(
        &self,
        element: &Self::Element,
        property: &str,
        value: &str,
    ) -> Result<(), DomError>;
    /// Removes the element from its parent. No-op when already detached.
    fn detach(&self, element: &Self::Element);
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
