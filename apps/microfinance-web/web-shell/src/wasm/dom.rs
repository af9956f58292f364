use super::*;

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// `PageDom` over the live document.
#[derive(Clone)]
pub(super) struct BrowserDom {
    document: web_sys::Document,
}

impl BrowserDom {
    pub(super) fn from_window() -> Result<Self, String> {
        let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
        let document = window
            .document()
            .ok_or_else(|| "document is unavailable".to_string())?;
        Ok(Self { document })
    }

    pub(super) fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl PageDom for BrowserDom {
    type Element = HtmlElement;

    fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            tracing::warn!(selector, "selector rejected by document");
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn query(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn field_value(&self, id: &str) -> Option<String> {
        let element = self.document.get_element_by_id(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return Some(select.value());
        }
        if let Some(text_area) = element.dyn_ref::<HtmlTextAreaElement>() {
            return Some(text_area.value());
        }
        Some(reflected_value_text(reflected_value(&element)))
    }

    fn create_banner(&self, class_name: &str, text: &str) -> Result<HtmlElement, DomError> {
        let element = self
            .document
            .create_element(BANNER_TAG)
            .map_err(|_| DomError::CreateElement { tag: BANNER_TAG })?;
        element.set_class_name(class_name);
        element.set_text_content(Some(text));
        element
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::NotHtmlElement)
    }

    fn prepend(&self, container: &HtmlElement, child: &HtmlElement) -> Result<(), DomError> {
        container
            .prepend_with_node_1(child)
            .map_err(|_| DomError::Insert("container rejected banner".to_string()))
    }

    fn set_style(&self, element: &HtmlElement, property: &str, value: &str) -> Result<(), DomError> {
        element
            .style()
            .set_property(property, value)
            .map_err(|_| DomError::Style {
                property: property.to_string(),
            })
    }

    fn detach(&self, element: &HtmlElement) {
        element.remove();
    }
}

fn reflected_value(element: &web_sys::Element) -> ReflectedValue {
    let Ok(value) = js_sys::Reflect::get(element, &JsValue::from_str("value")) else {
        return ReflectedValue::Undefined;
    };
    if let Some(text) = value.as_string() {
        return ReflectedValue::Text(text);
    }
    if let Some(number) = value.as_f64() {
        return ReflectedValue::Number(number);
    }
    if value.is_null() {
        return ReflectedValue::Null;
    }
    ReflectedValue::Undefined
}
