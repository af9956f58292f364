/// `document.readyState` while the parser is still running.
pub(crate) const READY_STATE_LOADING: &str = "loading";

/// String form of a `value` property that is `undefined`.
pub(crate) const UNDEFINED_VALUE_TEXT: &str = "undefined";

pub(crate) fn is_document_loading(ready_state: &str) -> bool {
    ready_state == READY_STATE_LOADING
}

/// A `value` property read off an element that is not a form control.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ReflectedValue {
    Text(String),
    Number(f64),
    Null,
    Undefined,
}

/// Stringifies a reflected `value` the way the page's inline checks see it
/// (`String(element.value)`), so a `div#phone` still fails the phone check.
pub(crate) fn reflected_value_text(value: ReflectedValue) -> String {
    match value {
        ReflectedValue::Text(text) => text,
        ReflectedValue::Number(number) if number.is_nan() => "NaN".to_string(),
        ReflectedValue::Number(number) if number.is_infinite() => {
            if number > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
        }
        ReflectedValue::Number(number) => number.to_string(),
        ReflectedValue::Null => "null".to_string(),
        ReflectedValue::Undefined => UNDEFINED_VALUE_TEXT.to_string(),
    }
}
