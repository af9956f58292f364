pub(crate) const DOM_CONTENT_LOADED_EVENT: &str = "DOMContentLoaded";
pub(crate) const SUBMIT_EVENT: &str = "submit";
pub(crate) const PAGEHIDE_EVENT: &str = "pagehide";
pub(crate) const BANNER_TAG: &str = "div";
pub(crate) const LOG_MAX_LEVEL: tracing::Level = tracing::Level::INFO;
