use microfinance_page_core::{PageConfig, parse_page_config};

pub(crate) const PAGE_CONFIG_GLOBAL: &str = "__MF_PAGE_CONFIG__";
pub(crate) const PAGE_CONFIG_SOURCE_DEFAULT: &str = "default";

/// Resolves the page config from the raw global value. An invalid value
/// falls back to defaults; the returned source string records why.
pub(crate) fn resolve_page_config(raw: Option<&str>) -> (PageConfig, String) {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return (PageConfig::default(), PAGE_CONFIG_SOURCE_DEFAULT.to_string());
    };

    match parse_page_config(raw) {
        Ok(config) => (config, PAGE_CONFIG_GLOBAL.to_string()),
        Err(error) => (
            PageConfig::default(),
            format!("{PAGE_CONFIG_GLOBAL}:invalid({error})->{PAGE_CONFIG_SOURCE_DEFAULT}"),
        ),
    }
}

pub(crate) fn is_fallback_source(source: &str) -> bool {
    source.starts_with(PAGE_CONFIG_GLOBAL) && source.contains(":invalid(")
}
