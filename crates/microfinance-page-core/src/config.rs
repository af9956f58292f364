use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FLASH_SELECTOR: &str = ".flash-message";
pub const DEFAULT_CONTAINER_SELECTOR: &str = ".container";
pub const DEFAULT_BANNER_CLASS: &str = "flash-message error";
pub const DEFAULT_LOAN_FORM_ACTION: &str = "/loans";
pub const DEFAULT_CUSTOMER_FORM_ACTION: &str = "/customers";
pub const DEFAULT_AMOUNT_FIELD_ID: &str = "amount";
pub const DEFAULT_DURATION_FIELD_ID: &str = "duration";
pub const DEFAULT_INTEREST_RATE_FIELD_ID: &str = "interest_rate";
pub const DEFAULT_PHONE_FIELD_ID: &str = "phone";
pub const DEFAULT_DISPLAY_MS: u64 = 3_000;
pub const DEFAULT_FADE_MS: u64 = 500;
pub const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("page config is not valid JSON: {0}")]
    Malformed(String),
    #[error("{field} must not be empty")]
    EmptyValue { field: &'static str },
    #[error("{field} must be an absolute path without quotes or backslashes")]
    InvalidFormAction { field: &'static str },
    #[error("displayMs must be greater than zero")]
    ZeroDisplay,
    #[error("{field} must not exceed {max_ms}ms")]
    DelayTooLong { field: &'static str, max_ms: u64 },
}

/// How the loan guard treats field values that are not numbers.
///
/// `Lenient` reproduces browser comparison semantics: a value that parses to
/// NaN never satisfies `<= 0`, so it is let through to the server. `Strict`
/// rejects any value that is not a complete decimal number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    #[default]
    #[serde(alias = "browser")]
    Lenient,
    Strict,
}

impl NumericPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lenient" | "browser" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PageConfig {
    pub flash_selector: String,
    pub container_selector: String,
    pub banner_class: String,
    pub loan_form_action: String,
    pub customer_form_action: String,
    pub amount_field_id: String,
    pub duration_field_id: String,
    pub interest_rate_field_id: String,
    pub phone_field_id: String,
    pub display_ms: u64,
    pub fade_ms: u64,
    pub numeric_policy: NumericPolicy,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            flash_selector: DEFAULT_FLASH_SELECTOR.to_string(),
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            banner_class: DEFAULT_BANNER_CLASS.to_string(),
            loan_form_action: DEFAULT_LOAN_FORM_ACTION.to_string(),
            customer_form_action: DEFAULT_CUSTOMER_FORM_ACTION.to_string(),
            amount_field_id: DEFAULT_AMOUNT_FIELD_ID.to_string(),
            duration_field_id: DEFAULT_DURATION_FIELD_ID.to_string(),
            interest_rate_field_id: DEFAULT_INTEREST_RATE_FIELD_ID.to_string(),
            phone_field_id: DEFAULT_PHONE_FIELD_ID.to_string(),
            display_ms: DEFAULT_DISPLAY_MS,
            fade_ms: DEFAULT_FADE_MS,
            numeric_policy: NumericPolicy::Lenient,
        }
    }
}

impl PageConfig {
    #[must_use]
    pub fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }

    #[must_use]
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("flashSelector", &self.flash_selector),
            ("containerSelector", &self.container_selector),
            ("bannerClass", &self.banner_class),
            ("amountFieldId", &self.amount_field_id),
            ("durationFieldId", &self.duration_field_id),
            ("interestRateFieldId", &self.interest_rate_field_id),
            ("phoneFieldId", &self.phone_field_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyValue { field });
            }
        }

        validate_form_action("loanFormAction", &self.loan_form_action)?;
        validate_form_action("customerFormAction", &self.customer_form_action)?;

        if self.display_ms == 0 {
            return Err(ConfigError::ZeroDisplay);
        }
        if self.display_ms > MAX_DELAY_MS {
            return Err(ConfigError::DelayTooLong {
                field: "displayMs",
                max_ms: MAX_DELAY_MS,
            });
        }
        if self.fade_ms > MAX_DELAY_MS {
            return Err(ConfigError::DelayTooLong {
                field: "fadeMs",
                max_ms: MAX_DELAY_MS,
            });
        }
        Ok(())
    }
}

fn validate_form_action(field: &'static str, action: &str) -> Result<(), ConfigError> {
    if action.trim().is_empty() {
        return Err(ConfigError::EmptyValue { field });
    }
    // The action is interpolated into an attribute selector.
    if !action.starts_with('/') || action.contains('"') || action.contains('\\') {
        return Err(ConfigError::InvalidFormAction { field });
    }
    Ok(())
}

pub fn parse_page_config(raw: &str) -> Result<PageConfig, ConfigError> {
    let config: PageConfig =
        serde_json::from_str(raw).map_err(|error| ConfigError::Malformed(error.to_string()))?;
    config.validate()?;
    Ok(config)
}
