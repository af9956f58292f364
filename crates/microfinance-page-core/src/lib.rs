//! Page controller for the microfinance back office.
//!
//! Server-rendered pages carry flash messages and two create forms (loans and
//! customers). This crate decides what happens on page ready and on submit:
//! which flash messages to dismiss and when, whether a submission may proceed,
//! and which validation banner to show when it may not. The document and the
//! timer source are reached only through [`PageDom`] and [`Sleeper`], so all
//! of it runs and is tested without a browser.

pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod dismissal;
pub mod dom;
pub mod guards;
pub mod numeric;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, NumericPolicy, PageConfig, parse_page_config};
pub use controller::{ControllerError, FormKind, PageController, SubmitDecision};
pub use diagnostics::PageDiagnostics;
pub use dismissal::{
    DismissFinish, DismissStep, DismissalPlan, ScheduledDismissal, apply_step, run_dismissal,
};
pub use dom::{DomError, PageDom, Sleeper};
pub use guards::{
    CustomerFormInput, GuardRejection, LoanFormInput, LoanTerms, PhoneGuard, validate_loan_form,
};
