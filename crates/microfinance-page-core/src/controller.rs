use crate::config::{ConfigError, PageConfig};
use crate::diagnostics::PageDiagnostics;
use crate::dismissal::{DismissalPlan, ScheduledDismissal};
use crate::dom::{DomError, PageDom};
use crate::guards::{
    CustomerFormInput, GuardRejection, LoanFormInput, PhoneGuard, validate_loan_form,
};

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("phone pattern failed to compile: {0}")]
    PhonePattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Loan,
    Customer,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::Loan, FormKind::Customer];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loan => "loan",
            Self::Customer => "customer",
        }
    }

    #[must_use]
    pub fn action(self, config: &PageConfig) -> &str {
        match self {
            Self::Loan => &config.loan_form_action,
            Self::Customer => &config.customer_form_action,
        }
    }

    /// Attribute selector for the form posting to this kind's endpoint.
    #[must_use]
    pub fn selector(self, config: &PageConfig) -> String {
        format!("form[action=\"{}\"]", self.action(config))
    }
}

#[derive(Debug, Clone)]
pub enum SubmitDecision<E> {
    /// Let the native submission through.
    Proceed,
    /// Cancel the submission. `banner` is `None` when no banner could be
    /// placed on the page.
    Cancel {
        rejection: GuardRejection,
        banner: Option<ScheduledDismissal<E>>,
    },
}

impl<E> SubmitDecision<E> {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancel { .. })
    }
}

pub struct PageController<D: PageDom> {
    config: PageConfig,
    dom: D,
    phone_guard: PhoneGuard,
    diagnostics: PageDiagnostics,
}

impl<D: PageDom> PageController<D> {
    pub fn new(config: PageConfig, dom: D) -> Result<Self, ControllerError> {
        config.validate()?;
        Ok(Self {
            config,
            dom,
            phone_guard: PhoneGuard::new()?,
            diagnostics: PageDiagnostics::default(),
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn diagnostics(&self) -> &PageDiagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut PageDiagnostics {
        &mut self.diagnostics
    }

    #[must_use]
    pub fn form_kind(&self, action: &str) -> Option<FormKind> {
        FormKind::ALL
            .into_iter()
            .find(|kind| kind.action(&self.config) == action)
    }

    pub fn mark_guard_installed(&mut self, kind: FormKind) {
        tracing::debug!(form = kind.as_str(), "submit guard installed");
        self.diagnostics.record_guard_installed(kind);
    }

    /// Plans the dismissal of every flash message present right now.
    pub fn page_ready(&mut self) -> Vec<ScheduledDismissal<D::Element>> {
        let plan = DismissalPlan::for_flash(&self.config);
        let scheduled = self
            .dom
            .query_all(&self.config.flash_selector)
            .into_iter()
            .map(|element| ScheduledDismissal { element, plan })
            .collect::<Vec<_>>();

        self.diagnostics.flash_messages_scheduled += scheduled.len() as u64;
        self.diagnostics.set_phase("ready");
        tracing::info!(count = scheduled.len(), "flash messages scheduled for dismissal");
        scheduled
    }

    pub fn handle_submit(&mut self, kind: FormKind) -> SubmitDecision<D::Element> {
        let verdict = match kind {
            FormKind::Loan => self.read_loan_form().map(|input| {
                validate_loan_form(&input, self.config.numeric_policy).map(|_| ())
            }),
            FormKind::Customer => self
                .read_customer_form()
                .map(|input| self.phone_guard.validate(&input)),
        };

        let verdict = match verdict {
            Ok(verdict) => verdict,
            Err(error) => {
                // The field lookup fails before anything is cancelled, so the
                // browser submits the form as usual.
                tracing::warn!(form = kind.as_str(), %error, "guard skipped");
                self.diagnostics.record_error(error.to_string());
                self.diagnostics.record_submit_allowed();
                return SubmitDecision::Proceed;
            }
        };

        match verdict {
            Ok(()) => {
                self.diagnostics.record_submit_allowed();
                SubmitDecision::Proceed
            }
            Err(rejection) => {
                tracing::info!(
                    form = kind.as_str(),
                    rejection = rejection.as_str(),
                    "submission cancelled"
                );
                self.diagnostics.record_submit_cancelled(rejection);
                let banner = self.show_banner(rejection);
                SubmitDecision::Cancel { rejection, banner }
            }
        }
    }

    fn field(&self, id: &str) -> Result<String, DomError> {
        self.dom
            .field_value(id)
            .ok_or_else(|| DomError::MissingField { id: id.to_string() })
    }

    fn read_loan_form(&self) -> Result<LoanFormInput, DomError> {
        Ok(LoanFormInput {
            amount: self.field(&self.config.amount_field_id)?,
            duration: self.field(&self.config.duration_field_id)?,
            interest_rate: self.field(&self.config.interest_rate_field_id)?,
        })
    }

    fn read_customer_form(&self) -> Result<CustomerFormInput, DomError> {
        Ok(CustomerFormInput {
            phone: self.field(&self.config.phone_field_id)?,
        })
    }

    fn show_banner(&mut self, rejection: GuardRejection) -> Option<ScheduledDismissal<D::Element>> {
        match self.insert_banner(rejection) {
            Ok(element) => {
                self.diagnostics.banners_shown += 1;
                Some(ScheduledDismissal {
                    element,
                    plan: DismissalPlan::for_banner(&self.config),
                })
            }
            Err(error) => {
                tracing::warn!(%error, "validation banner dropped");
                self.diagnostics.banners_dropped += 1;
                self.diagnostics.record_error(error.to_string());
                None
            }
        }
    }

    fn insert_banner(&self, rejection: GuardRejection) -> Result<D::Element, DomError> {
        let banner = self
            .dom
            .create_banner(&self.config.banner_class, rejection.message())?;
        let container = self.dom.query(&self.config.container_selector).ok_or_else(|| {
            DomError::Insert(format!(
                "no element matches {}",
                self.config.container_selector
            ))
        })?;
        self.dom.prepend(&container, &banner)?;
        Ok(banner)
    }
}
