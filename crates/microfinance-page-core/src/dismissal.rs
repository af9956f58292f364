use std::time::Duration;

use crate::config::PageConfig;
use crate::dom::{DomError, PageDom, Sleeper};

/// What happens to an element once it has faded out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissFinish {
    /// Server-rendered flash messages stay in the tree with `display: none`.
    Hide,
    /// Banners created by the controller are removed from the tree.
    Detach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissStep {
    FadeOut,
    Hide,
    Detach,
}

impl DismissStep {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FadeOut => "fade_out",
            Self::Hide => "hide",
            Self::Detach => "detach",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissalPlan {
    pub display: Duration,
    pub fade: Duration,
    pub finish: DismissFinish,
}

impl DismissalPlan {
    #[must_use]
    pub fn for_flash(config: &PageConfig) -> Self {
        Self {
            display: config.display(),
            fade: config.fade(),
            finish: DismissFinish::Hide,
        }
    }

    #[must_use]
    pub fn for_banner(config: &PageConfig) -> Self {
        Self {
            display: config.display(),
            fade: config.fade(),
            finish: DismissFinish::Detach,
        }
    }

    /// Steps with their offsets from the moment the plan starts.
    #[must_use]
    pub fn steps(&self) -> [(Duration, DismissStep); 2] {
        let finish = match self.finish {
            DismissFinish::Hide => DismissStep::Hide,
            DismissFinish::Detach => DismissStep::Detach,
        };
        [
            (self.display, DismissStep::FadeOut),
            (self.total(), finish),
        ]
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        self.display.saturating_add(self.fade)
    }
}

/// An element paired with the plan that will dismiss it.
#[derive(Debug, Clone)]
pub struct ScheduledDismissal<E> {
    pub element: E,
    pub plan: DismissalPlan,
}

pub fn apply_step<D: PageDom>(
    dom: &D,
    element: &D::Element,
    step: DismissStep,
) -> Result<(), DomError> {
    match step {
        DismissStep::FadeOut => dom.set_style(element, "opacity", "0"),
        DismissStep::Hide => dom.set_style(element, "display", "none"),
        DismissStep::Detach => {
            dom.detach(element);
            Ok(())
        }
    }
}

/// Drives one element through its plan. Every dismissal runs as its own
/// task; nothing is shared or coalesced between elements.
pub async fn run_dismissal<D, S>(dom: &D, dismissal: ScheduledDismissal<D::Element>, sleeper: &S)
where
    D: PageDom,
    S: Sleeper,
{
    let ScheduledDismissal { element, plan } = dismissal;
    let mut elapsed = Duration::ZERO;
    for (offset, step) in plan.steps() {
        sleeper.sleep(offset.saturating_sub(elapsed)).await;
        elapsed = offset;
        if let Err(error) = apply_step(dom, &element, step) {
            tracing::warn!(step = step.as_str(), %error, "dismissal step failed");
        }
    }
}
