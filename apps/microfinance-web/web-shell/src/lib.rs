#[cfg(any(target_arch = "wasm32", test))]
mod config_source;
#[cfg(any(target_arch = "wasm32", test))]
mod dom_values;
#[cfg(any(target_arch = "wasm32", test))]
mod timer_registry;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::future::Future;
    use std::time::Duration;

    use futures_util::future::{AbortHandle, Abortable};
    use microfinance_page_core::{
        DomError, FormKind, PageConfig, PageController, PageDiagnostics, PageDom,
        ScheduledDismissal, Sleeper, SubmitDecision, run_dismissal,
    };
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::HtmlElement;

    use crate::config_source::{PAGE_CONFIG_GLOBAL, is_fallback_source, resolve_page_config};
    use crate::dom_values::{ReflectedValue, is_document_loading, reflected_value_text};
    use crate::timer_registry::TimerRegistry;
    use crate::wasm_constants::*;

    mod dom;
    mod lifecycle;
    mod logging;
    mod timers;

    use dom::BrowserDom;
    use lifecycle::*;
    use logging::install_console_logging;
    use timers::*;

    thread_local! {
        static CONTROLLER: RefCell<Option<PageController<BrowserDom>>> = const { RefCell::new(None) };
        static TIMERS: RefCell<TimerRegistry> = RefCell::new(TimerRegistry::default());
        static BOOT_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
        static READY_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static PAGEHIDE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static SUBMIT_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(Vec::new()) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        install_console_logging();
        if let Err(error) = start_when_ready() {
            record_boot_error(&error);
        }
    }

    #[wasm_bindgen]
    pub fn page_diagnostics_json() -> String {
        if let Some(json) = with_controller(|controller| controller.diagnostics().to_json()) {
            return json;
        }
        match BOOT_ERROR.with(|error| error.borrow().clone()) {
            Some(error) => PageDiagnostics::failed(&error).to_json(),
            None => PageDiagnostics::default().to_json(),
        }
    }

    /// Aborts every fade/remove task still waiting on a timer.
    #[wasm_bindgen]
    pub fn cancel_pending_dismissals() -> u32 {
        cancel_all_dismissals() as u32
    }

    #[wasm_bindgen]
    pub fn pending_dismissal_count() -> u32 {
        pending_dismissals() as u32
    }

    fn boot() -> Result<(), String> {
        let (config, source) = resolve_page_config(read_config_global().as_deref());
        if is_fallback_source(&source) {
            tracing::warn!(%source, "page config rejected, using defaults");
        } else {
            tracing::debug!(%source, "page config resolved");
        }

        let dom = BrowserDom::from_window()?;
        let mut controller = PageController::new(config, dom.clone())
            .map_err(|error| format!("failed to build page controller: {error}"))?;
        let dismissals = controller.page_ready();
        let config = controller.config().clone();
        CONTROLLER.with(|slot| {
            *slot.borrow_mut() = Some(controller);
        });

        for dismissal in dismissals {
            spawn_dismissal(&dom, dismissal);
        }
        install_submit_guards(&dom, &config);
        install_pagehide_handler();
        Ok(())
    }

    fn with_controller<T>(
        action: impl FnOnce(&mut PageController<BrowserDom>) -> T,
    ) -> Option<T> {
        CONTROLLER.with(|slot| slot.borrow_mut().as_mut().map(action))
    }

    fn record_boot_error(message: &str) {
        tracing::error!(error = message, "page controller failed to start");
        BOOT_ERROR.with(|error| {
            *error.borrow_mut() = Some(message.to_string());
        });
    }
}
