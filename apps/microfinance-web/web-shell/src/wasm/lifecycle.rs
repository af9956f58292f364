use super::*;

pub(super) fn start_when_ready() -> Result<(), String> {
    let dom = BrowserDom::from_window()?;
    if !is_document_loading(&dom.document().ready_state()) {
        return boot();
    }

    READY_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return Ok(());
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            if let Err(error) = boot() {
                record_boot_error(&error);
            }
        }));
        dom.document()
            .add_event_listener_with_callback(
                DOM_CONTENT_LOADED_EVENT,
                callback.as_ref().unchecked_ref(),
            )
            .map_err(|_| "failed to listen for DOMContentLoaded".to_string())?;
        *slot.borrow_mut() = Some(callback);
        Ok(())
    })
}

pub(super) fn read_config_global() -> Option<String> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(PAGE_CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    if let Some(raw) = value.as_string() {
        return Some(raw);
    }
    js_sys::JSON::stringify(&value).ok().map(String::from)
}

pub(super) fn install_submit_guards(dom: &BrowserDom, config: &PageConfig) {
    for kind in FormKind::ALL {
        let Some(form) = dom.query(&kind.selector(config)) else {
            tracing::debug!(form = kind.as_str(), "form not on page, guard not installed");
            continue;
        };

        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
            move |event: web_sys::Event| {
                handle_form_submit(kind, &event);
            },
        ));
        if form
            .add_event_listener_with_callback(SUBMIT_EVENT, callback.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::warn!(form = kind.as_str(), "failed to attach submit guard");
            continue;
        }
        SUBMIT_HANDLERS.with(|handlers| handlers.borrow_mut().push(callback));
        with_controller(|controller| controller.mark_guard_installed(kind));
    }
}

fn handle_form_submit(kind: FormKind, event: &web_sys::Event) {
    let outcome = with_controller(|controller| {
        let decision = controller.handle_submit(kind);
        (decision, controller.dom().clone())
    });
    let Some((decision, dom)) = outcome else {
        return;
    };

    if let SubmitDecision::Cancel { banner, .. } = decision {
        event.prevent_default();
        if let Some(banner) = banner {
            spawn_dismissal(&dom, banner);
        }
    }
}

pub(super) fn install_pagehide_handler() {
    let Some(window) = web_sys::window() else {
        return;
    };

    PAGEHIDE_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
            move |event: web_sys::Event| {
                // Pages entering the back/forward cache keep their timers.
                let persisted = event
                    .dyn_ref::<web_sys::PageTransitionEvent>()
                    .is_some_and(web_sys::PageTransitionEvent::persisted);
                if persisted {
                    return;
                }
                tracing::debug!(pending = pending_dismissals(), "page hidden");
                cancel_all_dismissals();
            },
        ));
        if window
            .add_event_listener_with_callback(PAGEHIDE_EVENT, callback.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::warn!("failed to attach pagehide handler");
            return;
        }
        *slot.borrow_mut() = Some(callback);
    });
}
