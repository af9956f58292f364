use super::*;

pub(super) struct GlooSleeper;

impl Sleeper for GlooSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(duration)
    }
}

/// Runs one dismissal as its own abortable task. Dropping the task on abort
/// clears the pending browser timeout.
pub(super) fn spawn_dismissal(dom: &BrowserDom, dismissal: ScheduledDismissal<HtmlElement>) {
    let (handle, registration) = AbortHandle::new_pair();
    let timer_id = TIMERS.with(|timers| timers.borrow_mut().register(handle));
    let dom = dom.clone();
    let task = Abortable::new(
        async move {
            run_dismissal(&dom, dismissal, &GlooSleeper).await;
        },
        registration,
    );

    spawn_local(async move {
        if task.await.is_err() {
            tracing::debug!(timer_id, "dismissal aborted");
        }
        TIMERS.with(|timers| {
            timers.borrow_mut().finish(timer_id);
        });
    });
}

pub(super) fn cancel_all_dismissals() -> usize {
    let cancelled = TIMERS.with(|timers| timers.borrow_mut().cancel_all());
    if cancelled > 0 {
        tracing::info!(cancelled, "pending dismissals cancelled");
    }
    with_controller(|controller| {
        controller
            .diagnostics_mut()
            .record_timers_cancelled(cancelled);
    });
    cancelled
}

pub(super) fn pending_dismissals() -> usize {
    TIMERS.with(|timers| timers.borrow().len())
}
