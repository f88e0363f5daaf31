pub const NOTICE_TTL_MS: u32 = 4_000;

/// Runs `dismiss` once the notice lifetime has elapsed. Only the browser build
/// has a timer; on the host the notice stays until replaced.
pub fn schedule_dismiss(dismiss: impl FnOnce() + 'static) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::callback::Timeout::new(NOTICE_TTL_MS, dismiss).forget();
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = dismiss;
    }
}
