//! Cross-platform utilities that work in both WASM and native contexts

#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = console)]
        fn log(s: &str);
    }

    pub fn console_log(s: &str) {
        log(s);
    }

    pub fn set_panic_hook() {
        // Panics in the browser are otherwise reported as "unreachable".
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
    }

    pub fn spawn_async<F>(future: F)
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(future);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_impl {
    pub fn console_log(s: &str) {
        log::info!("{}", s);
    }

    pub fn set_panic_hook() {
        // Native panics already print through the default hook.
    }

    /// Requires a running tokio runtime (the desktop binary runs inside
    /// `#[tokio::main]`).
    pub fn spawn_async<F>(future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(future);
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_impl::*;

#[cfg(not(target_arch = "wasm32"))]
pub use native_impl::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_console_log_without_logger() {
        console_log("📡 [STATE] GET http://localhost:8080/api/vms");
    }

    #[tokio::test]
    async fn test_spawn_async_runs_future() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let (tx, rx) = tokio::sync::oneshot::channel();

        spawn_async(async move {
            flag.store(true, Ordering::SeqCst);
            let _ = tx.send(());
        });

        rx.await.unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }
}
