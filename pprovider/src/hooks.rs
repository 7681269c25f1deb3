//! Operational hook contracts around single provider calls.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::{ProviderError, ProviderId};

pub trait ProviderOperationHooks: Send + Sync {
    fn on_start(&self, _provider: ProviderId, _operation: &str) {}

    fn on_success(&self, _provider: ProviderId, _operation: &str, _elapsed: Duration) {}

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

/// Awaits one provider call, reporting its start and outcome to `hooks`.
///
/// The call is made exactly once; its result is returned untouched.
pub async fn observe_operation<T, F>(
    provider: ProviderId,
    operation: &str,
    hooks: &dyn ProviderOperationHooks,
    call: F,
) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    hooks.on_start(provider, operation);
    let started = Instant::now();
    let result = call.await;
    let elapsed = started.elapsed();

    match &result {
        Ok(_) => hooks.on_success(provider, operation, elapsed),
        Err(error) => hooks.on_failure(provider, operation, elapsed, error),
    }

    result
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    use super::*;

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ProviderOperationHooks for RecordingHooks {
        fn on_start(&self, provider: ProviderId, operation: &str) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{provider}:{operation}"));
        }

        fn on_success(&self, provider: ProviderId, operation: &str, _elapsed: Duration) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{provider}:{operation}"));
        }

        fn on_failure(
            &self,
            provider: ProviderId,
            operation: &str,
            _elapsed: Duration,
            error: &ProviderError,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{provider}:{operation}:{}", error.message));
        }
    }

    #[test]
    fn observe_operation_reports_success() {
        let hooks = RecordingHooks::default();
        let value = block_on(observe_operation(
            ProviderId::OpenAi,
            "chat",
            &hooks,
            async { Ok::<_, ProviderError>(7_u32) },
        ))
        .expect("call should succeed");

        assert_eq!(value, 7);
        assert_eq!(
            *hooks.events.lock().expect("events lock"),
            vec!["start:openai:chat", "success:openai:chat"]
        );
    }

    #[test]
    fn observe_operation_reports_failure_and_returns_error_unchanged() {
        let hooks = RecordingHooks::default();
        let error = block_on(observe_operation(
            ProviderId::OpenAi,
            "list_models",
            &hooks,
            async { Err::<(), _>(ProviderError::rate_limited("slow down")) },
        ))
        .expect_err("call should fail");

        assert_eq!(error, ProviderError::rate_limited("slow down"));
        assert_eq!(
            *hooks.events.lock().expect("events lock"),
            vec![
                "start:openai:list_models",
                "failure:openai:list_models:slow down"
            ]
        );
    }

    #[test]
    fn noop_hooks_accept_every_callback() {
        let hooks = NoopOperationHooks;
        hooks.on_start(ProviderId::OpenAi, "generate");
        hooks.on_success(ProviderId::OpenAi, "generate", Duration::from_millis(1));
        hooks.on_failure(
            ProviderId::OpenAi,
            "generate",
            Duration::from_millis(1),
            &ProviderError::other("ignored"),
        );
    }

    fn block_on<F: Future>(future: F) -> F::Output {
        let mut future = std::pin::pin!(future);
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        loop {
            match future.as_mut().poll(&mut cx) {
                Poll::Ready(value) => return value,
                Poll::Pending => std::thread::yield_now(),
            }
        }
    }

    fn noop_waker() -> Waker {
        unsafe fn clone(_: *const ()) -> RawWaker {
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        unsafe fn wake(_: *const ()) {}

        unsafe fn wake_by_ref(_: *const ()) {}

        unsafe fn drop(_: *const ()) {}

        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, wake, wake_by_ref, drop);

        let raw_waker = RawWaker::new(std::ptr::null(), &VTABLE);
        unsafe { Waker::from_raw(raw_waker) }
    }
}
