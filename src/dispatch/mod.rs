//! Background execution with delivery on the caller's context
//!
//! [`AsyncDispatcher::run_async`] runs an operation on the shared tokio
//! runtime and, when it succeeds, posts the callback onto the [`Context`]
//! captured at dispatch time. A failed operation is logged and produces no
//! callback; nothing is ever raised on the caller's thread. There is no
//! cancellation and no progress reporting.

pub mod handlers;
pub mod queue;

use crate::artifacts::core::errors::HgResult;
use derive_new::new;
use queue::Context;
use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, new)]
pub struct AsyncDispatcher {
    runtime: Handle,
    context: Context,
}

impl AsyncDispatcher {
    /// Schedule `operation` and deliver its result to `callback` on the
    /// captured context.
    ///
    /// The returned handle resolves to whether the callback was posted;
    /// dropping it leaves the operation running.
    pub fn run_async<F, T, C>(&self, operation: F, callback: C) -> JoinHandle<bool>
    where
        F: Future<Output = HgResult<T>> + Send + 'static,
        T: Send + 'static,
        C: FnOnce(T) + Send + 'static,
    {
        let context = self.context.clone();

        self.runtime.spawn(async move {
            match operation.await {
                Ok(result) => context.post(move || callback(result)),
                Err(error) => {
                    tracing::warn!(%error, "background operation failed, no status delivered");
                    false
                }
            }
        })
    }
}
