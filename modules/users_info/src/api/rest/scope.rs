use std::time::Duration;

use db::RequestCtx;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Per-server settings every request context is derived from.
#[derive(Clone, Debug)]
pub struct RequestScope {
    parent: CancellationToken,
    timeout: Duration,
}

impl RequestScope {
    /// `timeout` of zero disables the per-request deadline.
    pub fn new(parent: CancellationToken, timeout: Duration) -> Self {
        Self { parent, timeout }
    }

    /// Fresh context for one request. It is cancelled with `parent`, when its
    /// deadline passes, or when the returned guard is dropped.
    pub fn begin(&self) -> (RequestCtx, DropGuard) {
        let ctx = RequestCtx::new(self.parent.child_token()).with_timeout(self.timeout);
        let guard = ctx.cancel_on_drop();
        (ctx, guard)
    }
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new(CancellationToken::new(), Duration::ZERO)
    }
}
