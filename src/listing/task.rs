// Cancellable listing loads
//
// Each load gets a fresh request token. The fetch runs on its own task
// and reports back through a oneshot channel; dropping the handle cancels
// the task, and a listing only accepts the result of its latest token.

use std::fmt;
use std::future::Future;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use crate::cms::CmsClient;
use crate::content::{fetch_tagged, Content, JoinDegraded, Tagged};

/// Identifies one load of a listing; later loads get larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub(crate) fn first() -> Self {
        Self(1)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of a finished load
#[derive(Debug)]
pub struct Loaded<T> {
    pub token: RequestToken,
    pub result: Result<Vec<Tagged<T>>, JoinDegraded>,
}

/// Handle to an in-flight load. Dropping it cancels the fetch.
pub struct LoadHandle<T> {
    token: RequestToken,
    rx: oneshot::Receiver<Loaded<T>>,
    _guard: DropGuard,
}

impl<T> LoadHandle<T> {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    /// Wait for the load to finish. `None` if it was cancelled.
    pub async fn recv(mut self) -> Option<Loaded<T>> {
        (&mut self.rx).await.ok()
    }
}

/// How a load task finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskExit {
    /// The handle was dropped before the fetch finished
    Cancelled,
    Delivered,
    /// The fetch finished but nobody was waiting any more
    Orphaned,
}

/// Spawn the tag-joined fetch of `T` under `token`
pub fn spawn_load<T: Content>(client: CmsClient, token: RequestToken) -> LoadHandle<T> {
    let (handle, _task) = spawn_guarded(token, async move {
        fetch_tagged::<T>(&client, None).await
    });
    handle
}

fn spawn_guarded<T, F>(token: RequestToken, fetch: F) -> (LoadHandle<T>, JoinHandle<TaskExit>)
where
    T: Content,
    F: Future<Output = Result<Vec<Tagged<T>>, JoinDegraded>> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();
    let (tx, rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        tokio::select! {
            () = task_cancel.cancelled() => {
                debug!("Load {} of {} cancelled", token, T::COLLECTION);
                TaskExit::Cancelled
            }
            result = fetch => {
                if tx.send(Loaded { token, result }).is_err() {
                    debug!("Load {} of {} finished after its listing went away", token, T::COLLECTION);
                    TaskExit::Orphaned
                } else {
                    TaskExit::Delivered
                }
            }
        }
    });

    let handle = LoadHandle {
        token,
        rx,
        _guard: cancel.drop_guard(),
    };
    (handle, task)
}
