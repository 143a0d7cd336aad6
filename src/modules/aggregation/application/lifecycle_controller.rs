//! Binds aggregations to a consumer's lifetime.
//!
//! Each `activate` gets a fresh generation number and cancellation token.
//! Results are applied under the same lock that `activate` and `deactivate`
//! take, and only when their generation is still current, so a superseded
//! request can never touch the published state.

use super::aggregation::Aggregation;
use crate::modules::aggregation::domain::entities::Request;
use crate::modules::aggregation::domain::errors::{AggregationError, Outcome};
use crate::shared::utils::LogContext;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// What the consumer sees
#[derive(Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading { request: Request },
    Loaded(Arc<T>),
    Empty { message: String },
    Errored { message: String },
}

impl<T> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        match self {
            ViewState::Idle => ViewState::Idle,
            ViewState::Loading { request } => ViewState::Loading {
                request: request.clone(),
            },
            ViewState::Loaded(view) => ViewState::Loaded(Arc::clone(view)),
            ViewState::Empty { message } => ViewState::Empty {
                message: message.clone(),
            },
            ViewState::Errored { message } => ViewState::Errored {
                message: message.clone(),
            },
        }
    }
}

impl<T> ViewState<T> {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ViewState::Loaded(_) | ViewState::Empty { .. } | ViewState::Errored { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading { .. } => "loading",
            ViewState::Loaded(_) => "loaded",
            ViewState::Empty { .. } => "empty",
            ViewState::Errored { .. } => "errored",
        }
    }

    pub fn loaded(&self) -> Option<&Arc<T>> {
        match self {
            ViewState::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ViewState::Empty { message } | ViewState::Errored { message } => Some(message),
            _ => None,
        }
    }
}

struct ActiveRequest {
    generation: u64,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Inner {
    generation: u64,
    current: Option<ActiveRequest>,
    closed: bool,
}

impl Inner {
    /// Cancel and abort whatever is in flight
    fn supersede(&mut self, view: &str) {
        if let Some(active) = self.current.take() {
            debug!("{}: superseding request #{}", view, active.generation);
            active.token.cancel();
            active.handle.abort();
        }
    }
}

pub struct LifecycleController<A: Aggregation> {
    aggregation: Arc<A>,
    inner: Arc<Mutex<Inner>>,
    state: Arc<watch::Sender<ViewState<A::Output>>>,
}

impl<A: Aggregation> LifecycleController<A> {
    pub fn new(aggregation: Arc<A>) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            aggregation,
            inner: Arc::new(Mutex::new(Inner::default())),
            state: Arc::new(state),
        }
    }

    fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
        inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start `request`, superseding anything started before. Must be called
    /// from within a tokio runtime. Returns the request's generation.
    pub fn activate(&self, request: Request) -> Result<u64, AggregationError> {
        let name = self.aggregation.name();
        let mut inner = Self::lock(&self.inner);
        if inner.closed {
            return Err(AggregationError::Deactivated);
        }

        inner.supersede(name);
        inner.generation += 1;
        let generation = inner.generation;
        let token = CancellationToken::new();

        debug!("{}: activating request #{} ({})", name, generation, request.label());
        self.state.send_replace(ViewState::Loading {
            request: request.clone(),
        });

        let handle = tokio::spawn(deliver(
            Arc::clone(&self.aggregation),
            Arc::clone(&self.inner),
            Arc::clone(&self.state),
            request,
            token.clone(),
            generation,
        ));

        inner.current = Some(ActiveRequest {
            generation,
            token,
            handle,
        });

        Ok(generation)
    }

    /// Settle straight into `Errored` without touching the network, e.g. for
    /// a request that failed validation. Supersedes anything in flight.
    pub fn reject(&self, error: AggregationError) -> Result<u64, AggregationError> {
        let name = self.aggregation.name();
        let mut inner = Self::lock(&self.inner);
        if inner.closed {
            return Err(AggregationError::Deactivated);
        }

        inner.supersede(name);
        inner.generation += 1;
        let message = error.user_message();
        LogContext::aggregation_outcome(name, inner.generation, "errored (rejected)");
        self.state.send_replace(ViewState::Errored { message });

        Ok(inner.generation)
    }

    /// Activate a request that may have failed validation
    pub fn submit(
        &self,
        request: Result<Request, AggregationError>,
    ) -> Result<u64, AggregationError> {
        match request {
            Ok(request) => self.activate(request),
            Err(error) => self.reject(error),
        }
    }

    /// Cancel outstanding work and go back to `Idle`. Terminal for this
    /// controller: later activations are refused.
    pub fn deactivate(&self) {
        let name = self.aggregation.name();
        let mut inner = Self::lock(&self.inner);
        if inner.closed {
            return;
        }

        inner.closed = true;
        inner.supersede(name);
        debug!("{}: deactivated", name);
        self.state.send_replace(ViewState::Idle);
    }

    pub fn is_active(&self) -> bool {
        !Self::lock(&self.inner).closed
    }

    pub fn generation(&self) -> u64 {
        Self::lock(&self.inner).generation
    }

    pub fn state(&self) -> ViewState<A::Output> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<A::Output>> {
        self.state.subscribe()
    }

    /// Wait until the current request settles (or the controller goes idle)
    pub async fn settled(&self) -> ViewState<A::Output> {
        let mut rx = self.state.subscribe();
        let result = rx
            .wait_for(|state| state.is_terminal() || matches!(state, ViewState::Idle))
            .await
            .map(|state| state.clone());
        match result {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }
}

impl<A: Aggregation> Drop for LifecycleController<A> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

async fn deliver<A: Aggregation>(
    aggregation: Arc<A>,
    inner: Arc<Mutex<Inner>>,
    state: Arc<watch::Sender<ViewState<A::Output>>>,
    request: Request,
    token: CancellationToken,
    generation: u64,
) {
    let name = aggregation.name();
    let result = AssertUnwindSafe(aggregation.aggregate(&request, &token))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            let reason = panic_reason(panic.as_ref());
            error!("{}: request #{} panicked: {}", name, generation, reason);
            Err(AggregationError::Internal(reason))
        });

    let next = match result {
        Ok(Outcome::Loaded(view)) => ViewState::Loaded(Arc::new(view)),
        Ok(Outcome::Empty { message }) => ViewState::Empty { message },
        Err(AggregationError::Cancelled) | Err(AggregationError::Deactivated) => {
            debug!("{}: request #{} cancelled", name, generation);
            return;
        }
        Err(err) => ViewState::Errored {
            message: err.user_message(),
        },
    };

    let mut inner = LifecycleController::<A>::lock(&inner);
    if token.is_cancelled() || inner.closed || inner.generation != generation {
        debug!("{}: discarding stale result of request #{}", name, generation);
        return;
    }

    LogContext::aggregation_outcome(name, generation, next.label());
    state.send_replace(next);
    inner.current = None;
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(reason) = panic.downcast_ref::<&str>() {
        reason.to_string()
    } else if let Some(reason) = panic.downcast_ref::<String>() {
        reason.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::MediaKind;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Echoes the requested page after a delay equal to page * 100ms
    struct PageEcho;

    #[async_trait]
    impl Aggregation for PageEcho {
        type Output = u32;

        fn name(&self) -> &'static str {
            "page-echo"
        }

        async fn aggregate(
            &self,
            request: &Request,
            token: &CancellationToken,
        ) -> Result<Outcome<u32>, AggregationError> {
            let Request::Popular { page, .. } = request else {
                return Err(AggregationError::InvalidRequest("unsupported".into()));
            };
            tokio::select! {
                _ = token.cancelled() => Err(AggregationError::Cancelled),
                _ = tokio::time::sleep(Duration::from_millis(*page as u64 * 100)) => {
                    if *page == 66 {
                        panic!("page 66 is cursed");
                    }
                    if *page == 13 {
                        Ok(Outcome::empty("nothing on page 13"))
                    } else {
                        Ok(Outcome::Loaded(*page))
                    }
                }
            }
        }
    }

    fn popular(page: u32) -> Request {
        Request::popular(MediaKind::Movie, page).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_activate_reaches_loaded() {
        let controller = LifecycleController::new(Arc::new(PageEcho));
        assert_eq!(controller.state(), ViewState::Idle);

        controller.activate(popular(2)).unwrap();
        assert!(matches!(controller.state(), ViewState::Loading { .. }));

        let state = controller.settled().await;
        assert_eq!(state.loaded().map(|v| **v), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_activate_supersedes_first() {
        let controller = LifecycleController::new(Arc::new(PageEcho));
        controller.activate(popular(5)).unwrap();
        controller.activate(popular(1)).unwrap();

        let state = controller.settled().await;
        assert_eq!(state.loaded().map(|v| **v), Some(1));

        // let the first request's timer run out; nothing changes
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(controller.state().loaded().map(|v| **v), Some(1));
        assert_eq!(controller.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_outcome() {
        let controller = LifecycleController::new(Arc::new(PageEcho));
        controller.activate(popular(13)).unwrap();
        assert_eq!(
            controller.settled().await,
            ViewState::Empty {
                message: "nothing on page 13".into()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_deactivate_is_terminal() {
        let controller = LifecycleController::new(Arc::new(PageEcho));
        let mut rx = controller.subscribe();
        controller.activate(popular(3)).unwrap();
        controller.deactivate();
        rx.borrow_and_update();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(controller.state(), ViewState::Idle);
        assert_eq!(
            controller.activate(popular(1)),
            Err(AggregationError::Deactivated)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_aggregation_settles_errored() {
        let controller = LifecycleController::new(Arc::new(PageEcho));
        controller.activate(popular(66)).unwrap();
        assert_eq!(
            controller.settled().await,
            ViewState::Errored {
                message: "Something went wrong while loading: page 66 is cursed".into()
            }
        );

        // the controller keeps working afterwards
        controller.activate(popular(1)).unwrap();
        assert_eq!(controller.settled().await.loaded().map(|v| **v), Some(1));
    }

    #[tokio::test]
    async fn test_reject_errors_without_running() {
        let controller = LifecycleController::new(Arc::new(PageEcho));
        controller
            .submit(Err(AggregationError::InvalidRequest("Invalid ID.".into())))
            .unwrap();
        assert_eq!(
            controller.state(),
            ViewState::Errored {
                message: "Invalid ID.".into()
            }
        );
    }
}
