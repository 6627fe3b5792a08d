//! A small resource-query hook for fetch-driven views.
//!
//! Every listing and detail view follows the same shape: set `loading`,
//! issue one service call, replace the data or record the error, clear
//! `loading`. [`use_query`] packages that shape once, and adds the guard
//! the ad hoc version lacks: each run gets a request generation, and a
//! completion whose generation is no longer current is discarded, so a
//! slow, earlier-issued response can never overwrite a newer one.
//!
//! No retries: a failure is terminal for that attempt and waits for a new
//! user action (an edit of a tracked dependency, or [`UseQuery::refresh`]).

use std::future::Future;

use api::ApiError;
use dioxus::prelude::*;

/// Snapshot of a remote fetch at one call site.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState<T> {
    pub loading: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            loading: true,
            data: None,
            error: None,
        }
    }
}

/// Handle returned by [`use_query`].
pub struct UseQuery<T: 'static> {
    state: Signal<QueryState<T>>,
    tick: Signal<u32>,
}

impl<T: 'static> Clone for UseQuery<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for UseQuery<T> {}

impl<T: Clone + 'static> UseQuery<T> {
    /// Current snapshot; subscribes the caller to updates.
    pub fn snapshot(&self) -> QueryState<T> {
        (self.state)()
    }

    /// Re-run the fetch by hand (e.g. after a successful submit).
    pub fn refresh(&mut self) {
        let next = self.tick.peek().wrapping_add(1);
        self.tick.set(next);
    }
}

/// Raise a transient notification whenever a query lands in a new error.
///
/// The backend's own `detail` message wins when present; otherwise the
/// given fallback is shown.
pub fn use_error_toast<T: Clone + 'static>(query: UseQuery<T>, fallback: &'static str) {
    use_error_toast_with(query, move |err| err.message_or(fallback).to_string());
}

/// Like [`use_error_toast`], but the message is computed per error (the
/// profile view words timeouts differently from unreachable backends).
pub fn use_error_toast_with<T, F>(query: UseQuery<T>, mut message: F)
where
    T: Clone + 'static,
    F: FnMut(&ApiError) -> String + 'static,
{
    let mut toasts = crate::toast::use_toasts();
    let mut last = use_signal(|| Option::<ApiError>::None);
    use_effect(move || {
        let err = query.snapshot().error;
        if let Some(err_ref) = &err {
            if err.as_ref() != last.peek().as_ref() {
                toasts.error(message(err_ref));
            }
        }
        last.set(err);
    });
}

/// Run `fetch` on mount and whenever a signal it reads changes.
///
/// The closure's synchronous part is the reactive scope: read the signals
/// the query depends on there, then return the future.
pub fn use_query<T, F, Fut>(mut fetch: F) -> UseQuery<T>
where
    T: Clone + 'static,
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let mut state = use_signal(QueryState::<T>::default);
    let tick = use_signal(|| 0u32);
    let mut generation = use_signal(|| 0u64);

    let _ = use_resource(move || {
        // Subscribe to manual refreshes alongside the fetch's own reads.
        let _ = tick();
        let generation_now = generation.peek().wrapping_add(1);
        generation.set(generation_now);
        let fut = fetch();
        async move {
            state.write().loading = true;
            let result = fut.await;
            // A newer request was issued while this one was in flight:
            // the stale completion is dropped.
            if *generation.peek() != generation_now {
                return;
            }
            match result {
                Ok(data) => state.set(QueryState {
                    loading: false,
                    data: Some(data),
                    error: None,
                }),
                Err(err) => {
                    let mut snapshot = state.write();
                    snapshot.loading = false;
                    snapshot.error = Some(err);
                }
            }
        }
    });

    UseQuery { state, tick }
}
