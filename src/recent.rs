//! Recent-workouts list: fetch, decode, render.
//!
//! Every refresh is numbered. A response that arrives after a newer refresh
//! was issued is dropped, so overlapping submit chains always settle on the
//! latest list. A failed refresh leaves whatever is on screen untouched.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::Transport;
use crate::error::ClientError;
use crate::types::{RecentView, WorkoutEntry};

/// Where a [`RecentView`] ends up.
pub trait ListSurface {
    fn show(&mut self, view: &RecentView);
}

/// A page without a container still fetches; there is just nothing to draw into.
impl<S: ListSurface> ListSurface for Option<S> {
    fn show(&mut self, view: &RecentView) {
        if let Some(surface) = self {
            surface.show(view);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RefreshOutcome {
    Rendered { rows: usize },
    Stale { seq: u64, latest: u64 },
}

struct Inner<T, S> {
    transport: T,
    endpoint: String,
    surface: RefCell<S>,
    issued: Cell<u64>,
}

/// Cheap to clone; clones share the surface and the sequence counter.
pub struct RecentListView<T, S> {
    inner: Rc<Inner<T, S>>,
}

impl<T, S> Clone for RecentListView<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Transport, S: ListSurface> RecentListView<T, S> {
    pub fn new(transport: T, endpoint: impl Into<String>, surface: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                transport,
                endpoint: endpoint.into(),
                surface: RefCell::new(surface),
                issued: Cell::new(0),
            }),
        }
    }

    pub async fn refresh(&self) -> Result<RefreshOutcome, ClientError> {
        let seq = self.inner.issued.get() + 1;
        self.inner.issued.set(seq);

        let body = self.inner.transport.get_text(&self.inner.endpoint).await?;
        let entries: Vec<WorkoutEntry> = serde_json::from_str(&body)?;

        let latest = self.inner.issued.get();
        if seq != latest {
            log::debug!("[RecentListView] dropping refresh #{} (latest is #{})", seq, latest);
            return Ok(RefreshOutcome::Stale { seq, latest });
        }

        let view = RecentView::from_entries(&entries);
        self.inner.surface.borrow_mut().show(&view);
        log::debug!("[RecentListView] rendered {} workouts", view.row_count());
        Ok(RefreshOutcome::Rendered {
            rows: view.row_count(),
        })
    }

    /// `refresh` with failures reported to the log instead of returned.
    pub async fn refresh_logged(&self) -> Option<RefreshOutcome> {
        match self.refresh().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log::error!(
                    "[RecentListView] failed to refresh {}: {}",
                    self.inner.endpoint,
                    e
                );
                None
            }
        }
    }
}

impl<T: Transport + 'static, S: ListSurface + 'static> RecentListView<T, S> {
    pub fn spawn_refresh(&self) {
        let view = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            view.refresh_logged().await;
        });
    }
}
