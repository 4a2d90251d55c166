use std::rc::Rc;

use web_sys::{Document, Element, HtmlFormElement};

use crate::api::FetchTransport;
use crate::calculator::DerivedFieldCalculator;
use crate::components::YewListSurface;
use crate::config::PageConfig;
use crate::dom::{query, Listener};
use crate::error::ClientError;
use crate::recent::RecentListView;
use crate::submitter::{after_submit_for, FormSubmitter};

/// Everything attached to one page. Dropping it detaches the listeners;
/// requests already in flight still finish.
pub struct PageHandle {
    _submit: Option<Listener>,
    _calculator: Option<DerivedFieldCalculator>,
}

impl PageHandle {
    pub fn dispose(self) {}
}

/// Wires the form, the recent-workouts list and the 1RM calculator from
/// `config`. Anything missing from the page is skipped.
pub fn init(document: &Document, config: &PageConfig) -> Result<PageHandle, ClientError> {
    let container = query::<Element>(document, &config.container_selector);
    if container.is_none() {
        log::debug!("[App] no {} on this page", config.container_selector);
    }
    let has_container = container.is_some();
    let list = RecentListView::new(
        FetchTransport,
        config.recent_endpoint.clone(),
        container.map(YewListSurface::new),
    );
    if has_container {
        list.spawn_refresh();
    }

    let submit = match query::<HtmlFormElement>(document, &config.form_selector) {
        Some(form) => {
            let hook = after_submit_for(&config.after_submit, document, &form);
            let submitter = Rc::new(FormSubmitter::new(FetchTransport, list, hook));
            Some(submitter.attach(form)?)
        }
        None => {
            log::debug!("[App] no {} on this page", config.form_selector);
            None
        }
    };

    let calculator = DerivedFieldCalculator::attach_by_selectors(
        document,
        &config.reps_selector,
        &config.weight_selector,
        &config.estimate_selector,
    )?;

    log::info!(
        "[App] workout logger ready (form: {}, calculator: {})",
        submit.is_some(),
        calculator.is_some()
    );
    Ok(PageHandle {
        _submit: submit,
        _calculator: calculator,
    })
}
