//! Background submission of the workout-logging form.

use std::rc::Rc;

use web_sys::{Document, HtmlElement, HtmlFormElement};

use crate::api::{read_form, Transport};
use crate::dom::{query, Listener};
use crate::error::ClientError;
use crate::recent::{ListSurface, RecentListView, RefreshOutcome};
use crate::types::FormPayload;

/// Runs after the server accepted a submission, before the list refresh.
pub trait AfterSubmit {
    fn run(&self) -> Result<(), ClientError>;
}

impl AfterSubmit for Box<dyn AfterSubmit> {
    fn run(&self) -> Result<(), ClientError> {
        (**self).run()
    }
}

/// Clears the form fields.
pub struct ResetForm(pub HtmlFormElement);

impl AfterSubmit for ResetForm {
    fn run(&self) -> Result<(), ClientError> {
        self.0.reset();
        Ok(())
    }
}

/// Closes the overlay around the form by clicking its close control.
pub struct DismissOverlay {
    document: Document,
    close_selector: String,
}

impl DismissOverlay {
    pub fn new(document: Document, close_selector: impl Into<String>) -> Self {
        Self {
            document,
            close_selector: close_selector.into(),
        }
    }
}

impl AfterSubmit for DismissOverlay {
    fn run(&self) -> Result<(), ClientError> {
        let close = query::<HtmlElement>(&self.document, &self.close_selector)
            .ok_or_else(|| ClientError::missing(self.close_selector.as_str()))?;
        close.click();
        Ok(())
    }
}

pub struct Nothing;

impl AfterSubmit for Nothing {
    fn run(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmitOutcome {
    pub hook_ran: bool,
    /// `None` when the refresh failed; the failure has been logged.
    pub refresh: Option<RefreshOutcome>,
}

pub struct FormSubmitter<T, S, H> {
    transport: T,
    list: RecentListView<T, S>,
    after_submit: H,
}

impl<T, S, H> FormSubmitter<T, S, H>
where
    T: Transport,
    S: ListSurface,
    H: AfterSubmit,
{
    pub fn new(transport: T, list: RecentListView<T, S>, after_submit: H) -> Self {
        Self {
            transport,
            list,
            after_submit,
        }
    }

    /// POST, then hook, then one refresh. A rejected POST stops the chain.
    pub async fn submit(&self, url: &str, payload: &FormPayload) -> Result<SubmitOutcome, ClientError> {
        self.transport.post_form(url, payload).await?;
        log::info!("[FormSubmitter] saved workout ({} fields) to {}", payload.len(), url);

        let hook_ran = match self.after_submit.run() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[FormSubmitter] post-submit step failed: {}", e);
                false
            }
        };

        let refresh = self.list.refresh_logged().await;
        Ok(SubmitOutcome { hook_ran, refresh })
    }
}

impl<T, S, H> FormSubmitter<T, S, H>
where
    T: Transport + 'static,
    S: ListSurface + 'static,
    H: AfterSubmit + 'static,
{
    /// Takes over `form`'s submit event. Dropping the listener gives the
    /// form back to the browser.
    pub fn attach(self: Rc<Self>, form: HtmlFormElement) -> Result<Listener, ClientError> {
        let target = form.clone();
        Listener::new(&target, "submit", move |event| {
            event.prevent_default();
            let url = action_url(&form);
            let payload = match read_form(&form) {
                Ok(payload) => payload,
                Err(e) => {
                    log::error!("[FormSubmitter] could not read form: {}", e);
                    return;
                }
            };
            let submitter = Rc::clone(&self);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = submitter.submit(&url, &payload).await {
                    log::error!("[FormSubmitter] error logging workout: {}", e);
                }
            });
        })
    }
}

/// The `action` attribute as written, or the resolved action (the page URL) when absent.
fn action_url(form: &HtmlFormElement) -> String {
    form.get_attribute("action").unwrap_or_else(|| form.action())
}

/// Builds the hook a page asked for.
pub fn after_submit_for(
    config: &crate::config::AfterSubmitConfig,
    document: &Document,
    form: &HtmlFormElement,
) -> Box<dyn AfterSubmit> {
    use crate::config::AfterSubmitConfig;

    match config {
        AfterSubmitConfig::ResetForm => Box::new(ResetForm(form.clone())),
        AfterSubmitConfig::DismissOverlay { close_selector } => {
            Box::new(DismissOverlay::new(document.clone(), close_selector.clone()))
        }
        AfterSubmitConfig::Nothing => Box::new(Nothing),
    }
}
