//! In-memory stand-ins for fetch, the list container and post-submit hooks.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::api::Transport;
use crate::error::ClientError;
use crate::recent::ListSurface;
use crate::submitter::AfterSubmit;
use crate::types::{FormPayload, RecentView};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Post(String, FormPayload),
    Get(String),
}

pub enum Reply {
    Ready(Result<String, ClientError>),
    Later(oneshot::Receiver<Result<String, ClientError>>),
}

#[derive(Default)]
pub struct FakeTransport {
    calls: RefCell<Vec<Call>>,
    post_status: Cell<Option<u16>>,
    replies: RefCell<VecDeque<Reply>>,
}

impl FakeTransport {
    pub fn failing_posts(status: u16) -> Self {
        let transport = Self::default();
        transport.post_status.set(Some(status));
        transport
    }

    pub fn queue(&self, reply: Reply) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub fn queue_get(&self, reply: Result<String, ClientError>) {
        self.queue(Reply::Ready(reply));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn post_form(&self, url: &str, payload: &FormPayload) -> Result<(), ClientError> {
        self.calls
            .borrow_mut()
            .push(Call::Post(url.to_string(), payload.clone()));
        match self.post_status.get() {
            Some(status) => Err(ClientError::Status {
                url: url.to_string(),
                status,
            }),
            None => Ok(()),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, ClientError> {
        self.calls.borrow_mut().push(Call::Get(url.to_string()));
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Later(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ClientError::Network("reply dropped".to_string()))),
            None => Ok("[]".to_string()),
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
    shown: Rc<RefCell<Vec<RecentView>>>,
}

impl RecordingSurface {
    pub fn shown(&self) -> Vec<RecentView> {
        self.shown.borrow().clone()
    }
}

impl ListSurface for RecordingSurface {
    fn show(&mut self, view: &RecentView) {
        self.shown.borrow_mut().push(view.clone());
    }
}

/// Counts runs and remembers how many transport calls had happened by then.
#[derive(Clone)]
pub struct RecordingHook {
    transport: Rc<FakeTransport>,
    fail: bool,
    seen: Rc<RefCell<Vec<usize>>>,
}

impl RecordingHook {
    pub fn new(transport: Rc<FakeTransport>) -> Self {
        Self {
            transport,
            fail: false,
            seen: Rc::default(),
        }
    }

    pub fn failing(transport: Rc<FakeTransport>) -> Self {
        Self {
            fail: true,
            ..Self::new(transport)
        }
    }

    pub fn runs(&self) -> Vec<usize> {
        self.seen.borrow().clone()
    }
}

impl AfterSubmit for RecordingHook {
    fn run(&self) -> Result<(), ClientError> {
        self.seen.borrow_mut().push(self.transport.calls().len());
        if self.fail {
            Err(ClientError::missing(".modal .btn-close"))
        } else {
            Ok(())
        }
    }
}
