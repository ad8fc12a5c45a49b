//! # Submission
//!
//! Reviews and orders are single-attempt POSTs. Each target has its own
//! [`RequestSlot`]; a second submission while the first is still in flight is
//! rejected before anything goes on the wire. Nothing is retried.
use std::sync::{Arc, Mutex, PoisonError};

use menu::{LineItem, Review, ValidationError};
use tracing::{debug, info};

use crate::{api::Api, error::ClientError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Done,
}

#[derive(Debug, Clone, Default)]
pub struct RequestSlot {
    state: Arc<Mutex<RequestState>>,
}

impl RequestSlot {
    pub fn state(&self) -> RequestState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, state: RequestState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    pub fn begin(&self, what: &'static str) -> Result<InFlight, ClientError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == RequestState::InFlight {
            return Err(ClientError::InFlight(what));
        }

        *state = RequestState::InFlight;
        Ok(InFlight {
            slot: self.clone(),
            finished: false,
        })
    }
}

/// Held for the duration of one request. Dropping it without finishing puts
/// the slot back to idle.
#[derive(Debug)]
pub struct InFlight {
    slot: RequestSlot,
    finished: bool,
}

impl InFlight {
    pub fn finish(mut self, succeeded: bool) {
        self.finished = true;
        self.slot.set(if succeeded {
            RequestState::Done
        } else {
            RequestState::Idle
        });
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.finished {
            self.slot.set(RequestState::Idle);
        }
    }
}

/// Cheap to clone; clones share request slots.
#[derive(Debug, Clone)]
pub struct Submitter {
    api: Api,
    review: RequestSlot,
    order: RequestSlot,
}

impl Submitter {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            review: RequestSlot::default(),
            order: RequestSlot::default(),
        }
    }

    pub fn review_state(&self) -> RequestState {
        self.review.state()
    }

    pub fn order_state(&self) -> RequestState {
        self.order.state()
    }

    pub async fn submit_review(&self, review: &Review) -> Result<(), ClientError> {
        review.validate()?;

        let request = self.review.begin("review")?;
        let result = self.api.post_review(review).await;
        request.finish(result.is_ok());

        if result.is_ok() {
            info!("Review from {} submitted", review.name);
        }
        result
    }

    pub async fn submit_order(&self, items: &[LineItem]) -> Result<(), ClientError> {
        if items.is_empty() {
            return Err(ValidationError::EmptyOrder.into());
        }

        let request = self.order.begin("order")?;
        debug!("Submitting order of {} items", items.len());
        let result = self.api.post_order(items).await;
        request.finish(result.is_ok());

        if result.is_ok() {
            info!("Order of {} items submitted", items.len());
        }
        result
    }
}

/// A cart snapshot waiting to be posted.
#[derive(Debug, Clone)]
pub struct PendingOrder {
    submitter: Submitter,
    items: Vec<LineItem>,
}

impl PendingOrder {
    pub const fn new(submitter: Submitter, items: Vec<LineItem>) -> Self {
        Self { submitter, items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Gives the submitted items back on success so the caller can drop
    /// exactly those from the cart.
    pub async fn send(self) -> Result<Vec<LineItem>, ClientError> {
        self.submitter.submit_order(&self.items).await?;

        Ok(self.items)
    }
}

/// A review waiting to be posted. Owns its copy so the form can be edited or
/// reset while it is in flight.
#[derive(Debug, Clone)]
pub struct PendingReview {
    submitter: Submitter,
    review: Review,
}

impl PendingReview {
    pub const fn new(submitter: Submitter, review: Review) -> Self {
        Self { submitter, review }
    }

    pub const fn review(&self) -> &Review {
        &self.review
    }

    pub async fn send(self) -> Result<(), ClientError> {
        self.submitter.submit_review(&self.review).await
    }
}
