//! Load operation - one in-flight fetch and its waiting listeners.
//!
//! # Lifecycle
//!
//! ```text
//! Pending --[fetch ok]--------> Succeeded
//! Pending --[fetch error]-----> Failed
//! Pending --[cancel/retarget]-> Cancelled
//! ```
//!
//! Terminal states hand their listeners back exactly once; the controller
//! then drops the operation and its slot returns to idle.

use std::fmt;

use super::{AffiliateError, Orientation};
use crate::domain::foundation::{OperationId, StateMachine, Timestamp, ValidationError};

/// Listener notified once when a preload settles.
pub type Completion = Box<dyn FnOnce(Result<(), AffiliateError>) + Send + 'static>;

/// Status of a load operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadStatus {
    Pending,
    Succeeded,
    Failed,
    Cancelled,
}

impl StateMachine for LoadStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use LoadStatus::*;
        matches!(
            (self, target),
            (Pending, Succeeded) | (Pending, Failed) | (Pending, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use LoadStatus::*;
        match self {
            Pending => vec![Succeeded, Failed, Cancelled],
            Succeeded | Failed | Cancelled => vec![],
        }
    }
}

/// One fetch for one orientation, with listeners in attachment order.
pub struct LoadOperation {
    id: OperationId,
    orientation: Orientation,
    status: LoadStatus,
    started_at: Timestamp,
    listeners: Vec<Completion>,
}

impl LoadOperation {
    /// Creates a pending operation with no listeners.
    pub fn new(orientation: Orientation, started_at: Timestamp) -> Self {
        Self {
            id: OperationId::new(),
            orientation,
            status: LoadStatus::Pending,
            started_at,
            listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Appends a listener; listeners are notified in attachment order.
    pub fn attach(&mut self, listener: Completion) {
        self.listeners.push(listener);
    }

    /// Settles the operation and hands back its listeners.
    ///
    /// Fails without touching the listeners if the operation already settled.
    pub fn finish(&mut self, status: LoadStatus) -> Result<Vec<Completion>, ValidationError> {
        self.status = self.status.transition_to(status)?;
        Ok(std::mem::take(&mut self.listeners))
    }

    /// Removes the listeners without settling (used to recover from a
    /// rejected transition).
    pub fn take_listeners(&mut self) -> Vec<Completion> {
        std::mem::take(&mut self.listeners)
    }

    /// Cancels this operation and moves its listeners to a new pending
    /// operation for `orientation`.
    pub fn retarget(
        &mut self,
        orientation: Orientation,
        now: Timestamp,
    ) -> Result<LoadOperation, ValidationError> {
        let listeners = self.finish(LoadStatus::Cancelled)?;
        let mut replacement = LoadOperation::new(orientation, now);
        replacement.listeners = listeners;
        Ok(replacement)
    }
}

impl fmt::Debug for LoadOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOperation")
            .field("id", &self.id)
            .field("orientation", &self.orientation)
            .field("status", &self.status)
            .field("started_at", &self.started_at)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
