//! Closable wrapper around an SDK client.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{LoaderError, Result};

/// SDK client that refuses calls once closed.
///
/// SDK clients release their connection pool on drop; closing only marks the
/// handle so later calls fail with [`LoaderError::ClientClosed`].
#[derive(Debug)]
pub struct ClientHandle<C> {
    client: C,
    service: &'static str,
    closed: AtomicBool,
}

impl<C> ClientHandle<C> {
    pub fn new(service: &'static str, client: C) -> Self {
        Self { client, service, closed: AtomicBool::new(false) }
    }

    /// The client, unless the handle was closed.
    pub fn get(&self) -> Result<&C> {
        if self.is_closed() {
            return Err(LoaderError::client_closed(self.service));
        }
        Ok(&self.client)
    }

    /// The client regardless of state, for inspection.
    pub fn inner(&self) -> &C {
        &self.client
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Mark the handle closed; a second close reports [`LoaderError::ClientClosed`].
    pub fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(LoaderError::client_closed(self.service));
        }
        tracing::debug!(service = self.service, "Closed client");
        Ok(())
    }
}
