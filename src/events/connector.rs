use anyhow::Result;
use parking_lot::Mutex;
use serde_json::Value;

use super::types::Broadcast;

/// A broadcast endpoint: anything able to receive relayed events.
///
/// Endpoints are registered on the mediator and receive every dispatched
/// event except the ones they originated themselves. Registration keeps a
/// shared reference; the registering side stays responsible for the
/// endpoint's lifetime.
pub trait Connector: Send + Sync {
    /// Receive one relayed event.
    fn emit(&self, event: &str, args: &[Value]) -> Result<()>;
}

/// Endpoint that collects received events into an inbox.
#[derive(Debug, Default)]
pub struct QueueConnector {
    inbox: Mutex<Vec<Broadcast>>,
}

impl QueueConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events waiting in the inbox.
    pub fn len(&self) -> usize {
        self.inbox.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inbox.lock().is_empty()
    }

    /// Take all received events, oldest first.
    pub fn drain(&self) -> Vec<Broadcast> {
        self.inbox.lock().drain(..).collect()
    }
}

impl Connector for QueueConnector {
    fn emit(&self, event: &str, args: &[Value]) -> Result<()> {
        self.inbox.lock().push(Broadcast::new(event, args));
        Ok(())
    }
}

/// Endpoint that forwards received events to a callback.
pub struct FnConnector {
    callback: Box<dyn Fn(&str, &[Value]) -> Result<()> + Send + Sync>,
}

impl FnConnector {
    pub fn new(callback: impl Fn(&str, &[Value]) -> Result<()> + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl Connector for FnConnector {
    fn emit(&self, event: &str, args: &[Value]) -> Result<()> {
        (self.callback)(event, args)
    }
}
