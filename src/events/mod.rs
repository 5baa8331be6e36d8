pub mod connector;
pub mod types;

pub use connector::{Connector, FnConnector, QueueConnector};
pub use types::Broadcast;

/// Shared handle to a registered endpoint.
pub type ConnectorRef = std::sync::Arc<dyn Connector>;
