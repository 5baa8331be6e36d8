//! Mediator framework for composing independent UI modules.
//!
//! Modules are self-contained behavior units bound to element subtrees. A
//! [`ModuleRegistry`] instantiates and tracks them; the [`Mediator`] is the
//! single channel a module uses to discover other modules, read
//! configuration, and broadcast events to connectors.

pub mod config;
pub mod constants;
pub mod dom;
pub mod events;
pub mod mediator;
pub mod models;
pub mod registry;
pub mod utils;

pub use config::Config;
pub use dom::{Element, ElementRef, Node};
pub use events::{Broadcast, Connector, ConnectorRef, FnConnector, QueueConnector};
pub use mediator::{Mediator, Removal};
pub use models::{ModuleId, ModuleName};
pub use registry::{Module, ModuleContext, ModuleHandle, ModuleHost, ModuleRegistry};
pub use utils::MediatorError;
