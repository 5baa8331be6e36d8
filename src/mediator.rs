use anyhow::Result;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::dom::{ElementRef, Node};
use crate::events::ConnectorRef;
use crate::models::ModuleId;
use crate::registry::{ModuleHandle, ModuleHost};
use crate::utils::MediatorError;

/// Target of a removal request: either concrete handles, or a subtree to
/// derive them from.
pub enum Removal {
    /// Release exactly these modules.
    Handles(Vec<ModuleHandle>),
    /// Release every registered module whose root element lies under this
    /// node.
    Scope(Node),
}

/// The sole channel between modules and the application owning them.
///
/// One instance per composition root. Holds the host reference, the
/// immutable configuration, and the ordered broadcast endpoints; modules
/// receive it as an explicit dependency at construction and never reach the
/// host directly.
pub struct Mediator {
    host: Arc<dyn ModuleHost>,
    config: Config,
    connectors: RwLock<Vec<ConnectorRef>>,
}

impl Mediator {
    pub fn new(host: Arc<dyn ModuleHost>, config: Config) -> Self {
        Self {
            host,
            config,
            connectors: RwLock::new(Vec::new()),
        }
    }

    /// Bring a subtree under management: register the modules found below
    /// `scope`, then start them.
    ///
    /// A node that is not a subtree root yields an empty collection and no
    /// delegated calls. Host failures propagate unchanged. The returned
    /// handles are exactly the registration result; their start has already
    /// been attempted by the time this returns.
    pub fn add_modules(&self, scope: &Node) -> Result<Vec<ModuleHandle>> {
        let Some(root) = scope.as_scope_root() else {
            trace!("add_modules called with a non-element scope, ignoring");
            return Ok(Vec::new());
        };

        let handles = self.host.register_modules(root)?;
        self.host.start(&handles)?;
        Ok(handles)
    }

    /// Release modules: stop them, then drop their registration.
    ///
    /// Stop runs strictly before unregistration so teardown hooks still see
    /// their module resolvable by identifier. A scope that is not a subtree
    /// root is ignored. Returns the mediator for chaining.
    pub fn remove_modules(&self, removal: Removal) -> Result<&Self> {
        let handles = match removal {
            Removal::Handles(handles) => handles,
            Removal::Scope(node) => {
                let Some(root) = node.as_scope_root() else {
                    trace!("remove_modules called with a non-element scope, ignoring");
                    return Ok(self);
                };
                self.resolve_scope(root)
            }
        };

        self.host.stop(&handles)?;
        self.host.unregister_modules(&handles)?;
        Ok(self)
    }

    /// Handles of all registered modules whose root element lies under
    /// `root`, in document order. Elements without an id marker, and
    /// markers that no longer resolve, are skipped so stale subtrees can be
    /// passed safely.
    fn resolve_scope(&self, root: &ElementRef) -> Vec<ModuleHandle> {
        let mut handles = Vec::new();
        for element in root.module_roots() {
            let Some(id) = element.module_id() else {
                continue;
            };
            match self.host.get_module_by_id(&id) {
                Some(handle) => handles.push(handle),
                None => debug!("Id marker {} no longer resolves, skipping", id),
            }
        }
        handles
    }

    /// The full configuration object. Read-only by convention; the mediator
    /// never copies it.
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// A single configuration value. Absent keys fail fast with an error
    /// naming the key; defined-but-falsy values are returned normally.
    pub fn get_config_param(&self, name: &str) -> Result<&Value, MediatorError> {
        self.config.param(name)
    }

    /// Append an endpoint to the relay. No de-duplication: an endpoint
    /// added twice receives every dispatched event twice.
    pub fn add_connector(&self, connector: ConnectorRef) -> &Self {
        let mut connectors = self.connectors.write();
        connectors.push(connector);
        debug!("Connector added, {} registered", connectors.len());
        self
    }

    /// Remove every entry that is the same endpoint instance as
    /// `connector`.
    pub fn remove_connector(&self, connector: &ConnectorRef) -> &Self {
        let mut connectors = self.connectors.write();
        connectors.retain(|candidate| !Arc::ptr_eq(candidate, connector));
        debug!("Connector removed, {} remaining", connectors.len());
        self
    }

    /// Relay an event to every endpoint except the originating one, in
    /// insertion order.
    ///
    /// Exclusion is by instance identity, so duplicate registrations of the
    /// origin are all skipped while content-equal but distinct endpoints
    /// are not. Each remaining endpoint receives the same event name and
    /// argument slice; a failing endpoint is logged and the fan-out
    /// continues. The endpoint sequence is snapshotted first, so an emit
    /// that re-enters `add_connector` or `dispatch` cannot invalidate the
    /// iteration.
    pub fn dispatch(&self, origin: &ConnectorRef, event: &str, args: &[Value]) -> &Self {
        let targets: Vec<ConnectorRef> = self.connectors.read().clone();
        trace!("Dispatching '{}' to {} connectors", event, targets.len());

        for connector in &targets {
            if Arc::ptr_eq(connector, origin) {
                continue;
            }
            if let Err(err) = connector.emit(event, args) {
                warn!("Connector failed to handle '{}': {:#}", event, err);
            }
        }
        self
    }

    /// Resolve a module by identifier. Pure delegation to the host, no
    /// caching.
    pub fn get_module_by_id(&self, id: &ModuleId) -> Option<ModuleHandle> {
        self.host.get_module_by_id(id)
    }

    /// Number of currently attached endpoints.
    pub fn connector_count(&self) -> usize {
        self.connectors.read().len()
    }
}
