use anyhow::Result;

use crate::dom::ElementRef;
use crate::models::ModuleId;

use super::module::ModuleHandle;

/// Contract the mediator requires from the module-owning application.
///
/// The mediator forwards lifecycle requests here and never instantiates,
/// starts, or stops modules itself. Failures signalled by an implementation
/// propagate through the mediator unchanged.
pub trait ModuleHost: Send + Sync {
    /// Scan a subtree, instantiate the modules found within it, and return
    /// their handles in document order. Must be safe to call repeatedly for
    /// disjoint subtrees.
    fn register_modules(&self, scope: &ElementRef) -> Result<Vec<ModuleHandle>>;

    /// Run the startup hook of every handle.
    fn start(&self, handles: &[ModuleHandle]) -> Result<()>;

    /// Run the teardown hook of every handle.
    fn stop(&self, handles: &[ModuleHandle]) -> Result<()>;

    /// Drop bookkeeping for the handles so their identifiers no longer
    /// resolve.
    fn unregister_modules(&self, handles: &[ModuleHandle]) -> Result<()>;

    /// Resolve a registered module by identifier.
    fn get_module_by_id(&self, id: &ModuleId) -> Option<ModuleHandle>;
}
