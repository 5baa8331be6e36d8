use anyhow::Result;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

use crate::dom::ElementRef;
use crate::mediator::Mediator;
use crate::models::{ModuleId, ModuleName};

/// A self-contained behavior unit bound to an element subtree.
///
/// Modules reach configuration, other modules, and the broadcast relay
/// exclusively through the mediator handed to their factory; they never
/// hold the registry or each other directly.
pub trait Module: Send + Sync {
    /// Startup hook, invoked once right after registration.
    fn start(&mut self) -> Result<()>;

    /// Teardown hook, invoked while the module is still resolvable by
    /// identifier.
    fn stop(&mut self) -> Result<()>;
}

/// Everything a factory receives to build one module instance.
///
/// The mediator arrives here as an explicit dependency; modules must not
/// reach it through any ambient lookup.
pub struct ModuleContext {
    pub mediator: Arc<Mediator>,
    pub element: ElementRef,
    pub id: ModuleId,
}

/// Factory producing module instances for one declared module name.
pub type ModuleFactory = Box<dyn Fn(ModuleContext) -> Box<dyn Module> + Send + Sync>;

/// Opaque, cloneable handle to a registered module.
///
/// Clones share the underlying module instance, so a handle resolved by
/// identifier is the same instance the registration produced.
#[derive(Clone)]
pub struct ModuleHandle {
    id: ModuleId,
    name: ModuleName,
    element: ElementRef,
    module: Arc<Mutex<Box<dyn Module>>>,
}

impl ModuleHandle {
    pub fn new(id: ModuleId, name: ModuleName, element: ElementRef, module: Box<dyn Module>) -> Self {
        Self {
            id,
            name,
            element,
            module: Arc::new(Mutex::new(module)),
        }
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn name(&self) -> &ModuleName {
        &self.name
    }

    /// The element this module is bound to.
    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    /// Run the module's startup hook.
    pub fn start(&self) -> Result<()> {
        self.module.lock().start()
    }

    /// Run the module's teardown hook.
    pub fn stop(&self) -> Result<()> {
        self.module.lock().stop()
    }

    /// Whether two handles refer to the same module instance.
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.module, &other.module)
    }
}

impl fmt::Debug for ModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("element", &self.element.tag())
            .finish()
    }
}
