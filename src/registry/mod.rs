pub mod module;
pub mod traits;

pub use module::{Module, ModuleContext, ModuleFactory, ModuleHandle};
pub use traits::ModuleHost;

use anyhow::Result;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

use crate::constants::MODULE_ID_ATTR;
use crate::dom::ElementRef;
use crate::mediator::Mediator;
use crate::models::{ModuleId, ModuleName};
use crate::utils::MediatorError;

/// Default module host: instantiates modules from registered factories and
/// keeps the identifier-to-handle bookkeeping.
///
/// The registry holds the mediator weakly and hands it to every factory, so
/// modules receive the mediator as an explicit constructor dependency while
/// mediator and host avoid owning each other.
pub struct ModuleRegistry {
    mediator: OnceCell<Weak<Mediator>>,
    factories: RwLock<HashMap<ModuleName, ModuleFactory>>,
    modules: RwLock<HashMap<ModuleId, ModuleHandle>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            mediator: OnceCell::new(),
            factories: RwLock::new(HashMap::new()),
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Bind the mediator that modules built by this registry will receive.
    /// The first binding wins; later calls are ignored.
    pub fn bind_mediator(&self, mediator: &Arc<Mediator>) {
        let _ = self.mediator.set(Arc::downgrade(mediator));
    }

    /// Register a factory for one module name.
    pub fn register_factory(
        &self,
        name: impl Into<ModuleName>,
        factory: impl Fn(ModuleContext) -> Box<dyn Module> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!("Registering module factory '{}'", name);
        self.factories.write().insert(name, Box::new(factory));
    }

    /// Number of currently registered modules.
    pub fn module_count(&self) -> usize {
        self.modules.read().len()
    }

    fn mediator(&self) -> Result<Arc<Mediator>, MediatorError> {
        self.mediator
            .get()
            .and_then(Weak::upgrade)
            .ok_or(MediatorError::UnboundRegistry)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleHost for ModuleRegistry {
    fn register_modules(&self, scope: &ElementRef) -> Result<Vec<ModuleHandle>> {
        let mediator = self.mediator()?;
        let mut handles = Vec::new();

        for element in scope.module_roots() {
            let Some(name) = element.module_name() else {
                continue;
            };

            // An id marker that still resolves means the element is already
            // under management; overlapping scopes must not re-register it.
            if let Some(id) = element.module_id()
                && self.modules.read().contains_key(&id)
            {
                continue;
            }

            let factories = self.factories.read();
            let Some(factory) = factories.get(&name) else {
                warn!(
                    "No module factory registered for '{}', skipping <{}>",
                    name,
                    element.tag()
                );
                continue;
            };

            let id = ModuleId::generate();
            element.set_attr(MODULE_ID_ATTR, id.as_str());

            let module = factory(ModuleContext {
                mediator: mediator.clone(),
                element: element.clone(),
                id: id.clone(),
            });
            let handle = ModuleHandle::new(id.clone(), name.clone(), element.clone(), module);

            self.modules.write().insert(id.clone(), handle.clone());
            info!("Registered module '{}' as {}", name, id);
            handles.push(handle);
        }

        Ok(handles)
    }

    fn start(&self, handles: &[ModuleHandle]) -> Result<()> {
        for handle in handles {
            debug!("Starting module {}", handle.id());
            handle.start()?;
        }
        Ok(())
    }

    fn stop(&self, handles: &[ModuleHandle]) -> Result<()> {
        for handle in handles {
            debug!("Stopping module {}", handle.id());
            handle.stop()?;
        }
        Ok(())
    }

    fn unregister_modules(&self, handles: &[ModuleHandle]) -> Result<()> {
        let mut modules = self.modules.write();
        for handle in handles {
            modules.remove(handle.id());
            handle.element().remove_attr(MODULE_ID_ATTR);
            info!("Unregistered module {}", handle.id());
        }
        Ok(())
    }

    fn get_module_by_id(&self, id: &ModuleId) -> Option<ModuleHandle> {
        self.modules.read().get(id).cloned()
    }
}
