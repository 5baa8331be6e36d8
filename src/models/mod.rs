mod identifiers;

pub use identifiers::{ModuleId, ModuleName};
