// Structural marker convention shared by the registry and the mediator's
// subtree-derived removal path. The id marker is written at registration
// time and removed again at unregistration.

// === Element markers ===

/// Attribute naming the module kind bound to an element.
pub const MODULE_NAME_ATTR: &str = "data-module";

/// Attribute carrying the registry-assigned module identifier.
pub const MODULE_ID_ATTR: &str = "data-module-id";

// === Configuration ===

/// Directory under the platform config dir that holds the config file.
pub const CONFIG_DIR_NAME: &str = "atrium";

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
