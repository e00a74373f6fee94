/**
 * config module
 * Registry settings and unregistered-namespace policy
 */

pub mod settings;

pub use settings::{
    RegistryConfig, UnregisteredAction, DEFAULT_CACHE_TIME_DAYS, DEFAULT_LOCAL_FILE,
    DEFAULT_REMOTE_URL, DEFAULT_URI_SCHEME_NAMESPACES,
};
