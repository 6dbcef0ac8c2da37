use std::collections::HashMap;
use std::path::PathBuf;

/// Property naming the vendor implementation library.
pub const IMPL_LIB_PROPERTY_NAME: &str = "imscamera.impl.lib";

/// Library used when [`IMPL_LIB_PROPERTY_NAME`] is unset.
pub const DEFAULT_IMPL_LIB_PATH: &str = "/vendor/lib/lib-imscamera.so";

/// A string-valued configuration lookup.
pub trait PropertySource {
    /// Returns the value of `name`, or `default` when it is unset or empty.
    fn get(&self, name: &str, default: &str) -> String;
}

/// Resolves the vendor library path, falling back to [`DEFAULT_IMPL_LIB_PATH`].
pub fn impl_library_path(props: &dyn PropertySource) -> PathBuf {
    PathBuf::from(props.get(IMPL_LIB_PROPERTY_NAME, DEFAULT_IMPL_LIB_PATH))
}

/// Platform property store.
///
/// On Android this reads system properties. Elsewhere a property is read from
/// the environment, upper-cased with dots turned into underscores, so
/// `imscamera.impl.lib` becomes `IMSCAMERA_IMPL_LIB`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProperties;

impl PropertySource for SystemProperties {
    #[cfg(target_os = "android")]
    fn get(&self, name: &str, default: &str) -> String {
        use std::ffi::{CStr, CString};
        use std::os::raw::c_char;

        // bionic's PROP_VALUE_MAX
        const PROP_VALUE_MAX: usize = 92;

        let Ok(name) = CString::new(name) else {
            return default.to_owned();
        };
        let mut value = [0 as c_char; PROP_VALUE_MAX];

        // SAFETY:
        // - `name` is a valid NUL-terminated C string for the duration of the call.
        // - `value` is PROP_VALUE_MAX bytes, the most bionic ever writes,
        //   including the terminating NUL.
        let len = unsafe { libc::__system_property_get(name.as_ptr(), value.as_mut_ptr()) };
        if len <= 0 {
            return default.to_owned();
        }

        // SAFETY: bionic NUL-terminates `value` whenever it returns a positive length.
        unsafe { CStr::from_ptr(value.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }

    #[cfg(not(target_os = "android"))]
    fn get(&self, name: &str, default: &str) -> String {
        std::env::var(env_key(name))
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_owned())
    }
}

#[cfg(not(target_os = "android"))]
fn env_key(name: &str) -> String {
    name.to_ascii_uppercase().replace('.', "_")
}

/// In-memory property store.
#[derive(Debug, Default, Clone)]
pub struct StaticProperties {
    values: HashMap<String, String>,
}

impl StaticProperties {
    /// Empty store; every lookup yields its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a property.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl PropertySource for StaticProperties {
    fn get(&self, name: &str, default: &str) -> String {
        self.values
            .get(name)
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| default.to_owned())
    }
}
