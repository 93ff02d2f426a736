//! Settings store boundary: hierarchical key/value nodes with DWORD fields

use crate::error::StoreError;

/// Hierarchical store addressed by path (e.g. the per-user registry hive)
pub trait SettingsStore {
    type Node: SettingsNode;

    /// Open node at `path` with write intent; `Ok(None)` if absent
    fn open(&self, path: &str) -> Result<Option<Self::Node>, StoreError>;
}

/// One node: child nodes plus typed scalar fields
///
/// Dropping a node releases it.
pub trait SettingsNode: Sized {
    /// Child identifiers, in store order
    fn children(&self) -> Result<Vec<String>, StoreError>;

    /// Open child with write intent; `Ok(None)` if it cannot be opened
    fn open_child(&self, name: &str) -> Result<Option<Self>, StoreError>;

    /// 32-bit integer field; `None` if absent or stored with another type
    fn get_dword(&self, field: &str) -> Result<Option<u32>, StoreError>;

    fn set_dword(&self, field: &str, value: u32) -> Result<(), StoreError>;
}

/// Stand-in where no settings store exists: every open fails
#[cfg(not(windows))]
pub struct UnavailableStore;

#[cfg(not(windows))]
impl SettingsStore for UnavailableStore {
    type Node = std::convert::Infallible;

    fn open(&self, _path: &str) -> Result<Option<Self::Node>, StoreError> {
        Err(StoreError::Unavailable)
    }
}

#[cfg(not(windows))]
impl SettingsNode for std::convert::Infallible {
    fn children(&self) -> Result<Vec<String>, StoreError> {
        match *self {}
    }

    fn open_child(&self, _name: &str) -> Result<Option<Self>, StoreError> {
        match *self {}
    }

    fn get_dword(&self, _field: &str) -> Result<Option<u32>, StoreError> {
        match *self {}
    }

    fn set_dword(&self, _field: &str, _value: u32) -> Result<(), StoreError> {
        match *self {}
    }
}
