//! Windows Registry backend (HKCU)

use std::io;
use winreg::RegKey;
use winreg::enums::{HKEY_CURRENT_USER, KEY_READ, KEY_WRITE, RegType};

use crate::error::StoreError;
use crate::store::{SettingsNode, SettingsStore};

/// Per-user registry hive
pub struct Registry {
    hive: RegKey,
}

impl Registry {
    pub fn current_user() -> Self {
        Self {
            hive: RegKey::predef(HKEY_CURRENT_USER),
        }
    }
}

impl SettingsStore for Registry {
    type Node = RegKey;

    fn open(&self, path: &str) -> Result<Option<RegKey>, StoreError> {
        match self.hive.open_subkey_with_flags(path, KEY_READ | KEY_WRITE) {
            Ok(key) => Ok(Some(key)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl SettingsNode for RegKey {
    fn children(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.enum_keys().collect::<io::Result<Vec<_>>>()?)
    }

    fn open_child(&self, name: &str) -> Result<Option<RegKey>, StoreError> {
        match self.open_subkey_with_flags(name, KEY_READ | KEY_WRITE) {
            Ok(key) => Ok(Some(key)),
            // Vanished or locked since enumeration → benign skip
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_dword(&self, field: &str) -> Result<Option<u32>, StoreError> {
        let value = match self.get_raw_value(field) {
            Ok(value) => value,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if !matches!(value.vtype, RegType::REG_DWORD) {
            return Ok(None);
        }
        Ok(<[u8; 4]>::try_from(&value.bytes[..])
            .ok()
            .map(u32::from_le_bytes))
    }

    fn set_dword(&self, field: &str, value: u32) -> Result<(), StoreError> {
        self.set_value(field, &value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::runner::PromotionRunner;
    use crate::sink::capture::CaptureSink;
    use crate::status::ExitStatus;
    use serial_test::serial;

    const SCRATCH_KEY: &str = r"Software\TrayPromoteTest";

    fn scratch_root() -> String {
        format!(r"{SCRATCH_KEY}\NotifyIconSettings")
    }

    /// Fresh scratch tree: one subkey per (name, optional IsPromoted)
    fn setup(entries: &[(&str, Option<u32>)]) -> RegKey {
        cleanup();
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let (root, _) = hkcu.create_subkey(scratch_root()).expect("create root");
        for (name, value) in entries {
            let (key, _) = root.create_subkey(name).expect("create entry");
            if let Some(v) = value {
                key.set_value("IsPromoted", v).expect("set value");
            }
        }
        root
    }

    fn cleanup() {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let _ = hkcu.delete_subkey_all(SCRATCH_KEY);
    }

    fn scratch_config() -> RunConfig {
        RunConfig {
            root_path: scratch_root(),
            ..RunConfig::default()
        }
    }

    #[test]
    #[serial]
    fn test_open_missing_root_is_none() {
        cleanup();
        let registry = Registry::current_user();
        assert!(registry.open(&scratch_root()).unwrap().is_none());
    }

    #[test]
    #[serial]
    fn test_get_dword_absent_and_wrong_type() {
        let root = setup(&[("{A}", None)]);
        let entry = root.open_child("{A}").unwrap().unwrap();
        assert_eq!(entry.get_dword("IsPromoted").unwrap(), None);

        entry.set_value("IsPromoted", &"1".to_string()).unwrap();
        assert_eq!(entry.get_dword("IsPromoted").unwrap(), None);

        entry.set_value("IsPromoted", &1u64).unwrap();
        assert_eq!(entry.get_dword("IsPromoted").unwrap(), None);

        entry.set_dword("IsPromoted", 1).unwrap();
        assert_eq!(entry.get_dword("IsPromoted").unwrap(), Some(1));
        cleanup();
    }

    #[test]
    #[serial]
    fn test_open_child_missing_is_none() {
        let root = setup(&[]);
        assert!(root.open_child("{MISSING}").unwrap().is_none());
        cleanup();
    }

    #[test]
    #[serial]
    fn test_run_against_scratch_key() {
        let root = setup(&[("{A}", Some(0)), ("{B}", Some(1)), ("{C}", None)]);
        let runner = PromotionRunner::new(Registry::current_user(), scratch_config());

        let first = runner.run(&mut CaptureSink::default());
        assert_eq!(first.changed, 2);
        assert_eq!(first.errors, 0);
        assert_eq!(first.status, ExitStatus::Success);
        for name in ["{A}", "{B}", "{C}"] {
            let key = root.open_subkey(name).unwrap();
            assert_eq!(key.get_value::<u32, _>("IsPromoted").unwrap(), 1);
        }

        let second = runner.run(&mut CaptureSink::default());
        assert_eq!(second.changed, 0);
        assert_eq!(second.errors, 0);
        cleanup();
    }

    #[test]
    #[serial]
    fn test_run_missing_root_not_found() {
        cleanup();
        let runner = PromotionRunner::new(Registry::current_user(), scratch_config());
        let result = runner.run(&mut CaptureSink::default());
        assert_eq!(result.status, ExitStatus::NotFound);
    }
}
