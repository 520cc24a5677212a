//! Device directory contract: read-only device lookup by serial.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::model::{BrowserApp, Device, DeviceSerial};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of one directory lookup.
pub enum DeviceQuery {
    /// The device record has not been loaded yet.
    Pending,
    /// The directory has no record for the serial.
    NotFound,
    /// The current device record.
    Loaded(Device),
}

impl DeviceQuery {
    /// Returns the loaded device, if any.
    pub fn device(&self) -> Option<&Device> {
        match self {
            Self::Loaded(device) => Some(device),
            Self::Pending | Self::NotFound => None,
        }
    }
}

/// Returns the browser apps carried by a query result.
///
/// Pending and missing records, an absent `browser` section and an absent `apps` list all yield an
/// empty slice.
pub fn browser_apps(query: &DeviceQuery) -> &[BrowserApp] {
    query.device().map(Device::browser_apps).unwrap_or_default()
}

/// Source of device records owned outside the link-opener core.
///
/// Implementations own caching and invalidation; callers only read the returned snapshot.
pub trait DeviceDirectory {
    /// Looks up the current record for `serial`.
    fn device_by_serial(&self, serial: &DeviceSerial) -> DeviceQuery;
}

#[derive(Debug, Clone, Copy, Default)]
/// Directory with no records, for unsupported targets.
pub struct NoopDeviceDirectory;

impl DeviceDirectory for NoopDeviceDirectory {
    fn device_by_serial(&self, _serial: &DeviceSerial) -> DeviceQuery {
        DeviceQuery::NotFound
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory directory keyed by serial.
///
/// Clones share the same records, so a test can keep a handle while the store reads through
/// another.
pub struct MemoryDeviceDirectory {
    inner: Rc<RefCell<HashMap<DeviceSerial, DeviceQuery>>>,
}

impl MemoryDeviceDirectory {
    /// Inserts or replaces a loaded device record.
    pub fn insert(&self, device: Device) {
        self.inner
            .borrow_mut()
            .insert(device.serial.clone(), DeviceQuery::Loaded(device));
    }

    /// Marks a serial as still loading.
    pub fn mark_pending(&self, serial: impl Into<DeviceSerial>) {
        self.inner
            .borrow_mut()
            .insert(serial.into(), DeviceQuery::Pending);
    }

    /// Forgets a serial entirely.
    pub fn remove(&self, serial: &DeviceSerial) {
        self.inner.borrow_mut().remove(serial);
    }
}

impl DeviceDirectory for MemoryDeviceDirectory {
    fn device_by_serial(&self, serial: &DeviceSerial) -> DeviceQuery {
        self.inner
            .borrow()
            .get(serial)
            .cloned()
            .unwrap_or(DeviceQuery::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{BrowserType, DeviceBrowser};

    fn serial() -> DeviceSerial {
        DeviceSerial::new("SN123")
    }

    #[test]
    fn memory_directory_reports_pending_loaded_and_missing() {
        let directory = MemoryDeviceDirectory::default();
        let directory_obj: &dyn DeviceDirectory = &directory;
        assert_eq!(directory_obj.device_by_serial(&serial()), DeviceQuery::NotFound);

        directory.mark_pending("SN123");
        assert_eq!(directory_obj.device_by_serial(&serial()), DeviceQuery::Pending);

        directory.insert(Device::with_browser_apps(
            "SN123",
            vec![BrowserApp::new("a1", Some(BrowserType::Chrome), "Chrome")],
        ));
        let query = directory_obj.device_by_serial(&serial());
        assert_eq!(browser_apps(&query).len(), 1);

        directory.remove(&serial());
        assert_eq!(directory_obj.device_by_serial(&serial()), DeviceQuery::NotFound);
    }

    #[test]
    fn browser_apps_is_empty_for_every_missing_shape() {
        let absent_browser = DeviceQuery::Loaded(Device {
            serial: serial(),
            browser: None,
        });
        let absent_apps = DeviceQuery::Loaded(Device {
            serial: serial(),
            browser: Some(DeviceBrowser { apps: None }),
        });
        let empty_apps = DeviceQuery::Loaded(Device::with_browser_apps("SN123", Vec::new()));

        for query in [
            DeviceQuery::Pending,
            DeviceQuery::NotFound,
            absent_browser,
            absent_apps,
            empty_apps,
        ] {
            assert!(browser_apps(&query).is_empty(), "{query:?}");
        }
    }

    #[test]
    fn noop_directory_never_finds_devices() {
        assert_eq!(
            NoopDeviceDirectory.device_by_serial(&serial()),
            DeviceQuery::NotFound
        );
    }
}
