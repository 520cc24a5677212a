//! Host-service bundle handed to the link-opener store at construction.

use std::rc::Rc;

use futures::task::LocalSpawn;

use crate::{
    DeviceDirectory, DeviceTransport, NoopDeviceDirectory, NoopDeviceTransport, NoopPrefsStore,
    PrefsStore,
};

/// Collaborators the console composition root selects before building a store.
///
/// Every service is supplied explicitly; nothing is looked up from a process-wide registry.
#[derive(Clone)]
pub struct DeviceHostServices {
    /// Read-only device lookup.
    pub directory: Rc<dyn DeviceDirectory>,
    /// Command channel to managed devices.
    pub transport: Rc<dyn DeviceTransport>,
    /// Console preference storage.
    pub prefs: Rc<dyn PrefsStore>,
    /// Local executor that runs device commands to completion, whether or not anyone awaits them.
    pub spawner: Rc<dyn LocalSpawn>,
}

impl DeviceHostServices {
    /// Bundles the given services.
    pub fn new(
        directory: Rc<dyn DeviceDirectory>,
        transport: Rc<dyn DeviceTransport>,
        prefs: Rc<dyn PrefsStore>,
        spawner: Rc<dyn LocalSpawn>,
    ) -> Self {
        Self {
            directory,
            transport,
            prefs,
            spawner,
        }
    }

    /// Bundle of no-op adapters for targets without device connectivity.
    pub fn noop(spawner: Rc<dyn LocalSpawn>) -> Self {
        Self::new(
            Rc::new(NoopDeviceDirectory),
            Rc::new(NoopDeviceTransport),
            Rc::new(NoopPrefsStore),
            spawner,
        )
    }
}

impl std::fmt::Debug for DeviceHostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceHostServices").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::LocalPool;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{DeviceQuery, DeviceSerial};

    #[test]
    fn noop_bundle_finds_nothing_and_accepts_commands() {
        let mut pool = LocalPool::new();
        let services = DeviceHostServices::noop(Rc::new(pool.spawner()));
        let serial = DeviceSerial::new("SN123");

        assert_eq!(
            services.directory.device_by_serial(&serial),
            DeviceQuery::NotFound
        );
        pool.run_until(services.transport.request_open_url(&serial, "https://vk.com", None))
            .expect("open");
        pool.run_until(services.transport.request_clear_browser_preference(&serial))
            .expect("clear");
        assert_eq!(pool.run_until(services.prefs.load_value("k")), Ok(None));
    }
}
