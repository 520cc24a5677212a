use device_host::{browser_apps, BrowserAppId, BrowserType, DeviceQuery, DeviceSerial};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkOpenerState {
    pub current_browser_id: Option<BrowserAppId>,
    pub active_device: Option<DeviceSerial>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOption {
    pub id: BrowserAppId,
    pub browser_type: Option<BrowserType>,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOpenerChange {
    BrowserSelected(BrowserAppId),
    BrowserCleared,
    ActiveDeviceChanged(Option<DeviceSerial>),
}

/// Builds the selectable browser options for one directory result, in device order.
///
/// A `current` id that matches no app marks nothing as selected.
pub fn browser_options(query: &DeviceQuery, current: Option<&BrowserAppId>) -> Vec<BrowserOption> {
    browser_apps(query)
        .iter()
        .map(|app| BrowserOption {
            id: app.id.clone(),
            browser_type: app.browser_type,
            name: app.name.clone(),
            selected: current == Some(&app.id),
        })
        .collect()
}
