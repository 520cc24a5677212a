//! Managed-device and installed-browser models shared across host contracts and adapters.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier used to address one managed device.
pub struct DeviceSerial(String);

impl DeviceSerial {
    /// Wraps a raw device serial.
    pub fn new(serial: impl Into<String>) -> Self {
        Self(serial.into())
    }

    /// Returns the raw serial string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceSerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceSerial {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque identifier of a browser app, unique within one device's app list.
///
/// The id is not validated against any device; a stale id is a legal value.
pub struct BrowserAppId(String);

impl BrowserAppId {
    /// Wraps a raw browser app id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrowserAppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BrowserAppId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Known browser families reported by managed devices.
pub enum BrowserType {
    /// Google Chrome.
    Chrome,
    /// Mozilla Firefox.
    Firefox,
    /// Opera.
    Opera,
    /// Yandex Browser.
    Yandex,
    /// Samsung Internet.
    Samsung,
    /// Microsoft Edge.
    Edge,
    /// VK Browser.
    Vk,
    /// Any tag the console does not recognize.
    #[serde(other)]
    Unknown,
}

impl BrowserType {
    /// Returns the stable wire token for this browser type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Opera => "opera",
            Self::Yandex => "yandex",
            Self::Samsung => "samsung",
            Self::Edge => "edge",
            Self::Vk => "vk",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the icon token presentation layers map to an image resource.
    pub const fn icon_id(self) -> &'static str {
        match self {
            Self::Chrome => "browser-chrome",
            Self::Firefox => "browser-firefox",
            Self::Opera => "browser-opera",
            Self::Yandex => "browser-yandex",
            Self::Samsung => "browser-samsung",
            Self::Edge => "browser-edge",
            Self::Vk => "browser-vk",
            Self::Unknown => "browser-generic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Browser application installed on a managed device.
pub struct BrowserApp {
    /// Stable id, unique within the owning device's list.
    pub id: BrowserAppId,
    /// Browser family, absent when the device does not report one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub browser_type: Option<BrowserType>,
    /// Human-readable label.
    pub name: String,
}

impl BrowserApp {
    /// Builds a browser app record.
    pub fn new(
        id: impl Into<BrowserAppId>,
        browser_type: Option<BrowserType>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            browser_type,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Browser section of a device record.
pub struct DeviceBrowser {
    /// Installed browser apps in device-reported order.
    #[serde(default)]
    pub apps: Option<Vec<BrowserApp>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Read-only managed-device record supplied by the device directory.
pub struct Device {
    /// Device serial.
    pub serial: DeviceSerial,
    /// Browser section, absent when the device has not reported one.
    #[serde(default)]
    pub browser: Option<DeviceBrowser>,
}

impl Device {
    /// Builds a device record with the given browser apps.
    pub fn with_browser_apps(serial: impl Into<DeviceSerial>, apps: Vec<BrowserApp>) -> Self {
        Self {
            serial: serial.into(),
            browser: Some(DeviceBrowser { apps: Some(apps) }),
        }
    }

    /// Returns the installed browser apps, or an empty slice when none are reported.
    pub fn browser_apps(&self) -> &[BrowserApp] {
        self.browser
            .as_ref()
            .and_then(|browser| browser.apps.as_deref())
            .unwrap_or_default()
    }
}
