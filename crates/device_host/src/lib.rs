//! Typed host contracts and shared models for the device console.
//!
//! This crate is the boundary between the link-opener core and the systems it does not own: the
//! device directory that reports installed browser apps, the transport that delivers commands to a
//! managed device, and console preference storage. Each contract ships a no-op adapter for
//! unsupported targets and an in-memory adapter for tests and offline embedding. The local
//! executor that runs device commands is supplied by the embedder through [`DeviceHostServices`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod directory;
pub mod host;
pub mod model;
pub mod prefs;
pub mod transport;

pub use directory::{
    browser_apps, DeviceDirectory, DeviceQuery, MemoryDeviceDirectory, NoopDeviceDirectory,
};
pub use host::DeviceHostServices;
pub use model::{BrowserApp, BrowserAppId, BrowserType, Device, DeviceBrowser, DeviceSerial};
pub use prefs::{MemoryPrefsStore, NoopPrefsStore, PrefsError, PrefsFuture, PrefsStore};
pub use transport::{
    DeviceRequest, DeviceTransport, DeviceTransportFuture, MemoryDeviceTransport,
    NoopDeviceTransport, TransportError,
};
