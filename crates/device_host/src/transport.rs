//! Device transport contracts for commands sent to a managed device.

use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc};

use thiserror::Error;

use crate::model::{BrowserAppId, DeviceSerial};

/// Object-safe boxed future used by [`DeviceTransport`].
pub type DeviceTransportFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure reported by the device transport.
pub enum TransportError {
    /// The device could not be reached.
    #[error("device unreachable: {0}")]
    Unreachable(String),
    /// The device refused the command (for example an invalid URL).
    #[error("device rejected request: {0}")]
    Rejected(String),
    /// The requested browser app is no longer installed on the device.
    #[error("browser app not installed: {0}")]
    BrowserAppNotInstalled(BrowserAppId),
    /// The command was dropped before the device answered.
    #[error("device command interrupted before completion")]
    Interrupted,
}

/// Host service that delivers link-opener commands to a managed device.
pub trait DeviceTransport {
    /// Asks the device to open `url`, through `browser_app_id` when one is given.
    fn request_open_url<'a>(
        &'a self,
        serial: &'a DeviceSerial,
        url: &'a str,
        browser_app_id: Option<&'a BrowserAppId>,
    ) -> DeviceTransportFuture<'a, Result<(), TransportError>>;

    /// Asks the device to forget its persisted default-browser association.
    fn request_clear_browser_preference<'a>(
        &'a self,
        serial: &'a DeviceSerial,
    ) -> DeviceTransportFuture<'a, Result<(), TransportError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Transport that accepts every command without contacting a device.
pub struct NoopDeviceTransport;

impl DeviceTransport for NoopDeviceTransport {
    fn request_open_url<'a>(
        &'a self,
        _serial: &'a DeviceSerial,
        _url: &'a str,
        _browser_app_id: Option<&'a BrowserAppId>,
    ) -> DeviceTransportFuture<'a, Result<(), TransportError>> {
        Box::pin(async { Ok(()) })
    }

    fn request_clear_browser_preference<'a>(
        &'a self,
        _serial: &'a DeviceSerial,
    ) -> DeviceTransportFuture<'a, Result<(), TransportError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One command observed by [`MemoryDeviceTransport`].
pub enum DeviceRequest {
    /// Open-URL command.
    OpenUrl {
        /// Target device.
        serial: DeviceSerial,
        /// URL or deeplink.
        url: String,
        /// Browser app chosen by the operator.
        browser_app_id: Option<BrowserAppId>,
    },
    /// Clear-browser-preference command.
    ClearBrowserPreference {
        /// Target device.
        serial: DeviceSerial,
    },
}

#[derive(Debug, Default)]
struct MemoryTransportState {
    requests: Vec<DeviceRequest>,
    scripted_failures: VecDeque<TransportError>,
}

#[derive(Debug, Clone, Default)]
/// Recording transport for tests and offline embedding.
///
/// Every command is recorded, including those answered with a scripted failure.
pub struct MemoryDeviceTransport {
    inner: Rc<RefCell<MemoryTransportState>>,
}

impl MemoryDeviceTransport {
    /// Queues a failure returned by the next command, in FIFO order.
    pub fn fail_next(&self, error: TransportError) {
        self.inner.borrow_mut().scripted_failures.push_back(error);
    }

    /// Returns every recorded command in arrival order.
    pub fn requests(&self) -> Vec<DeviceRequest> {
        self.inner.borrow().requests.clone()
    }

    fn record(&self, request: DeviceRequest) -> Result<(), TransportError> {
        let mut state = self.inner.borrow_mut();
        state.requests.push(request);
        match state.scripted_failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl DeviceTransport for MemoryDeviceTransport {
    fn request_open_url<'a>(
        &'a self,
        serial: &'a DeviceSerial,
        url: &'a str,
        browser_app_id: Option<&'a BrowserAppId>,
    ) -> DeviceTransportFuture<'a, Result<(), TransportError>> {
        Box::pin(async move {
            self.record(DeviceRequest::OpenUrl {
                serial: serial.clone(),
                url: url.to_string(),
                browser_app_id: browser_app_id.cloned(),
            })
        })
    }

    fn request_clear_browser_preference<'a>(
        &'a self,
        serial: &'a DeviceSerial,
    ) -> DeviceTransportFuture<'a, Result<(), TransportError>> {
        Box::pin(async move {
            self.record(DeviceRequest::ClearBrowserPreference {
                serial: serial.clone(),
            })
        })
    }
}
