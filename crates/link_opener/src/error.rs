//! Failures surfaced by the asynchronous link-opener operations.

use device_host::{BrowserAppId, TransportError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reason an open-URL request did not complete.
pub enum OpenError {
    /// No device is active, so there is nowhere to send the request.
    #[error("no active device to open the link on")]
    NoActiveDevice,
    /// The device could not be reached.
    #[error("device unreachable: {0}")]
    Unreachable(String),
    /// The device refused the request, for example because the URL is invalid.
    #[error("device rejected the link: {0}")]
    Rejected(String),
    /// The selected browser app is no longer installed.
    #[error("browser app `{0}` is not installed on the device")]
    BrowserNotInstalled(BrowserAppId),
    /// The command was dropped before the device answered.
    #[error("open request interrupted before the device answered")]
    Interrupted,
}

impl From<TransportError> for OpenError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unreachable(reason) => Self::Unreachable(reason),
            TransportError::Rejected(reason) => Self::Rejected(reason),
            TransportError::BrowserAppNotInstalled(id) => Self::BrowserNotInstalled(id),
            TransportError::Interrupted => Self::Interrupted,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Device-side failure of a browser reset. The local reset has already been applied.
pub enum ClearError {
    /// The transport reported a failure.
    #[error("device-side browser reset failed: {0}")]
    Device(#[from] TransportError),
}
