//! Link-opener actions, side-effect intents, and transition logic.

use device_host::{BrowserAppId, DeviceSerial};
use tracing::debug;

use crate::{
    error::OpenError,
    model::{LinkOpenerChange, LinkOpenerState},
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_link_opener`] to mutate [`LinkOpenerState`].
pub enum LinkOpenerAction {
    /// Overwrite the current browser selection. The id is not validated.
    SetCurrentBrowser(BrowserAppId),
    /// Reset the browser selection locally and on the active device.
    ClearBrowser,
    /// Point subsequent device commands at another device (or none).
    SetActiveDevice(Option<DeviceSerial>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_link_opener`] for the store to execute.
pub enum LinkOpenerEffect {
    /// Ask a device to forget its default-browser association.
    ClearBrowserPreference {
        /// Target device.
        serial: DeviceSerial,
    },
    /// Tell subscribers about a local state change.
    Notify(LinkOpenerChange),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Open-URL command with its target captured from the state at call time.
pub struct OpenRequest {
    pub serial: DeviceSerial,
    pub url: String,
    pub browser_app_id: Option<BrowserAppId>,
}

/// Returns `true` when `url` is empty or whitespace-only.
pub fn is_blank_url(url: &str) -> bool {
    url.trim().is_empty()
}

/// Builds the open command for `url` against the current state without changing it.
///
/// Blank URLs produce `Ok(None)` whether or not a device is active.
///
/// # Errors
///
/// Returns [`OpenError::NoActiveDevice`] for a non-blank URL when no device is active.
pub fn open_request(
    state: &LinkOpenerState,
    url: &str,
) -> Result<Option<OpenRequest>, OpenError> {
    if is_blank_url(url) {
        debug!("blank url ignored");
        return Ok(None);
    }
    let serial = state
        .active_device
        .clone()
        .ok_or(OpenError::NoActiveDevice)?;
    Ok(Some(OpenRequest {
        serial,
        url: url.to_string(),
        browser_app_id: state.current_browser_id.clone(),
    }))
}

/// Applies a [`LinkOpenerAction`] to the link-opener state and collects resulting side effects.
///
/// State changes are complete when this returns; device commands are only described by the
/// returned effects, after the notifications for the same action.
pub fn reduce_link_opener(
    state: &mut LinkOpenerState,
    action: LinkOpenerAction,
) -> Vec<LinkOpenerEffect> {
    let mut effects = Vec::new();
    match action {
        LinkOpenerAction::SetCurrentBrowser(id) => {
            debug!(browser_app_id = %id, "browser selected");
            state.current_browser_id = Some(id.clone());
            effects.push(LinkOpenerEffect::Notify(LinkOpenerChange::BrowserSelected(
                id,
            )));
        }
        LinkOpenerAction::ClearBrowser => {
            debug!(previous = ?state.current_browser_id, "browser selection cleared");
            state.current_browser_id = None;
            effects.push(LinkOpenerEffect::Notify(LinkOpenerChange::BrowserCleared));
            if let Some(serial) = state.active_device.clone() {
                effects.push(LinkOpenerEffect::ClearBrowserPreference { serial });
            }
        }
        LinkOpenerAction::SetActiveDevice(serial) => {
            if state.active_device != serial {
                debug!(serial = ?serial, "active device changed");
                state.active_device = serial.clone();
                effects.push(LinkOpenerEffect::Notify(
                    LinkOpenerChange::ActiveDeviceChanged(serial),
                ));
            }
        }
    }
    effects
}
