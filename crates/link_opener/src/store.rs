//! Link-opener store: owns the browser selection and runs device commands.

use std::{
    cell::{Cell, RefCell},
    future::{self, Future},
    pin::Pin,
    rc::Rc,
};

use device_host::{BrowserAppId, DeviceHostServices, DeviceSerial, DeviceTransport, TransportError};
use futures::{channel::oneshot, future::try_join_all, task::LocalSpawnExt, TryFutureExt};
use tracing::{info, warn};

use crate::{
    error::{ClearError, OpenError},
    input::{plan_input, LinkOpenerInput},
    model::{browser_options, BrowserOption, LinkOpenerChange, LinkOpenerState},
    prefs::{load_link_opener_prefs, LinkOpenerPrefs},
    reducer::{open_request, reduce_link_opener, LinkOpenerAction, LinkOpenerEffect, OpenRequest},
};

/// Completion handle for a device command started by the store.
///
/// The command is already running on the host spawner; dropping the handle only discards the
/// outcome.
pub type LinkOpenerFuture<T> = Pin<Box<dyn Future<Output = T>>>;

type Listener = Rc<dyn Fn(&LinkOpenerChange)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Handle returned by [`LinkOpenerStore::subscribe`].
pub struct SubscriptionId(u64);

/// Device command started while handling one input event.
pub enum PendingCommand {
    /// Open-URL command.
    Open(LinkOpenerFuture<Result<(), OpenError>>),
    /// Device-side browser reset.
    Clear(LinkOpenerFuture<Result<(), ClearError>>),
}

impl std::fmt::Debug for PendingCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(_) => f.write_str("PendingCommand::Open"),
            Self::Clear(_) => f.write_str("PendingCommand::Clear"),
        }
    }
}

#[derive(Debug, Default)]
/// Result of [`LinkOpenerStore::handle_input`].
pub struct InputOutcome {
    /// Device commands started by the event, in the order they were issued.
    pub commands: Vec<PendingCommand>,
    /// Whether the surface should move focus back to the URL input.
    pub focus_url_input: bool,
}

struct StoreInner {
    services: DeviceHostServices,
    prefs: Cell<LinkOpenerPrefs>,
    state: RefCell<LinkOpenerState>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_subscription: Cell<u64>,
}

#[derive(Clone)]
/// Session-scoped store for the link-opener workflow.
///
/// Clones share state. Local mutations are applied synchronously before any method returns.
/// Device commands are started on the host spawner before the issuing method returns and are not
/// sequenced against each other.
pub struct LinkOpenerStore {
    inner: Rc<StoreInner>,
}

impl LinkOpenerStore {
    /// Creates a store with default prefs and nothing selected.
    pub fn new(services: DeviceHostServices) -> Self {
        Self::with_prefs(services, LinkOpenerPrefs::default())
    }

    /// Creates a store with explicit prefs.
    pub fn with_prefs(services: DeviceHostServices, prefs: LinkOpenerPrefs) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                services,
                prefs: Cell::new(prefs),
                state: RefCell::new(LinkOpenerState::default()),
                listeners: RefCell::new(Vec::new()),
                next_subscription: Cell::new(0),
            }),
        }
    }

    /// Creates a store using prefs loaded from the services' prefs store.
    pub async fn load(services: DeviceHostServices) -> Self {
        let prefs = load_link_opener_prefs(services.prefs.as_ref()).await;
        Self::with_prefs(services, prefs)
    }

    pub fn prefs(&self) -> LinkOpenerPrefs {
        self.inner.prefs.get()
    }

    pub fn set_prefs(&self, prefs: LinkOpenerPrefs) {
        self.inner.prefs.set(prefs);
    }

    pub fn snapshot(&self) -> LinkOpenerState {
        self.inner.state.borrow().clone()
    }

    pub fn current_browser_id(&self) -> Option<BrowserAppId> {
        self.inner.state.borrow().current_browser_id.clone()
    }

    pub fn active_device(&self) -> Option<DeviceSerial> {
        self.inner.state.borrow().active_device.clone()
    }

    /// Overwrites the browser selection. The id is not checked against any device.
    pub fn set_current_browser_id(&self, id: BrowserAppId) {
        self.dispatch(LinkOpenerAction::SetCurrentBrowser(id));
    }

    /// Switches the device that receives commands. The browser selection is kept.
    pub fn set_active_device(&self, serial: Option<DeviceSerial>) {
        self.dispatch(LinkOpenerAction::SetActiveDevice(serial));
    }

    /// Opens `url` on the active device with the currently selected browser app.
    ///
    /// The target device and browser are captured and the command is started before this returns.
    /// A blank `url` is a no-op that resolves to `Ok(())` without contacting the device.
    ///
    /// # Errors
    ///
    /// The future fails with [`OpenError::NoActiveDevice`] when no device is active, or with the
    /// transport's failure mapped into [`OpenError`].
    pub fn open_url(&self, url: &str) -> LinkOpenerFuture<Result<(), OpenError>> {
        let request = open_request(&self.inner.state.borrow(), url);
        match request {
            Ok(Some(request)) => {
                let transport = Rc::clone(&self.inner.services.transport);
                self.spawn_command(open_on_device(transport, request))
            }
            Ok(None) => Box::pin(future::ready(Ok::<(), OpenError>(()))),
            Err(err) => Box::pin(future::ready(Err::<(), OpenError>(err))),
        }
    }

    /// Resets the browser selection now and asks the active device to forget its default browser.
    ///
    /// The local reset is never rolled back. With no active device only the local reset happens.
    ///
    /// # Errors
    ///
    /// The future fails with [`ClearError`] when the device-side reset fails.
    pub fn clear_browser(&self) -> LinkOpenerFuture<Result<(), ClearError>> {
        let commands = self.dispatch(LinkOpenerAction::ClearBrowser);
        Box::pin(try_join_all(commands).map_ok(|_| ()))
    }

    /// Selectable browser options for the active device.
    pub fn browser_options(&self) -> Vec<BrowserOption> {
        let Some(serial) = self.active_device() else {
            return Vec::new();
        };
        let query = self.inner.services.directory.device_by_serial(&serial);
        browser_options(&query, self.current_browser_id().as_ref())
    }

    /// The option matching the current selection, if the active device has one.
    pub fn selected_option(&self) -> Option<BrowserOption> {
        self.browser_options()
            .into_iter()
            .find(|option| option.selected)
    }

    /// Applies one raw input event.
    ///
    /// Subscribers are notified and device commands are started before this returns; the outcome
    /// carries their completion handles with the same error types as [`LinkOpenerStore::open_url`]
    /// and [`LinkOpenerStore::clear_browser`].
    pub fn handle_input(&self, input: LinkOpenerInput) -> InputOutcome {
        let plan = plan_input(input, &self.prefs());
        let mut commands = Vec::new();
        for action in plan.actions {
            commands.extend(self.dispatch(action).into_iter().map(PendingCommand::Clear));
        }
        if let Some(url) = plan.open_url {
            commands.push(PendingCommand::Open(self.open_url(&url)));
        }
        InputOutcome {
            commands,
            focus_url_input: plan.focus_url_input,
        }
    }

    /// Registers a listener called after every local state change, in registration order.
    pub fn subscribe(&self, listener: impl Fn(&LinkOpenerChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        let listener: Listener = Rc::new(listener);
        self.inner.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Removes a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    // Reduces, delivers notifications once the state borrow is released, then starts device work.
    fn dispatch(&self, action: LinkOpenerAction) -> Vec<LinkOpenerFuture<Result<(), ClearError>>> {
        let effects = reduce_link_opener(&mut self.inner.state.borrow_mut(), action);
        let mut commands = Vec::new();
        for effect in effects {
            match effect {
                LinkOpenerEffect::Notify(change) => self.notify(&change),
                LinkOpenerEffect::ClearBrowserPreference { serial } => {
                    let transport = Rc::clone(&self.inner.services.transport);
                    commands.push(self.spawn_command(clear_on_device(transport, serial)));
                }
            }
        }
        commands
    }

    fn spawn_command<E>(
        &self,
        command: impl Future<Output = Result<(), TransportError>> + 'static,
    ) -> LinkOpenerFuture<Result<(), E>>
    where
        E: From<TransportError> + 'static,
    {
        let (done, outcome) = oneshot::channel();
        let task = async move {
            // Nobody may be waiting for the outcome any more.
            let _ = done.send(command.await);
        };
        if let Err(err) = self.inner.services.spawner.spawn_local(task) {
            warn!(error = %err, "device command could not be started");
            let interrupted = E::from(TransportError::Interrupted);
            return Box::pin(future::ready(Err::<(), E>(interrupted)));
        }
        Box::pin(async move {
            match outcome.await {
                Ok(result) => result.map_err(E::from),
                Err(oneshot::Canceled) => Err(E::from(TransportError::Interrupted)),
            }
        })
    }

    fn notify(&self, change: &LinkOpenerChange) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(change);
        }
    }
}

impl std::fmt::Debug for LinkOpenerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkOpenerStore")
            .field("state", &*self.inner.state.borrow())
            .field("prefs", &self.inner.prefs.get())
            .finish_non_exhaustive()
    }
}

async fn open_on_device(
    transport: Rc<dyn DeviceTransport>,
    request: OpenRequest,
) -> Result<(), TransportError> {
    let OpenRequest {
        serial,
        url,
        browser_app_id,
    } = request;
    info!(
        serial = %serial,
        url = %url,
        browser_app_id = ?browser_app_id,
        "opening link on device"
    );
    let result = transport
        .request_open_url(&serial, &url, browser_app_id.as_ref())
        .await;
    if let Err(err) = &result {
        warn!(serial = %serial, url = %url, error = %err, "open link failed");
    }
    result
}

async fn clear_on_device(
    transport: Rc<dyn DeviceTransport>,
    serial: DeviceSerial,
) -> Result<(), TransportError> {
    info!(serial = %serial, "clearing device browser preference");
    let result = transport.request_clear_browser_preference(&serial).await;
    if let Err(err) = &result {
        warn!(serial = %serial, error = %err, "clear browser preference failed");
    }
    result
}
