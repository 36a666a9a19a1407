//! Tablet mode controller
//!
//! Owns the switch state, the registered output endpoint and the hotplug
//! subscription, and converts matched attach/detach events into switch
//! reports.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::StartError;
use crate::event::{HotplugBus, HotplugEvent, HotplugKind};
use crate::identity::DeviceIdentity;
use crate::output::{SwitchEndpoint, SwitchId, SwitchOutput};

/// Name under which the switch endpoint registers with the output channel.
pub const ENDPOINT_NAME: &str = "Tablet Mode Switch";

/// Tablet mode switch value as last reported to the output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// Keyboard detached, device is in tablet posture.
    On,
    /// Keyboard attached, device is in laptop posture.
    Off,
}

impl SwitchState {
    /// Boolean switch value reported downstream.
    pub fn is_on(self) -> bool {
        matches!(self, SwitchState::On)
    }
}

/// Switch state and endpoint behind one lock, so a transition and its
/// report/sync pair execute as a single critical section.
struct Reporter {
    state: SwitchState,
    endpoint: Box<dyn SwitchEndpoint>,
}

/// Converts attach/detach of one specific USB keyboard into tablet mode
/// switch reports.
///
/// Constructed by [`ModeController::start`], torn down by
/// [`ModeController::stop`]. Multiple controllers can coexist; nothing here
/// is process-global.
pub struct ModeController {
    reporter: Arc<Mutex<Reporter>>,
    shutdown_tx: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl std::fmt::Debug for ModeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeController").finish_non_exhaustive()
    }
}

impl ModeController {
    /// Register the switch endpoint, subscribe to hotplug events and start
    /// the event worker.
    ///
    /// The endpoint is registered before the subscription so an event can
    /// never observe a missing output. If the subscription is refused, the
    /// endpoint is released again before the error is returned.
    pub async fn start(
        target: DeviceIdentity,
        output: &dyn SwitchOutput,
        bus: &dyn HotplugBus,
    ) -> Result<Self, StartError> {
        let endpoint = output
            .register(ENDPOINT_NAME, target, &[SwitchId::TabletMode])
            .map_err(StartError::OutputRegistration)?;

        let events = match bus.subscribe().await {
            Ok(events) => events,
            Err(e) => {
                drop(endpoint);
                return Err(StartError::Subscription(e));
            }
        };

        // Keyboard presence is not probed at startup; the switch assumes
        // laptop posture until the first matched event.
        let reporter = Arc::new(Mutex::new(Reporter {
            state: SwitchState::Off,
            endpoint,
        }));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let worker = tokio::spawn(run_worker(
            events,
            shutdown_rx,
            Arc::clone(&reporter),
            target,
        ));

        debug!(device = %target, "mode controller started");
        Ok(Self {
            reporter,
            shutdown_tx,
            worker,
        })
    }

    /// Last switch value reported to the output channel.
    pub fn state(&self) -> SwitchState {
        self.reporter.lock().state
    }

    /// Unsubscribe from the hotplug bus, wait for any in-flight event to
    /// finish, then release the switch endpoint.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        // Joining the worker is the synchronization point: once it returns,
        // no handler invocation can still touch the endpoint.
        let _ = self.worker.await;
        drop(self.reporter);
        debug!("mode controller stopped");
    }
}

async fn run_worker(
    mut events: broadcast::Receiver<HotplugEvent>,
    mut shutdown: watch::Receiver<bool>,
    reporter: Arc<Mutex<Reporter>>,
    target: DeviceIdentity,
) {
    loop {
        tokio::select! {
            // Also resolves with Err when the controller is dropped without
            // an explicit stop; teardown proceeds the same way.
            _ = shutdown.changed() => break,
            event = events.recv() => match event {
                Ok(event) => handle_event(&reporter, target, event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "hotplug event receiver lagged");
                }
                Err(RecvError::Closed) => {
                    debug!("hotplug bus closed, stopping event worker");
                    break;
                }
            },
        }
    }
}

/// Apply one hotplug event: filter on identity, map attach/detach to the
/// switch value and report it.
///
/// Reports are not de-duplicated against the previous state; every matched
/// event is reported downstream, in event order.
fn handle_event(reporter: &Mutex<Reporter>, target: DeviceIdentity, event: HotplugEvent) {
    if !event.identity.matches(target) {
        return;
    }

    let state = match event.kind {
        HotplugKind::Removed => SwitchState::On,
        HotplugKind::Added => SwitchState::Off,
    };

    let mut reporter = reporter.lock();
    reporter.state = state;
    match event.kind {
        HotplugKind::Removed => {
            info!(device = %event.identity, "keyboard detached, tablet mode on");
        }
        HotplugKind::Added => {
            info!(device = %event.identity, "keyboard attached, tablet mode off");
        }
    }

    let sent = reporter
        .endpoint
        .report_switch(SwitchId::TabletMode, state.is_on());
    let sent = sent.and_then(|()| reporter.endpoint.sync());
    if let Err(e) = sent {
        // State is kept at the new value; the next matched event reports
        // again.
        warn!(error = %e, "failed to report tablet mode switch");
    }
}
