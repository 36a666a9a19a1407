//! USB hotplug monitoring via udev
//!
//! Watches `usb`/`usb_device` uevents and broadcasts translated add/remove
//! events. Device identity is taken from the uevent `PRODUCT` property;
//! remove events no longer have sysfs attributes, but the property survives
//! in the event itself.

use std::ffi::OsStr;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_udev::{AsyncMonitorSocket, EventType, MonitorBuilder};
use tracing::{debug, warn};

use crate::error::BusError;
use crate::event::{HotplugBus, HotplugEvent, HotplugKind};
use crate::identity::DeviceIdentity;

/// Broadcast capacity for hotplug events; attach/detach is rare.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Hotplug bus backed by a udev monitor socket.
pub struct UdevHotplugBus {
    event_tx: broadcast::Sender<HotplugEvent>,
    monitor: JoinHandle<()>,
}

impl UdevHotplugBus {
    /// Open the udev monitor and start pumping uevents.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> Result<Self, BusError> {
        let socket = MonitorBuilder::new()?
            .match_subsystem_devtype("usb", "usb_device")?
            .listen()?;
        let socket = AsyncMonitorSocket::new(socket)?;

        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let monitor = tokio::spawn(run_monitor(socket, event_tx.clone()));

        Ok(Self { event_tx, monitor })
    }
}

#[async_trait]
impl HotplugBus for UdevHotplugBus {
    async fn subscribe(&self) -> Result<broadcast::Receiver<HotplugEvent>, BusError> {
        Ok(self.event_tx.subscribe())
    }
}

impl Drop for UdevHotplugBus {
    fn drop(&mut self) {
        self.monitor.abort();
    }
}

async fn run_monitor(mut socket: AsyncMonitorSocket, tx: broadcast::Sender<HotplugEvent>) {
    while let Some(item) = socket.next().await {
        let uevent = match item {
            Ok(uevent) => uevent,
            Err(e) => {
                warn!(error = %e, "udev monitor read failed");
                continue;
            }
        };

        let Some(event) = translate(uevent.event_type(), uevent.property_value("PRODUCT"))
        else {
            continue;
        };

        debug!(kind = ?event.kind, device = %event.identity, "usb hotplug event");
        // No subscribers is fine; the controller may not be up yet.
        let _ = tx.send(event);
    }
}

/// Translate a uevent into a hotplug event.
///
/// Actions other than add/remove (change, bind, unbind) carry no
/// attach/detach information and are discarded, as are events without a
/// parseable identity.
fn translate(action: EventType, product: Option<&OsStr>) -> Option<HotplugEvent> {
    let kind = match action {
        EventType::Add => HotplugKind::Added,
        EventType::Remove => HotplugKind::Removed,
        _ => return None,
    };
    let identity = identity_from_product(product?.to_str()?)?;
    Some(HotplugEvent { kind, identity })
}

/// Parse the uevent `PRODUCT` property: `vid/pid/bcdDevice` in unpadded
/// lowercase hex, e.g. `258a/20/110`.
fn identity_from_product(value: &str) -> Option<DeviceIdentity> {
    let mut parts = value.split('/');
    let vendor = u16::from_str_radix(parts.next()?, 16).ok()?;
    let product = u16::from_str_radix(parts.next()?, 16).ok()?;
    Some(DeviceIdentity::new(vendor, product))
}
