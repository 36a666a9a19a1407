//! Hotplug event types and the event bus seam

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::BusError;
use crate::identity::DeviceIdentity;

/// Kind of device change reported by the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotplugKind {
    /// Device attached.
    Added,
    /// Device detached.
    Removed,
}

/// A device attach/detach notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotplugEvent {
    /// What happened to the device.
    pub kind: HotplugKind,
    /// Identity of the device the event is about.
    pub identity: DeviceIdentity,
}

/// Source of device attach/detach notifications.
///
/// Implementations deliver events over a broadcast channel. Dropping the
/// receiver is the unsubscribe; no further events are observed after that.
#[async_trait]
pub trait HotplugBus: Send + Sync {
    /// Subscribe to hotplug events.
    async fn subscribe(&self) -> Result<broadcast::Receiver<HotplugEvent>, BusError>;
}
