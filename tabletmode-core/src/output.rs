//! Output channel seam for switch-capable endpoints

use crate::error::OutputError;
use crate::identity::DeviceIdentity;

/// Switches an endpoint can declare and report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchId {
    /// Tablet posture switch (`SW_TABLET_MODE` in the Linux input
    /// subsystem).
    TabletMode,
}

/// Channel that accepts registration of switch-capable endpoints.
pub trait SwitchOutput: Send + Sync {
    /// Register a new endpoint exposing the given switches.
    ///
    /// `identity` is stamped onto the endpoint as its device id so
    /// consumers can attribute the switch to the matched keyboard.
    /// Dropping the returned endpoint unregisters it.
    fn register(
        &self,
        name: &str,
        identity: DeviceIdentity,
        switches: &[SwitchId],
    ) -> Result<Box<dyn SwitchEndpoint>, OutputError>;
}

/// A registered switch endpoint.
///
/// A reported value becomes observable downstream only once `sync`
/// completes the batch; callers issue the two together.
pub trait SwitchEndpoint: Send {
    /// Queue a switch value for the current batch.
    fn report_switch(&mut self, switch: SwitchId, value: bool) -> Result<(), OutputError>;

    /// Complete the batch, making queued values observable downstream.
    fn sync(&mut self) -> Result<(), OutputError>;
}
