//! Virtual switch device backed by Linux uinput

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, BusType, EventType, InputEvent, InputId, SwitchType};

use crate::error::OutputError;
use crate::identity::DeviceIdentity;
use crate::output::{SwitchEndpoint, SwitchId, SwitchOutput};

/// Output channel that registers endpoints as uinput virtual devices.
pub struct UinputSwitchOutput;

fn switch_type(id: SwitchId) -> SwitchType {
    match id {
        SwitchId::TabletMode => SwitchType::SW_TABLET_MODE,
    }
}

impl SwitchOutput for UinputSwitchOutput {
    fn register(
        &self,
        name: &str,
        identity: DeviceIdentity,
        switches: &[SwitchId],
    ) -> Result<Box<dyn SwitchEndpoint>, OutputError> {
        let mut capabilities = AttributeSet::<SwitchType>::new();
        for switch in switches {
            capabilities.insert(switch_type(*switch));
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(|e| OutputError::Registration(e.to_string()))?
            .name(name)
            .input_id(InputId::new(
                BusType::BUS_USB,
                identity.vendor_id,
                identity.product_id,
                0,
            ))
            .with_switches(&capabilities)
            .map_err(|e| OutputError::Registration(e.to_string()))?
            .build()
            .map_err(|e| OutputError::Registration(e.to_string()))?;

        Ok(Box::new(UinputEndpoint {
            device,
            pending: Vec::new(),
        }))
    }
}

/// A registered uinput device; dropping it removes the device node.
struct UinputEndpoint {
    device: VirtualDevice,
    pending: Vec<InputEvent>,
}

impl SwitchEndpoint for UinputEndpoint {
    fn report_switch(&mut self, switch: SwitchId, value: bool) -> Result<(), OutputError> {
        self.pending.push(InputEvent::new(
            EventType::SWITCH,
            switch_type(switch).0,
            i32::from(value),
        ));
        Ok(())
    }

    fn sync(&mut self) -> Result<(), OutputError> {
        // SYN_REPORT closes the batch; readers only see the queued values
        // once the marker arrives. One emit call keeps value and marker in
        // a single write.
        self.pending
            .push(InputEvent::new(EventType::SYNCHRONIZATION, 0, 0));
        let batch = std::mem::take(&mut self.pending);
        self.device
            .emit(&batch)
            .map_err(|e| OutputError::Report(e.to_string()))
    }
}
