//! Attach/detach detection and tablet mode switch state
//!
//! This crate watches a hotplug event bus for one specific USB keyboard,
//! matched by vendor/product id, and reports a single boolean tablet mode
//! switch to an output channel: keyboard removed means tablet mode on,
//! keyboard attached means tablet mode off.
//!
//! The collaborators are trait seams so they can be faked in tests. On
//! Linux the default adapters watch udev for USB uevents and report through
//! a uinput virtual device exposing `SW_TABLET_MODE`.

pub mod controller;
pub mod error;
pub mod event;
pub mod identity;
pub mod output;

#[cfg(all(target_os = "linux", feature = "hotplug"))]
pub mod hotplug;

#[cfg(all(target_os = "linux", feature = "uinput"))]
pub mod uinput;

pub use controller::{ModeController, SwitchState, ENDPOINT_NAME};
pub use error::{BusError, OutputError, StartError};
pub use event::{HotplugBus, HotplugEvent, HotplugKind};
pub use identity::{DeviceIdentity, DEFAULT_KEYBOARD, KEYBOARD_PRODUCT_ID, KEYBOARD_VENDOR_ID};
pub use output::{SwitchEndpoint, SwitchId, SwitchOutput};

#[cfg(all(target_os = "linux", feature = "hotplug"))]
pub use hotplug::UdevHotplugBus;

#[cfg(all(target_os = "linux", feature = "uinput"))]
pub use uinput::UinputSwitchOutput;
