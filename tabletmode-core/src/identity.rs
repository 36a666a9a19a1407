//! USB device identity and target matching

use std::fmt;

/// Vendor id of the HAILUCK keyboard dock shipped with the Chuwi Hi10 Max.
pub const KEYBOARD_VENDOR_ID: u16 = 0x258a;

/// Product id of the HAILUCK keyboard dock.
pub const KEYBOARD_PRODUCT_ID: u16 = 0x0020;

/// Default target identity when none is configured.
pub const DEFAULT_KEYBOARD: DeviceIdentity =
    DeviceIdentity::new(KEYBOARD_VENDOR_ID, KEYBOARD_PRODUCT_ID);

/// USB device identity as read from the device descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    /// USB vendor id.
    pub vendor_id: u16,
    /// USB product id.
    pub product_id: u16,
}

impl DeviceIdentity {
    /// Create an identity from raw descriptor fields.
    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }

    /// Check whether this identity is the configured target device.
    ///
    /// True iff both id fields are equal. Total over all inputs, no side
    /// effects.
    #[inline]
    pub fn matches(self, target: DeviceIdentity) -> bool {
        self.vendor_id == target.vendor_id && self.product_id == target.product_id
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_requires_both_fields() {
        let target = DeviceIdentity::new(0x258a, 0x0020);
        assert!(DeviceIdentity::new(0x258a, 0x0020).matches(target));
        assert!(!DeviceIdentity::new(0x258a, 0x0021).matches(target));
        assert!(!DeviceIdentity::new(0x258b, 0x0020).matches(target));
        assert!(!DeviceIdentity::new(0x1234, 0x5678).matches(target));
    }

    #[test]
    fn default_target_is_the_stock_keyboard() {
        assert_eq!(DEFAULT_KEYBOARD.vendor_id, 0x258a);
        assert_eq!(DEFAULT_KEYBOARD.product_id, 0x0020);
    }

    #[test]
    fn display_is_vid_colon_pid() {
        assert_eq!(DEFAULT_KEYBOARD.to_string(), "258a:0020");
        assert_eq!(DeviceIdentity::new(0x3151, 0x5030).to_string(), "3151:5030");
    }
}
