/// Resolves the hardware vendor behind a MAC address.
pub trait VendorLookup: Send + Sync {
    /// `mac` is in the colon separated form the scanner reports (`AA:BB:CC:DD:EE:FF`).
    fn vendor_for(&self, mac: &str) -> Option<String>;
}
