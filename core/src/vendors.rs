use std::sync::OnceLock;

use mac_oui::Oui;
use tracing::warn;
use vision_common::vendors::VendorLookup;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Loads the **Organizationally unique identifier** database on first use.
fn oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(err) => {
                warn!(error = ?err, "failed to load OUI database, vendor enrichment disabled");
                None
            }
        })
        .as_ref()
}

/// [`VendorLookup`] backed by the embedded OUI database.
#[derive(Debug, Default, Clone, Copy)]
pub struct OuiVendorLookup;

impl VendorLookup for OuiVendorLookup {
    fn vendor_for(&self, mac: &str) -> Option<String> {
        match oui_db()?.lookup_by_mac(mac) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            _ => None,
        }
    }
}
