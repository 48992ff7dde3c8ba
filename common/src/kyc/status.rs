// KYC Status enumeration
// Derived on every query, never stored

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Caller visible verification state of a record
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumString,
)]
pub enum KycStatus {
    /// Record is valid, Source is visible
    #[serde(rename = "OK")]
    #[strum(serialize = "OK")]
    Ok,

    /// Record is expired, Source is redacted
    #[serde(rename = "Expired")]
    #[strum(serialize = "Expired")]
    Expired,
}

impl KycStatus {
    /// Check if the Source field may be shown for this status
    #[inline]
    pub fn shows_source(&self) -> bool {
        matches!(self, KycStatus::Ok)
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        matches!(self, KycStatus::Expired)
    }
}
