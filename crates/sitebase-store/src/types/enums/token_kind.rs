//! Share token kind enumeration for external bearer credentials.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the kind of an opaque share token.
///
/// Each kind is an independent bearer-credential table in the persisted
/// surface; all three share the same validity rules (existence, non-revoked,
/// non-expired, checked on every use).
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
pub enum TokenKind {
    /// Client-portal token: read access for the project's client
    #[strum(serialize = "client_portal")]
    #[serde(rename = "client_portal")]
    #[default]
    ClientPortal,

    /// Contractor-portal token: read access for an external contractor
    #[strum(serialize = "contractor_portal")]
    #[serde(rename = "contractor_portal")]
    ContractorPortal,

    /// Roadmap-share token: read access to the project programme only
    #[strum(serialize = "roadmap_share")]
    #[serde(rename = "roadmap_share")]
    RoadmapShare,
}

impl TokenKind {
    /// Returns whether this kind grants portal-wide read access.
    ///
    /// Client and contractor portal tokens are independently sufficient for
    /// portal-readable resources; a roadmap share is scoped to the programme.
    #[inline]
    pub const fn is_portal(self) -> bool {
        matches!(self, TokenKind::ClientPortal | TokenKind::ContractorPortal)
    }

    /// Returns whether this kind may carry comment access.
    #[inline]
    pub const fn supports_comments(self) -> bool {
        matches!(self, TokenKind::ClientPortal | TokenKind::ContractorPortal)
    }
}
