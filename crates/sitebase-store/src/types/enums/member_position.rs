//! Member position enumeration for project membership records.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the position a member holds within a project.
///
/// The position set is fixed: a membership record can carry no value outside
/// this enumeration, which is how the write-time domain constraint on the
/// membership table is expressed at the type level.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MemberPosition {
    /// Lead engineer or agent responsible for the project
    #[serde(rename = "primary")]
    Primary,

    /// Supporting engineer with full working access
    #[serde(rename = "secondary")]
    #[default]
    Secondary,

    /// Administrative member who manages membership and settings
    #[serde(rename = "admin")]
    Admin,

    /// Reviewing member with oversight duties, read-centric
    #[serde(rename = "oversight")]
    Oversight,

    /// Drawing-office member producing plans and schedules
    #[serde(rename = "draughtsman")]
    Draughtsman,
}

impl MemberPosition {
    /// Returns whether this position can manage other memberships.
    #[inline]
    pub const fn is_administrative(self) -> bool {
        matches!(self, MemberPosition::Primary | MemberPosition::Admin)
    }

    /// Returns whether this position is limited to reviewing content.
    #[inline]
    pub const fn is_read_centric(self) -> bool {
        matches!(self, MemberPosition::Oversight)
    }

    /// Returns whether this position may author project content.
    #[inline]
    pub const fn can_author(self) -> bool {
        !self.is_read_centric()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_domain_is_closed() {
        assert_eq!("primary".parse::<MemberPosition>(), Ok(MemberPosition::Primary));
        assert_eq!(
            "draughtsman".parse::<MemberPosition>(),
            Ok(MemberPosition::Draughtsman)
        );
        assert!("foreman".parse::<MemberPosition>().is_err());
    }

    #[test]
    fn test_administrative_positions() {
        assert!(MemberPosition::Primary.is_administrative());
        assert!(MemberPosition::Admin.is_administrative());
        assert!(!MemberPosition::Secondary.is_administrative());
        assert!(!MemberPosition::Oversight.is_administrative());
        assert!(!MemberPosition::Draughtsman.is_administrative());
    }

    #[test]
    fn test_authoring_positions() {
        assert!(MemberPosition::Draughtsman.can_author());
        assert!(!MemberPosition::Oversight.can_author());
    }
}
