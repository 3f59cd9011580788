//! Language-standard feature bits.
//!
//! Every construct the parser accepts belongs to one of these groups. The
//! option layer supplies an "allowed" and a "warned" mask; the diagnostics
//! decide from them whether using a feature is silent, a warning, or an
//! error.

use bitflags::bitflags;

bitflags! {
    /// A set of language-standard groups.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct StdFlags: u32 {
        const F77 = 1 << 0;
        /// Obsolescent in Fortran 95.
        const F95_OBS = 1 << 1;
        /// Deleted in Fortran 95.
        const F95_DEL = 1 << 2;
        const F95 = 1 << 3;
        const F2003 = 1 << 4;
        /// GNU extensions.
        const GNU = 1 << 5;
        /// Legacy extensions accepted for old code.
        const LEGACY = 1 << 6;
        const F2008 = 1 << 7;
        /// Obsolescent in Fortran 2008.
        const F2008_OBS = 1 << 8;
        /// Technical specifications 29113 and 18508.
        const F2008_TS = 1 << 9;
    }
}

impl StdFlags {
    /// Allowed groups when no `-std=` option is given.
    pub const DEFAULT_ALLOWED: StdFlags = StdFlags::all();

    /// Groups that still warn when no `-std=` option is given.
    pub const DEFAULT_WARNED: StdFlags = StdFlags::F95_DEL.union(StdFlags::LEGACY);

    /// Message prefix naming a single reportable group.
    ///
    /// Returns `None` for combined masks and for groups that are never
    /// reported on their own (`F77`, `F95`).
    pub fn feature_label(self) -> Option<&'static str> {
        FEATURE_LABELS
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, label)| *label)
    }
}

static FEATURE_LABELS: &[(StdFlags, &str)] = &[
    (StdFlags::F2008_TS, "TS 29113/TS 18508:"),
    (StdFlags::F2008_OBS, "Fortran 2008 obsolescent feature:"),
    (StdFlags::F2008, "Fortran 2008:"),
    (StdFlags::F2003, "Fortran 2003:"),
    (StdFlags::GNU, "GNU Extension:"),
    (StdFlags::LEGACY, "Legacy Extension:"),
    (StdFlags::F95_OBS, "Obsolescent feature:"),
    (StdFlags::F95_DEL, "Deleted feature:"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cover_reportable_groups() {
        assert_eq!(StdFlags::GNU.feature_label(), Some("GNU Extension:"));
        assert_eq!(StdFlags::F2003.feature_label(), Some("Fortran 2003:"));
        assert_eq!(
            StdFlags::F2008_TS.feature_label(),
            Some("TS 29113/TS 18508:")
        );
    }

    #[test]
    fn combined_or_unreported_groups_have_no_label() {
        assert_eq!(StdFlags::F77.feature_label(), None);
        assert_eq!(StdFlags::F95.feature_label(), None);
        assert_eq!((StdFlags::GNU | StdFlags::LEGACY).feature_label(), None);
    }

    #[test]
    fn default_masks() {
        assert!(StdFlags::DEFAULT_ALLOWED.contains(StdFlags::GNU));
        assert!(StdFlags::DEFAULT_WARNED.contains(StdFlags::LEGACY));
        assert!(!StdFlags::DEFAULT_WARNED.contains(StdFlags::GNU));
    }
}
