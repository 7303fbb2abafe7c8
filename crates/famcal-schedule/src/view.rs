//! View-granularity defaults
//!
//! Picking day/week/month is presentation policy, not a data transform:
//! the family swim-lane view only makes sense a day at a time, and narrow
//! viewports get a day too. Callers may override the default at any time;
//! nothing here is persisted.

/// Calendar grid granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewGranularity {
    Day,
    Week,
    #[default]
    Month,
}

/// Viewports narrower than this default to a single day.
pub const NARROW_VIEWPORT_PX: u32 = 768;

/// The granularity a freshly opened calendar starts in.
pub fn default_granularity(family_view: bool, viewport_width_px: u32) -> ViewGranularity {
    if family_view || viewport_width_px < NARROW_VIEWPORT_PX {
        ViewGranularity::Day
    } else {
        ViewGranularity::Month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_defaults_to_month() {
        assert_eq!(default_granularity(false, 1024), ViewGranularity::Month);
    }

    #[test]
    fn test_family_view_forces_day() {
        assert_eq!(default_granularity(true, 1024), ViewGranularity::Day);
    }

    #[test]
    fn test_narrow_viewport_defaults_to_day() {
        assert_eq!(default_granularity(false, 480), ViewGranularity::Day);
    }

    #[test]
    fn test_boundary_width_is_month() {
        assert_eq!(
            default_granularity(false, NARROW_VIEWPORT_PX),
            ViewGranularity::Month
        );
    }
}
