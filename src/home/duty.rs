//! The operator's on/off duty flag.

/// Whether the operator is currently driving their route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyStatus {
    /// Driving the route and taking fares.
    OnDuty,
    /// Not driving.
    OffDuty,
}

impl DutyStatus {
    /// Get the status for a form's `on_duty` flag.
    pub fn from_on_duty(on_duty: bool) -> Self {
        if on_duty { Self::OnDuty } else { Self::OffDuty }
    }

    /// Whether this is [DutyStatus::OnDuty].
    pub fn is_on_duty(self) -> bool {
        self == Self::OnDuty
    }

    /// The other status.
    pub fn toggle(self) -> Self {
        match self {
            Self::OnDuty => Self::OffDuty,
            Self::OffDuty => Self::OnDuty,
        }
    }

    /// The badge text.
    pub fn label(self) -> &'static str {
        match self {
            Self::OnDuty => "Active",
            Self::OffDuty => "Off Duty",
        }
    }

    /// The text for the button that switches to [DutyStatus::toggle].
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::OnDuty => "Go Off Duty",
            Self::OffDuty => "Go On Duty",
        }
    }

    pub(crate) fn badge_style(self) -> &'static str {
        match self {
            Self::OnDuty => {
                "px-2 py-1 text-xs font-medium rounded bg-green-100 text-green-700 \
                dark:bg-green-900 dark:text-green-300"
            }
            Self::OffDuty => {
                "px-2 py-1 text-xs font-medium rounded bg-gray-200 text-gray-700 \
                dark:bg-gray-700 dark:text-gray-300"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DutyStatus;

    #[test]
    fn toggle_switches_between_states() {
        assert_eq!(DutyStatus::OnDuty.toggle(), DutyStatus::OffDuty);
        assert_eq!(DutyStatus::OffDuty.toggle(), DutyStatus::OnDuty);
        assert_eq!(DutyStatus::OnDuty.toggle().toggle(), DutyStatus::OnDuty);
    }

    #[test]
    fn labels_match_status() {
        assert_eq!(DutyStatus::OnDuty.label(), "Active");
        assert_eq!(DutyStatus::OffDuty.label(), "Off Duty");
    }

    #[test]
    fn from_on_duty_flag() {
        assert_eq!(DutyStatus::from_on_duty(true), DutyStatus::OnDuty);
        assert_eq!(DutyStatus::from_on_duty(false), DutyStatus::OffDuty);
        assert!(DutyStatus::OnDuty.is_on_duty());
        assert!(!DutyStatus::OffDuty.is_on_duty());
    }
}
