//! Settings that control what the console shows.

use crate::{Error, activity::DEFAULT_DISCLOSURE_CAP, registry::StopRegistry};

/// The operator signed in to the console and the route they are driving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorProfile {
    /// The operator's display name.
    pub name: String,
    /// The vehicle label, e.g. "Bus #245".
    pub vehicle: String,
    /// The stop the current route starts at.
    pub route_origin: String,
    /// The stop the current route ends at.
    pub route_destination: String,
}

impl Default for OperatorProfile {
    fn default() -> Self {
        Self {
            name: "Michael Thompson".to_owned(),
            vehicle: "Bus #245".to_owned(),
            route_origin: "St. Peters".to_owned(),
            route_destination: "Philipsburg".to_owned(),
        }
    }
}

/// The config for the console's pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// The number of transactions shown on the activity screen before "See more".
    pub disclosure_cap: usize,
    /// The operator shown on the home screen.
    pub operator: OperatorProfile,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            disclosure_cap: DEFAULT_DISCLOSURE_CAP,
            operator: OperatorProfile::default(),
        }
    }
}

impl ConsoleConfig {
    /// Check that at least one transaction is shown before "See more" and
    /// that the operator's route starts and ends at registered stops.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::InvalidDisclosureCap] if the disclosure cap is zero,
    /// - [Error::UnknownStop] for the first route stop not in `stops`.
    pub fn validate(&self, stops: &StopRegistry) -> Result<(), Error> {
        if self.disclosure_cap == 0 {
            return Err(Error::InvalidDisclosureCap(self.disclosure_cap));
        }

        stops.validate(&self.operator.route_origin)?;
        stops.validate(&self.operator.route_destination)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, registry::StopRegistry};

    use super::ConsoleConfig;

    #[test]
    fn default_config_is_valid() {
        let config = ConsoleConfig::default();

        assert_eq!(config.disclosure_cap, 3);
        assert_eq!(config.validate(&StopRegistry::default()), Ok(()));
    }

    #[test]
    fn rejects_zero_disclosure_cap() {
        let config = ConsoleConfig {
            disclosure_cap: 0,
            ..Default::default()
        };

        assert_eq!(
            config.validate(&StopRegistry::default()),
            Err(Error::InvalidDisclosureCap(0))
        );
    }

    #[test]
    fn rejects_route_outside_registry() {
        let mut config = ConsoleConfig::default();
        config.operator.route_destination = "Grand Case".to_owned();

        assert_eq!(
            config.validate(&StopRegistry::default()),
            Err(Error::UnknownStop("Grand Case".to_owned()))
        );
    }
}
