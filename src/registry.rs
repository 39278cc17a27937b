//! Static registries of the stops served by the route and the fare
//! categories passengers can travel under.
//!
//! Both registries are closed sets: data sources reject transactions that
//! refer to stops or passenger types outside of them.

use crate::{Error, transaction::PassengerType};

/// The stops on the default St. Maarten route, in route order.
pub const DEFAULT_STOPS: [&str; 6] = [
    "St. Peters",
    "Philipsburg",
    "Maho",
    "Cole Bay",
    "Dutch Quarter",
    "French Quarter",
];

/// The closed set of named stops that transactions may start or end at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRegistry {
    stops: Vec<String>,
}

impl StopRegistry {
    /// Create a registry from a list of stop names.
    ///
    /// Surrounding whitespace is trimmed, blank names are dropped and
    /// duplicates are removed while keeping the first occurrence's position.
    pub fn new<I, S>(stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();

        for stop in stops {
            let stop = stop.as_ref().trim();

            if !stop.is_empty() && !unique.iter().any(|existing| existing == stop) {
                unique.push(stop.to_owned());
            }
        }

        Self { stops: unique }
    }

    /// The registered stop names in route order.
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Whether `name` is a registered stop.
    pub fn contains(&self, name: &str) -> bool {
        self.stops.iter().any(|stop| stop == name)
    }

    /// Check that `name` is a registered stop.
    ///
    /// # Errors
    /// Returns [Error::UnknownStop] if `name` is not in the registry.
    pub fn validate(&self, name: &str) -> Result<(), Error> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(Error::UnknownStop(name.to_owned()))
        }
    }
}

impl Default for StopRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_STOPS)
    }
}

/// Display metadata for a passenger type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassengerTypeInfo {
    /// The passenger type described.
    pub passenger_type: PassengerType,
    /// The name shown in filter controls and transaction cards.
    pub label: &'static str,
    /// A one-line explanation of who travels under this fare.
    pub description: &'static str,
}

/// Metadata for every passenger type, in the order they are offered in the
/// filter controls.
pub const PASSENGER_TYPES: [PassengerTypeInfo; 4] = [
    PassengerTypeInfo {
        passenger_type: PassengerType::Adult,
        label: "Adult",
        description: "Standard fare",
    },
    PassengerTypeInfo {
        passenger_type: PassengerType::Child,
        label: "Child",
        description: "Reduced fare for children",
    },
    PassengerTypeInfo {
        passenger_type: PassengerType::Student,
        label: "Student",
        description: "Reduced fare with a student card",
    },
    PassengerTypeInfo {
        passenger_type: PassengerType::Senior,
        label: "Senior",
        description: "Reduced fare for seniors",
    },
];

/// Look up the display metadata for `passenger_type`.
pub fn passenger_type_info(passenger_type: PassengerType) -> &'static PassengerTypeInfo {
    PASSENGER_TYPES
        .iter()
        .find(|info| info.passenger_type == passenger_type)
        .unwrap_or(&PASSENGER_TYPES[0])
}
