use std::fmt::{Display, Formatter};

/// Identifies a driver for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverId(pub usize);

impl Display for DriverId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A driver available to the dispatcher.
///
/// A driver is nothing but an identity. Whether it is idle or out on a ride is tracked by the [`Dispatcher`] holding
/// it, so the two can never disagree.
///
/// [`Dispatcher`]: crate::Dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Driver {
    id: DriverId,
    name: String,
}

impl Driver {
    /// Name given to drivers created without one.
    pub const DEFAULT_NAME: &'static str = "Jane Doe";

    pub fn new(id: DriverId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    pub fn unnamed(id: DriverId) -> Self {
        Self::new(id, Self::DEFAULT_NAME)
    }

    /// Build a fleet of `count` drivers named `Driver0`, `Driver1`, ...
    pub fn fleet(count: usize) -> Vec<Self> {
        (0..count).map(|i| Self::new(DriverId(i), format!("Driver{}", i))).collect()
    }

    pub fn id(&self) -> DriverId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Driver {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
