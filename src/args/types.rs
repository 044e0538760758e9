use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for usize {
    fn from(value: PositiveUsize) -> Self {
        value.get()
    }
}

/// Ramp-up window as the user gave it. A negative value disables the stagger
/// but is still echoed back with its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RampSetting {
    magnitude: Duration,
    negative: bool,
}

impl RampSetting {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            magnitude: window,
            negative: false,
        }
    }

    #[must_use]
    pub const fn negative(magnitude: Duration) -> Self {
        Self {
            magnitude,
            negative: true,
        }
    }

    /// Creation window actually used; zero when the input was negative.
    #[must_use]
    pub const fn window(self) -> Duration {
        if self.negative {
            Duration::ZERO
        } else {
            self.magnitude
        }
    }

    #[must_use]
    pub const fn magnitude(self) -> Duration {
        self.magnitude
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.negative
    }
}

impl From<Duration> for RampSetting {
    fn from(window: Duration) -> Self {
        Self::new(window)
    }
}
