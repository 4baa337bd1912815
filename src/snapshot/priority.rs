use derive_more::Display;
use snafu::Snafu;

/// Download priority of a file. The numeric form (`-1`, `0`, `1`) is the
/// daemon's wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Display)]
pub enum Priority {
    #[display("low")]
    Low,
    #[default]
    #[display("normal")]
    Normal,
    #[display("high")]
    High,
}

impl Priority {
    pub fn as_number(self) -> i64 {
        match self {
            Priority::Low => -1,
            Priority::Normal => 0,
            Priority::High => 1,
        }
    }
}

impl TryFrom<i64> for Priority {
    type Error = InvalidPriorityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Priority::Low),
            0 => Ok(Priority::Normal),
            1 => Ok(Priority::High),
            _ => InvalidPrioritySnafu { value }.fail(),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Unknown priority value {}", value))]
pub struct InvalidPriorityError {
    value: i64,
}
