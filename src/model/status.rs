//! Status vocabularies for the workflow tables.
//!
//! The store keeps statuses as strings; these enums are the in-process
//! representation, converted at the entity boundary with [`as_str`] and
//! [`FromStr`].
//!
//! [`as_str`]: ApplicationStatus::as_str
//! [`FromStr`]: std::str::FromStr

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! status_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    other => Err(other.to_string()),
                }
            }
        }
    };
}

status_enum!(ApplicationStatus {
    Pending => "pending",
    Submitted => "submitted",
    Completed => "completed",
    Rejected => "rejected",
});

status_enum!(ProgressStatus {
    InProgress => "in_progress",
    Completed => "completed",
});

status_enum!(RequirementStatus {
    Pending => "pending",
    Completed => "completed",
    Rejected => "rejected",
});

status_enum!(ScheduleStatus {
    Scheduled => "scheduled",
    Completed => "completed",
    Cancelled => "cancelled",
});

status_enum!(DocumentStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_strings() {
        assert_eq!(ProgressStatus::InProgress.as_str(), "in_progress");
        assert_eq!(
            "in_progress".parse::<ProgressStatus>(),
            Ok(ProgressStatus::InProgress)
        );
        assert_eq!(
            "scheduled".parse::<ScheduleStatus>(),
            Ok(ScheduleStatus::Scheduled)
        );
    }

    #[test]
    fn rejects_unknown_values() {
        assert!("started".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<RequirementStatus>().is_err());
    }
}
