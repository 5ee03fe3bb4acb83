//! Enumerated answers for the choice fields of a [`HealthProfile`](crate::HealthProfile).
//!
//! Each enum serializes to the lowercase string the prediction service expects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// All variants, in the order they are offered to the user.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire representation of this answer.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}

choice_enum! {
    /// Biological sex as accepted by the prediction model.
    Gender {
        Male => "male",
        Female => "female",
    }
}

choice_enum! {
    SmokingStatus {
        Never => "never",
        Former => "former",
        Current => "current",
    }
}

choice_enum! {
    AlcoholUse {
        None => "none",
        Occasional => "occasional",
        Regular => "regular",
    }
}

choice_enum! {
    ActivityLevel {
        Low => "low",
        Moderate => "moderate",
        High => "high",
    }
}

choice_enum! {
    /// A pre-existing diagnosis. "No condition" is represented by `Option::None`.
    ExistingCondition {
        Asthma => "asthma",
        Copd => "copd",
        Hypertension => "hypertension",
        Diabetes => "diabetes",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip_through_from_str() {
        for level in ActivityLevel::ALL {
            assert_eq!(level.as_str().parse::<ActivityLevel>(), Ok(*level));
        }
        assert_eq!("copd".parse::<ExistingCondition>(), Ok(ExistingCondition::Copd));
    }

    #[test]
    fn unknown_and_empty_strings_are_rejected() {
        assert!("".parse::<Gender>().is_err());
        assert!("Male".parse::<Gender>().is_err());
        assert!("heavy".parse::<AlcoholUse>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&SmokingStatus::Former).unwrap();
        assert_eq!(json, "\"former\"");
    }
}
