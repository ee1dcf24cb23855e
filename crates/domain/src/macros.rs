//! Macro for implementing Display and FromStr for domain enums
//!
//! Keeps the string form of small enums (priorities, provider names, API
//! dialects) in one place, with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use minutesync_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Email,
//!     Chat,
//! }
//!
//! impl_domain_enum_conversions!(Channel {
//!     Email => "email",
//!     Chat => "chat",
//! });
//!
//! assert_eq!(Channel::Chat.to_string(), "chat");
//! assert_eq!("EMAIL".parse::<Channel>().unwrap(), Channel::Email);
//! ```

/// Implements Display and FromStr traits for domain enums
///
/// This macro generates:
/// - Display trait: writes the mapped lowercase string
/// - FromStr trait: parses case-insensitive, whitespace-trimmed strings
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase string
///   representations
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Weather {
        Sunny,
        Rainy,
    }

    impl_domain_enum_conversions!(Weather {
        Sunny => "sunny",
        Rainy => "rainy",
    });

    #[test]
    fn display_uses_mapped_string() {
        assert_eq!(Weather::Sunny.to_string(), "sunny");
        assert_eq!(Weather::Rainy.to_string(), "rainy");
    }

    #[test]
    fn parsing_ignores_case_and_padding() {
        assert_eq!(Weather::from_str("SUNNY").unwrap(), Weather::Sunny);
        assert_eq!(Weather::from_str("  Rainy ").unwrap(), Weather::Rainy);
    }

    #[test]
    fn parsing_rejects_unknown_values() {
        let result = Weather::from_str("foggy");
        assert!(result.unwrap_err().contains("Invalid Weather: foggy"));
        assert!(Weather::from_str("").is_err());
    }
}
