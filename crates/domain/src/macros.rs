//! Macro for implementing Display and FromStr for wire-name enums
//!
//! Verbs, entity kinds and HTTP methods all have a fixed textual form. This
//! macro provides both conversions from a single mapping table.
//!
//! # Example
//!
//! ```rust
//! use kinvey_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Scheme {
//!     Basic,
//!     Session,
//! }
//!
//! impl_wire_name_conversions!(Scheme {
//!     Basic => "Basic",
//!     Session => "Kinvey",
//! });
//!
//! assert_eq!(Scheme::Session.to_string(), "Kinvey");
//! assert_eq!("basic".parse::<Scheme>().unwrap(), Scheme::Basic);
//! ```

/// Implements Display and FromStr traits for wire-name enums
///
/// - Display writes the mapped string verbatim
/// - FromStr matches ASCII case-insensitively
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire form of this value.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $(if s.eq_ignore_ascii_case($str) {
                    return ::core::result::Result::Ok(Self::$variant);
                })+
                ::core::result::Result::Err(::std::format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
