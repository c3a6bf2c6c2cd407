//! Macros to reduce boilerplate in the codebase

/// Generate `Display`, `FromStr` and an `ALL` listing for a fieldless enum.
///
/// Parsing is case-insensitive. Unknown input is mapped to an error through
/// the given constructor, which receives the rejected string.
///
/// # Usage
///
/// ```rust,ignore
/// enum_display_fromstr!(
///     SortOrder,
///     HotelDeskError::invalid_sort_order,
///     {
///         Asc => "asc",
///         Desc => "desc",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display_fromstr {
    (
        $enum_name:ident,
        $error_ctor:path,
        { $($variant:ident => $str:expr),+ $(,)? }
    ) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant),+];

            /// Canonical string form of the variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::HotelDeskError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok($enum_name::$variant),)+
                    _ => Err($error_ctor(s.to_string())),
                }
            }
        }
    };
}
