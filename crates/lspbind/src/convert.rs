//! Conversions from JSON scalars to the protocol's semantic types.
use crate::event::Number;

/// Numeric field types and their protocol names.
pub trait FromNumber: Sized + Default + 'static {
    /// Protocol name used in error messages (`integer`, `uinteger`, ...).
    const EXPECTED: &'static str;

    /// Converts without loss, or returns `None`.
    fn from_number(number: Number) -> Option<Self>;
}

impl FromNumber for i32 {
    const EXPECTED: &'static str = "integer";

    fn from_number(number: Number) -> Option<Self> {
        number.as_i64().and_then(|i| i32::try_from(i).ok())
    }
}

impl FromNumber for u32 {
    const EXPECTED: &'static str = "uinteger";

    fn from_number(number: Number) -> Option<Self> {
        // `uinteger` is capped at 2^31 - 1 by the protocol.
        number
            .as_i64()
            .filter(|i| (0..=i64::from(i32::MAX)).contains(i))
            .and_then(|i| u32::try_from(i).ok())
    }
}

impl FromNumber for i64 {
    const EXPECTED: &'static str = "int64";

    fn from_number(number: Number) -> Option<Self> {
        number.as_i64()
    }
}

impl FromNumber for u64 {
    const EXPECTED: &'static str = "uint64";

    fn from_number(number: Number) -> Option<Self> {
        number.as_i64().and_then(|i| u64::try_from(i).ok())
    }
}

impl FromNumber for f64 {
    const EXPECTED: &'static str = "decimal";

    fn from_number(number: Number) -> Option<Self> {
        Some(number.as_f64())
    }
}

/// A protocol enumeration transmitted as a small integer.
///
/// Codes outside the known set are rejected by the setters built from this
/// trait; see [`DecoderOptions`](crate::DecoderOptions) for the array
/// exception.
pub trait Enumerant: Copy + Default + 'static {
    /// Enumeration name used in error messages.
    const NAME: &'static str;

    /// The enumerant for `code`, if it is known.
    fn from_code(code: i64) -> Option<Self>;

    /// The wire code of this enumerant.
    fn code(self) -> i64;
}

/// A protocol enumeration transmitted as a string.
pub trait Keyword: Copy + Default + 'static {
    /// Enumeration name used in error messages.
    const NAME: &'static str;

    /// The enumerant for `keyword`, if it is known.
    fn from_keyword(keyword: &str) -> Option<Self>;

    /// The wire spelling of this enumerant.
    fn keyword(self) -> &'static str;
}

/// Declares an integer-coded protocol enumeration.
///
/// The first variant is the `Default`. The generated type implements
/// [`Enumerant`] and serializes as its code.
#[macro_export]
macro_rules! enumerant {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident = $first_code:literal
            $(, $(#[$vmeta:meta])* $variant:ident = $code:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $(#[$first_meta])*
            #[default]
            $first,
            $($(#[$vmeta])* $variant,)*
        }

        impl $crate::Enumerant for $name {
            const NAME: &'static str = stringify!($name);

            fn from_code(code: i64) -> ::core::option::Option<Self> {
                match code {
                    $first_code => ::core::option::Option::Some(Self::$first),
                    $($code => ::core::option::Option::Some(Self::$variant),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn code(self) -> i64 {
                match self {
                    Self::$first => $first_code,
                    $(Self::$variant => $code,)*
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_i64($crate::Enumerant::code(*self))
            }
        }
    };
}

/// Declares a string-coded protocol enumeration.
///
/// The first variant is the `Default`. The generated type implements
/// [`Keyword`] and serializes as its keyword.
#[macro_export]
macro_rules! keyword {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident = $first_word:literal
            $(, $(#[$vmeta:meta])* $variant:ident = $word:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $(#[$first_meta])*
            #[default]
            $first,
            $($(#[$vmeta])* $variant,)*
        }

        impl $crate::Keyword for $name {
            const NAME: &'static str = stringify!($name);

            fn from_keyword(keyword: &str) -> ::core::option::Option<Self> {
                match keyword {
                    $first_word => ::core::option::Option::Some(Self::$first),
                    $($word => ::core::option::Option::Some(Self::$variant),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn keyword(self) -> &'static str {
                match self {
                    Self::$first => $first_word,
                    $(Self::$variant => $word,)*
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str($crate::Keyword::keyword(*self))
            }
        }
    };
}
