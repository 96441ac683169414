//! String-tag enums.
//!
//! An enum-like type is a closed set of fieldless cases, each with a declared
//! string tag. It serializes to its tag and deserializes by looking the tag
//! up in a static table. Use [`string_enum!`](crate::string_enum) to declare
//! one; it implements [`StringEnum`], [`ToJson`](crate::ToJson),
//! [`FromJson`](crate::FromJson), `Display` and `FromStr`.

use crate::error::{DeserializeError, DeserializeResult, SerializeResult};
use value_core::JsonValue;

/// A fieldless enum with a static tag table.
pub trait StringEnum: Sized + Copy + 'static {
    /// Name reported in errors.
    const NAME: &'static str;

    /// Every case with its tag, in declaration order.
    const VARIANTS: &'static [(Self, &'static str)];

    /// Tag of this case.
    fn tag(&self) -> &'static str;

    /// Look up the case named by `tag`.
    fn from_tag(tag: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(_, t)| *t == tag)
            .map(|(variant, _)| *variant)
    }
}

/// Serialize an enum case as its tag.
pub fn serialize_enum<E: StringEnum>(value: &E) -> SerializeResult<JsonValue> {
    Ok(JsonValue::String(value.tag().to_string()))
}

/// Deserialize an enum case from its tag.
pub fn deserialize_enum<E: StringEnum>(json: &JsonValue) -> DeserializeResult<E> {
    let JsonValue::String(tag) = json else {
        return Err(DeserializeError::EnumExpectedString {
            enum_name: E::NAME,
            found: json.kind(),
        });
    };
    parse_tag(tag)
}

/// Look up `tag`, failing with `UnknownVariant`.
pub fn parse_tag<E: StringEnum>(tag: &str) -> DeserializeResult<E> {
    E::from_tag(tag).ok_or_else(|| {
        tracing::debug!(enum_name = E::NAME, variant = tag, "Unknown enum variant");
        DeserializeError::UnknownVariant {
            enum_name: E::NAME,
            variant: tag.to_string(),
        }
    })
}

/// Declare a string-tag enum.
///
/// The enum derives `Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord`.
///
/// # Example
///
/// ```
/// use json_types::{deserialize, serialize, string_enum, JsonValue};
///
/// string_enum! {
///     /// Store status.
///     pub enum Status {
///         Open => "open",
///         Closed => "closed",
///     }
/// }
///
/// assert_eq!(serialize(&Status::Open).unwrap(), JsonValue::from("open"));
/// assert_eq!(deserialize::<Status>(&JsonValue::from("closed")), Ok(Status::Closed));
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::enums::StringEnum for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [(Self, &'static str)] = &[ $( ($name::$variant, $tag) ),+ ];

            fn tag(&self) -> &'static str {
                match self {
                    $( $name::$variant => $tag ),+
                }
            }
        }

        impl $crate::forward::ToJson for $name {
            fn to_json(&self) -> $crate::error::SerializeResult<$crate::JsonValue> {
                $crate::enums::serialize_enum(self)
            }
        }

        impl $crate::reverse::FromJson for $name {
            fn from_json(json: &$crate::JsonValue) -> $crate::error::DeserializeResult<Self> {
                $crate::enums::deserialize_enum(json)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::enums::StringEnum::tag(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::DeserializeError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $crate::enums::parse_tag(s)
            }
        }
    };
}
