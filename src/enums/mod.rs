//! Enumerated value types
//!
//! Each enum binds a symbolic variant to exactly one canonical wire string.
//! Parsing is an exact match against those strings and serialization always
//! yields the wire string, never the variant name.
//!
//! Concrete enums are declared with [`wire_enum!`](crate::wire_enum), which
//! also wires up `Display`, `FromStr` and serde support.

use std::fmt;

use thiserror::Error;

/// A wire string that matched no member of an enum
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not a valid {enum_name}, expected one of: {}", valid.join(", "))]
pub struct UnknownEnumValue {
    /// The rejected input
    pub value: String,
    /// Name of the enum that was searched
    pub enum_name: &'static str,
    /// Every accepted wire string, in declaration order
    pub valid: Vec<&'static str>,
}

impl UnknownEnumValue {
    pub fn new(value: &str, descriptor: &EnumDescriptor) -> Self {
        Self {
            value: value.to_string(),
            enum_name: descriptor.name,
            valid: descriptor.wire_values(),
        }
    }
}

/// Static description of an enum: its name and `(variant, wire)` pairs
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub members: &'static [(&'static str, &'static str)],
}

impl EnumDescriptor {
    /// Find the member whose wire string is exactly `wire`
    pub fn parse(&self, wire: &str) -> Result<EnumValue, UnknownEnumValue> {
        self.members
            .iter()
            .find(|(_, candidate)| *candidate == wire)
            .map(|&(symbol, member_wire)| EnumValue {
                enum_name: self.name,
                symbol,
                wire: member_wire,
            })
            .ok_or_else(|| UnknownEnumValue::new(wire, self))
    }

    pub fn wire_values(&self) -> Vec<&'static str> {
        self.members.iter().map(|(_, wire)| *wire).collect()
    }
}

/// A type-erased enum member, as stored inside a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub enum_name: &'static str,
    pub symbol: &'static str,
    pub wire: &'static str,
}

impl EnumValue {
    /// Recover the concrete enum, if this value belongs to `E`
    pub fn to_enum<E: WireEnum>(&self) -> Option<E> {
        if self.enum_name != E::DESCRIPTOR.name {
            return None;
        }
        E::parse(self.wire).ok()
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire)
    }
}

/// Closed set of wire strings
pub trait WireEnum: Sized + Copy + PartialEq + 'static {
    const DESCRIPTOR: &'static EnumDescriptor;
    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// Canonical wire string of this member
    fn as_wire(&self) -> &'static str;

    /// Variant name of this member
    fn symbol(&self) -> &'static str;

    /// Exact-match parse of a wire string
    fn parse(wire: &str) -> Result<Self, UnknownEnumValue> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.as_wire() == wire)
            .ok_or_else(|| UnknownEnumValue::new(wire, Self::DESCRIPTOR))
    }

    fn to_value(&self) -> EnumValue {
        EnumValue {
            enum_name: Self::DESCRIPTOR.name,
            symbol: self.symbol(),
            wire: self.as_wire(),
        }
    }
}

/// Declare an enum whose variants map one-to-one onto wire strings.
///
/// ```
/// use datatrans::enums::WireEnum;
///
/// datatrans::wire_enum! {
///     /// Serving temperature
///     pub enum Temperature {
///         Hot => "hot",
///         Cold => "cold",
///     }
/// }
///
/// assert_eq!(Temperature::Hot.as_wire(), "hot");
/// assert_eq!(Temperature::parse("cold").unwrap(), Temperature::Cold);
/// assert!(Temperature::parse("Cold").is_err());
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $crate::enums::WireEnum for $name {
            const DESCRIPTOR: &'static $crate::enums::EnumDescriptor =
                &$crate::enums::EnumDescriptor {
                    name: stringify!($name),
                    members: &[$((stringify!($variant), $wire)),+],
                };
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_wire(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            fn symbol(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::enums::WireEnum::as_wire(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::enums::UnknownEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as $crate::enums::WireEnum>::parse(s)
            }
        }

        impl $crate::serialize::JsonSerial for $name {
            fn json_serial(&self) -> $crate::serialize::SerializeResult<::serde_json::Value> {
                Ok(::serde_json::Value::String(
                    $crate::enums::WireEnum::as_wire(self).to_string(),
                ))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::enums::WireEnum::as_wire(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let wire = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::enums::WireEnum>::parse(&wire).map_err(::serde::de::Error::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::wire_enum! {
        enum Doneness {
            Rare => "rare",
            Medium => "medium",
            WellDone => "well done",
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Doneness::parse("well done").unwrap(), Doneness::WellDone);
        assert!(Doneness::parse("Well Done").is_err());
        assert!(Doneness::parse("WellDone").is_err());
    }

    #[test]
    fn test_unknown_value_lists_valid_set() {
        let err = Doneness::parse("burnt").unwrap_err();
        assert_eq!(err.enum_name, "Doneness");
        assert_eq!(err.valid, vec!["rare", "medium", "well done"]);
        assert!(err.to_string().contains("burnt"));
    }

    #[test]
    fn test_every_member_round_trips() {
        for member in Doneness::ALL {
            assert_eq!(Doneness::parse(member.as_wire()).unwrap(), *member);
            assert_eq!(member.to_string(), member.as_wire());
        }
    }

    #[test]
    fn test_serde_uses_wire_string() {
        let json = serde_json::to_string(&Doneness::WellDone).unwrap();
        assert_eq!(json, "\"well done\"");
        let back: Doneness = serde_json::from_str("\"rare\"").unwrap();
        assert_eq!(back, Doneness::Rare);
        assert!(serde_json::from_str::<Doneness>("\"blue\"").is_err());
    }

    #[test]
    fn test_erased_value() {
        let value = Doneness::Medium.to_value();
        assert_eq!(value.wire, "medium");
        assert_eq!(value.symbol, "Medium");
        assert_eq!(value.to_enum::<Doneness>(), Some(Doneness::Medium));
        let parsed = Doneness::DESCRIPTOR.parse("rare").unwrap();
        assert_eq!(parsed.to_enum::<Doneness>(), Some(Doneness::Rare));
    }
}
