//! Conversion of looked-up strings into typed destinations.
//!
//! A destination describes what it can do through [`Assign`]. [`assign`]
//! tries the capabilities in a fixed order and the first one available wins:
//!
//! 1. [`Setter`]
//! 2. [`TextUnmarshaler`]
//! 3. [`BinaryUnmarshaler`]
//! 4. the primitive [`Kind`] of the destination, where anything that is not a
//!    string, number, boolean or byte buffer is decoded as JSON.

mod error;
mod impls;
mod number;

use serde::de::DeserializeOwned;

pub use error::{BoxError, CoerceError};
pub use impls::Json;
pub use number::{Float, Integer};

use number::parse_bool;

/// Sets a value from its string form.
pub trait Setter {
    fn set(&mut self, value: &str) -> Result<(), BoxError>;
}

/// Decodes a value from its textual representation.
pub trait TextUnmarshaler {
    fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), BoxError>;
}

/// Decodes a value from raw bytes.
pub trait BinaryUnmarshaler {
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), BoxError>;
}

/// A destination decoded from a JSON document.
///
/// Decoding replaces the destination; existing map entries or struct fields
/// are not merged with the decoded ones.
pub trait Decode {
    fn decode_json(&mut self, text: &str) -> Result<(), serde_json::Error>;
}

impl<T: DeserializeOwned> Decode for T {
    fn decode_json(&mut self, text: &str) -> Result<(), serde_json::Error> {
        *self = serde_json::from_str(text)?;
        Ok(())
    }
}

/// The primitive shape of a destination, consulted after the capabilities.
pub enum Kind<'a> {
    Str(&'a mut String),
    Integer(&'a mut dyn Integer),
    Bool(&'a mut bool),
    Float(&'a mut dyn Float),
    /// Raw bytes take the UTF-8 bytes of the value verbatim.
    Bytes(&'a mut Vec<u8>),
    Structured(&'a mut dyn Decode),
    Unsupported(&'static str),
}

/// A destination that can be assigned from a string.
///
/// Every method has a default, so an implementation only overrides the
/// capabilities the type actually has. Use [`impl_assign!`](crate::impl_assign)
/// to wire up a type that implements one of the capability traits.
pub trait Assign {
    fn as_setter(&mut self) -> Option<&mut dyn Setter> {
        None
    }

    fn as_text(&mut self) -> Option<&mut dyn TextUnmarshaler> {
        None
    }

    fn as_binary(&mut self) -> Option<&mut dyn BinaryUnmarshaler> {
        None
    }

    fn kind(&mut self) -> Kind<'_> {
        Kind::Unsupported(std::any::type_name::<Self>())
    }
}

/// A value an absent optional destination starts from before assignment.
///
/// Types with a [`Default`] use it. Types without one, such as [`IpAddr`],
/// start from a placeholder that every successful assignment overwrites.
///
/// [`IpAddr`]: std::net::IpAddr
pub trait Fresh: Sized {
    fn fresh() -> Self;
}

/// Converts `value` into the type of `dest` and writes it in place.
///
/// Optional destinations are allocated with [`Fresh::fresh`] first, so
/// `Option<Option<u16>>` ends up as `Some(Some(n))`.
pub fn assign<T: Assign + ?Sized>(dest: &mut T, value: &str) -> Result<(), CoerceError> {
    if let Some(setter) = dest.as_setter() {
        return setter.set(value).map_err(CoerceError::Custom);
    }
    if let Some(text) = dest.as_text() {
        return text
            .unmarshal_text(value.as_bytes())
            .map_err(CoerceError::Custom);
    }
    if let Some(binary) = dest.as_binary() {
        return binary
            .unmarshal_binary(value.as_bytes())
            .map_err(CoerceError::Custom);
    }

    match dest.kind() {
        Kind::Str(s) => {
            s.clear();
            s.push_str(value);
        }
        Kind::Integer(n) => n.parse_auto(value)?,
        Kind::Bool(b) => *b = parse_bool(value)?,
        Kind::Float(f) => f.parse_float(value)?,
        Kind::Bytes(bytes) => *bytes = value.as_bytes().to_vec(),
        Kind::Structured(decoded) => decoded.decode_json(value)?,
        Kind::Unsupported(type_name) => return Err(CoerceError::Unsupported(type_name)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};
    use std::path::PathBuf;

    #[derive(Debug, Default, PartialEq)]
    struct Level(u8);

    impl Setter for Level {
        fn set(&mut self, value: &str) -> Result<(), BoxError> {
            self.0 = match value {
                "low" => 1,
                "high" => 9,
                other => return Err(format!("unknown level {other:?}").into()),
            };
            Ok(())
        }
    }

    crate::impl_assign!(Level: setter, default);

    // Both a setter and a text decoder; the setter must win.
    #[derive(Debug, Default)]
    struct Tagged(String);

    impl Setter for Tagged {
        fn set(&mut self, value: &str) -> Result<(), BoxError> {
            self.0 = format!("setter:{value}");
            Ok(())
        }
    }

    impl TextUnmarshaler for Tagged {
        fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), BoxError> {
            self.0 = format!("text:{}", std::str::from_utf8(text)?);
            Ok(())
        }
    }

    crate::impl_assign!(Tagged: text, setter);

    // Text decoder beats binary decoder.
    #[derive(Debug, Default)]
    struct Encoded(String);

    impl TextUnmarshaler for Encoded {
        fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), BoxError> {
            self.0 = format!("text:{}", std::str::from_utf8(text)?);
            Ok(())
        }
    }

    impl BinaryUnmarshaler for Encoded {
        fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), BoxError> {
            self.0 = format!("binary:{}", data.len());
            Ok(())
        }
    }

    crate::impl_assign!(Encoded: binary, text);

    #[derive(Debug, Default)]
    struct Blob(Vec<u8>);

    impl BinaryUnmarshaler for Blob {
        fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), BoxError> {
            self.0 = data.iter().rev().copied().collect();
            Ok(())
        }
    }

    crate::impl_assign!(Blob: binary);

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Limits {
        max: u32,
        burst: u32,
    }

    crate::impl_assign!(Limits: json);

    struct Opaque;

    impl Assign for Opaque {}

    #[test]
    fn test_setter_capability() {
        let mut level = Level::default();
        assign(&mut level, "high").unwrap();
        assert_eq!(level, Level(9));

        let err = assign(&mut level, "medium").unwrap_err();
        assert!(matches!(err, CoerceError::Custom(_)));
        assert_eq!(err.to_string(), "unknown level \"medium\"");
    }

    #[test]
    fn test_setter_wins_over_text() {
        let mut tagged = Tagged::default();
        assign(&mut tagged, "x").unwrap();
        assert_eq!(tagged.0, "setter:x");
    }

    #[test]
    fn test_text_wins_over_binary() {
        let mut encoded = Encoded::default();
        assign(&mut encoded, "abc").unwrap();
        assert_eq!(encoded.0, "text:abc");
    }

    #[test]
    fn test_binary_capability() {
        let mut blob = Blob::default();
        assign(&mut blob, "abc").unwrap();
        assert_eq!(blob.0, b"cba");
    }

    #[test]
    fn test_primitives() {
        let mut s = String::from("old");
        assign(&mut s, "new value").unwrap();
        assert_eq!(s, "new value");

        let mut port = 0u16;
        assign(&mut port, "0x1F90").unwrap();
        assert_eq!(port, 8080);

        let mut delta = 0i64;
        assign(&mut delta, "-12").unwrap();
        assert_eq!(delta, -12);

        let mut flag = false;
        assign(&mut flag, "T").unwrap();
        assert!(flag);

        let mut ratio = 0f32;
        assign(&mut ratio, "0.5").unwrap();
        assert_eq!(ratio, 0.5);
    }

    #[test]
    fn test_numeric_failures_keep_cause() {
        let mut small = 0i8;
        let err = assign(&mut small, "99999999999999999999").unwrap_err();
        assert!(matches!(err, CoerceError::Int(_)));
        assert_eq!(small, 0);

        let mut flag = false;
        assert!(matches!(
            assign(&mut flag, "maybe"),
            Err(CoerceError::Bool(_))
        ));

        let mut ratio = 0f64;
        assert!(matches!(
            assign(&mut ratio, "half"),
            Err(CoerceError::Float(_))
        ));
        assert!(matches!(
            assign(&mut ratio, "1e400"),
            Err(CoerceError::FloatRange(_))
        ));

        let mut narrow = 0f32;
        assert!(matches!(
            assign(&mut narrow, "1e40"),
            Err(CoerceError::FloatRange(_))
        ));
        assert_eq!(narrow, 0.0);

        let mut count = 0u8;
        assert!(matches!(assign(&mut count, "+5"), Err(CoerceError::Int(_))));
        assert_eq!(count, 0);
    }

    #[test]
    fn test_bytes_bypass_json() {
        let mut bytes = Vec::<u8>::new();
        assign(&mut bytes, "[1,2]").unwrap();
        assert_eq!(bytes, b"[1,2]");
    }

    #[test]
    fn test_structured_fallback() {
        let mut hosts = Vec::<String>::new();
        assign(&mut hosts, r#"["a","b"]"#).unwrap();
        assert_eq!(hosts, vec!["a", "b"]);

        let mut weights = HashMap::<String, f64>::new();
        assign(&mut weights, r#"{"x":1.5}"#).unwrap();
        assert_eq!(weights["x"], 1.5);

        let mut limits = Limits::default();
        assign(&mut limits, r#"{"max":10,"burst":3}"#).unwrap();
        assert_eq!(limits, Limits { max: 10, burst: 3 });

        let mut wrapped = Json::<Vec<u32>>::default();
        assign(&mut wrapped, "[1,2,3]").unwrap();
        assert_eq!(*wrapped, vec![1, 2, 3]);

        assert!(matches!(
            assign(&mut hosts, "not json"),
            Err(CoerceError::Json(_))
        ));
    }

    #[test]
    fn test_structured_decode_replaces_existing_value() {
        let mut weights = HashMap::from([("old".to_string(), 1.0f64)]);
        assign(&mut weights, r#"{"new":2.0}"#).unwrap();

        assert_eq!(weights.len(), 1);
        assert_eq!(weights["new"], 2.0);
    }

    #[test]
    fn test_optional_destinations_are_allocated() {
        let mut port: Option<u16> = None;
        assign(&mut port, "8080").unwrap();
        assert_eq!(port, Some(8080));

        let mut nested: Option<Box<Option<String>>> = None;
        assign(&mut nested, "deep").unwrap();
        assert_eq!(nested, Some(Box::new(Some("deep".to_string()))));

        let mut level: Option<Level> = None;
        assign(&mut level, "low").unwrap();
        assert_eq!(level, Some(Level(1)));
    }

    #[test]
    fn test_text_decoded_std_types() {
        let mut ip = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
        assign(&mut ip, "10.0.0.1").unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));

        let mut addr = SocketAddr::from(([0, 0, 0, 0], 0));
        assign(&mut addr, "127.0.0.1:8080").unwrap();
        assert_eq!(addr.port(), 8080);

        let mut optional_ip: Option<IpAddr> = None;
        assign(&mut optional_ip, "::1").unwrap();
        assert_eq!(optional_ip, Some("::1".parse::<IpAddr>().unwrap()));

        let mut optional_addr: Option<SocketAddr> = None;
        assign(&mut optional_addr, "10.0.0.1:9090").unwrap();
        assert_eq!(optional_addr, Some(SocketAddr::from(([10, 0, 0, 1], 9090))));

        let mut bad_addr: Option<SocketAddr> = None;
        assert!(matches!(
            assign(&mut bad_addr, "10.0.0.1"),
            Err(CoerceError::Custom(_))
        ));

        let mut dir: Option<PathBuf> = None;
        assign(&mut dir, "/var/lib/app").unwrap();
        assert_eq!(dir, Some(PathBuf::from("/var/lib/app")));

        assert!(matches!(
            assign(&mut ip, "not-an-ip"),
            Err(CoerceError::Custom(_))
        ));
    }

    #[test]
    fn test_unsupported_destination() {
        let mut opaque = Opaque;
        let err = assign(&mut opaque, "x").unwrap_err();
        assert!(matches!(err, CoerceError::Unsupported(name) if name.ends_with("Opaque")));
    }
}
