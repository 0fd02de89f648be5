use std::collections::{BTreeMap, HashMap};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

use serde::de::DeserializeOwned;

use super::{Assign, BinaryUnmarshaler, BoxError, Fresh, Kind, Setter, TextUnmarshaler};

impl Assign for String {
    fn kind(&mut self) -> Kind<'_> {
        Kind::Str(self)
    }
}

impl Assign for bool {
    fn kind(&mut self) -> Kind<'_> {
        Kind::Bool(self)
    }
}

impl Assign for Vec<u8> {
    fn kind(&mut self) -> Kind<'_> {
        Kind::Bytes(self)
    }
}

impl Assign for serde_json::Value {
    fn kind(&mut self) -> Kind<'_> {
        Kind::Structured(self)
    }
}

macro_rules! assign_kind {
    ($variant:ident: $($t:ty),* $(,)?) => {
        $(
            impl Assign for $t {
                fn kind(&mut self) -> Kind<'_> {
                    Kind::$variant(self)
                }
            }
        )*
    };
}

assign_kind!(Integer: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
assign_kind!(Float: f32, f64);

// `Vec<u8>` is raw bytes; every other element type is a JSON array.
assign_kind!(Structured:
    Vec<String>, Vec<bool>, Vec<f32>, Vec<f64>,
    Vec<i8>, Vec<i16>, Vec<i32>, Vec<i64>, Vec<i128>, Vec<isize>,
    Vec<u16>, Vec<u32>, Vec<u64>, Vec<u128>, Vec<usize>,
);

impl<V: DeserializeOwned> Assign for HashMap<String, V> {
    fn kind(&mut self) -> Kind<'_> {
        Kind::Structured(self)
    }
}

impl<V: DeserializeOwned> Assign for BTreeMap<String, V> {
    fn kind(&mut self) -> Kind<'_> {
        Kind::Structured(self)
    }
}

macro_rules! assign_from_str {
    ($($t:ty),* $(,)?) => {
        $(
            impl TextUnmarshaler for $t {
                fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), BoxError> {
                    *self = std::str::from_utf8(text)?.parse()?;
                    Ok(())
                }
            }

            impl Assign for $t {
                fn as_text(&mut self) -> Option<&mut dyn TextUnmarshaler> {
                    Some(self)
                }
            }
        )*
    };
}

assign_from_str!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, PathBuf);

macro_rules! fresh_default {
    ($($t:ty),* $(,)?) => {
        $(
            impl Fresh for $t {
                fn fresh() -> Self {
                    <$t>::default()
                }
            }
        )*
    };
}

fresh_default!(
    String, bool, f32, f64, PathBuf, serde_json::Value,
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    Vec<u8>, Vec<String>, Vec<bool>, Vec<f32>, Vec<f64>,
    Vec<i8>, Vec<i16>, Vec<i32>, Vec<i64>, Vec<i128>, Vec<isize>,
    Vec<u16>, Vec<u32>, Vec<u64>, Vec<u128>, Vec<usize>,
);

impl Fresh for IpAddr {
    fn fresh() -> Self {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    }
}

impl Fresh for Ipv4Addr {
    fn fresh() -> Self {
        Ipv4Addr::UNSPECIFIED
    }
}

impl Fresh for Ipv6Addr {
    fn fresh() -> Self {
        Ipv6Addr::UNSPECIFIED
    }
}

impl Fresh for SocketAddr {
    fn fresh() -> Self {
        SocketAddr::new(IpAddr::fresh(), 0)
    }
}

impl<V> Fresh for HashMap<String, V> {
    fn fresh() -> Self {
        HashMap::new()
    }
}

impl<V> Fresh for BTreeMap<String, V> {
    fn fresh() -> Self {
        BTreeMap::new()
    }
}

impl<T> Fresh for Option<T> {
    fn fresh() -> Self {
        None
    }
}

impl<T: Fresh> Fresh for Box<T> {
    fn fresh() -> Self {
        Box::new(T::fresh())
    }
}

impl<T: Assign + Fresh> Assign for Option<T> {
    fn as_setter(&mut self) -> Option<&mut dyn Setter> {
        self.get_or_insert_with(T::fresh).as_setter()
    }

    fn as_text(&mut self) -> Option<&mut dyn TextUnmarshaler> {
        self.get_or_insert_with(T::fresh).as_text()
    }

    fn as_binary(&mut self) -> Option<&mut dyn BinaryUnmarshaler> {
        self.get_or_insert_with(T::fresh).as_binary()
    }

    fn kind(&mut self) -> Kind<'_> {
        self.get_or_insert_with(T::fresh).kind()
    }
}

impl<T: Assign + ?Sized> Assign for Box<T> {
    fn as_setter(&mut self) -> Option<&mut dyn Setter> {
        (**self).as_setter()
    }

    fn as_text(&mut self) -> Option<&mut dyn TextUnmarshaler> {
        (**self).as_text()
    }

    fn as_binary(&mut self) -> Option<&mut dyn BinaryUnmarshaler> {
        (**self).as_binary()
    }

    fn kind(&mut self) -> Kind<'_> {
        (**self).kind()
    }
}

/// Decodes any deserializable type from a JSON value.
///
/// The decoded value replaces the wrapped one rather than merging into it.
///
/// ```
/// use dragon_env::{assign, Json};
///
/// let mut ports = Json::<Vec<(String, u16)>>::default();
/// assign(&mut ports, r#"[["http", 80], ["https", 443]]"#)?;
/// assert_eq!(ports[1].1, 443);
/// # Ok::<(), dragon_env::CoerceError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: Default> Fresh for Json<T> {
    fn fresh() -> Self {
        Json(T::default())
    }
}

impl<T: DeserializeOwned> Assign for Json<T> {
    fn kind(&mut self) -> Kind<'_> {
        Kind::Structured(&mut self.0)
    }
}
