/// Implements [`Bind`](crate::Bind) for a record by listing its bound fields.
///
/// Fields are visited in the order given. Fields left out of the list are
/// never looked up or modified. Each entry is one of:
///
/// - `field` – name derived from the identifier (`db_host` → `DB_HOST`)
/// - `field = "NAME"` – explicit name
/// - `field = ",secret"` or `field = "NAME,secret"` – value masked in logs
/// - `field = "-"` – skipped
/// - `field: nested` – nested record, same prefix
/// - `field: nested("PREFIX_")` – nested record with an extended prefix
///
/// Nested records may be `T`, `Box<T>` or `Option<T>` of a bound record.
///
/// ```
/// use dragon_env::bind_fields;
///
/// #[derive(Default)]
/// struct Database {
///     url: String,
///     password: String,
/// }
///
/// #[derive(Default)]
/// struct Config {
///     name: String,
///     database: Option<Database>,
///     cache_dir: String,
/// }
///
/// bind_fields!(Database { url, password = ",secret" });
/// bind_fields!(Config {
///     name,
///     database: nested("DB_"),
///     cache_dir = "CACHE",
/// });
/// ```
#[macro_export]
macro_rules! bind_fields {
    (@field $this:ident, $binding:ident, ) => {};

    (@field $this:ident, $binding:ident, $f:ident : nested ( $prefix:literal ) $(, $($rest:tt)*)?) => {
        {
            const FIELD: $crate::Field = $crate::Field::nested(stringify!($f), $prefix);
            $binding.nested(&FIELD, &mut $this.$f)?;
        }
        $crate::bind_fields!(@field $this, $binding, $($($rest)*)?);
    };

    (@field $this:ident, $binding:ident, $f:ident : nested $(, $($rest:tt)*)?) => {
        {
            const FIELD: $crate::Field = $crate::Field::nested(stringify!($f), "");
            $binding.nested(&FIELD, &mut $this.$f)?;
        }
        $crate::bind_fields!(@field $this, $binding, $($($rest)*)?);
    };

    (@field $this:ident, $binding:ident, $f:ident = $tag:literal $(, $($rest:tt)*)?) => {
        {
            const FIELD: $crate::Field = $crate::Field::leaf(stringify!($f), $tag);
            $binding.leaf(&FIELD, &mut $this.$f)?;
        }
        $crate::bind_fields!(@field $this, $binding, $($($rest)*)?);
    };

    (@field $this:ident, $binding:ident, $f:ident $(, $($rest:tt)*)?) => {
        {
            const FIELD: $crate::Field = $crate::Field::leaf(stringify!($f), "");
            $binding.leaf(&FIELD, &mut $this.$f)?;
        }
        $crate::bind_fields!(@field $this, $binding, $($($rest)*)?);
    };

    ($ty:ty { $($body:tt)* }) => {
        impl $crate::Bind for $ty {
            fn bind(
                &mut self,
                binding: &$crate::Binding<'_>,
            ) -> ::std::result::Result<(), $crate::Error> {
                $crate::bind_fields!(@field self, binding, $($body)*);
                ::std::result::Result::Ok(())
            }
        }
    };
}

/// Implements [`Assign`](crate::Assign) for a type from the capabilities it has.
///
/// Capabilities are `setter` ([`Setter`](crate::Setter)), `text`
/// ([`TextUnmarshaler`](crate::TextUnmarshaler)), `binary`
/// ([`BinaryUnmarshaler`](crate::BinaryUnmarshaler)) and `json` (any
/// `serde::de::DeserializeOwned` type). The order they are listed in does not
/// matter; [`assign`](crate::assign) always prefers them in that order.
///
/// Listing `default` also implements [`Fresh`](crate::Fresh) from the type's
/// `Default`, which `Option<T>` destinations need.
///
/// ```
/// use dragon_env::{impl_assign, BoxError, Setter};
///
/// #[derive(Default)]
/// struct Verbosity(u8);
///
/// impl Setter for Verbosity {
///     fn set(&mut self, value: &str) -> Result<(), BoxError> {
///         self.0 = value.matches('v').count() as u8;
///         Ok(())
///     }
/// }
///
/// impl_assign!(Verbosity: setter, default);
/// ```
#[macro_export]
macro_rules! impl_assign {
    (@method setter) => {
        fn as_setter(&mut self) -> ::std::option::Option<&mut dyn $crate::Setter> {
            ::std::option::Option::Some(self)
        }
    };

    (@method text) => {
        fn as_text(&mut self) -> ::std::option::Option<&mut dyn $crate::TextUnmarshaler> {
            ::std::option::Option::Some(self)
        }
    };

    (@method binary) => {
        fn as_binary(&mut self) -> ::std::option::Option<&mut dyn $crate::BinaryUnmarshaler> {
            ::std::option::Option::Some(self)
        }
    };

    (@method json) => {
        fn kind(&mut self) -> $crate::Kind<'_> {
            $crate::Kind::Structured(self)
        }
    };

    (@method default) => {};

    (@fresh $ty:ty, default) => {
        impl $crate::Fresh for $ty {
            fn fresh() -> Self {
                <$ty as ::std::default::Default>::default()
            }
        }
    };

    (@fresh $ty:ty, $capability:ident) => {};

    ($ty:ty : $($capability:ident),+ $(,)?) => {
        impl $crate::Assign for $ty {
            $( $crate::impl_assign!(@method $capability); )+
        }

        $( $crate::impl_assign!(@fresh $ty, $capability); )+
    };
}
