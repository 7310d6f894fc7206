//! Macros for declaring state keys.

/// Declare an enumeration of state keys with explicit integer values.
///
/// The generated type is `Copy`, hashable and serializable, so it can be
/// used directly as a machine key. It also gets `name()`, `index()`,
/// `from_index()`, `ALL`, and conversions to and from `i32`.
///
/// # Example
///
/// ```
/// use tickfsm::state_keys;
///
/// state_keys! {
///     pub enum Locomotion {
///         Idle = 0,
///         Moving = 1,
///         Jumping = 2,
///     }
/// }
///
/// assert_eq!(Locomotion::Moving.name(), "Moving");
/// assert_eq!(Locomotion::Jumping.index(), 2);
/// assert_eq!(Locomotion::from_index(0), Some(Locomotion::Idle));
/// assert_eq!(Locomotion::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        #[repr(i32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $value
            ),*
        }

        impl $name {
            /// Every key, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            pub fn index(self) -> i32 {
                self as i32
            }

            pub fn from_index(index: i32) -> Option<Self> {
                Self::ALL.iter().copied().find(|key| key.index() == index)
            }
        }

        impl From<$name> for i32 {
            fn from(key: $name) -> i32 {
                key.index()
            }
        }

        impl TryFrom<i32> for $name {
            type Error = i32;

            fn try_from(index: i32) -> Result<Self, Self::Error> {
                Self::from_index(index).ok_or(index)
            }
        }
    };
}
