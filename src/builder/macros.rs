//! Macros for declaring state and event identifier enums.

/// Generate a unit enum implementing [`State`](crate::core::State).
///
/// The enum derives everything the trait requires. Variant names double as
/// state names.
///
/// # Example
///
/// ```
/// use krsm::core::State;
/// use krsm::state_enum;
///
/// state_enum! {
///     pub enum CatState {
///         Sleeping,
///         Purring,
///     }
/// }
///
/// assert_eq!(CatState::Purring.name(), "Purring");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $crate::__identifier_enum! {
            $crate::core::State;
            $(#[$meta])*
            $vis enum $name {
                $($(#[$variant_meta])* $variant),*
            }
        }
    };
}

/// Generate a unit enum implementing [`Event`](crate::core::Event).
///
/// # Example
///
/// ```
/// use krsm::core::Event;
/// use krsm::event_enum;
///
/// event_enum! {
///     pub enum CatEvent {
///         Pet,
///         Hit,
///     }
/// }
///
/// assert_eq!(CatEvent::Hit.name(), "Hit");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $crate::__identifier_enum! {
            $crate::core::Event;
            $(#[$meta])*
            $vis enum $name {
                $($(#[$variant_meta])* $variant),*
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __identifier_enum {
    (
        $trait:path;
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),*
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $trait for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
