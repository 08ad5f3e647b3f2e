//! Macros for declaring state and event vocabularies.

/// Generate a state enum with its `State` impl.
///
/// Variants must be fieldless; their declaration order becomes the dense
/// index. The generated enum derives serde traits, so the crate using the
/// macro needs a `serde` dependency with the `derive` feature.
///
/// # Example
///
/// ```
/// use statecraft::state_enum;
///
/// state_enum! {
///     pub enum WorkflowState {
///         Drafting,
///         Reviewing,
///         Published,
///     }
/// }
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
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            const COUNT: usize = 0 $(+ $crate::__count_one!($variant))*;

            fn index(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Generate an event enum with its `Event` impl.
///
/// # Example
///
/// ```
/// use statecraft::event_enum;
///
/// event_enum! {
///     pub enum WorkflowEvent {
///         Submit,
///         Approve,
///         Reject,
///     }
/// }
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
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __count_one {
    ($_t:tt) => {
        1
    };
}
