//! Macros for declaring state enums.

/// Declare a unit enum and implement [`State`](crate::core::State) for it.
///
/// Besides the trait, the macro derives `Clone`, `PartialEq`, `Debug` and the
/// serde traits, adds an `ALL` constant listing every variant in declaration
/// order, and implements `Display` using the state name.
///
/// # Example
///
/// ```
/// use orderstate::core::State;
/// use orderstate::state_enum;
///
/// state_enum! {
///     #[derive(Copy, Eq)]
///     pub enum TicketState {
///         Open,
///         Resolved,
///         Closed,
///     }
///     final: [Closed]
/// }
///
/// assert_eq!(TicketState::ALL.len(), 3);
/// assert_eq!(TicketState::Resolved.to_string(), "Resolved");
/// assert!(TicketState::Closed.is_final());
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

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            $vis const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
