//! Macros for ergonomic machine construction.

/// Generate a `State` implementation for a plain enum.
///
/// Variants are named after themselves unless a label is given with
/// `Variant = "label"`. Final and error states are listed after the enum.
///
/// # Example
///
/// ```
/// use flowstate::state_enum;
/// use flowstate::core::State;
///
/// state_enum! {
///     pub enum Checkout {
///         Cart = "cart",
///         Review = "review",
///         Complete = "complete",
///         Error = "error",
///     }
///     final: [Complete]
///     error: [Error]
/// }
///
/// assert_eq!(Checkout::Review.name(), "review");
/// assert!(Checkout::Error.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::__state_label!($variant $(, $label)?)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __state_label {
    ($variant:ident) => {
        stringify!($variant)
    };
    ($variant:ident, $label:literal) => {
        $label
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Idle,
            Loading = "loading",
            Success,
            Failed = "failed",
        }
        final: [Success]
        error: [Failed]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Loading.name(), "loading");
        assert_eq!(TestState::Failed.name(), "failed");

        assert!(TestState::Success.is_final());
        assert!(!TestState::Failed.is_final());
        assert!(TestState::Failed.is_error());
        assert!(!TestState::Idle.is_error());
    }

    #[test]
    fn state_enum_works_without_final_error() {
        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        assert!(!MinimalState::One.is_final());
        assert!(!MinimalState::Two.is_error());
    }
}
