//! Built-in live controls.
//!
//! These are the live objects targeted by the models in [`crate::models`]. They only hold state:
//! layout and rendering are left to the host. Every setter records what it invalidated in the
//! [`ChangeFlags`] of the element, which the host collects with [`UIElement::take_changes`].
//!
//! Derived controls embed their base control and dereference to it.
use bitflags::bitflags;

mod button;
mod color;
mod element;
mod panel;
mod text;
mod values;

pub use button::{Button, Command, Control, ContentControl};
pub use color::{Color, ColorParseError};
pub use element::{FrameworkElement, UIElement, UIElementCollection};
pub use panel::{Panel, StackPanel};
pub use text::TextBlock;
pub use values::{SolidColorBrush, Thickness};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ChangeFlags: u32 {
        const NONE = 0;
        /// Any structural change (child added / removed).
        const STRUCTURE = (1 << 0);
        /// The element must be measured again.
        const LAYOUT = (1 << 1);
        /// The element must be repainted.
        const PAINT = (1 << 2);
        /// Non-visual state (name, tag, command...).
        const STATE = (1 << 3);
    }
}

/// Live enums, converted from the model enums through their integer representation.
macro_rules! live_enum {
    ($(#[$meta:meta])* pub enum $name:ident : $repr:ident { $($(#[$vmeta:meta])* $variant:ident = $value:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        #[repr($repr)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)*
        }

        impl TryFrom<$repr> for $name {
            type Error = $repr;

            fn try_from(value: $repr) -> Result<Self, $repr> {
                $(
                    if value == $name::$variant as $repr {
                        return Ok($name::$variant);
                    }
                )*
                Err(value)
            }
        }
    };
}

live_enum! {
    pub enum Visibility: i32 {
        #[default]
        Visible = 0,
        Collapsed = 1,
    }
}

live_enum! {
    pub enum Orientation: i32 {
        #[default]
        Vertical = 0,
        Horizontal = 1,
    }
}

live_enum! {
    pub enum HorizontalAlignment: i32 {
        Left = 0,
        Center = 1,
        Right = 2,
        #[default]
        Stretch = 3,
    }
}

live_enum! {
    /// Text wrapping. There is no zero value.
    pub enum TextWrapping: i32 {
        #[default]
        NoWrap = 1,
        Wrap = 2,
        WrapWholeWords = 3,
    }
}

/// Implements `Deref`, `AsRef` and `AsMut` from a derived control to its embedded base.
macro_rules! inherit {
    ($derived:ty => $base:ty) => {
        impl std::ops::Deref for $derived {
            type Target = $base;
            fn deref(&self) -> &$base {
                &self.base
            }
        }

        impl std::ops::DerefMut for $derived {
            fn deref_mut(&mut self) -> &mut $base {
                &mut self.base
            }
        }

        impl AsRef<$base> for $derived {
            fn as_ref(&self) -> &$base {
                &self.base
            }
        }

        impl AsMut<$base> for $derived {
            fn as_mut(&mut self) -> &mut $base {
                &mut self.base
            }
        }
    };
}
pub(crate) use inherit;

crate::impl_element!(
    UIElement,
    FrameworkElement => UIElement,
    Panel => FrameworkElement,
    StackPanel => Panel,
    TextBlock => FrameworkElement,
    Control => FrameworkElement,
    ContentControl => Control,
    Button => ContentControl,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_from_repr() {
        assert_eq!(TextWrapping::try_from(2), Ok(TextWrapping::Wrap));
        assert_eq!(TextWrapping::try_from(0), Err(0));
        assert_eq!(HorizontalAlignment::default(), HorizontalAlignment::Stretch);
        assert_eq!(Orientation::Horizontal as i32, 1);
    }
}
