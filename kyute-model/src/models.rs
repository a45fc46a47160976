//! Description models of the built-in controls.
use crate::{
    controls::{self, Color, Command},
    model,
};

model! {
    /// Any built-in element or value description.
    pub enum Node;

    pub enum Visibility: i32 {
        Visible = 0,
        Collapsed = 1,
    }

    pub enum Orientation: i32 {
        Vertical = 0,
        Horizontal = 1,
    }

    pub enum HorizontalAlignment: i32 {
        Left = 0,
        Center = 1,
        Right = 2,
        Stretch = 3,
    }

    pub enum TextWrapping: i32 {
        NoWrap = 1,
        Wrap = 2,
        WrapWholeWords = 3,
    }

    pub abstract element UIElement => controls::UIElement {
        opacity: f64,
        visibility: enum Visibility,
    }

    pub abstract element FrameworkElement: UIElement => controls::FrameworkElement {
        /// Width of the element, `NaN` for automatic.
        width: f64,
        /// Height of the element, `NaN` for automatic.
        height: f64,
        margin: nested Thickness,
        horizontal_alignment: enum HorizontalAlignment,
        name: Option<String>,
        tag: Option<String>,
    }

    pub abstract element Panel: FrameworkElement => controls::Panel {
        background: nested SolidColorBrush,
        /// Child elements. Compared by identity: build the list once if it doesn't change.
        children: list Node,
    }

    pub element StackPanel: Panel => controls::StackPanel {
        orientation: enum Orientation,
        padding: nested Thickness,
        spacing: f64,
    }

    pub element TextBlock: FrameworkElement => controls::TextBlock {
        text: String,
        font_size: f64,
        text_wrapping: enum TextWrapping,
        foreground: nested SolidColorBrush,
    }

    pub abstract element Control: FrameworkElement => controls::Control {
        font_size: f64,
        padding: nested Thickness,
        foreground: nested SolidColorBrush,
        is_enabled: bool,
    }

    pub element ContentControl: Control => controls::ContentControl {
        content: Option<String>,
    }

    pub element Button: ContentControl => controls::Button {
        command: Option<Command>,
    }

    pub value Thickness => controls::Thickness {
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    }

    pub value SolidColorBrush => controls::SolidColorBrush {
        color: Color,
        opacity: f64,
    }
}

impl ThicknessModel {
    /// Same thickness on all sides.
    pub fn uniform(value: f64) -> ThicknessModel {
        ThicknessModel::builder()
            .left(value)
            .top(value)
            .right(value)
            .bottom(value)
            .build()
    }
}

impl SolidColorBrushModel {
    pub fn new(color: Color) -> SolidColorBrushModel {
        SolidColorBrushModel::builder().color(color).build()
    }
}
