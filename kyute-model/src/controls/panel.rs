use crate::controls::{
    inherit, ChangeFlags, FrameworkElement, Orientation, SolidColorBrush, Thickness, UIElementCollection,
};

/// Base of elements that hold a list of children.
#[derive(Debug, Default)]
pub struct Panel {
    base: FrameworkElement,
    background: Option<SolidColorBrush>,
    children: UIElementCollection,
}

inherit!(Panel => FrameworkElement);

impl Panel {
    pub fn background(&self) -> Option<&SolidColorBrush> {
        self.background.as_ref()
    }

    pub fn set_background(&mut self, background: SolidColorBrush) {
        self.background = Some(background);
        self.mark_changed(ChangeFlags::PAINT);
    }

    pub fn children(&self) -> &UIElementCollection {
        &self.children
    }

    /// Mutable access to the children. Marks the structure as changed.
    pub fn children_mut(&mut self) -> &mut UIElementCollection {
        self.base.mark_changed(ChangeFlags::STRUCTURE | ChangeFlags::LAYOUT);
        &mut self.children
    }
}

/// Arranges children in a single line.
#[derive(Debug, Default)]
pub struct StackPanel {
    base: Panel,
    orientation: Orientation,
    padding: Thickness,
    spacing: f64,
}

inherit!(StackPanel => Panel);

impl StackPanel {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.mark_changed(ChangeFlags::LAYOUT);
    }

    pub fn padding(&self) -> Thickness {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Thickness) {
        self.padding = padding;
        self.mark_changed(ChangeFlags::LAYOUT);
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: f64) {
        self.spacing = spacing;
        self.mark_changed(ChangeFlags::LAYOUT);
    }
}
