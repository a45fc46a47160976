use crate::{
    controls::{inherit, ChangeFlags, HorizontalAlignment, Thickness, Visibility},
    ElementPtr,
};
use std::mem;

/// Children of a panel.
pub type UIElementCollection = Vec<ElementPtr>;

/// Root of the control hierarchy.
#[derive(Debug)]
pub struct UIElement {
    opacity: f64,
    visibility: Visibility,
    changes: ChangeFlags,
}

impl Default for UIElement {
    fn default() -> Self {
        UIElement {
            opacity: 1.0,
            visibility: Visibility::Visible,
            changes: ChangeFlags::NONE,
        }
    }
}

impl UIElement {
    /// Records that the element was modified.
    pub fn mark_changed(&mut self, flags: ChangeFlags) {
        self.changes |= flags;
    }

    /// Changes since the last call to `take_changes`.
    pub fn changes(&self) -> ChangeFlags {
        self.changes
    }

    /// Returns and resets the changes recorded on this element.
    pub fn take_changes(&mut self) -> ChangeFlags {
        mem::take(&mut self.changes)
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
        self.mark_changed(ChangeFlags::PAINT);
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        self.mark_changed(ChangeFlags::LAYOUT);
    }
}

/// Element with a size, margins, and identification properties.
#[derive(Debug)]
pub struct FrameworkElement {
    base: UIElement,
    /// `NaN` means automatic.
    width: f64,
    height: f64,
    margin: Thickness,
    horizontal_alignment: HorizontalAlignment,
    name: Option<String>,
    tag: Option<String>,
}

inherit!(FrameworkElement => UIElement);

impl Default for FrameworkElement {
    fn default() -> Self {
        FrameworkElement {
            base: UIElement::default(),
            width: f64::NAN,
            height: f64::NAN,
            margin: Thickness::default(),
            horizontal_alignment: HorizontalAlignment::Stretch,
            name: None,
            tag: None,
        }
    }
}

impl FrameworkElement {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.mark_changed(ChangeFlags::LAYOUT);
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.mark_changed(ChangeFlags::LAYOUT);
    }

    pub fn margin(&self) -> Thickness {
        self.margin
    }

    pub fn set_margin(&mut self, margin: Thickness) {
        self.margin = margin;
        self.mark_changed(ChangeFlags::LAYOUT);
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn set_horizontal_alignment(&mut self, horizontal_alignment: HorizontalAlignment) {
        self.horizontal_alignment = horizontal_alignment;
        self.mark_changed(ChangeFlags::LAYOUT);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
        self.mark_changed(ChangeFlags::STATE);
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
        self.mark_changed(ChangeFlags::STATE);
    }
}
