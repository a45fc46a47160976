use crate::controls::{inherit, ChangeFlags, FrameworkElement, SolidColorBrush, TextWrapping};

/// Displays a run of text.
#[derive(Debug)]
pub struct TextBlock {
    base: FrameworkElement,
    text: String,
    font_size: f64,
    text_wrapping: TextWrapping,
    foreground: Option<SolidColorBrush>,
}

inherit!(TextBlock => FrameworkElement);

impl Default for TextBlock {
    fn default() -> Self {
        TextBlock {
            base: FrameworkElement::default(),
            text: String::new(),
            font_size: 14.0,
            text_wrapping: TextWrapping::NoWrap,
            foreground: None,
        }
    }
}

impl TextBlock {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.mark_changed(ChangeFlags::LAYOUT | ChangeFlags::PAINT);
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn set_font_size(&mut self, font_size: f64) {
        self.font_size = font_size;
        self.mark_changed(ChangeFlags::LAYOUT | ChangeFlags::PAINT);
    }

    pub fn text_wrapping(&self) -> TextWrapping {
        self.text_wrapping
    }

    pub fn set_text_wrapping(&mut self, text_wrapping: TextWrapping) {
        self.text_wrapping = text_wrapping;
        self.mark_changed(ChangeFlags::LAYOUT);
    }

    pub fn foreground(&self) -> Option<&SolidColorBrush> {
        self.foreground.as_ref()
    }

    pub fn set_foreground(&mut self, foreground: SolidColorBrush) {
        self.foreground = Some(foreground);
        self.mark_changed(ChangeFlags::PAINT);
    }
}
