use crate::{
    controls::{inherit, ChangeFlags, FrameworkElement, SolidColorBrush, Thickness},
    Data,
};
use std::{fmt, sync::Arc};
use tracing::trace;

/// An action invoked by a control.
///
/// Commands compare by identity: a command created anew on every rebuild is always a change.
/// Create it once and clone it to avoid re-applying the control.
#[derive(Clone, Data)]
pub struct Command(Arc<dyn Fn() + Send + Sync>);

impl Command {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Command {
        Command(Arc::new(f))
    }

    pub fn execute(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Command").field(&Arc::as_ptr(&self.0)).finish()
    }
}

/// Base of interactive controls.
#[derive(Debug)]
pub struct Control {
    base: FrameworkElement,
    font_size: f64,
    padding: Thickness,
    foreground: Option<SolidColorBrush>,
    is_enabled: bool,
}

inherit!(Control => FrameworkElement);

impl Default for Control {
    fn default() -> Self {
        Control {
            base: FrameworkElement::default(),
            font_size: 14.0,
            padding: Thickness::default(),
            foreground: None,
            is_enabled: true,
        }
    }
}

impl Control {
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn set_font_size(&mut self, font_size: f64) {
        self.font_size = font_size;
        self.mark_changed(ChangeFlags::LAYOUT | ChangeFlags::PAINT);
    }

    pub fn padding(&self) -> Thickness {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Thickness) {
        self.padding = padding;
        self.mark_changed(ChangeFlags::LAYOUT);
    }

    pub fn foreground(&self) -> Option<&SolidColorBrush> {
        self.foreground.as_ref()
    }

    pub fn set_foreground(&mut self, foreground: SolidColorBrush) {
        self.foreground = Some(foreground);
        self.mark_changed(ChangeFlags::PAINT);
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn set_is_enabled(&mut self, is_enabled: bool) {
        self.is_enabled = is_enabled;
        self.mark_changed(ChangeFlags::STATE | ChangeFlags::PAINT);
    }
}

/// Control displaying a single piece of content.
#[derive(Debug, Default)]
pub struct ContentControl {
    base: Control,
    content: Option<String>,
}

inherit!(ContentControl => Control);

impl ContentControl {
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn set_content(&mut self, content: Option<String>) {
        self.content = content;
        self.mark_changed(ChangeFlags::LAYOUT | ChangeFlags::PAINT);
    }
}

#[derive(Debug, Default)]
pub struct Button {
    base: ContentControl,
    command: Option<Command>,
}

inherit!(Button => ContentControl);

impl Button {
    pub fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }

    pub fn set_command(&mut self, command: Option<Command>) {
        self.command = command;
        self.mark_changed(ChangeFlags::STATE);
    }

    /// Runs the command of the button, if it's enabled.
    ///
    /// Returns whether a command was executed.
    pub fn click(&self) -> bool {
        match &self.command {
            Some(command) if self.is_enabled() => {
                trace!(content = self.content(), "button clicked");
                command.execute();
                true
            }
            _ => false,
        }
    }
}
