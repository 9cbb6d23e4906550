//! Declarative builder for TUI shortcuts

use super::Shortcut;

/// Builder for shortcut lists with the browser's common groups
#[derive(Default)]
pub struct ShortcutsBuilder {
    shortcuts: Vec<Shortcut>,
}

impl ShortcutsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Up/Down to move the cursor, Enter to commit
    pub fn with_selection(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("Up/Down", "Move"));
        self.shortcuts.push(Shortcut::new("Enter", "Select"));
        self
    }

    /// Esc clears the input
    pub fn with_clear(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("Esc", "Clear"));
        self
    }

    /// Tab moves focus in and out of the input
    pub fn with_focus(mut self, focused: bool) -> Self {
        let action = if focused { "Blur" } else { "Focus" };
        self.shortcuts.push(Shortcut::new("Tab", action));
        self
    }

    /// Add Ctrl+q for quit
    pub fn with_quit(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("C-q", "Quit"));
        self
    }

    pub fn add(mut self, key: &str, description: &str) -> Self {
        self.shortcuts.push(Shortcut::new(key, description));
        self
    }

    pub fn build(self) -> Vec<Shortcut> {
        self.shortcuts
    }
}
