//! Commands a list responds to and their default keys

use tui_listbox_core::{BindingCommand, Keybindings};

/// Keyboard commands understood by [`List`](crate::List)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListCommand {
    SelectPrevious,
    SelectNext,
    Activate,
}

impl BindingCommand for ListCommand {
    fn name(&self) -> &'static str {
        match self {
            ListCommand::SelectPrevious => "select_previous",
            ListCommand::SelectNext => "select_next",
            ListCommand::Activate => "activate",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "select_previous" => Some(ListCommand::SelectPrevious),
            "select_next" => Some(ListCommand::SelectNext),
            "activate" => Some(ListCommand::Activate),
            _ => None,
        }
    }

    fn all() -> &'static [Self] {
        &[
            ListCommand::SelectPrevious,
            ListCommand::SelectNext,
            ListCommand::Activate,
        ]
    }
}

/// Up/down arrows move the selection, space and enter activate
pub fn default_keybindings() -> Keybindings<ListCommand> {
    Keybindings::new()
        .with(ListCommand::SelectPrevious, &["up"])
        .with(ListCommand::SelectNext, &["down"])
        .with(ListCommand::Activate, &["space", "enter"])
}
