// Key binding table

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys) to actions; one action per source
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create a configuration from a list of bindings, later entries winning
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::default();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// The stock keyboard layout
    pub fn keyboard() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Bind a source to an action, returning what it was bound to before
    pub fn bind(&mut self, source: InputSource, action: Action) -> Option<Action> {
        let previous = self.bindings.insert(source, action);
        if let Some(previous) = previous.filter(|p| *p != action) {
            log::debug!("{:?} rebound from {:?} to {:?}", source, previous, action);
        }
        previous
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}
