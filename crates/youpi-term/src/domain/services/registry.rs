use crate::domain::models::Action;
use crate::domain::models::ActionBox;

pub struct RegisteredAction {
    pub label: String,
    pub handler: ActionBox,
}

/// Ordered list of the main menu actions. Registration order is the display
/// order, and selections are 1-based.
#[derive(Default)]
pub struct ActionRegistry {
    actions: Vec<RegisteredAction>,
}

#[derive(Default)]
pub struct ActionRegistryBuilder {
    actions: Vec<RegisteredAction>,
}

impl ActionRegistry {
    pub fn builder() -> ActionRegistryBuilder {
        return ActionRegistryBuilder::default();
    }

    pub fn len(&self) -> usize {
        return self.actions.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.actions.is_empty();
    }

    pub fn labels(&self) -> Vec<&str> {
        return self.actions.iter().map(|a| a.label.as_str()).collect();
    }

    /// Returns the action shown at menu position `selection`.
    pub fn get(&self, selection: usize) -> Option<&RegisteredAction> {
        return selection
            .checked_sub(1)
            .and_then(|index| self.actions.get(index));
    }
}

impl ActionRegistryBuilder {
    /// Registers `handler` under its own description.
    pub fn action<A: Action + 'static>(self, handler: A) -> ActionRegistryBuilder {
        let label = handler.description();
        return self.labeled_action(&label, handler);
    }

    pub fn labeled_action<A: Action + 'static>(
        mut self,
        label: &str,
        handler: A,
    ) -> ActionRegistryBuilder {
        self.actions.push(RegisteredAction {
            label: label.to_string(),
            handler: Box::new(handler),
        });

        return self;
    }

    pub fn build(self) -> ActionRegistry {
        return ActionRegistry {
            actions: self.actions,
        };
    }
}
