//! Mapping from logical focus roles to renderer element handles.

use std::collections::HashMap;

use combo_session::{FocusRequest, FocusRole};

/// Element handles the renderer registered for each role. The widget only
/// ever names roles; the renderer resolves them here when it applies a
/// `FocusRequest`.
#[derive(Debug, Clone)]
pub struct RoleRegistry<H> {
    handles: HashMap<FocusRole, H>,
}

impl<H> Default for RoleRegistry<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> RoleRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle previously registered for `role`.
    pub fn register(&mut self, role: FocusRole, handle: H) -> Option<H> {
        self.handles.insert(role, handle)
    }

    pub fn unregister(&mut self, role: FocusRole) -> Option<H> {
        self.handles.remove(&role)
    }

    pub fn get(&self, role: FocusRole) -> Option<&H> {
        self.handles.get(&role)
    }

    pub fn resolve(&self, request: &FocusRequest) -> Option<&H> {
        self.get(request.role)
    }

    /// Drop option handles at or past `count` after the list shrank.
    pub fn retain_options(&mut self, count: usize) {
        self.handles.retain(|role, _| match role {
            FocusRole::Option(i) => *i < count,
            FocusRole::Input => true,
        });
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Element ids derived from the widget id, as the renderer assigns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    id: String,
}

impl ElementIds {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn input(&self) -> &str {
        &self.id
    }

    pub fn listbox(&self) -> String {
        format!("{}__listbox", self.id)
    }

    pub fn option(&self, index: usize) -> String {
        format!("{}__option--{index}", self.id)
    }

    pub fn selected_list(&self) -> String {
        format!("{}__list", self.id)
    }

    pub fn selected_option(&self, index: usize) -> String {
        format!("{}__selected-option--{index}", self.id)
    }

    pub fn assistive_hint(&self) -> String {
        format!("{}__assistiveHint", self.id)
    }

    pub fn for_role(&self, role: FocusRole) -> String {
        match role {
            FocusRole::Input => self.id.clone(),
            FocusRole::Option(i) => self.option(i),
        }
    }

    /// A registry pre-filled with the ids of the input and `option_count`
    /// options.
    pub fn registry(&self, option_count: usize) -> RoleRegistry<String> {
        let mut registry = RoleRegistry::new();
        registry.register(FocusRole::Input, self.id.clone());
        for i in 0..option_count {
            registry.register(FocusRole::Option(i), self.option(i));
        }
        registry
    }
}
