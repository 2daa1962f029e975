//! Call frames: per-invocation variable bindings and return addresses.

use nib_common::Value;

/// Name given to the implicit frame that top-level code runs in.
pub const TOP_FRAME: &str = "<top>";

/// One function activation: its name, local bindings, and where to
/// resume when it returns.
///
/// Bindings keep insertion order so a frame can be rendered the way the
/// program wrote it: the first `set` of a name fixes its position,
/// later writes update the value in place. Lookups touch only this
/// frame; there is no access to outer frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    name: String,
    vars: Vec<(String, Value)>,
    return_pc: usize,
}

impl Frame {
    /// The implicit frame under all top-level code. Never popped.
    pub(crate) fn top() -> Self {
        Self {
            name: TOP_FRAME.to_string(),
            vars: Vec::new(),
            return_pc: 0,
        }
    }

    pub(crate) fn new(name: String, return_pc: usize) -> Self {
        Self {
            name,
            vars: Vec::new(),
            return_pc,
        }
    }

    /// Function name, or [`TOP_FRAME`] for the top-level frame.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bindings in insertion order, oldest first.
    pub fn vars(&self) -> &[(String, Value)] {
        &self.vars
    }

    pub(crate) fn return_pc(&self) -> usize {
        self.return_pc
    }

    /// Look up a binding in this frame only.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.vars
            .iter()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| *value)
    }

    /// Write a binding: first write appends, later writes update in place.
    pub(crate) fn set(&mut self, name: &str, value: Value) {
        match self.vars.iter_mut().find(|(bound, _)| bound == name) {
            Some(slot) => slot.1 = value,
            None => self.vars.push((name.to_string(), value)),
        }
    }
}
