//! Navigation state machine.

use super::keys::Action;

/// Which reference is highlighted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialSelection {
    /// The first reference in the output.
    #[default]
    First,
    /// The last reference in the output.
    Last,
}

/// How a selection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user picked the reference at this index.
    Edit(usize),
    /// The user left without picking.
    Quit,
}

/// Result of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The highlight was recomputed and needs drawing.
    Moved,
    /// Nothing changed.
    Unchanged,
    /// Selection is over.
    Done(Outcome),
}

/// Current position among `count` references, wrapping at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    index: usize,
    count: usize,
}

impl Selector {
    /// Create a selector over `count` references.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero; there is nothing to select from.
    pub fn new(count: usize, initial: InitialSelection) -> Self {
        assert!(count > 0, "selector needs at least one reference");

        let index = match initial {
            InitialSelection::First => 0,
            InitialSelection::Last => count - 1,
        };

        Self { index, count }
    }

    /// The highlighted index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Apply an action.
    pub const fn apply(&mut self, action: Action) -> Transition {
        match action {
            Action::Edit => return Transition::Done(Outcome::Edit(self.index)),
            Action::Quit => return Transition::Done(Outcome::Quit),
            Action::None => return Transition::Unchanged,
            Action::Next => self.index = (self.index + 1) % self.count,
            Action::Previous => {
                self.index = if self.index == 0 {
                    self.count - 1
                } else {
                    self.index - 1
                };
            }
            Action::First => self.index = 0,
            Action::Last => self.index = self.count - 1,
        }
        Transition::Moved
    }
}
