//! User-controlled merge order.
//!
//! [`OrderingStore`] keeps a total order over a changing set of source
//! names. It is never recomputed from scratch: new names are appended,
//! vanished names are dropped, and everything the user rearranged stays
//! where it was put.
//!
//! Reorder requests arrive as [`OrderCommand`] messages so the front end
//! only has to translate its own events (button presses, typed commands)
//! into commands.
//!
//! # Examples
//!
//! ```
//! use pdfsplice::ordering::{OrderCommand, OrderingStore};
//!
//! let mut order = OrderingStore::new();
//! order.reconcile(["a.pdf", "b.pdf", "c.pdf"]);
//! order.apply(OrderCommand::MoveDown(0)).unwrap();
//! assert_eq!(order.current_order(), ["b.pdf", "a.pdf", "c.pdf"]);
//!
//! // An unrelated refresh keeps the user's arrangement.
//! order.reconcile(["a.pdf", "b.pdf", "c.pdf"]);
//! assert_eq!(order.current_order(), ["b.pdf", "a.pdf", "c.pdf"]);
//! ```

use std::collections::HashSet;

use crate::error::OrderingError;

/// An explicit reorder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderCommand {
    /// Swap the entry at this position with its predecessor.
    MoveUp(usize),
    /// Swap the entry at this position with its successor.
    MoveDown(usize),
    /// Swap two arbitrary positions.
    Swap(usize, usize),
    /// Replace the order with a permutation of the current names.
    SetOrder(Vec<String>),
}

impl OrderCommand {
    /// Positions this command reads, for bounds checking by callers that
    /// take them from user input.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            Self::MoveUp(i) | Self::MoveDown(i) => vec![*i],
            Self::Swap(a, b) => vec![*a, *b],
            Self::SetOrder(_) => Vec::new(),
        }
    }
}

/// Ordered, duplicate-free list of source names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderingStore {
    order: Vec<String>,
}

impl OrderingStore {
    /// Create an empty ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the ordering in line with the names currently present.
    ///
    /// Names not yet in the ordering are appended in the order `current`
    /// yields them; names missing from `current` are dropped. Survivors keep
    /// their relative order. Calling this again with the same names changes
    /// nothing.
    pub fn reconcile<I, S>(&mut self, current: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut incoming = Vec::new();
        let mut seen = HashSet::new();
        for name in current {
            let name = name.as_ref();
            if seen.insert(name.to_string()) {
                incoming.push(name.to_string());
            }
        }

        self.order.retain(|name| seen.contains(name));

        let kept: HashSet<String> = self.order.iter().cloned().collect();
        self.order
            .extend(incoming.into_iter().filter(|name| !kept.contains(name)));
    }

    /// Swap the entry at `index` with the one before it.
    ///
    /// Does nothing at position 0.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn move_up(&mut self, index: usize) {
        self.check_index(index);
        if index > 0 {
            self.order.swap(index - 1, index);
        }
    }

    /// Swap the entry at `index` with the one after it.
    ///
    /// Does nothing at the last position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn move_down(&mut self, index: usize) {
        self.check_index(index);
        if index + 1 < self.order.len() {
            self.order.swap(index, index + 1);
        }
    }

    /// Swap two arbitrary positions.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.check_index(a);
        self.check_index(b);
        self.order.swap(a, b);
    }

    /// Replace the order with `permutation`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::NotAPermutation`] unless `permutation` names
    /// every current entry exactly once and nothing else. The stored order
    /// is untouched on error.
    pub fn set_order<I, S>(&mut self, permutation: I) -> Result<(), OrderingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let proposed: Vec<String> = permutation
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();

        let known: HashSet<&str> = self.order.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();

        for name in &proposed {
            if !known.contains(name.as_str()) {
                return Err(not_a_permutation(format!("'{name}' is not selected")));
            }
            if !seen.insert(name.as_str()) {
                return Err(not_a_permutation(format!("'{name}' is listed twice")));
            }
        }

        if let Some(missing) = self.order.iter().find(|name| !seen.contains(name.as_str())) {
            return Err(not_a_permutation(format!("'{missing}' is missing")));
        }

        self.order = proposed;
        Ok(())
    }

    /// Dispatch a reorder command.
    ///
    /// # Errors
    ///
    /// Only [`OrderCommand::SetOrder`] can fail; see [`Self::set_order`].
    ///
    /// # Panics
    ///
    /// Panics on out-of-range positions, like the individual moves.
    pub fn apply(&mut self, command: OrderCommand) -> Result<(), OrderingError> {
        tracing::debug!(?command, "applying order command");
        match command {
            OrderCommand::MoveUp(index) => self.move_up(index),
            OrderCommand::MoveDown(index) => self.move_down(index),
            OrderCommand::Swap(a, b) => self.swap(a, b),
            OrderCommand::SetOrder(names) => self.set_order(names)?,
        }
        Ok(())
    }

    /// The live ordering.
    pub fn current_order(&self) -> &[String] {
        &self.order
    }

    /// Position of `name`, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|n| n == name)
    }

    /// Whether `name` is part of the ordering.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the ordering is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.order.len(),
            "order position {index} out of range for {} entries",
            self.order.len()
        );
    }
}

fn not_a_permutation(reason: String) -> OrderingError {
    OrderingError::NotAPermutation { reason }
}
