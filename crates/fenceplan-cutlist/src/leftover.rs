//! Offcut pool shared across panel fitting runs.
//!
//! Leftovers are never removed. Consuming one flips its `consumed` flag so
//! the pool keeps a full history of what was cut from what.

use serde::{Deserialize, Serialize};

/// An offcut available for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leftover {
    pub id: String,
    pub length: f64,
    #[serde(default)]
    pub consumed: bool,
}

impl Leftover {
    pub fn new(id: impl Into<String>, length: f64) -> Self {
        Self {
            id: id.into(),
            length,
            consumed: false,
        }
    }
}

/// Ordered collection of leftovers with deterministic id allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeftoverPool {
    leftovers: Vec<Leftover>,
    next_id: u64,
}

impl LeftoverPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a pool with existing offcuts, kept in the given order.
    pub fn from_leftovers(leftovers: Vec<Leftover>) -> Self {
        Self {
            leftovers,
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.leftovers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leftovers.is_empty()
    }

    /// Every leftover ever seen, consumed or not, in pool order.
    pub fn all(&self) -> &[Leftover] {
        &self.leftovers
    }

    pub fn get(&self, id: &str) -> Option<&Leftover> {
        self.leftovers.iter().find(|l| l.id == id)
    }

    /// Unconsumed leftovers in pool order.
    pub fn available(&self) -> impl Iterator<Item = &Leftover> {
        self.leftovers.iter().filter(|l| !l.consumed)
    }

    /// Total length still available for reuse.
    pub fn available_length(&self) -> f64 {
        self.available().map(|l| l.length).sum()
    }

    /// Retires a leftover. Returns `false` if it is unknown or already
    /// consumed.
    pub fn consume(&mut self, id: &str) -> bool {
        match self.leftovers.iter_mut().find(|l| l.id == id && !l.consumed) {
            Some(leftover) => {
                leftover.consumed = true;
                true
            }
            None => false,
        }
    }

    /// Appends a new offcut with the next free `lo-N` id.
    pub fn spawn(&mut self, length: f64) -> Leftover {
        let id = self.allocate_id();
        let leftover = Leftover::new(id, length);
        self.leftovers.push(leftover.clone());
        leftover
    }

    /// Consumes the largest unconsumed leftover of at least `min_length`.
    ///
    /// Equal lengths resolve to the earliest in pool order.
    pub fn take_largest_at_least(&mut self, min_length: f64) -> Option<Leftover> {
        let mut best: Option<usize> = None;
        for (i, leftover) in self.leftovers.iter().enumerate() {
            if leftover.consumed || leftover.length < min_length {
                continue;
            }
            if best.map_or(true, |b| leftover.length > self.leftovers[b].length) {
                best = Some(i);
            }
        }

        let leftover = &mut self.leftovers[best?];
        leftover.consumed = true;
        Some(leftover.clone())
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("lo-{}", self.next_id);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
