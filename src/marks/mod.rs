//! Live position tracking across buffer mutations
//!
//! A mark is a byte offset into the gap buffer's backing region, registered
//! with a policy describing how it is rewritten when the buffer changes.
//! The document re-points every registered mark on every grow, insert,
//! delete, and gap move, so callers can hold a position across an edit and
//! read back where it ended up.
//!
//! ## marks/ Invariants
//!
//! - A live mark always lies outside the gap: `offset <= gap_start` or
//!   `offset >= gap_end`.
//! - Rewrites are staged for every entry first and committed second, so no
//!   event ever observes a half-updated set.
//! - Marks are small stable ids; the backing buffer may reallocate freely
//!   without invalidating them.
//!
//! The gap edges themselves are the only positions that slide with the gap;
//! they are fields of [`crate::buffer::GapBuffer`], not entries here.

use crate::buffer::GapSpan;

/// What happens to a mark inside a deleted range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteBias {
    /// Snap to the start of the deleted range
    Left,
    /// Snap to the end of the deleted range
    Right,
    /// Invalidate the mark
    Clear,
}

/// What happens to a mark sitting exactly at an insertion point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertBias {
    /// Stay before the inserted bytes
    Before,
    /// Advance past the inserted bytes
    After,
}

/// Rewrite policy for one mark
///
/// The two biases are independent axes; representing them as one enum each
/// makes conflicting flag combinations unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkPolicy {
    pub on_delete: DeleteBias,
    pub on_insert: InsertBias,
}

/// Stable handle to a registered mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

struct MarkEntry {
    /// Physical offset; `None` once a delete cleared the mark
    offset: Option<usize>,
    /// Staging field for the two-pass rewrite
    staged: Option<usize>,
    policy: MarkPolicy,
}

/// The registered marks of one document
#[derive(Default)]
pub struct MarkSet {
    slots: Vec<Option<MarkEntry>>,
    free: Vec<usize>,
}

impl MarkSet {
    #[must_use]
    pub fn new() -> Self {
        MarkSet {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Register a mark at a physical offset. Distinct registrations get
    /// distinct ids, even at the same offset.
    pub fn register(&mut self, offset: usize, policy: MarkPolicy) -> Mark {
        let entry = MarkEntry {
            offset: Some(offset),
            staged: None,
            policy,
        };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                Mark(idx)
            }
            None => {
                self.slots.push(Some(entry));
                Mark(self.slots.len() - 1)
            }
        }
    }

    /// Remove a mark; its slot is recycled
    pub fn release(&mut self, mark: Mark) {
        debug_assert!(self.slots[mark.0].is_some());
        self.slots[mark.0] = None;
        self.free.push(mark.0);
    }

    /// Current physical offset of a mark, or `None` if a delete cleared it
    #[must_use]
    pub fn get(&self, mark: Mark) -> Option<usize> {
        self.slots[mark.0].as_ref().and_then(|e| e.offset)
    }

    /// Re-point a mark explicitly (e.g. when the document is replaced)
    pub fn set(&mut self, mark: Mark, offset: usize) {
        if let Some(entry) = self.slots[mark.0].as_mut() {
            entry.offset = Some(offset);
        }
    }

    /// Rewrite every mark after a pure gap-geometry change (grow or gap
    /// move): logical positions are unchanged, physical offsets follow.
    pub fn rebase(&mut self, old: GapSpan, new: GapSpan) {
        self.flip(|offset, _| Some(new.expand(old.compact(offset))));
        self.check(new);
    }

    /// Rewrite every mark after `len` bytes were inserted at logical
    /// offset `at`
    pub fn on_insert(&mut self, at: usize, len: usize, old: GapSpan, new: GapSpan) {
        self.flip(|offset, policy| {
            let lold = old.compact(offset);
            let lnew = match lold.cmp(&at) {
                std::cmp::Ordering::Less => lold,
                std::cmp::Ordering::Equal => match policy.on_insert {
                    InsertBias::Before => at,
                    InsertBias::After => at + len,
                },
                std::cmp::Ordering::Greater => lold + len,
            };
            Some(new.expand(lnew))
        });
        self.check(new);
    }

    /// Rewrite every mark after the logical range `[l, r)` was deleted
    pub fn on_delete(&mut self, l: usize, r: usize, old: GapSpan, new: GapSpan) {
        self.flip(|offset, policy| {
            let lold = old.compact(offset);
            if lold <= l {
                Some(new.expand(lold))
            } else if lold >= r {
                Some(new.expand(lold - (r - l)))
            } else {
                match policy.on_delete {
                    DeleteBias::Left => Some(new.start),
                    DeleteBias::Right => Some(new.end),
                    DeleteBias::Clear => None,
                }
            }
        });
        self.check(new);
    }

    /// Two-pass rewrite: stage a new value for every live entry from the
    /// pre-event state, then commit them all, so the set is never observed
    /// half-updated.
    fn flip(&mut self, f: impl Fn(usize, MarkPolicy) -> Option<usize>) {
        for entry in self.slots.iter_mut().flatten() {
            entry.staged = entry.offset.and_then(|o| f(o, entry.policy));
        }
        for entry in self.slots.iter_mut().flatten() {
            entry.offset = entry.staged.take();
        }
    }

    /// Every live mark must lie outside the gap
    fn check(&self, span: GapSpan) {
        if cfg!(debug_assertions) {
            for entry in self.slots.iter().flatten() {
                if let Some(o) = entry.offset {
                    debug_assert!(
                        o <= span.start || o >= span.end,
                        "mark at {o} inside gap [{}, {})",
                        span.start,
                        span.end
                    );
                }
            }
        }
    }
}
