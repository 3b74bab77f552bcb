//! Column selection policies.
//!
//! A policy decides which column receives the next item. Two policies are
//! provided, selected through [`Placement`]:
//!
//! - [`RoundRobin`] deals items out in order, item `i` to column `i mod n`.
//! - [`ShortestColumn`] drops each item into the currently shortest column.

use super::columns::Column;

/// Trait defining how a layout pass picks a column for an item.
pub trait ColumnPolicy {
    /// Returns the position in `columns` that receives item `item_index`.
    ///
    /// `columns` is never empty.
    fn select(&self, columns: &[Column], item_index: usize) -> usize;
}

/// Assigns item `i` to column `i mod n`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobin;

impl ColumnPolicy for RoundRobin {
    fn select(&self, columns: &[Column], item_index: usize) -> usize {
        item_index % columns.len().max(1)
    }
}

/// Assigns each item to the column with the strictly smallest height.
///
/// Ties go to the lowest index, so identical inputs always produce identical
/// layouts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestColumn;

impl ColumnPolicy for ShortestColumn {
    fn select(&self, columns: &[Column], _item_index: usize) -> usize {
        let mut shortest = 0;
        for (position, column) in columns.iter().enumerate().skip(1) {
            if column.height() < columns[shortest].height() {
                shortest = position;
            }
        }
        shortest
    }
}

/// The available column policies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    #[default]
    RoundRobin,
    Shortest,
}

impl Placement {
    /// Maps the `use_min` flag to a policy.
    pub fn from_use_min(use_min: bool) -> Self {
        if use_min {
            Self::Shortest
        } else {
            Self::RoundRobin
        }
    }

    /// Returns the policy implementation.
    pub fn policy(self) -> &'static dyn ColumnPolicy {
        match self {
            Self::RoundRobin => &RoundRobin,
            Self::Shortest => &ShortestColumn,
        }
    }
}

/// Picks the column for item `item_index`.
///
/// With `use_min` this is the shortest column (lowest index on ties),
/// otherwise round-robin.
pub fn select_column(columns: &[Column], item_index: usize, use_min: bool) -> usize {
    Placement::from_use_min(use_min)
        .policy()
        .select(columns, item_index)
}
