//! Masonry layout computation.
//!
//! Given a container width and the sizes of equally wide items, the engine
//! packs items into columns and reports where each one goes. Nothing here
//! performs I/O; the [`grid`](crate::grid) controller applies plans to a host.
//!
//! # Overview
//!
//! - [`compute_columns`] - How many columns fit, and the space left over
//! - [`select_column`] / [`ColumnPolicy`] - Which column receives the next item
//! - [`place_item`] - Where an item lands within its column
//! - [`LayoutEngine`] - One full pass producing a [`LayoutPlan`]

mod columns;
mod engine;
mod policy;

pub use columns::{
    Column, ColumnSet, ItemPlacement, MIN_COLUMN_WIDTH, center_offset, compute_columns, place_item,
};
pub use engine::LayoutEngine;
pub use policy::{ColumnPolicy, Placement, RoundRobin, ShortestColumn, select_column};

use brickwork_core::geometry::Point;

/// The column and offset assigned to one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedItem {
    index: usize,
    column: usize,
    position: Point,
}

impl PlacedItem {
    pub fn new(index: usize, column: usize, position: Point) -> Self {
        Self {
            index,
            column,
            position,
        }
    }

    /// Position of the item in the sequence that was laid out.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index of the column the item was placed into.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Top-left corner of the item relative to the container.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// The outcome of one layout pass.
///
/// Plans are recomputed from scratch on every pass and never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    placements: Vec<PlacedItem>,
    column_count: usize,
    column_width: f32,
    center_offset: f32,
    leftover_space: f32,
    column_heights: Vec<f32>,
    container_height: Option<f32>,
}

impl LayoutPlan {
    fn empty() -> Self {
        Self {
            placements: Vec::new(),
            column_count: 0,
            column_width: 0.0,
            center_offset: 0.0,
            leftover_space: 0.0,
            column_heights: Vec::new(),
            container_height: None,
        }
    }

    /// Per-item placements, in item order.
    pub fn placements(&self) -> &[PlacedItem] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of columns used; zero only for an empty plan.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Item width plus gutter.
    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    /// Horizontal shift applied to every item when centering.
    pub fn center_offset(&self) -> f32 {
        self.center_offset
    }

    pub fn leftover_space(&self) -> f32 {
        self.leftover_space
    }

    /// Final height of each column.
    pub fn column_heights(&self) -> &[f32] {
        &self.column_heights
    }

    /// Height to give the container: tallest column plus one gutter.
    /// `None` when there was nothing to lay out.
    pub fn container_height(&self) -> Option<f32> {
        self.container_height
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use brickwork_core::geometry::{Bounds, Size};

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn heights_strategy() -> impl Strategy<Value = Vec<f32>> {
        prop::collection::vec(0.0f32..400.0, 1..40)
    }

    fn engine_strategy() -> impl Strategy<Value = LayoutEngine> {
        (
            (0u8..40).prop_map(f32::from),
            prop::option::of(1usize..8),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(gutter, max_columns, use_min, center)| {
                let engine = LayoutEngine::new()
                    .with_gutter(gutter)
                    .with_placement(Placement::from_use_min(use_min))
                    .with_center(center);
                match max_columns {
                    Some(max) => engine.with_max_columns(max),
                    None => engine,
                }
            })
    }

    fn to_items(width: f32, heights: &[f32]) -> Vec<Size> {
        heights.iter().map(|&h| Size::new(width, h)).collect()
    }

    // ===================
    // Property Test Functions
    // ===================

    /// There is always at least one column, never more than a non-zero
    /// maximum, and never more than the raw division allows (unless that is zero).
    fn check_column_bounds(
        container_width: f32,
        column_width: f32,
        gutter: f32,
        max_columns: Option<usize>,
    ) -> Result<(), TestCaseError> {
        let set = compute_columns(container_width, column_width, gutter, max_columns);
        let fitting = ((container_width + gutter) / column_width).floor() as usize;

        prop_assert!(set.len() >= 1);
        prop_assert!(set.len() <= fitting.max(1));
        if let Some(max) = max_columns.filter(|&max| max > 0) {
            prop_assert!(set.len() <= max);
        }
        Ok(())
    }

    /// Without `use_min`, item `i` goes to column `i mod n`.
    fn check_round_robin_assignment(
        container_width: f32,
        heights: Vec<f32>,
    ) -> Result<(), TestCaseError> {
        let plan = LayoutEngine::new()
            .with_gutter(10.0)
            .calculate(container_width, &to_items(90.0, &heights));

        for placed in plan.placements() {
            prop_assert_eq!(placed.column(), placed.index() % plan.column_count());
        }
        Ok(())
    }

    /// Running a pass twice on unchanged input yields identical output.
    fn check_pass_is_idempotent(
        engine: LayoutEngine,
        container_width: f32,
        heights: Vec<f32>,
    ) -> Result<(), TestCaseError> {
        let items = to_items(90.0, &heights);
        let first = engine.calculate(container_width, &items);
        let second = engine.calculate(container_width, &items);

        prop_assert_eq!(first, second);
        Ok(())
    }

    /// Container height equals the tallest column plus one gutter.
    fn check_container_height(
        engine: LayoutEngine,
        container_width: f32,
        heights: Vec<f32>,
    ) -> Result<(), TestCaseError> {
        let plan = engine.calculate(container_width, &to_items(90.0, &heights));
        let tallest = plan.column_heights().iter().copied().fold(0.0f32, f32::max);
        let height = plan.container_height().unwrap_or_default();

        prop_assert!(approx_eq!(
            f32,
            height,
            tallest + engine.gutter(),
            epsilon = 0.01
        ));
        Ok(())
    }

    /// Every item is placed exactly once and no two placed items overlap.
    fn check_items_do_not_overlap(
        engine: LayoutEngine,
        container_width: f32,
        heights: Vec<f32>,
    ) -> Result<(), TestCaseError> {
        let items = to_items(90.0, &heights);
        let plan = engine.calculate(container_width, &items);
        prop_assert_eq!(plan.len(), items.len());

        let bounds: Vec<Bounds> = plan
            .placements()
            .iter()
            .map(|placed| Bounds::new_from_top_left(placed.position(), items[placed.index()]))
            .collect();
        for (i, a) in bounds.iter().enumerate() {
            for b in &bounds[i + 1..] {
                prop_assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
        Ok(())
    }

    /// Within a column, items are stacked top to bottom in item order.
    fn check_columns_grow_monotonically(
        engine: LayoutEngine,
        container_width: f32,
        heights: Vec<f32>,
    ) -> Result<(), TestCaseError> {
        let plan = engine.calculate(container_width, &to_items(90.0, &heights));
        let mut last_top = vec![-1.0f32; plan.column_count()];

        for placed in plan.placements() {
            let top = placed.position().y();
            prop_assert!(top >= last_top[placed.column()]);
            last_top[placed.column()] = top;
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn column_bounds(
            container_width in 0.0f32..3000.0,
            column_width in 1.0f32..500.0,
            gutter in 0.0f32..50.0,
            max_columns in prop::option::of(0usize..10),
        ) {
            check_column_bounds(container_width, column_width, gutter, max_columns)?;
        }

        #[test]
        fn round_robin_assignment(container_width in 0.0f32..2000.0, heights in heights_strategy()) {
            check_round_robin_assignment(container_width, heights)?;
        }

        #[test]
        fn pass_is_idempotent(
            engine in engine_strategy(),
            container_width in 0.0f32..2000.0,
            heights in heights_strategy(),
        ) {
            check_pass_is_idempotent(engine, container_width, heights)?;
        }

        #[test]
        fn container_height(
            engine in engine_strategy(),
            container_width in 0.0f32..2000.0,
            heights in heights_strategy(),
        ) {
            check_container_height(engine, container_width, heights)?;
        }

        #[test]
        fn items_do_not_overlap(
            engine in engine_strategy(),
            container_width in 0.0f32..2000.0,
            heights in heights_strategy(),
        ) {
            check_items_do_not_overlap(engine, container_width, heights)?;
        }

        #[test]
        fn columns_grow_monotonically(
            engine in engine_strategy(),
            container_width in 0.0f32..2000.0,
            heights in heights_strategy(),
        ) {
            check_columns_grow_monotonically(engine, container_width, heights)?;
        }
    }
}
