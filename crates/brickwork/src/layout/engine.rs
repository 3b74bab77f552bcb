//! The layout pass.
//!
//! [`LayoutEngine`] is pure: it takes a container width and the measured
//! item sizes and returns a [`LayoutPlan`]. It never touches a host.

use log::debug;

use brickwork_core::geometry::{Point, Size};

use super::{
    LayoutPlan, PlacedItem,
    columns::{center_offset, compute_columns, place_item},
    policy::Placement,
};

/// Computes masonry layouts.
///
/// Configured builder-style; the defaults are a zero gutter, no column
/// maximum, round-robin placement and no centering.
///
/// # Examples
///
/// ```
/// # use brickwork::layout::{LayoutEngine, Placement};
/// # use brickwork_core::geometry::Size;
/// let engine = LayoutEngine::new()
///     .with_gutter(10.0)
///     .with_placement(Placement::Shortest);
///
/// let items = [Size::new(90.0, 50.0), Size::new(90.0, 80.0), Size::new(90.0, 30.0)];
/// let plan = engine.calculate(300.0, &items);
///
/// assert_eq!(plan.column_count(), 3);
/// assert_eq!(plan.container_height(), Some(90.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutEngine {
    gutter: f32,
    max_columns: Option<usize>,
    placement: Placement,
    center: bool,
}

impl LayoutEngine {
    /// Create a new layout engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spacing between items
    pub fn with_gutter(mut self, gutter: f32) -> Self {
        self.gutter = gutter;
        self
    }

    /// Set the upper bound on the number of columns
    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = Some(max_columns);
        self
    }

    /// Set the column selection policy
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Center the column block within the leftover space
    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn gutter(&self) -> f32 {
        self.gutter
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Lays out `items`, in order, inside a container `container_width` wide.
    ///
    /// Items share one width; the first item's width plus the gutter is the
    /// column width. With no items the plan is empty and carries no
    /// container height.
    pub fn calculate(&self, container_width: f32, items: &[Size]) -> LayoutPlan {
        let Some(first) = items.first() else {
            debug!("No items to lay out");
            return LayoutPlan::empty();
        };

        let column_width = first.width() + self.gutter;
        let mut column_set = compute_columns(
            container_width,
            column_width,
            self.gutter,
            self.max_columns,
        );
        let offset = center_offset(column_set.leftover_space(), self.center);
        let leftover_space = column_set.leftover_space();
        let policy = self.placement.policy();

        let mut placements = Vec::with_capacity(items.len());
        let mut max_height = 0.0f32;

        for (index, item) in items.iter().enumerate() {
            let columns = column_set.columns_mut();
            let selected = policy.select(columns, index);
            let column = &mut columns[selected];

            let placement =
                place_item(column, item.height(), column_width, self.gutter, offset);
            max_height = max_height.max(placement.column_height());

            placements.push(PlacedItem::new(
                index,
                column.index(),
                Point::new(placement.left(), placement.top()),
            ));
        }

        let column_heights: Vec<f32> = column_set
            .columns()
            .iter()
            .map(|column| column.height())
            .collect();
        let container_height = max_height + self.gutter;

        debug!(
            items = items.len(),
            columns = column_heights.len(),
            column_width,
            container_height;
            "Layout calculated"
        );

        LayoutPlan {
            placements,
            column_count: column_heights.len(),
            column_width,
            center_offset: offset,
            leftover_space,
            column_heights,
            container_height: Some(container_height),
        }
    }
}
