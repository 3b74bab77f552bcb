//! Column derivation and per-item placement.
//!
//! Columns are transient: every layout pass derives a fresh [`ColumnSet`] from
//! the container width and throws it away afterwards.

use log::trace;

/// Column widths below this are degenerate and yield a single column.
pub const MIN_COLUMN_WIDTH: f32 = 1.0;

/// A vertical slot tracking the height accumulated during one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    index: usize,
    height: f32,
    items: usize,
}

impl Column {
    /// Creates an empty column at the given position.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            height: 0.0,
            items: 0,
        }
    }

    /// Returns the 0-based position of the column.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the running height of the column.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the number of items placed into the column so far.
    pub fn len(&self) -> usize {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items == 0
    }
}

/// Columns for one pass, plus the horizontal space they leave unused.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSet {
    columns: Vec<Column>,
    leftover_space: f32,
}

impl ColumnSet {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Number of columns, always at least one.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Horizontal space not covered by columns. Negative when the column
    /// count was clamped by a maximum wider than the container allows.
    pub fn leftover_space(&self) -> f32 {
        self.leftover_space
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

/// Derives the columns that fit into `container_width`.
///
/// The count is `floor((container_width + gutter) / column_width)`, clamped
/// to at least one and to at most `max_columns`; a maximum of zero is no cap. A `column_width` below
/// [`MIN_COLUMN_WIDTH`] or non-finite yields a single column.
///
/// # Examples
///
/// ```
/// # use brickwork::layout::compute_columns;
/// let set = compute_columns(300.0, 100.0, 10.0, None);
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.leftover_space(), 10.0);
///
/// let clamped = compute_columns(300.0, 100.0, 10.0, Some(2));
/// assert_eq!(clamped.len(), 2);
/// ```
pub fn compute_columns(
    container_width: f32,
    column_width: f32,
    gutter: f32,
    max_columns: Option<usize>,
) -> ColumnSet {
    let fitting = if column_width >= MIN_COLUMN_WIDTH && column_width.is_finite() {
        ((container_width + gutter) / column_width).floor()
    } else {
        1.0
    };

    // `as` saturates, NaN becomes 0 and is clamped below.
    let mut count = (fitting as usize).max(1);
    if let Some(max_columns) = max_columns.filter(|&max| max > 0) {
        count = count.min(max_columns);
    }

    let leftover_space = container_width - count as f32 * column_width + gutter;
    trace!(count, container_width, column_width, leftover_space; "Computed columns");

    ColumnSet {
        columns: (0..count).map(Column::new).collect(),
        leftover_space,
    }
}

/// Horizontal offset that centers the column block.
///
/// Half the leftover space, floored, when centering is enabled and there is
/// positive leftover space; otherwise zero. A negative leftover never shifts
/// content past the container's left edge.
pub fn center_offset(leftover_space: f32, center: bool) -> f32 {
    if center && leftover_space > 0.0 {
        (leftover_space / 2.0).floor()
    } else {
        0.0
    }
}

/// Where one item lands, and the height of its column afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    left: f32,
    top: f32,
    column_height: f32,
}

impl ItemPlacement {
    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn column_height(&self) -> f32 {
        self.column_height
    }
}

/// Places an item at the bottom of `column` and grows the column.
///
/// The first item of a column gets no leading gutter.
pub fn place_item(
    column: &mut Column,
    item_height: f32,
    column_width: f32,
    gutter: f32,
    center_offset: f32,
) -> ItemPlacement {
    let top_gutter = if column.is_empty() { 0.0 } else { gutter };
    let left = column.index as f32 * column_width + center_offset;
    let top = column.height + top_gutter;

    column.height = top + item_height;
    column.items += 1;

    ItemPlacement {
        left,
        top,
        column_height: column.height,
    }
}
