//! A headless, in-memory [`Host`].
//!
//! [`Scene`] keeps a flat, ordered store of containers and items and records
//! every style mutation a grid performs, so layouts can be inspected in tests
//! or exported without a real rendering environment.
//!
//! Containers either have a fixed width or are *fluid*, in which case their
//! width follows the simulated viewport.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, trace};
use thiserror::Error;

use crate::{
    geometry::{Bounds, Point, Size},
    host::{ContainerRef, Host, PositionMode, Positioning, Transition},
};

/// Identifies an element inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised when mutating a [`Scene`] inconsistently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown container {0}")]
    UnknownContainer(ElementId),

    #[error("unknown item {0}")]
    UnknownItem(ElementId),

    #[error("duplicate selector `{0}`")]
    DuplicateSelector(String),
}

/// Everything a grid has written onto one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStyle {
    position_mode: PositionMode,
    offset: Option<Point>,
    transform: Option<Point>,
    transition: Option<Transition>,
    height: Option<f32>,
}

impl ElementStyle {
    pub fn position_mode(&self) -> PositionMode {
        self.position_mode
    }

    /// The `top`/`left` offset, if set.
    pub fn offset(&self) -> Option<Point> {
        self.offset
    }

    /// The translate transform, if set.
    pub fn transform(&self) -> Option<Point> {
        self.transform
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// An explicit height, as written onto containers.
    pub fn height(&self) -> Option<f32> {
        self.height
    }

    /// The effective position, preferring a transform over an offset.
    pub fn position(&self) -> Option<Point> {
        self.transform.or(self.offset)
    }
}

#[derive(Debug, Clone)]
enum Width {
    Fixed(f32),
    Fluid,
}

#[derive(Debug, Clone)]
struct ContainerNode {
    selector: Option<String>,
    width: Width,
    children: Vec<ElementId>,
    style: ElementStyle,
}

#[derive(Debug, Clone)]
struct ItemNode {
    parent: ElementId,
    size: Size,
    style: ElementStyle,
}

/// An in-memory rendering environment.
///
/// # Examples
///
/// ```
/// # use brickwork_core::{geometry::Size, host::{ContainerRef, Host}, scene::Scene};
/// let mut scene = Scene::new(1024.0);
/// let grid = scene.add_container(Some(".grid"), Some(300.0)).unwrap();
/// let item = scene.insert_item(grid, Size::new(90.0, 50.0)).unwrap();
///
/// let resolved = scene.resolve(&ContainerRef::selector(".grid"));
/// assert_eq!(resolved, Some(grid));
/// assert_eq!(scene.children(&grid), vec![item]);
/// ```
#[derive(Debug, Clone)]
pub struct Scene {
    viewport_width: f32,
    next_id: u32,
    containers: IndexMap<ElementId, ContainerNode>,
    items: IndexMap<ElementId, ItemNode>,
    resize_subscribed: bool,
}

impl Scene {
    /// Creates an empty scene with the given viewport width.
    pub fn new(viewport_width: f32) -> Self {
        Self {
            viewport_width,
            next_id: 0,
            containers: IndexMap::new(),
            items: IndexMap::new(),
            resize_subscribed: false,
        }
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Adds a container. A `width` of `None` makes it fluid.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::DuplicateSelector`] if another container already
    /// answers to the same selector.
    pub fn add_container(
        &mut self,
        selector: Option<&str>,
        width: Option<f32>,
    ) -> Result<ElementId, SceneError> {
        if let Some(selector) = selector {
            let taken = self
                .containers
                .values()
                .any(|node| node.selector.as_deref() == Some(selector));
            if taken {
                return Err(SceneError::DuplicateSelector(selector.to_string()));
            }
        }

        let id = self.allocate();
        self.containers.insert(
            id,
            ContainerNode {
                selector: selector.map(str::to_string),
                width: width.map_or(Width::Fluid, Width::Fixed),
                children: Vec::new(),
                style: ElementStyle::default(),
            },
        );
        debug!(container:% = id, selector:?; "Container added");
        Ok(id)
    }

    /// Appends an item to a container.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownContainer`] if `container` does not exist.
    pub fn insert_item(&mut self, container: ElementId, size: Size) -> Result<ElementId, SceneError> {
        if !self.containers.contains_key(&container) {
            return Err(SceneError::UnknownContainer(container));
        }

        let id = self.allocate();
        self.items.insert(
            id,
            ItemNode {
                parent: container,
                size,
                style: ElementStyle::default(),
            },
        );
        if let Some(node) = self.containers.get_mut(&container) {
            node.children.push(id);
        }
        trace!(container:% = container, item:% = id; "Item inserted");
        Ok(id)
    }

    /// Removes an item from its container.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownItem`] if `item` does not exist.
    pub fn remove_item(&mut self, item: ElementId) -> Result<(), SceneError> {
        let node = self
            .items
            .shift_remove(&item)
            .ok_or(SceneError::UnknownItem(item))?;
        if let Some(parent) = self.containers.get_mut(&node.parent) {
            parent.children.retain(|child| *child != item);
        }
        Ok(())
    }

    /// Changes an item's measured size, e.g. once its content loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownItem`] if `item` does not exist.
    pub fn resize_item(&mut self, item: ElementId, size: Size) -> Result<(), SceneError> {
        let node = self
            .items
            .get_mut(&item)
            .ok_or(SceneError::UnknownItem(item))?;
        node.size = size;
        Ok(())
    }

    /// Fixes a container's width.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownContainer`] if `container` does not exist.
    pub fn set_width(&mut self, container: ElementId, width: f32) -> Result<(), SceneError> {
        let node = self
            .containers
            .get_mut(&container)
            .ok_or(SceneError::UnknownContainer(container))?;
        node.width = Width::Fixed(width);
        Ok(())
    }

    /// Changes the viewport width. Fluid containers follow it.
    ///
    /// Delivering the resulting notification to a grid is the caller's job,
    /// exactly like a real event loop would.
    pub fn resize_viewport(&mut self, width: f32) {
        debug!(from = self.viewport_width, to = width; "Viewport resized");
        self.viewport_width = width;
    }

    /// Returns true once something subscribed to resize notifications.
    pub fn resize_subscribed(&self) -> bool {
        self.resize_subscribed
    }

    /// Returns the recorded style of a container or item.
    pub fn style(&self, id: ElementId) -> Option<&ElementStyle> {
        self.containers
            .get(&id)
            .map(|node| &node.style)
            .or_else(|| self.items.get(&id).map(|node| &node.style))
    }

    /// Bounds of an item inside its container, if it has been positioned.
    pub fn item_bounds(&self, item: ElementId) -> Option<Bounds> {
        let node = self.items.get(&item)?;
        let position = node.style.position()?;
        Some(Bounds::new_from_top_left(position, node.size))
    }

    /// Iterates over all containers in insertion order.
    pub fn containers(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.containers.keys().copied()
    }

    fn allocate(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn style_mut(&mut self, id: ElementId) -> Option<&mut ElementStyle> {
        if let Some(node) = self.containers.get_mut(&id) {
            return Some(&mut node.style);
        }
        self.items.get_mut(&id).map(|node| &mut node.style)
    }
}

impl Host for Scene {
    type Handle = ElementId;

    fn resolve(&self, target: &ContainerRef<ElementId>) -> Option<ElementId> {
        match target {
            ContainerRef::Handle(id) => self.containers.contains_key(id).then_some(*id),
            ContainerRef::Selector(selector) => self
                .containers
                .iter()
                .find(|(_, node)| node.selector.as_deref() == Some(selector.as_str()))
                .map(|(id, _)| *id),
        }
    }

    fn children(&self, container: &ElementId) -> Vec<ElementId> {
        self.containers
            .get(container)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn measure(&self, handle: &ElementId) -> Size {
        if let Some(node) = self.containers.get(handle) {
            let width = match node.width {
                Width::Fixed(width) => width,
                Width::Fluid => self.viewport_width,
            };
            return Size::new(width, node.style.height.unwrap_or_default());
        }
        self.items
            .get(handle)
            .map(|node| node.size)
            .unwrap_or_default()
    }

    fn set_position_mode(&mut self, handle: &ElementId, mode: PositionMode) {
        if let Some(style) = self.style_mut(*handle) {
            style.position_mode = mode;
        }
    }

    fn set_transition(&mut self, handle: &ElementId, transition: Transition) {
        if let Some(style) = self.style_mut(*handle) {
            style.transition = Some(transition);
        }
    }

    fn set_position(&mut self, item: &ElementId, position: Point, positioning: Positioning) {
        if let Some(node) = self.items.get_mut(item) {
            match positioning {
                Positioning::Offset => node.style.offset = Some(position),
                Positioning::Transform => node.style.transform = Some(position),
            }
        }
    }

    fn set_container_height(&mut self, container: &ElementId, height: f32) {
        if let Some(node) = self.containers.get_mut(container) {
            node.style.height = Some(height);
        }
    }

    fn watch_resize(&mut self) {
        self.resize_subscribed = true;
    }
}
