//! The layout controller.
//!
//! A [`Grid`] owns a validated [`GridConfig`], a [`Host`] and a [`Scheduler`].
//! It waits until the expected items are present, lays them out, and then
//! keeps the layout current as the viewport resizes.
//!
//! # Lifecycle
//!
//! ```text
//!   build ──► AwaitingReadiness ──(items present / static)──► Listening
//!                 │    ▲                                         │  ▲
//!                 └────┘ poll every 100ms                        └──┘ debounced resize
//! ```
//!
//! The controller never blocks. The host's event loop forwards timer firings
//! to [`Grid::on_timer`] and viewport resizes to [`Grid::notify_resize`].

mod debounce;

use std::{collections::HashSet, fmt, time::Duration};

use log::{debug, info, trace, warn};

use brickwork_core::{
    geometry::Size,
    host::{ContainerRef, Host, PositionMode, Transition},
    timer::{ManualClock, Scheduler, TimerId},
};

use crate::{
    config::GridConfig,
    error::BrickworkError,
    layout::{LayoutEngine, LayoutPlan},
};

use debounce::Debounce;

/// Interval between readiness checks while items are still arriving.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Quiet period after the last resize before the grid is laid out again.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

type ReadyCallback = Box<dyn FnOnce(&LayoutPlan)>;
type LayoutCallback = Box<dyn FnMut(&LayoutPlan)>;

/// Where a grid is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    /// Polling until the expected number of items is present.
    AwaitingReadiness,
    /// Laid out and re-laying out on resize. Terminal.
    Listening,
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingReadiness => write!(f, "awaiting readiness"),
            Self::Listening => write!(f, "listening"),
        }
    }
}

/// Builder for [`Grid`].
///
/// # Examples
///
/// ```
/// use std::{cell::Cell, rc::Rc};
///
/// use brickwork::{GridBuilder, GridState, config::GridConfig};
/// use brickwork_core::{geometry::Size, scene::Scene, timer::ManualClock};
///
/// let mut scene = Scene::new(800.0);
/// let container = scene.add_container(Some(".grid"), Some(300.0)).unwrap();
/// for height in [50.0, 80.0, 30.0] {
///     scene.insert_item(container, Size::new(90.0, height)).unwrap();
/// }
///
/// let ready = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&ready);
///
/// let config = GridConfig::new().with_container(".grid").with_items(3).with_gutter(10.0);
/// let grid = GridBuilder::new(config)
///     .on_ready(move |_plan| flag.set(true))
///     .build(scene, ManualClock::new())
///     .expect("valid configuration");
///
/// assert_eq!(grid.state(), GridState::Listening);
/// assert!(ready.get());
/// ```
pub struct GridBuilder<Handle> {
    config: GridConfig,
    container: Option<ContainerRef<Handle>>,
    on_ready: Option<ReadyCallback>,
    on_layout: Option<LayoutCallback>,
}

impl<Handle: fmt::Debug> GridBuilder<Handle> {
    /// Create a new grid builder with the given configuration.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            container: None,
            on_ready: None,
            on_layout: None,
        }
    }

    /// Identifies the container directly, overriding any configured selector.
    pub fn with_container(mut self, container: ContainerRef<Handle>) -> Self {
        self.container = Some(container);
        self
    }

    /// Registers a callback invoked once, after the first layout in the
    /// listening state.
    pub fn on_ready(mut self, callback: impl FnOnce(&LayoutPlan) + 'static) -> Self {
        self.on_ready = Some(Box::new(callback));
        self
    }

    /// Registers a callback invoked after every layout pass.
    pub fn on_layout(mut self, callback: impl FnMut(&LayoutPlan) + 'static) -> Self {
        self.on_layout = Some(Box::new(callback));
        self
    }

    /// Validates the configuration and starts readiness detection.
    ///
    /// Base styles are applied to whatever items are already present. If the
    /// grid is static, or already has its items, it is laid out before this
    /// returns; otherwise a poll timer is scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`BrickworkError::Configuration`] if no container is
    /// identified or any option is malformed.
    pub fn build<H, S>(self, host: H, scheduler: S) -> Result<Grid<H, S>, BrickworkError>
    where
        H: Host<Handle = Handle>,
        S: Scheduler,
    {
        self.config.validate_options()?;

        let target = match (self.container, self.config.container()) {
            (Some(target), _) => target,
            (None, Some(selector)) => ContainerRef::selector(selector),
            (None, None) => return Err(BrickworkError::configuration("missing `container`")),
        };
        if target
            .as_selector()
            .is_some_and(|selector| selector.trim().is_empty())
        {
            return Err(BrickworkError::configuration("`container` selector is empty"));
        }

        let engine = self.config.engine();
        let mut grid = Grid {
            config: self.config,
            target,
            container: None,
            engine,
            host,
            scheduler,
            state: GridState::AwaitingReadiness,
            poll_timer: None,
            resize: Debounce::new(RESIZE_DEBOUNCE),
            styled_container: None,
            styled_items: HashSet::new(),
            on_ready: self.on_ready,
            on_layout: self.on_layout,
            last_plan: None,
            passes: 0,
        };

        info!(container:% = grid.target, expected:? = grid.config.items(); "Grid created");

        grid.container = grid.host.resolve(&grid.target);
        grid.apply_base_styles();
        grid.await_readiness();

        Ok(grid)
    }
}

/// A masonry grid bound to a host and a scheduler.
pub struct Grid<H: Host, S: Scheduler> {
    config: GridConfig,
    target: ContainerRef<H::Handle>,
    container: Option<H::Handle>,
    engine: LayoutEngine,
    host: H,
    scheduler: S,
    state: GridState,
    poll_timer: Option<TimerId>,
    resize: Debounce,
    styled_container: Option<H::Handle>,
    styled_items: HashSet<H::Handle>,
    on_ready: Option<ReadyCallback>,
    on_layout: Option<LayoutCallback>,
    last_plan: Option<LayoutPlan>,
    passes: usize,
}

impl<H: Host, S: Scheduler> Grid<H, S> {
    /// Builds a grid without callbacks. See [`GridBuilder::build`].
    ///
    /// # Errors
    ///
    /// Returns [`BrickworkError::Configuration`] for an invalid configuration.
    pub fn new(config: GridConfig, host: H, scheduler: S) -> Result<Self, BrickworkError> {
        GridBuilder::new(config).build(host, scheduler)
    }

    pub fn state(&self) -> GridState {
        self.state
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to insert items.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The container as last resolved.
    pub fn container(&self) -> Option<&H::Handle> {
        self.container.as_ref()
    }

    /// The plan of the most recent layout pass.
    pub fn last_plan(&self) -> Option<&LayoutPlan> {
        self.last_plan.as_ref()
    }

    /// Number of layout passes performed so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Returns true while a readiness poll timer is scheduled.
    pub fn is_polling(&self) -> bool {
        self.poll_timer.is_some()
    }

    /// Returns true while a debounced re-layout is pending.
    pub fn is_resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Returns true if the grid may be laid out: it is static, or its
    /// container resolved and holds at least the expected number of items.
    pub fn is_ready(&self) -> bool {
        self.config.is_static() || self.items_present()
    }

    /// Lays the grid out now, equivalent to what a debounced resize triggers.
    ///
    /// Re-resolves the container, styles items that appeared since the last
    /// pass, and applies a fresh plan. Returns `None` if the container cannot
    /// be resolved.
    pub fn relayout(&mut self) -> Option<LayoutPlan> {
        self.container = self.host.resolve(&self.target);
        let Some(container) = self.container.clone() else {
            warn!(container:% = self.target; "Container not found, skipping layout");
            return None;
        };

        self.apply_base_styles();

        let items = self.host.children(&container);
        let sizes: Vec<Size> = items.iter().map(|item| self.host.measure(item)).collect();
        let width = self.host.measure(&container).width();

        let plan = self.engine.calculate(width, &sizes);
        self.apply_plan(&container, &items, &plan);
        self.passes += 1;

        debug!(
            pass = self.passes,
            width,
            items = items.len(),
            columns = plan.column_count();
            "Layout applied"
        );

        if self.state == GridState::Listening {
            if let Some(on_ready) = self.on_ready.take() {
                on_ready(&plan);
            }
        }
        if let Some(on_layout) = self.on_layout.as_mut() {
            on_layout(&plan);
        }

        self.last_plan = Some(plan.clone());
        Some(plan)
    }

    /// Handles a viewport resize notification.
    ///
    /// Ignored until the grid is listening; afterwards bursts are coalesced
    /// into a single re-layout [`RESIZE_DEBOUNCE`] after the last event.
    pub fn notify_resize(&mut self) {
        if self.state != GridState::Listening {
            trace!(state:% = self.state; "Resize ignored");
            return;
        }
        self.resize.trigger(&mut self.scheduler);
    }

    /// Handles a timer firing. Unknown timers are ignored.
    pub fn on_timer(&mut self, id: TimerId) {
        if self.poll_timer == Some(id) {
            self.poll();
        } else if self.resize.fire(id, &mut self.scheduler) {
            debug!("Resize settled");
            self.relayout();
        }
    }

    fn items_present(&self) -> bool {
        let Some(container) = &self.container else {
            return false;
        };
        let present = self.host.children(container).len();
        present >= self.config.items().unwrap_or_default()
    }

    fn await_readiness(&mut self) {
        if self.is_ready() {
            self.listen();
            return;
        }

        let id = self.scheduler.schedule_repeating(POLL_INTERVAL);
        debug!(timer = id.raw(); "Waiting for items");
        self.poll_timer = Some(id);
    }

    fn poll(&mut self) {
        self.container = self.host.resolve(&self.target);

        if !self.items_present() {
            trace!(
                found = self.container.is_some(),
                present = self
                    .container
                    .as_ref()
                    .map_or(0, |container| self.host.children(container).len()),
                expected:? = self.config.items();
                "Grid not ready"
            );
            return;
        }

        if let Some(id) = self.poll_timer.take() {
            self.scheduler.cancel(id);
        }
        self.apply_base_styles();
        self.listen();
    }

    fn listen(&mut self) {
        self.state = GridState::Listening;
        info!(container:% = self.target; "Grid ready");

        self.relayout();
        self.host.watch_resize();
    }

    /// Styles the container and every item not styled before.
    ///
    /// Items no longer present in the container are forgotten.
    fn apply_base_styles(&mut self) {
        let Some(container) = self.container.clone() else {
            return;
        };

        if self.styled_container.as_ref() != Some(&container) {
            self.host
                .set_position_mode(&container, PositionMode::Relative);
            self.styled_container = Some(container.clone());
        }

        let transition = self
            .config
            .animate()
            .then(|| Transition::ease(self.config.positioning()));

        let children: HashSet<H::Handle> = self.host.children(&container).into_iter().collect();
        self.styled_items.retain(|item| children.contains(item));

        for item in children {
            if self.styled_items.contains(&item) {
                continue;
            }
            self.host.set_position_mode(&item, PositionMode::Absolute);
            if let Some(transition) = transition {
                self.host.set_transition(&item, transition);
            }
            trace!(item:? = item; "Item styled");
            self.styled_items.insert(item);
        }
    }

    fn apply_plan(&mut self, container: &H::Handle, items: &[H::Handle], plan: &LayoutPlan) {
        let positioning = self.config.positioning();
        for placed in plan.placements() {
            if let Some(item) = items.get(placed.index()) {
                self.host.set_position(item, placed.position(), positioning);
            }
        }
        if let Some(height) = plan.container_height() {
            self.host.set_container_height(container, height);
        }
    }
}

impl<H: Host> Grid<H, ManualClock> {
    /// Moves simulated time forward, handling every timer that falls due.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(id) = self.scheduler.pop_due(until) {
            self.on_timer(id);
        }
        self.scheduler.settle(until);
    }
}

impl<H: Host, S: Scheduler> fmt::Debug for Grid<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("config", &self.config)
            .field("target", &self.target)
            .field("container", &self.container)
            .field("state", &self.state)
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}
