//! Drives a grid over a headless scene in simulated time.

use std::time::Duration;

use log::{debug, info, warn};

use brickwork::{
    BrickworkError, Grid, GridBuilder, GridState, POLL_INTERVAL, RESIZE_DEBOUNCE,
    config::{GridConfig, StyleConfig},
    export::render_svg,
    host::{ContainerRef, Host},
    layout::LayoutPlan,
    scene::{ElementId, Scene},
    timer::{ManualClock, Scheduler},
};

use crate::scene_file::{ItemSpec, SceneFile};

/// A grid bound to a [`Scene`] built from a [`SceneFile`].
#[derive(Debug)]
pub struct Simulation {
    grid: Grid<Scene, ManualClock>,
    container: ElementId,
    arrivals: Vec<ItemSpec>,
}

impl Simulation {
    /// Populates a scene with the items present from the start and builds
    /// the grid. Items with an arrival time are held back.
    ///
    /// # Errors
    ///
    /// Returns [`BrickworkError::Configuration`] for invalid grid options.
    pub fn start(file: &SceneFile, config: GridConfig) -> Result<Self, BrickworkError> {
        let mut scene = Scene::new(file.viewport());
        let selector = config
            .container()
            .or_else(|| file.container().selector())
            .map(str::to_string);
        let container = scene.add_container(selector.as_deref(), file.container().width())?;

        let (mut arrivals, present): (Vec<ItemSpec>, Vec<ItemSpec>) = file
            .items()
            .iter()
            .copied()
            .partition(|item| item.arrive_ms() > 0);
        for item in &present {
            scene.insert_item(container, item.size())?;
        }
        arrivals.sort_by_key(ItemSpec::arrive_ms);

        debug!(
            present = present.len(),
            arriving = arrivals.len(),
            viewport = file.viewport();
            "Scene populated"
        );

        let grid = GridBuilder::new(config)
            .with_container(ContainerRef::Handle(container))
            .build(scene, ManualClock::new())?;

        Ok(Self {
            grid,
            container,
            arrivals,
        })
    }

    /// Inserts the held-back items at their arrival times, then gives the
    /// grid one more poll to notice the last of them.
    ///
    /// # Errors
    ///
    /// Returns [`BrickworkError::Configuration`] if the grid is still waiting
    /// for items afterwards, i.e. more items were expected than the scene has.
    pub fn await_items(&mut self) -> Result<(), BrickworkError> {
        for item in std::mem::take(&mut self.arrivals) {
            let at = Duration::from_millis(item.arrive_ms());
            let now = self.grid.scheduler().now();
            self.grid.advance(at.saturating_sub(now));
            self.grid.host_mut().insert_item(self.container, item.size())?;
            debug!(at_ms = item.arrive_ms(); "Item arrived");
        }
        self.grid.advance(POLL_INTERVAL);

        if self.grid.state() == GridState::AwaitingReadiness {
            let present = self.grid.host().children(&self.container).len();
            return Err(BrickworkError::configuration(format!(
                "grid never became ready: {present} of {} items present",
                self.grid.config().items().unwrap_or_default()
            )));
        }

        info!(
            elapsed_ms = self.grid.scheduler().now().as_millis(),
            passes = self.grid.passes();
            "Grid laid out"
        );
        Ok(())
    }

    /// Resizes the viewport and lets the debounced re-layout run.
    pub fn resize(&mut self, width: f32) {
        if self.grid.host().measure(&self.container).width() != self.grid.host().viewport_width()
        {
            warn!(width; "Container has a fixed width, the resize will not change the layout");
        }

        self.grid.host_mut().resize_viewport(width);
        self.grid.notify_resize();
        self.grid.advance(RESIZE_DEBOUNCE);
    }

    pub fn grid(&self) -> &Grid<Scene, ManualClock> {
        &self.grid
    }

    /// The plan of the most recent layout pass.
    pub fn plan(&self) -> Option<&LayoutPlan> {
        self.grid.last_plan()
    }

    /// Renders the laid-out container as SVG.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured color is invalid.
    pub fn render(&self, style: &StyleConfig) -> Result<String, BrickworkError> {
        render_svg(self.grid.host(), self.container, style)
    }
}
