//! Integration tests for the grid controller, driven through a headless
//! scene and a simulated clock.

use std::{cell::Cell, rc::Rc, time::Duration};

use float_cmp::assert_approx_eq;

use brickwork::{
    BrickworkError, Grid, GridBuilder, GridState, POLL_INTERVAL, RESIZE_DEBOUNCE,
    config::GridConfig,
    geometry::{Point, Size},
    host::{ContainerRef, PositionMode, Positioning, Transition},
    scene::{ElementId, Scene},
    timer::ManualClock,
};

const HEIGHTS: [f32; 5] = [50.0, 80.0, 30.0, 60.0, 40.0];

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn config() -> GridConfig {
    GridConfig::new()
        .with_container(".grid")
        .with_items(HEIGHTS.len())
        .with_gutter(10.0)
}

/// A fluid `.grid` container with the given item heights, all 90 wide.
fn scene_with(viewport: f32, heights: &[f32]) -> (Scene, ElementId, Vec<ElementId>) {
    let mut scene = Scene::new(viewport);
    let container = scene.add_container(Some(".grid"), None).unwrap();
    let items = heights
        .iter()
        .map(|&height| scene.insert_item(container, Size::new(90.0, height)).unwrap())
        .collect();
    (scene, container, items)
}

fn position(grid: &Grid<Scene, ManualClock>, item: ElementId) -> Point {
    grid.host()
        .style(item)
        .and_then(|style| style.position())
        .expect("item was positioned")
}

fn counter() -> (Rc<Cell<usize>>, impl FnMut(&brickwork::layout::LayoutPlan) + 'static) {
    let count = Rc::new(Cell::new(0));
    let handle = Rc::clone(&count);
    (count, move |_: &brickwork::layout::LayoutPlan| {
        handle.set(handle.get() + 1)
    })
}

#[test]
fn test_ready_at_construction_lays_out_immediately() {
    let (scene, container, items) = scene_with(300.0, &HEIGHTS);
    let grid = Grid::new(config(), scene, ManualClock::new()).unwrap();

    assert_eq!(grid.state(), GridState::Listening);
    assert!(!grid.is_polling());
    assert_eq!(grid.passes(), 1);
    assert!(grid.host().resize_subscribed());

    let expected = [
        (0.0, 0.0),
        (100.0, 0.0),
        (200.0, 0.0),
        (0.0, 60.0),
        (100.0, 90.0),
    ];
    for (item, (x, y)) in items.iter().zip(expected) {
        let point = position(&grid, *item);
        assert_approx_eq!(f32, point.x(), x);
        assert_approx_eq!(f32, point.y(), y);
    }

    let height = grid.host().style(container).and_then(|style| style.height());
    assert_eq!(height, Some(140.0));
}

#[test]
fn test_static_grid_never_polls() {
    let (scene, _, _) = scene_with(300.0, &HEIGHTS[..2]);
    let config = GridConfig::new()
        .with_container(".grid")
        .with_gutter(10.0)
        .with_static(true);

    let grid = Grid::new(config, scene, ManualClock::new()).unwrap();
    assert_eq!(grid.state(), GridState::Listening);
    assert!(!grid.is_polling());
    assert_eq!(grid.scheduler().pending(), 0);
    assert_eq!(grid.last_plan().map(|plan| plan.len()), Some(2));
}

#[test]
fn test_polls_until_expected_items_arrive() {
    let (scene, container, _) = scene_with(300.0, &HEIGHTS[..2]);
    let (ready, on_ready) = counter();

    let mut grid = GridBuilder::new(config())
        .on_ready(on_ready)
        .build(scene, ManualClock::new())
        .unwrap();

    assert_eq!(grid.state(), GridState::AwaitingReadiness);
    assert!(grid.is_polling());
    assert_eq!(grid.passes(), 0);

    grid.advance(POLL_INTERVAL * 3);
    assert_eq!(grid.state(), GridState::AwaitingReadiness);
    assert_eq!(ready.get(), 0);

    for &height in &HEIGHTS[2..4] {
        grid.host_mut()
            .insert_item(container, Size::new(90.0, height))
            .unwrap();
    }
    grid.advance(POLL_INTERVAL * 2);
    assert_eq!(grid.state(), GridState::AwaitingReadiness);
    assert!(grid.is_polling());
    assert_eq!(grid.passes(), 0);

    grid.host_mut()
        .insert_item(container, Size::new(90.0, HEIGHTS[4]))
        .unwrap();
    assert_eq!(grid.state(), GridState::AwaitingReadiness);

    grid.advance(POLL_INTERVAL);
    assert_eq!(grid.state(), GridState::Listening);
    assert!(!grid.is_polling());
    assert_eq!(grid.scheduler().pending(), 0);
    assert_eq!(grid.passes(), 1);
    assert_eq!(ready.get(), 1);
}

#[test]
fn test_more_items_than_expected_is_ready() {
    let (scene, _, _) = scene_with(300.0, &HEIGHTS);
    let grid = Grid::new(config().with_items(3), scene, ManualClock::new()).unwrap();

    assert_eq!(grid.state(), GridState::Listening);
    assert_eq!(grid.last_plan().map(|plan| plan.len()), Some(5));
}

#[test]
fn test_container_appearing_late_is_picked_up() {
    let scene = Scene::new(300.0);
    let mut grid = Grid::new(config().with_items(2), scene, ManualClock::new()).unwrap();

    grid.advance(ms(250));
    assert_eq!(grid.state(), GridState::AwaitingReadiness);
    assert!(grid.container().is_none());

    let container = grid.host_mut().add_container(Some(".grid"), None).unwrap();
    for height in [20.0, 30.0] {
        grid.host_mut()
            .insert_item(container, Size::new(90.0, height))
            .unwrap();
    }

    // Next poll is at 300ms.
    grid.advance(ms(49));
    assert_eq!(grid.state(), GridState::AwaitingReadiness);
    grid.advance(ms(1));
    assert_eq!(grid.state(), GridState::Listening);
    assert_eq!(grid.container(), Some(&container));
}

#[test]
fn test_resize_burst_relayouts_once_after_last_event() {
    let (scene, _, items) = scene_with(300.0, &HEIGHTS);
    let (layouts, on_layout) = counter();
    let mut grid = GridBuilder::new(config())
        .on_layout(on_layout)
        .build(scene, ManualClock::new())
        .unwrap();
    assert_eq!(layouts.get(), 1);

    for step in 0..10 {
        grid.host_mut().resize_viewport(300.0 + 20.0 * step as f32);
        grid.notify_resize();
        grid.advance(ms(20));
    }
    // The last resize happened at 180ms; now is 200ms.
    assert!(grid.is_resize_pending());
    assert_eq!(grid.scheduler().pending(), 1);

    grid.advance(RESIZE_DEBOUNCE - ms(21));
    assert_eq!(layouts.get(), 1);

    grid.advance(ms(1));
    assert_eq!(layouts.get(), 2);
    assert!(!grid.is_resize_pending());

    // 480 wide: four columns.
    assert_eq!(grid.last_plan().map(|plan| plan.column_count()), Some(4));
    assert_approx_eq!(f32, position(&grid, items[3]).x(), 300.0);

    grid.advance(ms(1000));
    assert_eq!(layouts.get(), 2);
}

#[test]
fn test_resize_before_ready_is_ignored() {
    let (scene, _, _) = scene_with(300.0, &HEIGHTS[..1]);
    let mut grid = Grid::new(config(), scene, ManualClock::new()).unwrap();

    grid.notify_resize();
    assert!(!grid.is_resize_pending());
    // Only the poll timer.
    assert_eq!(grid.scheduler().pending(), 1);
}

#[test]
fn test_on_ready_fires_once() {
    let (scene, _, _) = scene_with(300.0, &HEIGHTS);
    let (ready, on_ready) = counter();
    let mut grid = GridBuilder::new(config())
        .on_ready(on_ready)
        .build(scene, ManualClock::new())
        .unwrap();

    grid.relayout();
    grid.notify_resize();
    grid.advance(RESIZE_DEBOUNCE);

    assert_eq!(grid.passes(), 3);
    assert_eq!(ready.get(), 1);
}

#[test]
fn test_relayout_is_idempotent() {
    let (scene, _, items) = scene_with(300.0, &HEIGHTS);
    let mut grid = Grid::new(config(), scene, ManualClock::new()).unwrap();

    let before: Vec<Point> = items.iter().map(|item| position(&grid, *item)).collect();
    let first = grid.last_plan().cloned();
    let second = grid.relayout();
    let after: Vec<Point> = items.iter().map(|item| position(&grid, *item)).collect();

    assert_eq!(first, second);
    assert_eq!(before, after);
}

#[test]
fn test_base_styles_applied_to_new_items() {
    let (scene, container, items) = scene_with(300.0, &HEIGHTS);
    let mut grid = Grid::new(config(), scene, ManualClock::new()).unwrap();

    let mode = |grid: &Grid<Scene, ManualClock>, id| {
        grid.host().style(id).map(|style| style.position_mode())
    };
    assert_eq!(mode(&grid, container), Some(PositionMode::Relative));
    assert!(
        items
            .iter()
            .all(|item| mode(&grid, *item) == Some(PositionMode::Absolute))
    );

    let late = grid
        .host_mut()
        .insert_item(container, Size::new(90.0, 25.0))
        .unwrap();
    assert_eq!(mode(&grid, late), Some(PositionMode::Static));

    grid.relayout();
    assert_eq!(mode(&grid, late), Some(PositionMode::Absolute));
    // Sixth item goes under the third (round robin over three columns).
    let point = position(&grid, late);
    assert_approx_eq!(f32, point.x(), 200.0);
    assert_approx_eq!(f32, point.y(), 40.0);
}

#[test]
fn test_transform_positioning_with_animation() {
    let (scene, _, items) = scene_with(300.0, &HEIGHTS);
    let config = config().with_use_transform(true).with_animate(true);
    let grid = Grid::new(config, scene, ManualClock::new()).unwrap();

    let style = grid.host().style(items[1]).unwrap();
    assert_eq!(style.offset(), None);
    assert_approx_eq!(f32, style.transform().unwrap().x(), 100.0);
    assert_eq!(
        style.transition(),
        Some(Transition::ease(Positioning::Transform))
    );
}

#[test]
fn test_no_transition_without_animate() {
    let (scene, _, items) = scene_with(300.0, &HEIGHTS);
    let grid = Grid::new(config(), scene, ManualClock::new()).unwrap();

    let style = grid.host().style(items[0]).unwrap();
    assert_eq!(style.transition(), None);
    assert!(style.offset().is_some());
}

#[test]
fn test_centering_and_shortest_column() {
    let (scene, _, items) = scene_with(300.0, &HEIGHTS);
    let config = config().with_center(true).with_use_min(true);
    let grid = Grid::new(config, scene, ManualClock::new()).unwrap();

    // 60 goes under 30 (third column), 40 under 50 (first column).
    let last = position(&grid, items[4]);
    assert_approx_eq!(f32, last.x(), 5.0);
    assert_approx_eq!(f32, last.y(), 60.0);
    let fourth = position(&grid, items[3]);
    assert_approx_eq!(f32, fourth.x(), 205.0);
    assert_eq!(grid.last_plan().and_then(|plan| plan.container_height()), Some(110.0));
}

#[test]
fn test_container_by_handle() {
    let mut scene = Scene::new(300.0);
    let container = scene.add_container(None, Some(300.0)).unwrap();
    scene.insert_item(container, Size::new(90.0, 20.0)).unwrap();

    let config = GridConfig::new().with_items(1).with_gutter(0.0);
    let grid = GridBuilder::new(config)
        .with_container(ContainerRef::Handle(container))
        .build(scene, ManualClock::new())
        .unwrap();

    assert_eq!(grid.state(), GridState::Listening);
    assert_eq!(grid.container(), Some(&container));
}

#[test]
fn test_configuration_errors() {
    let missing_container = GridConfig::new().with_items(1).with_gutter(10.0);
    let missing_gutter = GridConfig::new().with_container(".grid").with_items(1);
    let negative_gutter = config().with_gutter(-3.0);
    let blank = config().with_container("  ");

    for config in [missing_container, missing_gutter, negative_gutter, blank] {
        let result = Grid::new(config, Scene::new(300.0), ManualClock::new());
        assert!(
            matches!(result, Err(BrickworkError::Configuration(_))),
            "expected a configuration error, got {result:?}"
        );
    }
}

#[test]
fn test_static_grid_with_missing_container_lays_out_later() {
    let config = GridConfig::new()
        .with_container(".grid")
        .with_gutter(10.0)
        .with_static(true);
    let (ready, on_ready) = counter();
    let mut grid = GridBuilder::new(config)
        .on_ready(on_ready)
        .build(Scene::new(300.0), ManualClock::new())
        .unwrap();

    assert_eq!(grid.state(), GridState::Listening);
    assert_eq!(grid.passes(), 0);
    assert_eq!(ready.get(), 0);

    let container = grid.host_mut().add_container(Some(".grid"), None).unwrap();
    grid.host_mut()
        .insert_item(container, Size::new(90.0, 10.0))
        .unwrap();

    assert!(grid.relayout().is_some());
    assert_eq!(ready.get(), 1);
}

#[test]
fn test_empty_container_lays_out_without_height() {
    let (scene, container, _) = scene_with(300.0, &[]);
    let config = GridConfig::new()
        .with_container(".grid")
        .with_gutter(10.0)
        .with_static(true);
    let grid = Grid::new(config, scene, ManualClock::new()).unwrap();

    assert_eq!(grid.passes(), 1);
    assert!(grid.last_plan().is_some_and(|plan| plan.is_empty()));
    assert_eq!(
        grid.host().style(container).and_then(|style| style.height()),
        None
    );
}
