// File: crates/bargraph-core/tests/lifecycle.rs
// Purpose: Scheduler state machine and component teardown against a recording surface.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use bargraph_core::{
    observations, BarGraph, CanvasDims, ChartError, DrawSurface, Field, FixedContainer, GraphConfig, Observation,
    Projection, RenderOutcome, RenderScheduler, ResizeChannel, SchedulerState, Size, SkipReason,
};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Init(f64, f64),
    Resize(f64, f64),
    Render(usize),
}

/// Surface that records every call into a shared log.
#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
    last: Rc<RefCell<Option<Projection>>>,
    fail_render: bool,
    /// Number of upcoming `resize` calls that fail.
    failing_resizes: Rc<Cell<u32>>,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl DrawSurface for Recorder {
    fn init(&mut self, dims: &CanvasDims) -> Result<()> {
        self.calls.borrow_mut().push(Call::Init(dims.width, dims.height));
        Ok(())
    }

    fn resize(&mut self, dims: &CanvasDims) -> Result<()> {
        if self.failing_resizes.get() > 0 {
            self.failing_resizes.set(self.failing_resizes.get() - 1);
            anyhow::bail!("raster allocation failed");
        }
        self.calls.borrow_mut().push(Call::Resize(dims.width, dims.height));
        Ok(())
    }

    fn render(&mut self, projection: &Projection) -> Result<()> {
        if self.fail_render {
            anyhow::bail!("surface lost");
        }
        self.calls.borrow_mut().push(Call::Render(projection.points.len()));
        *self.last.borrow_mut() = Some(projection.clone());
        Ok(())
    }
}

fn sample() -> Vec<Observation> {
    observations(&[(1.0, 10.0), (2.0, 20.0), (3.0, 30.0)])
}

fn scheduler() -> RenderScheduler<Observation, Recorder> {
    RenderScheduler::new(sample(), Observation::x_field(), Observation::y_field(), GraphConfig::default())
}

#[test]
fn resize_before_attach_is_skipped_silently() {
    let mut s = scheduler();
    let outcome = s.resize(Size::new(300.0, 300.0)).expect("no error");
    assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::SurfaceNotReady));
    assert_eq!(s.state(), SchedulerState::Uninitialized);

    let outcome = s.set_data(sample()).expect("no error");
    assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::SurfaceNotReady));
}

#[test]
fn attach_initialises_once_then_resizes() {
    let rec = Recorder::default();
    let mut s = scheduler();

    assert!(s.attach(rec.clone(), Size::new(300.0, 300.0)).unwrap().is_drawn());
    assert_eq!(s.state(), SchedulerState::Initialized);
    assert!(s.resize(Size::new(640.0, 350.0)).unwrap().is_drawn());
    assert_eq!(
        s.resize(Size::new(640.0, 350.0)).unwrap(),
        RenderOutcome::Skipped(SkipReason::Unchanged)
    );

    assert_eq!(
        rec.calls(),
        vec![Call::Init(300.0, 300.0), Call::Render(3), Call::Resize(640.0, 350.0), Call::Render(3)]
    );
    let last = rec.last.borrow().clone().unwrap();
    assert_eq!(last.points[2].x, 640.0 - 60.0);
}

#[test]
fn attach_to_unmeasured_container_waits_for_first_size() {
    let rec = Recorder::default();
    let mut s = scheduler();

    let outcome = s.attach(rec.clone(), Size::new(0.0, 350.0)).unwrap();
    assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::ZeroArea));
    assert!(rec.calls().is_empty());

    assert!(s.resize(Size::new(800.0, 350.0)).unwrap().is_drawn());
    assert_eq!(rec.calls(), vec![Call::Init(800.0, 350.0), Call::Render(3)]);
}

#[test]
fn data_and_field_changes_redraw_without_reinit() {
    let rec = Recorder::default();
    let mut s = scheduler();
    s.attach(rec.clone(), Size::new(300.0, 300.0)).unwrap();

    assert!(s.set_data(observations(&[(1.0, 1.0), (2.0, 2.0)])).unwrap().is_drawn());
    assert_eq!(
        s.set_fields(Observation::x_field(), Observation::y_field()).unwrap(),
        RenderOutcome::Skipped(SkipReason::Unchanged)
    );
    let doubled = Field::new("y2", |o: &Observation| o.y * 2.0);
    assert!(s.set_fields(Observation::x_field(), doubled).unwrap().is_drawn());

    assert_eq!(rec.calls(), vec![Call::Init(300.0, 300.0), Call::Render(3), Call::Render(2), Call::Render(2)]);
    assert_eq!(rec.last.borrow().as_ref().unwrap().max_y, 4.0);
}

#[test]
fn each_draw_gets_a_fresh_render_id() {
    let mut s = scheduler();
    let RenderOutcome::Drawn(a) = s.attach(Recorder::default(), Size::new(300.0, 300.0)).unwrap() else {
        panic!("first attach should draw");
    };
    let RenderOutcome::Drawn(b) = s.redraw().unwrap() else {
        panic!("redraw should draw");
    };
    assert_ne!(a, b);
    assert_eq!(s.last_dims().unwrap().render_id, b);
}

#[test]
fn projection_errors_reach_the_caller() {
    let rec = Recorder::default();
    let mut s = scheduler();
    s.attach(rec.clone(), Size::new(300.0, 300.0)).unwrap();

    let err = s.set_data(Vec::new()).unwrap_err();
    assert!(matches!(err, ChartError::EmptySeries));
    assert_eq!(s.state(), SchedulerState::Initialized);
    assert!(s.set_data(sample()).unwrap().is_drawn());
}

#[test]
fn surface_errors_are_wrapped() {
    let rec = Recorder { fail_render: true, ..Recorder::default() };
    let mut s = scheduler();
    let err = s.attach(rec, Size::new(300.0, 300.0)).unwrap_err();
    assert!(matches!(err, ChartError::Surface(_)));
}

#[test]
fn failed_resize_is_retried_at_the_same_size() {
    let rec = Recorder::default();
    let mut s = scheduler();
    s.attach(rec.clone(), Size::new(300.0, 300.0)).unwrap();

    rec.failing_resizes.set(1);
    let err = s.resize(Size::new(500.0, 300.0)).unwrap_err();
    assert!(matches!(err, ChartError::Surface(_)));
    assert_eq!(s.last_dims().unwrap().width, 300.0);

    assert!(s.resize(Size::new(500.0, 300.0)).unwrap().is_drawn());
    assert_eq!(s.last_dims().unwrap().width, 500.0);
    assert_eq!(
        rec.calls(),
        vec![Call::Init(300.0, 300.0), Call::Render(3), Call::Resize(500.0, 300.0), Call::Render(3)]
    );
    assert_eq!(
        s.resize(Size::new(500.0, 300.0)).unwrap(),
        RenderOutcome::Skipped(SkipReason::Unchanged)
    );
}

#[test]
fn redraw_after_failed_resize_catches_the_surface_up() {
    let rec = Recorder::default();
    let mut s = scheduler();
    s.attach(rec.clone(), Size::new(300.0, 300.0)).unwrap();

    rec.failing_resizes.set(1);
    assert!(s.resize(Size::new(640.0, 350.0)).is_err());
    assert!(s.set_data(sample()).unwrap().is_drawn());
    assert_eq!(
        rec.calls(),
        vec![Call::Init(300.0, 300.0), Call::Render(3), Call::Resize(640.0, 350.0), Call::Render(3)]
    );
    assert_eq!(s.last_dims().unwrap().width, 640.0);
}

#[test]
fn scheduler_is_never_left_rendering() {
    let rec = Recorder { fail_render: true, ..Recorder::default() };
    let mut s = scheduler();
    assert!(s.attach(rec, Size::new(300.0, 300.0)).is_err());
    assert_eq!(s.state(), SchedulerState::Initialized);
    assert!(s.resize(Size::new(400.0, 300.0)).is_err());
    assert_eq!(s.state(), SchedulerState::Initialized);
}

#[test]
fn detached_scheduler_ignores_triggers() {
    let rec = Recorder::default();
    let mut s = scheduler();
    s.attach(rec.clone(), Size::new(300.0, 300.0)).unwrap();
    assert!(s.detach().is_some());

    assert_eq!(s.resize(Size::new(500.0, 300.0)).unwrap(), RenderOutcome::Skipped(SkipReason::Detached));
    assert_eq!(s.set_data(sample()).unwrap(), RenderOutcome::Skipped(SkipReason::Detached));
    assert_eq!(rec.calls().len(), 2);
}

#[test]
fn graph_follows_channel_and_unsubscribes_on_drop() {
    let channel = ResizeChannel::new();
    let container = Rc::new(Cell::new(Size::new(400.0, 350.0)));
    let rec = Recorder::default();

    let mut graph = BarGraph::new(
        container.clone(),
        sample(),
        Observation::x_field(),
        Observation::y_field(),
        GraphConfig::default(),
    );
    assert!(graph.mount(&channel, rec.clone()).unwrap().is_drawn());
    assert!(graph.is_subscribed());
    assert_eq!(channel.listener_count(), 1);

    // The window size in the notification is ignored; the container is re-measured.
    container.set(Size::new(900.0, 350.0));
    channel.notify(Size::new(1280.0, 720.0));
    assert_eq!(rec.calls().last(), Some(&Call::Render(3)));
    assert!(rec.calls().contains(&Call::Resize(900.0, 350.0)));

    drop(graph);
    assert_eq!(channel.listener_count(), 0);

    let before = rec.calls().len();
    container.set(Size::new(200.0, 350.0));
    channel.notify(Size::new(640.0, 480.0));
    assert_eq!(rec.calls().len(), before);
}

#[test]
fn channel_driven_errors_are_kept_for_the_host() {
    let channel = ResizeChannel::new();
    let container = Rc::new(Cell::new(Size::new(400.0, 350.0)));
    let mut graph = BarGraph::new(
        container.clone(),
        observations(&[(1.0, 0.0), (2.0, 0.0)]),
        Observation::x_field(),
        Observation::y_field(),
        GraphConfig::default(),
    );
    let err = graph.mount(&channel, Recorder::default()).unwrap_err();
    assert!(matches!(err, ChartError::DegenerateRange { .. }));
    assert_eq!(graph.state(), SchedulerState::Initialized);

    container.set(Size::new(500.0, 350.0));
    channel.notify(Size::new(500.0, 350.0));
    assert!(matches!(graph.take_error(), Some(ChartError::DegenerateRange { .. })));
    assert!(graph.take_error().is_none());
}

#[test]
fn unmount_returns_the_surface() {
    let channel = ResizeChannel::new();
    let mut graph = BarGraph::new(
        Rc::new(FixedContainer(Size::new(300.0, 300.0))),
        sample(),
        Observation::x_field(),
        Observation::y_field(),
        GraphConfig::default(),
    );
    graph.mount(&channel, Recorder::default()).unwrap();
    assert_eq!(graph.with_surface(|r| r.calls().len()), Some(2));

    let surface = graph.unmount().expect("surface handed back");
    assert_eq!(surface.calls().len(), 2);
    assert_eq!(channel.listener_count(), 0);
}
