// File: crates/bargraph-core/src/graph.rs
// Summary: Bar graph component binding a scheduler to a container and the resize channel.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::error::{ChartError, Result};
use crate::resize::{ResizeChannel, Subscription};
use crate::scheduler::{RenderOutcome, RenderScheduler, SchedulerState};
use crate::series::Field;
use crate::surface::{Container, DrawSurface};
use crate::types::GraphConfig;

/// A mounted bar graph.
///
/// Mounting subscribes once to a [`ResizeChannel`]; every notification
/// re-measures the container and forwards the size to the scheduler. Dropping
/// the graph (or calling [`unmount`](Self::unmount)) releases the subscription
/// and detaches the surface, so no draw call happens afterwards.
pub struct BarGraph<T, S> {
    scheduler: Rc<RefCell<RenderScheduler<T, S>>>,
    container: Rc<dyn Container>,
    last_error: Rc<RefCell<Option<ChartError>>>,
    subscription: Option<Subscription>,
}

impl<T: 'static, S: DrawSurface + 'static> BarGraph<T, S> {
    pub fn new(container: Rc<dyn Container>, data: Vec<T>, x: Field<T>, y: Field<T>, config: GraphConfig) -> Self {
        Self {
            scheduler: Rc::new(RefCell::new(RenderScheduler::new(data, x, y, config))),
            container,
            last_error: Rc::new(RefCell::new(None)),
            subscription: None,
        }
    }

    /// Subscribe to `channel`, measure the container and attach `surface`.
    ///
    /// Mounting again replaces both the subscription and the surface.
    pub fn mount(&mut self, channel: &ResizeChannel, surface: S) -> Result<RenderOutcome> {
        self.subscription = None;

        let scheduler = Rc::downgrade(&self.scheduler);
        let container = Rc::clone(&self.container);
        let last_error = Rc::clone(&self.last_error);
        self.subscription = Some(channel.subscribe(move |_window| {
            let Some(scheduler) = scheduler.upgrade() else { return };
            let bounds = container.bounding_box();
            let outcome = match scheduler.try_borrow_mut() {
                Ok(mut s) => s.resize(bounds),
                Err(_) => {
                    trace!("resize during draw pass ignored");
                    return;
                }
            };
            if let Err(err) = outcome {
                warn!(error = %err, "resize render failed");
                *last_error.borrow_mut() = Some(err);
            }
        }));

        let bounds = self.container.bounding_box();
        self.scheduler.borrow_mut().attach(surface, bounds)
    }

    /// Re-measure the container outside of a channel notification.
    pub fn remeasure(&self) -> Result<RenderOutcome> {
        let bounds = self.container.bounding_box();
        self.scheduler.borrow_mut().resize(bounds)
    }

    pub fn set_data(&self, data: Vec<T>) -> Result<RenderOutcome> {
        self.scheduler.borrow_mut().set_data(data)
    }

    pub fn set_fields(&self, x: Field<T>, y: Field<T>) -> Result<RenderOutcome> {
        self.scheduler.borrow_mut().set_fields(x, y)
    }

    /// Most recent error raised by a channel-driven render, if any.
    pub fn take_error(&self) -> Option<ChartError> {
        self.last_error.borrow_mut().take()
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.borrow().state()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// Run `f` against the attached surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.scheduler.borrow().surface().map(f)
    }

    /// Tear down now and hand back the surface.
    pub fn unmount(mut self) -> Option<S> {
        self.teardown()
    }
}

impl<T, S> BarGraph<T, S> {
    fn teardown(&mut self) -> Option<S> {
        self.subscription = None;
        match self.scheduler.try_borrow_mut() {
            Ok(mut s) => s.detach(),
            Err(_) => None,
        }
    }
}

impl<T, S> Drop for BarGraph<T, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
