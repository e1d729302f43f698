//! Screen lifecycle and the host event loop.
//!
//! A "flow" is one screen: it configures its [`Context`] once on activation
//! and from then on only reacts to callbacks it registered there. [`App`]
//! plays the host framework. It owns the context, activates the flow, and on
//! every tick drains the tracking session and dispatches anchor events.
//!
//! # Lifecycle
//!
//! 1. `App::activate` calls [`ArFlow::on_init`] exactly once
//! 2. `App::tick` applies pending anchor events (handlers run to completion, in order)
//! 3. `App::frame` flattens the scene for the renderer
//! 4. dropping the `App` tears the session down with the context

use crate::{
    context::Context,
    render::Frame,
    tracking::TrackingEngine,
};

/// A screen that composes a scene inside an AR view.
pub trait ArFlow {
    /// Configure the session, the scene, the view options and any handlers.
    ///
    /// This is the only place a flow touches the context directly; everything
    /// later happens through the handlers registered here.
    fn on_init(&mut self, ctx: &mut Context);

    fn name(&self) -> &str;
}

/// Type alias for a flow constructor (factory function).
pub type FlowConstructor = Box<dyn FnOnce() -> Box<dyn ArFlow>>;

pub struct App {
    ctx: Context,
    flow: Box<dyn ArFlow>,
    activated: bool,
}

impl App {
    pub fn new(flow: Box<dyn ArFlow>, engine: Box<dyn TrackingEngine>) -> Self {
        Self {
            ctx: Context::new(engine),
            flow,
            activated: false,
        }
    }

    /// Runs `on_init` the first time; later calls do nothing.
    pub fn activate(&mut self) {
        if self.activated {
            return;
        }
        log::info!("Activating {}", self.flow.name());
        self.flow.on_init(&mut self.ctx);
        self.activated = true;
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Applies all anchor events the session has queued since the last tick.
    pub fn tick(&mut self) -> usize {
        if !self.activated {
            return 0;
        }
        let applied = self.ctx.process_tracking_events();
        if applied > 0 {
            log::debug!("{}: applied {} anchor event(s)", self.flow.name(), applied);
        }
        applied
    }

    pub fn frame(&mut self) -> Frame<'_> {
        self.ctx.frame()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }
}

/// Activates the flow built by `constructor` and runs `ticks` event-loop
/// iterations. Returns the app so callers can inspect the final state.
pub fn run(constructor: FlowConstructor, engine: Box<dyn TrackingEngine>, ticks: usize) -> App {
    let mut app = App::new(constructor(), engine);
    app.activate();
    for _ in 0..ticks {
        app.tick();
    }
    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{Anchor, AnchorEvent, ScriptedEngine, TrackingConfiguration};

    #[derive(Default)]
    struct CountingFlow {
        inits: u32,
    }

    impl ArFlow for CountingFlow {
        fn on_init(&mut self, ctx: &mut Context) {
            self.inits += 1;
            assert_eq!(self.inits, 1, "on_init must only run once");
            ctx.session.run(TrackingConfiguration::world_tracking());
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn events_wait_until_activation() {
        let engine = ScriptedEngine::with_events([AnchorEvent::Added(Anchor::Point {
            id: 1,
            transform: Default::default(),
        })]);
        let mut app = App::new(Box::new(CountingFlow::default()), Box::new(engine));
        assert_eq!(app.tick(), 0);

        app.activate();
        app.activate();
        assert_eq!(app.tick(), 1);
        assert_eq!(app.tick(), 0);
        assert!(app.context().scene.find("anchor-1").is_some());
    }
}
