//! Signal fan-out to presentation handlers
//!
//! The simulation returns a list of [`Signal`]s per tick; handlers map them
//! to sound cues, visual effects, HUD updates. A faulty handler must never
//! abort the tick: errors and panics are swallowed and logged, and dispatch
//! continues with the remaining handlers.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::sim::Signal;

/// Boxed error type for handler failures
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// An external consumer of simulation signals (sound, particles, HUD)
pub trait SignalHandler {
    /// Handler name, used in log messages when it fails
    fn name(&self) -> &'static str;

    /// React to one signal. Errors are logged and ignored by the dispatcher.
    fn handle(&mut self, signal: &Signal) -> Result<(), HandlerError>;
}

/// Fans each emitted signal out to every registered handler
#[derive(Default)]
pub struct Dispatcher {
    handlers: Vec<Box<dyn SignalHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Box<dyn SignalHandler>) {
        self.handlers.push(handler);
    }

    /// Deliver a tick's signals to every handler, in registration order.
    /// A handler error or panic never stops delivery to the others.
    pub fn dispatch(&mut self, signals: &[Signal]) {
        for signal in signals {
            for handler in &mut self.handlers {
                match catch_unwind(AssertUnwindSafe(|| handler.handle(signal))) {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        log::warn!("handler {} failed on {:?}: {}", handler.name(), signal, e);
                    }
                    Err(_) => {
                        log::warn!("handler {} panicked on {:?}", handler.name(), signal);
                    }
                }
            }
        }
    }
}

/// Maps each signal to its sound-cue name in the log; the demo binary's
/// stand-in for the audio layer.
pub struct LoggingHandler;

impl SignalHandler for LoggingHandler {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn handle(&mut self, signal: &Signal) -> Result<(), HandlerError> {
        match signal {
            Signal::WallBounce => log::debug!("cue: bounce"),
            Signal::PaddleHit { .. } => log::debug!("cue: paddle"),
            Signal::BrickDestroyed { .. } => log::debug!("cue: brick"),
            Signal::LifeLost { lives } => log::info!("life lost, {lives} left"),
            Signal::GameOver { score } => log::info!("game over, final score {score}"),
            Signal::Win { score } => log::info!("win, final score {score}"),
        }
        Ok(())
    }
}
