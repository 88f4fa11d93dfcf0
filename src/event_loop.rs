use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The centralized event loop driving the UI thread.
///
/// One loop owns polling and dispatch: the handler receives `Some(event)`
/// for each input event and `None` when the poll interval elapses, which is
/// the draw tick. Everything scheduled "per frame" (drag geometry writes,
/// bridge resyncs, autosave deadlines) keys off that tick.
pub struct EventLoop {
    poll_interval: Duration,
}

impl EventLoop {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(None)? {
                break;
            }

            if event::poll(self.poll_interval)? {
                // Drain the queue before drawing again. Mouse drags emit
                // events much faster than the tick rate; handling one event
                // per tick would let the queue back up and the pointer lag.
                loop {
                    let evt = event::read()?;
                    if let ControlFlow::Quit = handler(Some(evt))? {
                        return Ok(());
                    }
                    if !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
