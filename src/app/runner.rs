//! Host-side seams and the frame loop that drives the state machine.
//!
//! The engine never reads a clock or a keyboard itself. A front end supplies
//! a `Clock`, an `InputSource` and a `RenderSink`, and `run` ties them to an
//! `App` until the player quits.

use super::view::Screen;
use super::{App, AppInput, Flow};
use log::info;
use std::io;
use std::time::{Duration, Instant};

/// Draws one frame from a view model.
pub trait RenderSink {
    fn draw(&mut self, screen: &Screen) -> io::Result<()>;
}

/// Non-blocking source of input events.
pub trait InputSource {
    /// Next pending input, if any. `text_entry` is true while the app is
    /// collecting a typed name, so raw letters should arrive as characters.
    fn poll_input(&mut self, text_entry: bool) -> io::Result<Option<AppInput>>;
}

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since construction, from `Instant`.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Drive `app` until an input asks to exit.
///
/// Each frame drains every pending input, advances the engine once, draws,
/// then sleeps for `frame_sleep`.
pub fn run<R, I, C>(
    app: &mut App,
    sink: &mut R,
    input: &mut I,
    clock: &C,
    frame_sleep: Duration,
) -> io::Result<()>
where
    R: RenderSink + ?Sized,
    I: InputSource + ?Sized,
    C: Clock + ?Sized,
{
    loop {
        while let Some(event) = input.poll_input(app.wants_text())? {
            if app.handle_input(event, clock.now_ms()) == Flow::Exit {
                info!("exit requested");
                return Ok(());
            }
        }

        let now = clock.now_ms();
        app.update(now);
        sink.draw(&app.view(now))?;

        if !frame_sleep.is_zero() {
            std::thread::sleep(frame_sleep);
        }
    }
}
