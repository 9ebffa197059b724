//! Recording callbacks and replaying input.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bindkit_input::{InputEvent, MouseButton, Registry};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

/// Install a test-friendly `tracing` subscriber.
///
/// Honors `RUST_LOG` and defaults to `info`. Safe to call from every test;
/// only the first call installs anything.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_test_writer()
        .try_init();
}

/// A unique path in the system temp directory.
#[must_use]
pub fn temp_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("bindkit-{}-{n}-{name}", std::process::id()))
}

/// One recorded callback invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Label given when the callback was created.
    pub label: String,
    /// Pointer position passed to the callback.
    pub position: Vec2,
    /// Motion delta, for motion callbacks.
    pub delta: Option<Vec2>,
}

/// Records invocations of the callbacks it hands out.
///
/// ```ignore
/// let recorder = Recorder::new();
/// controls.binding("gameplay", "jump").on_press(recorder.button("jump"));
/// controls.handle_key_press("space", false);
/// assert_eq!(recorder.labels(), ["jump"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A press/release callback that records under `label`.
    pub fn button(&self, label: &str) -> impl FnMut(&mut Registry, Vec2) + 'static {
        let calls = Rc::clone(&self.calls);
        let label = label.to_string();
        move |_: &mut Registry, position: Vec2| {
            calls.borrow_mut().push(Call {
                label: label.clone(),
                position,
                delta: None,
            });
        }
    }

    /// A motion callback that records under `label`.
    pub fn motion(&self, label: &str) -> impl FnMut(&mut Registry, Vec2, Vec2) + 'static {
        let calls = Rc::clone(&self.calls);
        let label = label.to_string();
        move |_: &mut Registry, position: Vec2, delta: Vec2| {
            calls.borrow_mut().push(Call {
                label: label.clone(),
                position,
                delta: Some(delta),
            });
        }
    }

    /// All recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Labels of all recorded calls, oldest first.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.label.clone()).collect()
    }

    /// Number of calls recorded under `label`.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.label == label).count()
    }

    /// Total number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    /// Forget all recorded calls.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

/// A scripted sequence of host events.
#[derive(Debug, Clone, Default)]
pub struct EventScript {
    events: Vec<InputEvent>,
}

impl EventScript {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial key press.
    #[must_use]
    pub fn press(mut self, key: &str) -> Self {
        self.events.push(InputEvent::press(key));
        self
    }

    /// Auto-repeat key press.
    #[must_use]
    pub fn repeat(mut self, key: &str) -> Self {
        self.events.push(InputEvent::repeat(key));
        self
    }

    /// Key release.
    #[must_use]
    pub fn release(mut self, key: &str) -> Self {
        self.events.push(InputEvent::release(key));
        self
    }

    /// Press then release.
    #[must_use]
    pub fn tap(self, key: &str) -> Self {
        self.press(key).release(key)
    }

    /// Pointer click (press and release) at a position.
    #[must_use]
    pub fn click(mut self, x: f32, y: f32, button: MouseButton) -> Self {
        let position = Vec2::new(x, y);
        self.events.push(InputEvent::PointerPress { position, button });
        self.events.push(InputEvent::PointerRelease { position, button });
        self
    }

    /// Vertical wheel scroll.
    #[must_use]
    pub fn scroll(mut self, x: f32, y: f32, delta_y: f32) -> Self {
        self.events.push(InputEvent::Wheel {
            position: Vec2::new(x, y),
            delta_y,
        });
        self
    }

    /// Pointer motion.
    #[must_use]
    pub fn move_to(mut self, x: f32, y: f32, delta_x: f32, delta_y: f32) -> Self {
        self.events.push(InputEvent::PointerMove {
            position: Vec2::new(x, y),
            delta: Vec2::new(delta_x, delta_y),
        });
        self
    }

    /// Dispatch every event in order. Returns the total callbacks invoked.
    pub fn run(&self, registry: &mut Registry) -> usize {
        self.events.iter().map(|event| registry.dispatch(event)).sum()
    }

    /// The scripted events.
    #[must_use]
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_counts() {
        let recorder = Recorder::new();
        let mut registry = Registry::new();
        let mut jump = recorder.button("jump");
        let mut look = recorder.motion("look");

        jump(&mut registry, Vec2::ZERO);
        jump(&mut registry, Vec2::ONE);
        look(&mut registry, Vec2::ONE, Vec2::X);

        assert_eq!(recorder.count("jump"), 2);
        assert_eq!(recorder.labels(), ["jump", "jump", "look"]);
        assert_eq!(recorder.calls()[2].delta, Some(Vec2::X));

        recorder.clear();
        assert!(recorder.is_empty());
    }

    #[test]
    fn script_builds_events() {
        let script = EventScript::new()
            .tap("a")
            .repeat("a")
            .click(1.0, 2.0, MouseButton::Left);
        assert_eq!(script.events().len(), 5);
        assert_eq!(script.events()[0], InputEvent::press("a"));
    }

    #[test]
    fn temp_paths_are_unique() {
        assert_ne!(temp_path("x.json"), temp_path("x.json"));
    }
}
