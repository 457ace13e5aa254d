//! Reactive viewport tracking driven by host scroll and resize signals.
//!
//! ## Usage
//!
//! The host environment owns a [`SignalBus`] and emits a [`HostSignal`] from
//! its event loop whenever the window scrolls or resizes. A
//! [`ViewportTracker`] subscribes on construction and keeps a shared
//! [`Viewport`] up to date; dropping the tracker releases the subscription,
//! so no listener outlives the component that attached it.
//!
//! The tracker never infers the grid's width from the window. The grid
//! container may well be narrower than the window, so its box is measured
//! through a [`ContainerMetrics`] collaborator and re-measured on every
//! resize signal.
//!
//! Scroll offsets arrive in the window's coordinate frame while layout
//! positions are container-relative, so the tracker subtracts the container's
//! document-relative top from every offset before storing it. The window
//! selector therefore always compares values measured in the same frame.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use pinwall_layout::{Viewport, column_count_for_width};
use tracing::{debug, trace};

/// A scroll or resize notification from the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostSignal {
    /// The vertical scroll offset changed. `offset` is window-relative.
    Scroll {
        /// New vertical scroll offset of the window.
        offset: f32,
    },
    /// The window was resized to `width` by `height`.
    Resize {
        /// New window width.
        width: f32,
        /// New window height.
        height: f32,
    },
}

/// The measured box of the rendered grid container.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ContainerBox {
    /// Inner width available to grid content.
    pub content_width: f32,
    /// Document-relative offset of the container's top edge.
    pub origin_y: f32,
}

/// Measures the rendered grid container's box on demand.
///
/// Implemented by the presentation layer over whatever element actually
/// hosts the grid.
pub trait ContainerMetrics: Send + Sync {
    /// Returns the container's current box.
    fn measure(&self) -> ContainerBox;
}

/// A [`ContainerMetrics`] backed by a shared, settable box. Suitable for
/// tests and headless hosts.
#[derive(Clone, Default)]
pub struct SharedContainer {
    inner: Arc<RwLock<ContainerBox>>,
}

impl SharedContainer {
    /// Creates a container with the given initial box.
    pub fn new(initial: ContainerBox) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replaces the measured box.
    pub fn set(&self, measured: ContainerBox) {
        *self.inner.write() = measured;
    }
}

impl ContainerMetrics for SharedContainer {
    fn measure(&self) -> ContainerBox {
        *self.inner.read()
    }
}

type Listener = Box<dyn FnMut(HostSignal) + Send>;

#[derive(Default)]
struct BusState {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Synchronous fan-out of host signals to subscribed listeners.
///
/// Signals are delivered in emission order, to listeners in subscription
/// order, on the emitting thread. Each listener sees each signal exactly
/// once.
#[derive(Clone, Default)]
pub struct SignalBus {
    state: Arc<Mutex<BusState>>,
}

impl SignalBus {
    /// Creates a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns the guard that owns the
    /// registration. Dropping the guard removes the listener.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(HostSignal) + Send + 'static,
    {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            bus: Arc::downgrade(&self.state),
        }
    }

    /// Delivers one signal to every current listener.
    pub fn emit(&self, signal: HostSignal) {
        let mut state = self.state.lock();
        for (_, listener) in state.listeners.iter_mut() {
            listener(signal);
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners.len()
    }
}

/// RAII guard for a [`SignalBus`] registration.
pub struct Subscription {
    id: u64,
    bus: Weak<Mutex<BusState>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.lock().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Shared read handle to the live [`Viewport`]. The owning tracker is the
/// only writer.
pub type ViewportHandle = Arc<RwLock<Viewport>>;

/// Owns the live [`Viewport`] and keeps it in sync with host signals.
pub struct ViewportTracker {
    state: ViewportHandle,
    metrics: Arc<dyn ContainerMetrics>,
    _subscription: Subscription,
}

impl ViewportTracker {
    /// Subscribes to `bus` and starts tracking.
    ///
    /// The container is measured immediately for the initial width;
    /// `initial_viewport_height` seeds the height until the first resize
    /// signal arrives.
    pub fn attach(
        bus: &SignalBus,
        metrics: Arc<dyn ContainerMetrics>,
        initial_viewport_height: f32,
    ) -> Self {
        let measured = metrics.measure();
        let state: ViewportHandle = Arc::new(RwLock::new(Viewport::new(
            0.0,
            initial_viewport_height.max(0.0),
            measured.content_width.max(0.0),
        )));
        let subscription = bus.subscribe({
            let state = state.clone();
            let metrics = metrics.clone();
            move |signal| apply_signal(&state, metrics.as_ref(), signal)
        });
        debug!(
            container_width = measured.content_width,
            origin_y = measured.origin_y,
            "viewport tracker attached"
        );
        Self {
            state,
            metrics,
            _subscription: subscription,
        }
    }

    /// Shared handle for components that read the viewport.
    pub fn handle(&self) -> ViewportHandle {
        self.state.clone()
    }

    /// A copy of the current viewport state.
    pub fn viewport(&self) -> Viewport {
        *self.state.read()
    }

    /// Column count derived from the current container width. Recomputed on
    /// every call, never cached.
    pub fn column_count(&self) -> usize {
        column_count_for_width(self.viewport().container_width)
    }

    /// Re-measures the container without waiting for a resize signal, for
    /// hosts that mutate the container's surroundings directly.
    pub fn remeasure(&self) {
        let measured = self.metrics.measure();
        self.state.write().container_width = measured.content_width.max(0.0);
    }
}

fn apply_signal(state: &ViewportHandle, metrics: &dyn ContainerMetrics, signal: HostSignal) {
    match signal {
        HostSignal::Scroll { offset } => {
            let origin = metrics.measure().origin_y;
            let mut viewport = state.write();
            viewport.scroll_position = (offset - origin).max(0.0);
            trace!(scroll = viewport.scroll_position, "scroll signal applied");
        }
        HostSignal::Resize { width, height } => {
            let measured = metrics.measure();
            let mut viewport = state.write();
            viewport.viewport_height = height.max(0.0);
            viewport.container_width = measured.content_width.max(0.0);
            debug!(
                window_width = width,
                viewport_height = viewport.viewport_height,
                container_width = viewport.container_width,
                "resize signal applied"
            );
        }
    }
}
