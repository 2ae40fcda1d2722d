use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::HostOptions;
use crate::error::{HostError, Result};
use crate::external::{ExternalStore, SyncExternalStore};
use crate::store::{Listener, SubscriptionGuard};

trait HookSlot {
    /// Whether the store has moved past the snapshot this slot rendered.
    fn is_stale(&self) -> bool;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct StoreSlot<S: ExternalStore> {
    store: S,
    rendered: S::Snapshot,
    _subscription: SubscriptionGuard,
}

impl<S> StoreSlot<S>
where
    S: ExternalStore + Clone,
{
    fn subscribe(store: &S, rendered: S::Snapshot, dirty: &Arc<AtomicBool>) -> Self {
        let dirty = Arc::clone(dirty);
        let listener: Listener = Arc::new(move || dirty.store(true, Ordering::Release));
        Self {
            store: store.clone(),
            rendered,
            _subscription: store.subscribe(listener).into_guard(),
        }
    }
}

impl<S> HookSlot for StoreSlot<S>
where
    S: ExternalStore + 'static,
    S::Snapshot: 'static,
{
    fn is_stale(&self) -> bool {
        !S::same_snapshot(&self.rendered, &self.store.get_snapshot())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-pass handle passed to a consumer's render function.
///
/// Stores are matched to hook slots by call order, so a render function
/// should read its stores in the same order every pass. A slot that sees a
/// different store than last time drops the old subscription and takes a
/// new one.
pub struct RenderContext<'a> {
    slots: &'a mut Vec<Box<dyn HookSlot>>,
    cursor: usize,
    dirty: &'a Arc<AtomicBool>,
}

impl SyncExternalStore for RenderContext<'_> {
    fn use_sync_external_store<S>(&mut self, store: &S) -> S::Snapshot
    where
        S: ExternalStore + Clone + Send + Sync + 'static,
        S::Snapshot: Send + Sync + 'static,
    {
        let index = self.cursor;
        self.cursor += 1;
        let snapshot = store.get_snapshot();

        if let Some(slot) = self.slots.get_mut(index) {
            if let Some(existing) = slot.as_any_mut().downcast_mut::<StoreSlot<S>>() {
                if existing.store.same_store(store) {
                    existing.rendered = snapshot.clone();
                    return snapshot;
                }
            }
            debug!(slot = index, "hook slot now reads a different store, resubscribing");
        }

        let slot: Box<dyn HookSlot> =
            Box::new(StoreSlot::subscribe(store, snapshot.clone(), self.dirty));
        if index < self.slots.len() {
            self.slots[index] = slot;
        } else {
            self.slots.push(slot);
        }
        snapshot
    }
}

type RenderFn<R> = Box<dyn FnMut(&mut RenderContext<'_>) -> R>;

/// A mounted render function reading from external stores.
///
/// Each store read through the [`RenderContext`] is subscribed once and stays
/// subscribed across passes until the consumer is unmounted. A listener
/// firing only marks the consumer dirty; the owner decides when to
/// [`flush`](Consumer::flush).
///
/// A pass is committed only if every store still returns the snapshot that
/// was rendered. Otherwise the pass is thrown away and re-run, up to
/// [`HostOptions::max_render_passes`] times.
pub struct Consumer<R> {
    render_fn: RenderFn<R>,
    slots: Vec<Box<dyn HookSlot>>,
    dirty: Arc<AtomicBool>,
    output: Option<R>,
    options: HostOptions,
    mounted: bool,
    render_count: usize,
}

impl<R> Consumer<R> {
    /// Mount `render` and run its first pass.
    pub fn mount<F>(render: F) -> Result<Self>
    where
        F: FnMut(&mut RenderContext<'_>) -> R + 'static,
    {
        Self::mount_with(HostOptions::default(), render)
    }

    /// [`mount`](Self::mount) with explicit [`HostOptions`].
    pub fn mount_with<F>(options: HostOptions, render: F) -> Result<Self>
    where
        F: FnMut(&mut RenderContext<'_>) -> R + 'static,
    {
        let mut consumer = Self {
            render_fn: Box::new(render),
            slots: Vec::new(),
            dirty: Arc::new(AtomicBool::new(false)),
            output: None,
            options,
            mounted: true,
            render_count: 0,
        };
        consumer.render()?;
        Ok(consumer)
    }

    /// Re-render unconditionally and return the committed output.
    pub fn render(&mut self) -> Result<&R> {
        if !self.mounted {
            return Err(HostError::Unmounted);
        }

        let passes = self.options.max_render_passes.max(1);
        for pass in 1..=passes {
            self.dirty.store(false, Ordering::Release);
            let mut cx = RenderContext {
                slots: &mut self.slots,
                cursor: 0,
                dirty: &self.dirty,
            };
            let output = (self.render_fn)(&mut cx);
            let used = cx.cursor;
            self.slots.truncate(used);

            if self.slots.iter().all(|slot| !slot.is_stale()) {
                self.render_count += 1;
                trace!(pass, stores = used, "render committed");
                return Ok(&*self.output.insert(output));
            }
            warn!(pass, "store changed during render, discarding pass");
        }

        Err(HostError::RenderLoop { passes })
    }

    /// Re-render if a subscribed store changed since the last pass began.
    /// Returns whether a render happened.
    pub fn flush(&mut self) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.render().map(|_| true)
    }

    /// Drop every subscription. Later renders fail with
    /// [`HostError::Unmounted`]; the last output stays readable.
    pub fn unmount(&mut self) {
        self.slots.clear();
        self.mounted = false;
        self.dirty.store(false, Ordering::Release);
    }

    /// Whether a subscribed store changed since the last pass began.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Whether [`unmount`](Self::unmount) has not been called yet.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Output of the last committed render.
    pub fn output(&self) -> Option<&R> {
        self.output.as_ref()
    }

    /// Number of committed renders.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Number of stores currently subscribed.
    pub fn subscription_count(&self) -> usize {
        self.slots.len()
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for Consumer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consumer")
            .field("output", &self.output)
            .field("mounted", &self.mounted)
            .field("dirty", &self.is_dirty())
            .field("render_count", &self.render_count)
            .field("subscriptions", &self.slots.len())
            .finish_non_exhaustive()
    }
}
