// src/services/infinite_scroll.rs
//
// Incremental reveal for infinite scrolling.
//
// The render layer places a sentinel after the last visible item and reports
// its visibility through a `Sentinel` handle. Every "entered" report grows
// the display count by one page. The controller never looks at the dataset:
// the render layer stops showing the sentinel once everything is revealed.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use log::debug;

use crate::reactive::Observable;

/// Intersection state reported for the sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Entered,
    Left,
}

struct RevealState {
    page_size: NonZeroUsize,
    /// Always a multiple of `page_size`
    display_count: Observable<usize>,
    stopped: AtomicBool,
}

impl RevealState {
    fn observe(&self, visibility: Visibility) -> bool {
        if self.stopped.load(Ordering::SeqCst) || visibility == Visibility::Left {
            return false;
        }

        let page_size = self.page_size.get();
        self.display_count.update(|count| *count += page_size);
        debug!("Revealing up to {} items", self.display_count.get());
        true
    }
}

pub struct InfiniteScroll {
    state: Arc<RevealState>,
}

impl InfiniteScroll {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            state: Arc::new(RevealState {
                page_size,
                display_count: Observable::labeled("display_count", 0),
                stopped: AtomicBool::new(false),
            }),
        }
    }

    /// Binding target for the render layer's sentinel element
    pub fn sentinel(&self) -> Sentinel {
        Sentinel {
            state: Arc::downgrade(&self.state),
        }
    }

    /// Number of items the render layer should show
    pub fn display_count(&self) -> &Observable<usize> {
        &self.state.display_count
    }

    pub fn page_count(&self) -> usize {
        self.state.display_count.get() / self.state.page_size.get()
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size.get()
    }

    /// The revealed prefix of `items`
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let count = self.state.display_count.get().min(items.len());
        &items[..count]
    }

    /// Stop observing for good; later reports are ignored.
    pub fn stop(&self) {
        if !self.state.stopped.swap(true, Ordering::SeqCst) {
            debug!("Infinite scroll stopped at {} items", self.state.display_count.get());
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.state.stopped.load(Ordering::SeqCst)
    }
}

impl Drop for InfiniteScroll {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handle the render layer reports sentinel visibility through.
/// Goes inert once its controller is stopped or dropped.
#[derive(Clone)]
pub struct Sentinel {
    state: Weak<RevealState>,
}

impl Sentinel {
    /// Returns `true` if the report revealed another page
    pub fn report(&self, visibility: Visibility) -> bool {
        match self.state.upgrade() {
            Some(state) => state.observe(visibility),
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| !state.stopped.load(Ordering::SeqCst))
    }
}
