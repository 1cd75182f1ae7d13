use std::{
    alloc::{GlobalAlloc, Layout, System},
    mem, ptr,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

static ACTIVE: AtomicBool = AtomicBool::new(false);
static TRACE_ID: AtomicUsize = AtomicUsize::new(0);
static CURRENT: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);

/// Tag stored in front of blocks allocated outside of any trace.
const UNTRACED: usize = 0;

const TAG_SIZE: usize = mem::size_of::<usize>();

/// A `GlobalAlloc` that forwards to `System` and, while a trace is active, keeps track of the
/// bytes allocated during the trace and their high-water mark.
///
/// Every block carries a small tag in front of it with the id of the trace it was allocated
/// under, so freeing or shrinking a block from before the trace doesn't cancel out traced bytes,
/// and growing one counts its whole new size.
///
/// It has to be installed by the binary to observe anything:
///
/// ```ignore
/// #[global_allocator]
/// static GLOBAL: TracingAllocator = TracingAllocator;
/// ```
pub struct TracingAllocator;

impl TracingAllocator {
    /// Resets the counters and starts a new trace.
    ///
    /// # Returns
    /// `true` if a trace was already active and got restarted.
    pub fn start() -> bool {
        CURRENT.store(0, Ordering::SeqCst);
        PEAK.store(0, Ordering::SeqCst);
        TRACE_ID.fetch_add(1, Ordering::SeqCst);
        ACTIVE.swap(true, Ordering::SeqCst)
    }

    /// Stops tracing.
    ///
    /// # Returns
    /// The peak of traced bytes since `start`.
    pub fn stop() -> usize {
        ACTIVE.store(false, Ordering::SeqCst);
        PEAK.load(Ordering::SeqCst)
    }

    pub fn is_tracing() -> bool {
        ACTIVE.load(Ordering::Relaxed)
    }

    /// The tag new blocks get right now.
    fn current_tag() -> usize {
        if ACTIVE.load(Ordering::Relaxed) {
            TRACE_ID.load(Ordering::Relaxed)
        } else {
            UNTRACED
        }
    }

    fn counts(tag: usize) -> bool {
        tag != UNTRACED && tag == Self::current_tag()
    }

    fn grow(bytes: usize) {
        let now = CURRENT.fetch_add(bytes, Ordering::Relaxed) + bytes;
        PEAK.fetch_max(now, Ordering::Relaxed);
    }

    fn shrink(bytes: usize) {
        let _ = CURRENT.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| {
            Some(c.saturating_sub(bytes))
        });
    }
}

/// The layout of a tagged block and the offset of the user pointer inside it.
///
/// The offset only depends on `layout.align()`, so a block keeps it across `realloc`.
fn tagged(layout: Layout) -> Option<(Layout, usize)> {
    let (outer, offset) = Layout::new::<usize>().extend(layout).ok()?;
    Some((outer.pad_to_align(), offset))
}

/// # Safety
/// `user` must point `TAG_SIZE` or more bytes past the start of a tagged block.
unsafe fn tag_slot(user: *mut u8) -> *mut usize {
    unsafe { user.sub(TAG_SIZE) as *mut usize }
}

/// # Safety
/// `base` must be a block allocated with the outer layout from `tagged` and `offset` its offset.
unsafe fn finish_alloc(base: *mut u8, offset: usize, size: usize) -> *mut u8 {
    if base.is_null() {
        return ptr::null_mut();
    }

    let user = unsafe { base.add(offset) };
    let tag = TracingAllocator::current_tag();
    unsafe { tag_slot(user).write(tag) };
    if tag != UNTRACED {
        TracingAllocator::grow(size);
    }

    user
}

unsafe impl GlobalAlloc for TracingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let Some((outer, offset)) = tagged(layout) else {
            return ptr::null_mut();
        };

        unsafe { finish_alloc(System.alloc(outer), offset, layout.size()) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let Some((outer, offset)) = tagged(layout) else {
            return ptr::null_mut();
        };

        unsafe { finish_alloc(System.alloc_zeroed(outer), offset, layout.size()) }
    }

    unsafe fn dealloc(&self, user: *mut u8, layout: Layout) {
        let Some((outer, offset)) = tagged(layout) else {
            return;
        };

        let tag = unsafe { tag_slot(user).read() };
        unsafe { System.dealloc(user.sub(offset), outer) };

        if Self::counts(tag) {
            Self::shrink(layout.size());
        }
    }

    unsafe fn realloc(&self, user: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let Some((outer, offset)) = tagged(layout) else {
            return ptr::null_mut();
        };
        let Ok(new_layout) = Layout::from_size_align(new_size, layout.align()) else {
            return ptr::null_mut();
        };
        let Some((new_outer, _)) = tagged(new_layout) else {
            return ptr::null_mut();
        };

        let tag = unsafe { tag_slot(user).read() };
        let base = unsafe { System.realloc(user.sub(offset), outer, new_outer.size()) };
        if base.is_null() {
            return ptr::null_mut();
        }

        let new_user = unsafe { base.add(offset) };
        let old_size = layout.size();

        if Self::counts(tag) {
            if new_size > old_size {
                Self::grow(new_size - old_size);
            } else {
                Self::shrink(old_size - new_size);
            }
        } else {
            // a block from outside the trace is adopted by it with its whole new size
            let tag = Self::current_tag();
            unsafe { tag_slot(new_user).write(tag) };
            if tag != UNTRACED {
                Self::grow(new_size);
            }
        }

        new_user
    }
}
