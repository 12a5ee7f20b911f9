use std::alloc::{alloc, dealloc, Layout};
use std::fmt;
use std::io;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use tracing::{debug, trace};

use crate::error::ArrayError;

/// A growable array of owned strings.
///
/// Storage is a raw buffer of `cap` slots. Slots `[0, len)` hold strings the
/// array owns; slots `[len, cap)` are uninitialised and never read. When the
/// buffer is full the capacity doubles.
pub struct DynamicArray {
    ptr: NonNull<String>,
    cap: usize,
    len: usize,
    _marker: PhantomData<String>,
}

// SAFETY: the buffer is uniquely owned and `String` is both Send and Sync.
unsafe impl Send for DynamicArray {}
// SAFETY: `&DynamicArray` only hands out `&str`.
unsafe impl Sync for DynamicArray {}

fn buffer_layout(capacity: usize) -> Result<Layout, ArrayError> {
    Layout::array::<String>(capacity).map_err(|_| ArrayError::ResourceExhaustion { capacity })
}

fn allocate(capacity: usize) -> Result<NonNull<String>, ArrayError> {
    let layout = buffer_layout(capacity)?;
    // SAFETY: capacity >= 1 and String is not zero-sized, so the layout is non-empty.
    let raw = unsafe { alloc(layout) };
    NonNull::new(raw as *mut String).ok_or(ArrayError::ResourceExhaustion { capacity })
}

impl DynamicArray {
    /// Creates an empty array with room for a single element.
    pub fn new() -> Result<Self, ArrayError> {
        Self::with_capacity(1)
    }

    /// Creates an empty array with `capacity` allocated slots.
    ///
    /// Fails with [`ArrayError::ZeroCapacity`] for a capacity of 0 and with
    /// [`ArrayError::ResourceExhaustion`] if the buffer cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        if capacity == 0 {
            return Err(ArrayError::ZeroCapacity);
        }
        let ptr = allocate(capacity)?;
        trace!(capacity, "created array");
        Ok(Self {
            ptr,
            cap: capacity,
            len: 0,
            _marker: PhantomData,
        })
    }

    /// Releases every element and then the buffer.
    pub fn destroy(self) {
        trace!(len = self.len, capacity = self.cap, "destroying array");
        drop(self);
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no element is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the element at `index`.
    ///
    /// An index at or past the length yields [`ArrayError::IndexOutOfRange`],
    /// which is distinct from a stored empty string.
    pub fn read(&self, index: usize) -> Result<&str, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::out_of_range(index, self.len));
        }
        Ok(self.slot(index))
    }

    /// Inserts a copy of `element` at `index`, shifting later elements right.
    ///
    /// `index == len()` appends. Anything larger is rejected before the array
    /// is touched.
    pub fn insert(&mut self, element: &str, index: usize) -> Result<(), ArrayError> {
        if index > self.len {
            return Err(ArrayError::out_of_range(index, self.len));
        }
        // Copy before shifting so a failed copy leaves no duplicated slot.
        let owned = element.to_owned();
        if self.len == self.cap {
            self.grow()?;
        }

        let base = self.ptr.as_ptr();
        unsafe {
            // SAFETY: len < cap after growing, so slot `len` is in bounds.
            // Walk from the top down so no live slot is overwritten unread.
            let mut slot = self.len;
            while slot > index {
                ptr::write(base.add(slot), ptr::read(base.add(slot - 1)));
                slot -= 1;
            }
            ptr::write(base.add(index), owned);
        }
        self.len += 1;
        trace!(index, len = self.len, "inserted element");
        Ok(())
    }

    /// Appends a copy of `element`.
    pub fn append(&mut self, element: &str) -> Result<(), ArrayError> {
        self.insert(element, self.len)
    }

    /// Removes the first element equal to `element` and returns its position.
    ///
    /// The array is left unchanged when nothing matches.
    pub fn remove(&mut self, element: &str) -> Result<usize, ArrayError> {
        let mut found = None;
        for i in 0..self.len {
            if self.slot(i) == element {
                found = Some(i);
                break;
            }
        }
        let position = found.ok_or_else(|| ArrayError::NotFound(element.to_owned()))?;

        let base = self.ptr.as_ptr();
        let removed = unsafe {
            // SAFETY: position < len; each slot in (position, len) is read
            // once and written one place lower.
            let removed = ptr::read(base.add(position));
            for slot in position..self.len - 1 {
                ptr::write(base.add(slot), ptr::read(base.add(slot + 1)));
            }
            removed
        };
        self.len -= 1;
        drop(removed);
        trace!(position, len = self.len, "removed element");
        Ok(position)
    }

    /// Renders the live elements as `[a,b,c]`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Writes the rendering and a newline to `out`.
    pub fn print_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{self}")
    }

    fn slot(&self, index: usize) -> &str {
        debug_assert!(index < self.len);
        // SAFETY: callers only pass indices below len, which are initialised.
        unsafe { (*self.ptr.as_ptr().add(index)).as_str() }
    }

    /// Doubles the capacity, moving the old slots into the new buffer.
    ///
    /// On failure the array keeps its old buffer.
    fn grow(&mut self) -> Result<(), ArrayError> {
        let new_cap = self
            .cap
            .checked_mul(2)
            .ok_or(ArrayError::ResourceExhaustion { capacity: usize::MAX })?;
        let old_layout = buffer_layout(self.cap)?;
        let new_ptr = allocate(new_cap)?;

        unsafe {
            // SAFETY: exactly the old `cap` slots are moved; they are all live
            // because growth only happens when len == cap. Ownership moves to
            // the new buffer, so only the old allocation is released.
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.cap);
            dealloc(self.ptr.as_ptr() as *mut u8, old_layout);
        }

        debug!(from = self.cap, to = new_cap, "grew array");
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }
}

impl Drop for DynamicArray {
    fn drop(&mut self) {
        unsafe {
            // 1. Drop every live string.
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
            // 2. Release the buffer.
            if let Ok(layout) = buffer_layout(self.cap) {
                dealloc(self.ptr.as_ptr() as *mut u8, layout);
            }
        }
    }
}

impl fmt::Display for DynamicArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.len {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(self.slot(i))?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for DynamicArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for i in 0..self.len {
            list.entry(&self.slot(i));
        }
        list.finish()
    }
}
