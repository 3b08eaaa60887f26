use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::Deref;
use std::ptr::{self, NonNull};

use log::{debug, trace};

use crate::counter::ReferenceCounter;
use crate::error::{Error, Result};

/// A reference counted handle to one heap allocated resource.
///
/// Clones alias the same resource and share one [ReferenceCounter]. The
/// resource is freed exactly once, when the last handle pointing at it is
/// dropped, reassigned or detached.
///
/// A handle may also manage nothing at all. Such a null handle reports a
/// count of 0 and owns a counter nobody else sees.
///
/// Like [Rc](std::rc::Rc), the functions inspecting the handle itself are
/// associated functions (`SharedHandle::reference_count(&h)`) so they never
/// shadow methods of `T`.
///
/// ```
/// # use shared_handle::*;
/// let h1 = SharedHandle::new(String::from("x"));
/// let mut h2 = h1.clone();
/// assert_eq!(SharedHandle::reference_count(&h1), 2);
///
/// h2.assign_box(Some(Box::new(String::from("y"))));
/// assert_eq!(SharedHandle::reference_count(&h1), 1);
/// assert_eq!(SharedHandle::reference_count(&h2), 1);
/// assert_eq!(*h1, "x");
/// assert_eq!(*h2, "y");
/// ```
///
/// The counter is not atomic, so handles are neither `Send` nor `Sync`.
///
/// ```compile_fail
/// # use shared_handle::*;
/// let handle = SharedHandle::new(1);
/// std::thread::spawn(move || drop(handle));
/// ```
pub struct SharedHandle<T> {
    resource: Option<NonNull<T>>,
    counter: NonNull<ReferenceCounter>,
    _marker: PhantomData<T>,
}

fn fresh_counter() -> NonNull<ReferenceCounter> {
    NonNull::from(Box::leak(Box::new(ReferenceCounter::new())))
}

impl<T> SharedHandle<T> {
    /// Moves `value` to the heap and becomes its only owner.
    pub fn new(value: T) -> Self {
        Self::from_box(Some(Box::new(value)))
    }

    /// A handle managing no resource.
    pub fn null() -> Self {
        Self::from_box(None)
    }

    /// Takes ownership of an already boxed resource, if any.
    ///
    /// The handle gets a fresh counter, set to 1 when a resource is given and
    /// left at 0 otherwise.
    pub fn from_box(resource: Option<Box<T>>) -> Self {
        let resource = resource.map(|resource| NonNull::from(Box::leak(resource)));
        let handle = Self {
            resource,
            counter: fresh_counter(),
            _marker: PhantomData,
        };
        if handle.resource.is_some() {
            handle.counter().increment();
        }
        handle
    }

    /// Takes ownership of a raw resource pointer.
    ///
    /// # Safety
    ///
    /// `resource` must be null or come from [Box::into_raw], and nothing
    /// else may free it or hand it to another handle afterwards.
    pub unsafe fn from_raw(resource: *mut T) -> Self {
        if resource.is_null() {
            Self::null()
        } else {
            // SAFETY: the caller hands over a pointer from `Box::into_raw`
            Self::from_box(Some(Box::from_raw(resource)))
        }
    }

    fn counter(&self) -> &ReferenceCounter {
        // SAFETY: the counter lives as long as any handle points at it
        unsafe { self.counter.as_ref() }
    }

    /// Replaces whatever this handle shares with what `other` shares.
    ///
    /// The old share is given up first, freeing the old resource if this
    /// was its last handle. Assigning between handles that already alias the
    /// same resource changes nothing. Returns `self` so assignments chain.
    ///
    /// ```
    /// # use shared_handle::*;
    /// let h1 = SharedHandle::new(7);
    /// let mut h2 = SharedHandle::<i32>::null();
    /// let mut h3 = SharedHandle::<i32>::null();
    /// h3.assign(h2.assign(&h1));
    /// assert_eq!(SharedHandle::reference_count(&h1), 3);
    /// assert!(SharedHandle::ptr_eq(&h1, &h3));
    /// ```
    pub fn assign(&mut self, other: &Self) -> &mut Self {
        if Self::ptr_eq(self, other) {
            debug!(
                "skipping assignment between handles already sharing {:p}",
                Self::as_ptr(other)
            );
            return self;
        }
        drop(mem::replace(self, other.clone()));
        self
    }

    /// Gives up the current share and becomes the only owner of `resource`.
    pub fn assign_box(&mut self, resource: Option<Box<T>>) -> &mut Self {
        drop(mem::replace(self, Self::from_box(resource)));
        self
    }

    /// Raw pointer flavour of [SharedHandle::assign_box].
    ///
    /// # Safety
    ///
    /// Same contract as [SharedHandle::from_raw]. In particular `resource`
    /// must not be the resource any handle already manages.
    pub unsafe fn assign_raw(&mut self, resource: *mut T) -> &mut Self {
        drop(mem::replace(self, Self::from_raw(resource)));
        self
    }

    /// Stops managing the resource, freeing it if this was the last handle.
    ///
    /// The handle is left null, on a counter of its own.
    pub fn detach(this: &mut Self) {
        if let Some(resource) = this.resource {
            trace!(
                "detaching from {:p} shared by {} handles",
                resource,
                Self::reference_count(this)
            );
        }
        drop(mem::replace(this, Self::null()));
    }

    pub fn get(this: &Self) -> Option<&T> {
        // SAFETY: the resource is live while this handle holds a share of it
        this.resource.map(|resource| unsafe { resource.as_ref() })
    }

    /// Checked dereference.
    pub fn try_get(this: &Self) -> Result<&T> {
        Self::get(this).ok_or(Error::NullResource)
    }

    /// Mutable access, only granted to the unique owner of the resource.
    ///
    /// ```
    /// # use shared_handle::*;
    /// let mut a = SharedHandle::new(1);
    /// *SharedHandle::get_mut(&mut a).unwrap() += 1;
    /// let b = a.clone();
    /// assert_eq!(SharedHandle::get_mut(&mut a), Err(Error::Shared { count: 2 }));
    /// drop(b);
    /// assert_eq!(*a, 2);
    /// ```
    pub fn get_mut(this: &mut Self) -> Result<&mut T> {
        let mut resource = this.resource.ok_or(Error::NullResource)?;
        match Self::reference_count(this) {
            // SAFETY: a count of 1 and `&mut this` rule out any other alias
            1 => Ok(unsafe { resource.as_mut() }),
            count => Err(Error::Shared { count }),
        }
    }

    /// Address of the resource, null when there is none. Ownership is not
    /// affected and the pointer must not be freed by the caller.
    pub fn as_ptr(this: &Self) -> *const T {
        this.resource
            .map_or(ptr::null(), |resource| resource.as_ptr().cast_const())
    }

    pub fn reference_count(this: &Self) -> usize {
        this.counter().value()
    }

    pub fn is_null(this: &Self) -> bool {
        this.resource.is_none()
    }

    pub fn is_unique(this: &Self) -> bool {
        Self::reference_count(this) == 1
    }

    /// True when both handles share the same resource and counter.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.resource == other.resource && this.counter == other.counter
    }
}

impl<T> Drop for SharedHandle<T> {
    fn drop(&mut self) {
        let Some(resource) = self.resource else {
            // SAFETY: a null handle never shares its counter
            unsafe { drop(Box::from_raw(self.counter.as_ptr())) };
            return;
        };
        if self.counter().decrement() == 0 {
            trace!("last handle gone, releasing {:p}", resource);
            // SAFETY: the count hit zero, so no other handle can reach either
            // allocation, and both came from `Box`
            unsafe {
                drop(Box::from_raw(self.counter.as_ptr()));
                drop(Box::from_raw(resource.as_ptr()));
            }
        }
    }
}

impl<T> Clone for SharedHandle<T> {
    /// Aliases the resource and bumps the shared count. Cloning a null
    /// handle gives another null handle with its own counter.
    fn clone(&self) -> Self {
        if self.resource.is_none() {
            return Self::null();
        }
        self.counter().increment();
        Self {
            resource: self.resource,
            counter: self.counter,
            _marker: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl<T> Deref for SharedHandle<T> {
    type Target = T;

    /// # Panics
    ///
    /// Panics when the handle manages no resource.
    fn deref(&self) -> &T {
        match Self::get(self) {
            Some(resource) => resource,
            None => panic!("dereferenced a SharedHandle that manages no resource"),
        }
    }
}

impl<T> Default for SharedHandle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Box<T>> for SharedHandle<T> {
    fn from(resource: Box<T>) -> Self {
        Self::from_box(Some(resource))
    }
}

impl<T> From<Option<Box<T>>> for SharedHandle<T> {
    fn from(resource: Option<Box<T>>) -> Self {
        Self::from_box(resource)
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedHandle")
            .field("resource", &Self::get(self))
            .field("count", &Self::reference_count(self))
            .finish()
    }
}

impl<T> fmt::Pointer for SharedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&Self::as_ptr(self), f)
    }
}
