use crate::handle::SharedHandle;
use crate::traits::*;

/// This marker type implements [RefCountFamily] for [SharedHandle].
///
/// It is used for marking [RefCountFamily] users when creating
/// a new [SharedHandle].
///
/// ```
/// # use shared_handle::*;
/// fn wrap<R: RefCountFamily>(value: i32) -> R::Pointer<i32> {
///     R::new(value)
/// }
/// let a: SharedHandle<i32> = wrap::<HandleMark>(1);
/// let b = a.clone();
/// assert_eq!(RefCounted::reference_count(&b), 2);
/// assert_eq!(RefCounted::as_ptr(&a), RefCounted::as_ptr(&b));
/// ```
pub struct HandleMark;

impl RefCountFamily for HandleMark {
    type Pointer<T> = SharedHandle<T>;
    fn new<T>(value: T) -> Self::Pointer<T> {
        SharedHandle::new(value)
    }
}

impl<T> RefCounted<T> for SharedHandle<T> {
    type Mark = HandleMark;
    fn as_ptr(this: &Self) -> *const T {
        Self::as_ptr(this)
    }
    fn reference_count(this: &Self) -> usize {
        Self::reference_count(this)
    }
}
