use crate::traits::*;
use std::rc::Rc;

/// This marker type implements [RefCountFamily] for [Rc].
///
/// ```
/// # use shared_handle::*;
/// # use std::rc::Rc;
/// let a: Rc<i32> = RcMark::new(1);
/// let _b = Rc::clone(&a);
/// assert_eq!(RefCounted::reference_count(&a), 2);
/// ```
pub struct RcMark;

impl RefCountFamily for RcMark {
    type Pointer<T> = Rc<T>;
    fn new<T>(value: T) -> Self::Pointer<T> {
        Rc::new(value)
    }
}

impl<T> RefCounted<T> for Rc<T> {
    type Mark = RcMark;
    fn as_ptr(this: &Self) -> *const T {
        Self::as_ptr(this)
    }
    fn reference_count(this: &Self) -> usize {
        Self::strong_count(this)
    }
}
