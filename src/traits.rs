use std::ops::Deref;

/// The trait used to abstract over reference counted pointer families.
///
/// In this library, [HandleMark] and [RcMark] are implementing it, so code
/// written against a family can switch between [SharedHandle] and [Rc].
///
/// [SharedHandle]: crate::SharedHandle
/// [Rc]: std::rc::Rc
///
/// ```
/// # use shared_handle::*;
/// struct Foo<R: RefCountFamily> {
///     name: R::Pointer<String>,
/// }
/// impl<R: RefCountFamily> Foo<R> {
///     fn name(&self) -> &str {
///         &self.name
///     }
///     fn new(name: &str) -> Self {
///         Self {
///             name: R::new(name.to_owned()),
///         }
///     }
/// }
/// let foo = Foo::<HandleMark>::new("John Doe");
/// assert_eq!(foo.name(), "John Doe");
/// ```
pub trait RefCountFamily {
    type Pointer<T>: RefCounted<T>;
    fn new<T>(value: T) -> Self::Pointer<T>;
}

// RefCounted
pub trait RefCounted<T>: Deref<Target = T> + Clone {
    type Mark: RefCountFamily<Pointer<T> = Self>;
    fn new<U>(value: U) -> <<Self as RefCounted<T>>::Mark as RefCountFamily>::Pointer<U> {
        Self::Mark::new(value)
    }
    fn as_ptr(this: &Self) -> *const T;
    /// Number of live pointers sharing the value.
    fn reference_count(this: &Self) -> usize;
}
