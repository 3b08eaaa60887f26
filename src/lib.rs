/*!
A single-threaded reference counted handle, with assignment and detach spelled out.

## What is it for

[SharedHandle] lets several handles alias one heap allocated resource and frees
that resource exactly once, when the last handle is dropped, reassigned or
detached. It behaves much like [Rc](https://doc.rust-lang.org/std/rc/struct.Rc.html),
but it also models a handle that manages nothing, and it lets a handle be
pointed at another resource in place.

## Show me the code

```
use shared_handle::*;

let h1 = SharedHandle::new(String::from("x"));
let mut h2 = h1.clone();
assert_eq!(SharedHandle::reference_count(&h1), 2);

// h2 leaves "x" to h1 and becomes the only owner of "y"
h2.assign_box(Some(Box::new(String::from("y"))));
assert_eq!(SharedHandle::reference_count(&h1), 1);
assert_eq!(*h2, "y");

// chained assignment, all three now share "x"
let mut h3 = SharedHandle::<String>::null();
h3.assign(h2.assign(&h1));
assert_eq!(SharedHandle::reference_count(&h1), 3);
```

## Switching families

Code that only needs "some reference counted pointer" can be written against
[RefCountFamily] and pick [HandleMark] or [RcMark] at the use site.

```
# use shared_handle::*;
fn wrap<R: RefCountFamily>(value: i32) -> R::Pointer<i32> {
    R::new(value)
}

let _a: SharedHandle<i32> = wrap::<HandleMark>(1);
let _b: std::rc::Rc<i32> = wrap::<RcMark>(1);
```

## Some issues are remaining

#### Null handles

Dereferencing a handle that manages no resource panics. Use
[SharedHandle::get] or [SharedHandle::try_get] when the handle may be null.

#### Mutation

There is no `DerefMut`: two handles could otherwise hand out aliasing `&mut`.
The unique owner can use [SharedHandle::get_mut], shared owners need a `Cell`
or `RefCell` inside.

#### Threads

The counter is a plain `Cell`, so handles stay on the thread that made them.
 */

mod counter;
mod error;
mod handle;

pub mod concrete;
pub mod traits;
pub use concrete::handle::*;
pub use concrete::rc::*;
pub use counter::ReferenceCounter;
pub use error::{Error, Result};
pub use handle::SharedHandle;
pub use traits::*;
