// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// The identity of a delegate binding.
///
/// `object` is the address of the bound object (or of the closure storage for
/// functors, or zero for free functions) and `stub` is the address of the
/// invoked function. Two delegates are equal exactly when their keys are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DelegateKey {
    /// Address of the bound object, or `0` when there is none.
    pub object: usize,
    /// Address of the function that the delegate calls.
    pub stub: usize,
}

impl DelegateKey {
    const NULL: DelegateKey = DelegateKey { object: 0, stub: 0 };
}

/// A single-target, type-erased callable taking `A` and returning `R`.
///
/// Multiple arguments are passed as a tuple. The empty ("null") delegate is the
/// [`Default`]; invoking it is reported as an error and yields `R::default()`.
///
/// Cloning shares the underlying target, so a clone compares equal to its
/// original and can be used to unsubscribe it.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use tessera_core::Delegate;
///
/// struct Counter { step: u32 }
/// impl Counter {
///     fn advance(&self, value: u32) -> u32 { value + self.step }
/// }
///
/// let counter = Rc::new(Counter { step: 2 });
/// let d1 = Delegate::from_method(&counter, Counter::advance);
/// let d2 = Delegate::from_method(&counter, Counter::advance);
///
/// assert_eq!(d1.invoke(40), 42);
/// assert_eq!(d1, d2);
/// ```
pub struct Delegate<A, R = ()> {
    target: Option<Rc<dyn Fn(A) -> R>>,
    key: DelegateKey,
}

fn call_functor<A, R, F: Fn(A) -> R>(functor: &F, args: A) -> R {
    functor(args)
}

impl<A: 'static, R: 'static> Delegate<A, R> {
    /// Returns the empty delegate.
    pub fn null() -> Self {
        Self {
            target: None,
            key: DelegateKey::NULL,
        }
    }

    /// Binds a free function.
    pub fn from_fn(function: fn(A) -> R) -> Self {
        Self {
            target: Some(Rc::new(function)),
            key: DelegateKey {
                object: 0,
                stub: function as usize,
            },
        }
    }

    /// Binds an arbitrary closure.
    ///
    /// The closure is moved into reference-counted storage; the storage address
    /// becomes the delegate's identity, so only clones of this delegate compare
    /// equal to it.
    pub fn from_functor<F>(functor: F) -> Self
    where
        F: Fn(A) -> R + 'static,
    {
        let target: Rc<dyn Fn(A) -> R> = Rc::new(functor);
        let object = Rc::as_ptr(&target) as *const () as usize;
        let stub = (call_functor::<A, R, F> as fn(&F, A) -> R) as usize;
        Self {
            target: Some(target),
            key: DelegateKey { object, stub },
        }
    }

    /// Returns `true` if no target is bound.
    pub fn is_null(&self) -> bool {
        self.target.is_none()
    }

    /// Returns the identity of this binding.
    pub fn key(&self) -> DelegateKey {
        self.key
    }

    /// Returns the address of the bound object, `0` for free functions and null delegates.
    pub fn object_address(&self) -> usize {
        self.key.object
    }

    /// Returns `true` if this delegate is bound to a method of `object`.
    pub fn is_bound_to<T>(&self, object: &Rc<T>) -> bool {
        !self.is_null() && self.key.object == Rc::as_ptr(object) as *const () as usize
    }

    /// Clears the target, turning this into the null delegate.
    pub fn reset(&mut self) {
        self.target = None;
        self.key = DelegateKey::NULL;
    }

    /// Invokes the target, or returns `None` for a null delegate.
    pub fn try_invoke(&self, args: A) -> Option<R> {
        self.target.as_ref().map(|target| target(args))
    }
}

impl<A: 'static, R: Default + 'static> Delegate<A, R> {
    /// Binds a method on a shared object.
    ///
    /// The delegate holds the object weakly. Invoking it after the object has
    /// been dropped is reported as an error and returns `R::default()`. The weak
    /// handle pins the object's allocation, so no later object can take over
    /// the address recorded in the key while this delegate or a clone exists.
    pub fn from_method<T: 'static>(object: &Rc<T>, method: fn(&T, A) -> R) -> Self {
        let weak = Rc::downgrade(object);
        let target = move |args: A| match weak.upgrade() {
            Some(object) => method(&object, args),
            None => {
                log::error!("Delegate target object has been dropped");
                R::default()
            }
        };
        Self {
            target: Some(Rc::new(target)),
            key: DelegateKey {
                object: Rc::as_ptr(object) as *const () as usize,
                stub: method as usize,
            },
        }
    }

    /// Binds a mutating method on a shared, interior-mutable object.
    ///
    /// Besides the dropped-object case, re-entering the delegate while the
    /// object is already mutably borrowed is reported and returns `R::default()`.
    pub fn from_method_mut<T: 'static>(
        object: &Rc<RefCell<T>>,
        method: fn(&mut T, A) -> R,
    ) -> Self {
        let weak = Rc::downgrade(object);
        let target = move |args: A| {
            let Some(cell) = weak.upgrade() else {
                log::error!("Delegate target object has been dropped");
                return R::default();
            };
            let result = match cell.try_borrow_mut() {
                Ok(mut object) => method(&mut object, args),
                Err(_) => {
                    log::error!("Delegate target object is already borrowed");
                    R::default()
                }
            };
            result
        };
        Self {
            target: Some(Rc::new(target)),
            key: DelegateKey {
                object: Rc::as_ptr(object) as *const () as usize,
                stub: method as usize,
            },
        }
    }

    /// Invokes the target.
    ///
    /// Invoking a null delegate logs `Function is null` and returns `R::default()`.
    pub fn invoke(&self, args: A) -> R {
        match &self.target {
            Some(target) => target(args),
            None => {
                log::error!("Function is null");
                R::default()
            }
        }
    }
}

impl<A, R> Clone for Delegate<A, R> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            key: self.key,
        }
    }
}

impl<A: 'static, R: 'static> Default for Delegate<A, R> {
    fn default() -> Self {
        Self::null()
    }
}

impl<A, R> PartialEq for Delegate<A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<A, R> Eq for Delegate<A, R> {}

impl<A, R> PartialOrd for Delegate<A, R> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<A, R> Ord for Delegate<A, R> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl<A, R> Hash for Delegate<A, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<A, R> fmt::Debug for Delegate<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("null", &self.target.is_none())
            .field("key", &self.key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Scaler {
        factor: i32,
    }

    impl Scaler {
        fn scale(&self, value: i32) -> i32 {
            value * self.factor
        }

        fn offset(&self, value: i32) -> i32 {
            value + self.factor
        }
    }

    struct Accumulator {
        total: i32,
    }

    impl Accumulator {
        fn add(&mut self, value: i32) -> i32 {
            self.total += value;
            self.total
        }
    }

    fn double(value: i32) -> i32 {
        value * 2
    }

    fn triple(value: i32) -> i32 {
        value * 3
    }

    #[test]
    fn free_function_delegates_invoke_and_compare_by_function() {
        let d1 = Delegate::from_fn(double as fn(i32) -> i32);
        let d2 = Delegate::from_fn(double as fn(i32) -> i32);
        let d3 = Delegate::from_fn(triple as fn(i32) -> i32);

        assert_eq!(d1.invoke(21), 42);
        assert_eq!(d1, d2);
        assert_ne!(d1, d3);
        assert_eq!(d1.object_address(), 0);
    }

    #[test]
    fn method_delegates_compare_by_object_and_method() {
        let a = Rc::new(Scaler { factor: 3 });
        let b = Rc::new(Scaler { factor: 3 });

        let d1 = Delegate::from_method(&a, Scaler::scale);
        let d2 = Delegate::from_method(&a, Scaler::scale);
        let d3 = Delegate::from_method(&b, Scaler::scale);
        let d4 = Delegate::from_method(&a, Scaler::offset);

        assert_eq!(d1.invoke(5), 15);
        assert_eq!(d1, d2, "Same object and method should be equal");
        assert_ne!(d1, d3, "A different object instance is a different binding");
        assert_ne!(d1, d4, "A different method is a different binding");
        assert!(d1.is_bound_to(&a));
        assert!(!d1.is_bound_to(&b));
    }

    #[test]
    fn dropped_object_binding_never_matches_a_later_object() {
        let first = Rc::new(Scaler { factor: 2 });
        let stale = Delegate::from_method(&first, Scaler::scale);
        drop(first);

        let second = Rc::new(Scaler { factor: 2 });
        let fresh = Delegate::from_method(&second, Scaler::scale);

        assert_eq!(stale.invoke(4), 0, "A dropped target falls back to the default value");
        assert_ne!(stale, fresh);
        assert!(!stale.is_bound_to(&second));
        assert_eq!(fresh.invoke(4), 8);
    }

    #[test]
    fn mutating_method_delegate_updates_the_shared_object() {
        let acc = Rc::new(RefCell::new(Accumulator { total: 0 }));
        let d = Delegate::from_method_mut(&acc, Accumulator::add);

        assert_eq!(d.invoke(4), 4);
        assert_eq!(d.invoke(6), 10);
        assert_eq!(acc.borrow().total, 10);
    }

    #[test]
    fn mutating_method_delegate_reports_reentrant_borrow() {
        let acc = Rc::new(RefCell::new(Accumulator { total: 7 }));
        let d = Delegate::from_method_mut(&acc, Accumulator::add);

        let _guard = acc.borrow_mut();
        assert_eq!(d.invoke(1), 0, "A blocked call falls back to the default value");
    }

    #[test]
    fn functor_identity_is_its_storage() {
        let hits = Rc::new(Cell::new(0));
        let hits_in_closure = Rc::clone(&hits);
        let d1 = Delegate::from_functor(move |value: i32| {
            hits_in_closure.set(hits_in_closure.get() + 1);
            value + 1
        });
        let clone = d1.clone();
        let d2 = Delegate::from_functor(|value: i32| value + 1);

        assert_eq!(d1.invoke(1), 2);
        assert_eq!(clone.invoke(2), 3);
        assert_eq!(hits.get(), 2, "Clones share the captured state");
        assert_eq!(d1, clone);
        assert_ne!(d1, d2, "Separately constructed closures are distinct bindings");
    }

    #[test]
    fn null_delegate_returns_default_value() {
        let d: Delegate<i32, i32> = Delegate::default();
        assert!(d.is_null());
        assert_eq!(d.invoke(5), 0);
        assert_eq!(d.try_invoke(5), None);
        assert_eq!(d, Delegate::null());
    }

    #[test]
    fn reset_turns_delegate_into_null() {
        let mut d = Delegate::from_fn(double as fn(i32) -> i32);
        d.reset();
        assert!(d.is_null());
        assert_eq!(d, Delegate::null());
    }

    #[test]
    fn dropped_target_object_returns_default_value() {
        let scaler = Rc::new(Scaler { factor: 2 });
        let d = Delegate::from_method(&scaler, Scaler::scale);
        drop(scaler);

        assert!(!d.is_null(), "The binding is kept, only the object is gone");
        assert_eq!(d.invoke(10), 0);
    }
}
