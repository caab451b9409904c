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
use std::rc::Rc;

use super::single::Delegate;

/// An ordered list of [`Delegate`]s invoked together.
///
/// Subscribers are called in subscription order with a clone of the arguments.
/// Unsubscribing only nulls the matching entry; null entries are skipped by
/// [`invoke`](MultiDelegate::invoke) and compacted away on the next
/// subscription or an explicit [`compact`](MultiDelegate::compact).
pub struct MultiDelegate<A> {
    delegates: Vec<Delegate<A>>,
    contains_empty: bool,
}

impl<A: Clone + 'static> MultiDelegate<A> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            delegates: Vec::new(),
            contains_empty: false,
        }
    }

    /// Appends a delegate and returns a handle equal to it for later unsubscription.
    ///
    /// Null delegates are ignored.
    pub fn subscribe(&mut self, delegate: Delegate<A>) -> Delegate<A> {
        if delegate.is_null() {
            log::warn!("Ignoring subscription of a null delegate");
            return delegate;
        }
        self.compact();
        self.delegates.push(delegate.clone());
        delegate
    }

    /// Subscribes a free function.
    pub fn subscribe_fn(&mut self, function: fn(A)) -> Delegate<A> {
        self.subscribe(Delegate::from_fn(function))
    }

    /// Subscribes a method bound to a shared object.
    pub fn subscribe_method<T: 'static>(
        &mut self,
        object: &Rc<T>,
        method: fn(&T, A),
    ) -> Delegate<A> {
        self.subscribe(Delegate::from_method(object, method))
    }

    /// Subscribes a mutating method bound to a shared, interior-mutable object.
    pub fn subscribe_method_mut<T: 'static>(
        &mut self,
        object: &Rc<RefCell<T>>,
        method: fn(&mut T, A),
    ) -> Delegate<A> {
        self.subscribe(Delegate::from_method_mut(object, method))
    }

    /// Subscribes a closure. Keep the returned delegate to unsubscribe it.
    pub fn subscribe_functor<F>(&mut self, functor: F) -> Delegate<A>
    where
        F: Fn(A) + 'static,
    {
        self.subscribe(Delegate::from_functor(functor))
    }

    /// Removes the first subscriber equal to `delegate`.
    ///
    /// Returns `false` if no subscriber matched.
    pub fn unsubscribe(&mut self, delegate: &Delegate<A>) -> bool {
        if delegate.is_null() {
            return false;
        }
        match self.delegates.iter_mut().find(|d| **d == *delegate) {
            Some(entry) => {
                entry.reset();
                self.contains_empty = true;
                true
            }
            None => false,
        }
    }

    /// Removes every subscriber bound to `object`, returning `true` if any was found.
    pub fn unsubscribe_object<T>(&mut self, object: &Rc<T>) -> bool {
        let mut removed = false;
        for entry in self.delegates.iter_mut().filter(|d| d.is_bound_to(object)) {
            entry.reset();
            removed = true;
        }
        self.contains_empty |= removed;
        removed
    }

    /// Returns `true` if a subscriber equal to `delegate` is present.
    pub fn contains(&self, delegate: &Delegate<A>) -> bool {
        !delegate.is_null() && self.delegates.iter().any(|d| d == delegate)
    }

    /// Invokes every live subscriber in subscription order.
    pub fn invoke(&self, args: A) {
        for delegate in self.delegates.iter().filter(|d| !d.is_null()) {
            delegate.invoke(args.clone());
        }
    }

    /// Drops the entries nulled by unsubscription.
    pub fn compact(&mut self) {
        if self.contains_empty {
            self.delegates.retain(|d| !d.is_null());
            self.contains_empty = false;
        }
    }

    /// Removes every subscriber.
    pub fn clear(&mut self) {
        self.delegates.clear();
        self.contains_empty = false;
    }

    /// Returns the number of live subscribers.
    pub fn len(&self) -> usize {
        self.delegates.iter().filter(|d| !d.is_null()).count()
    }

    /// Returns `true` if there is no live subscriber.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A: Clone + 'static> Default for MultiDelegate<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for MultiDelegate<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiDelegate")
            .field("delegates", &self.delegates)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(&'static str, u32)>,
    }

    impl Recorder {
        fn first(&mut self, value: u32) {
            self.seen.push(("first", value));
        }

        fn second(&mut self, value: u32) {
            self.seen.push(("second", value));
        }
    }

    #[test]
    fn invokes_subscribers_in_subscription_order() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut list = MultiDelegate::<u32>::new();
        list.subscribe_method_mut(&recorder, Recorder::second);
        list.subscribe_method_mut(&recorder, Recorder::first);

        list.invoke(5);

        assert_eq!(recorder.borrow().seen, vec![("second", 5), ("first", 5)]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn unsubscribe_by_equal_delegate() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut list = MultiDelegate::<u32>::new();
        list.subscribe_method_mut(&recorder, Recorder::first);
        list.subscribe_method_mut(&recorder, Recorder::second);

        // A freshly built delegate with the same binding identifies the subscriber.
        let handle = Delegate::from_method_mut(&recorder, Recorder::first);
        assert!(list.contains(&handle));
        assert!(list.unsubscribe(&handle));
        assert!(!list.unsubscribe(&handle), "Second unsubscription finds nothing");

        list.invoke(1);
        assert_eq!(recorder.borrow().seen, vec![("second", 1)]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn unsubscribe_object_removes_all_of_its_bindings() {
        let a = Rc::new(RefCell::new(Recorder::default()));
        let b = Rc::new(RefCell::new(Recorder::default()));
        let mut list = MultiDelegate::<u32>::new();
        list.subscribe_method_mut(&a, Recorder::first);
        list.subscribe_method_mut(&b, Recorder::first);
        list.subscribe_method_mut(&a, Recorder::second);

        assert!(list.unsubscribe_object(&a));
        list.invoke(3);

        assert!(a.borrow().seen.is_empty());
        assert_eq!(b.borrow().seen, vec![("first", 3)]);
        assert!(!list.unsubscribe_object(&a));
    }

    #[test]
    fn functor_subscription_and_compaction() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut list = MultiDelegate::<u32>::new();

        let sink = Rc::clone(&hits);
        let handle = list.subscribe_functor(move |v| sink.borrow_mut().push(v));
        assert!(list.unsubscribe(&handle));
        assert!(list.is_empty());

        let sink = Rc::clone(&hits);
        list.subscribe_functor(move |v| sink.borrow_mut().push(v * 10));
        list.invoke(2);

        assert_eq!(*hits.borrow(), vec![20]);
        assert_eq!(list.delegates.len(), 1, "The nulled entry was compacted away");
    }

    #[test]
    fn null_subscription_is_ignored() {
        let mut list = MultiDelegate::<u32>::new();
        list.subscribe(Delegate::null());
        assert!(list.is_empty());
        assert!(!list.unsubscribe(&Delegate::null()));
    }
}
