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

//! Type-erased callables with identity, and ordered subscriber lists built on them.
//!
//! A [`Delegate`] wraps exactly one target: a free function, a method bound to a
//! shared object, or an arbitrary closure. Every delegate carries a
//! [`DelegateKey`] describing *what it is bound to*, and equality compares keys
//! only. That is what lets a subscriber hand back "the same binding" to a
//! [`MultiDelegate`] to unsubscribe, without the list knowing the subscriber's type.
//!
//! Everything here is single-threaded: targets are reference counted with
//! [`Rc`](std::rc::Rc), and dispatch is synchronous.

mod multi;
mod single;

pub use self::multi::MultiDelegate;
pub use self::single::{Delegate, DelegateKey};
