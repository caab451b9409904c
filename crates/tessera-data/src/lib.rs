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

//! The data layer of Tessera: the entity-component runtime.
//!
//! Everything lives in the [`ecs`] module, which also re-exports the
//! `#[derive(Component)]` macro next to the trait of the same name.

#![warn(missing_docs)]

// Lets the derive's `::tessera_data::...` paths resolve inside this crate too.
extern crate self as tessera_data;

pub mod ecs;

#[doc(hidden)]
pub use inventory;
