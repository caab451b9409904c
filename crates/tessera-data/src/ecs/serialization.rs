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

//! Byte-level copy of plain-old-data components.
//!
//! Components made only of plain values can derive `bytemuck::Pod` and be
//! moved in and out of raw buffers without a per-field serializer.

use super::component::ComponentClass;
use super::error::EcsError;

/// Returns the raw bytes of a POD component.
pub fn component_to_bytes<T: ComponentClass + bytemuck::Pod>(component: &T) -> Vec<u8> {
    bytemuck::bytes_of(component).to_vec()
}

/// Reads a POD component back from bytes. The buffer need not be aligned.
pub fn component_from_bytes<T: ComponentClass + bytemuck::Pod>(
    bytes: &[u8],
) -> Result<T, EcsError> {
    bytemuck::try_pod_read_unaligned(bytes).map_err(|_| {
        let err = EcsError::SizeMismatch {
            expected: std::mem::size_of::<T>(),
            actual: bytes.len(),
        };
        log::error!("Cannot read component '{}': {err}", T::class_meta().name());
        err
    })
}
