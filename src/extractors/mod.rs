// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod ctftime;
pub mod generic;
pub mod registry;
pub mod traits;
