// SPDX-License-Identifier: MIT

pub mod compiler;
pub mod emit;
pub mod filters;
pub mod loader;
pub mod types;
