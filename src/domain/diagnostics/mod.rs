// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.

mod newtypes;

pub use newtypes::{trace_capacity_bounds, TraceCapacity};
