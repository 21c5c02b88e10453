// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure value types shared by the resolution engine.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`TraceCapacity`](diagnostics::TraceCapacity))
//! - [`module`]: Installed modules and module-scope routing ([`ModuleRef`](module::ModuleRef),
//!   [`Scope`](module::Scope))
//! - [`resource`]: Resource key normalization ([`ResourcePath`](resource::ResourcePath))

pub mod diagnostics;
pub mod module;
pub mod resource;

pub use diagnostics::TraceCapacity;
pub use module::{ModuleRef, Scope};
pub use resource::ResourcePath;
