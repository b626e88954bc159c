// Copyright 2025 Johann Kempter
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
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # hookscope
//!
//! A runtime function-interception registry. `hookscope` redirects calls from
//! an original ("target") function to a replacement ("hook") function, while
//! keeping the original reachable on demand. It is meant for instrumentation,
//! testing and low-level tooling that needs to observe or override calls
//! without touching the call sites.
//!
//! ## Features
//!
//! - **Named hooks** - Every hook lives under a unique name in a [`HookRegistry`]
//! - **Explicit lifecycle** - Adding, installing, uninstalling and removing are separate steps
//! - **Fail-fast bulk operations** - `install_all` / `uninstall_all` stop at the first failure, no rollback
//! - **Call original** - Reach the target's behavior even while it is redirected
//! - **Checked invocation** - Arguments and return values are validated against a [`value::Signature`]
//! - **Pluggable strategies** - Anything implementing [`Hook`] can be registered
//!
//! ## Quick Start
//!
//! ```rust
//! use hookscope::prelude::*;
//!
//! let sig = Signature::new(vec![ValueKind::I32, ValueKind::I32], ValueKind::I32);
//! let add = Function::new("add", sig.clone(), |args| {
//!     Ok(Value::I32(args[0].as_i32().unwrap_or(0) + args[1].as_i32().unwrap_or(0)))
//! });
//! let traced = Function::new("traced_add", sig, |_| Ok(Value::I32(-1)));
//!
//! // Call sites dispatch through the slot
//! let slot = FunctionSlot::new(add);
//!
//! let mut registry = HookRegistry::new();
//! registry.add(slot.clone(), traced, "trace-add")?;
//! registry.install("trace-add")?;
//!
//! let args = [Value::I32(2), Value::I32(3)];
//! assert_eq!(slot.call(&args)?, Value::I32(-1));
//! assert_eq!(registry.call_original("trace-add", &args)?, Value::I32(5));
//!
//! registry.uninstall("trace-add")?;
//! assert_eq!(slot.call(&args)?, Value::I32(5));
//! # Ok::<(), hookscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `hookscope` is organized into several key modules:
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`registry`] - The [`HookRegistry`], its entries, configuration and the thread-safe [`SharedRegistry`]
//! - [`hook`] - The [`Hook`] capability and the built-in strategies
//! - [`target`] - Redirection points: [`target::FunctionSlot`] and [`target::FunctionTable`]
//! - [`value`] - The type-erased [`value::Value`] calling convention
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Failures are never
//! retried or recovered internally:
//!
//! ```rust
//! use hookscope::{Error, HookRegistry};
//!
//! let mut registry = HookRegistry::new();
//! match registry.uninstall("nothing-here") {
//!     Err(Error::NotFound(name)) => println!("no hook named {name}"),
//!     Err(Error::UninstallFailed(name)) => println!("{name} refused to uninstall"),
//!     Err(e) => println!("Other error: {e}"),
//!     Ok(()) => println!("uninstalled"),
//! }
//! ```
//!
//! ## Logging
//!
//! Lifecycle events are emitted through [`tracing`]. Install a subscriber in
//! the host process to see them; the library never installs one itself.
//!
//! ## Thread Safety
//!
//! [`HookRegistry`] is a plain value with `&mut self` mutations: the caller
//! serializes access. [`SharedRegistry`] wraps one registry behind a single
//! mutex for concurrent use.
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use hookscope::prelude::*;
///
/// let registry = HookRegistry::with_config(RegistryConfig::strict());
/// assert!(registry.is_empty());
/// ```
pub mod prelude;

pub mod hook;
pub mod registry;
pub mod target;
pub mod value;

/// `hookscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `hookscope` Error type
///
/// The main error type for all operations in this crate. See [`Error`] for the
/// full list of variants.
pub use error::Error;

/// The hook capability trait.
pub use hook::Hook;

/// Registry types.
pub use registry::{HookEntry, HookRegistry, HookState, RegistryConfig, SharedRegistry};
