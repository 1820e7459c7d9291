//! Handler registry and resolver caches for faultmap.
//!
//! A [`HandlerRegistry`] maps ancestor types to handlers and picks, for a
//! runtime failure type, the handler registered on its most specific
//! ancestor. A [`CachingResolver`] memoizes any [`Resolve`] implementation.
//!
//! # Architecture
//!
//! ```text
//! Registration<H>* ──> HandlerRegistry<H> ──(Resolve)──> caller
//!                             │
//!                             └── wrapped by CachingResolver<R>
//!                                   ├── Unbounded: DashMap
//!                                   └── Bounded:   Mutex<LruCache>
//! ```

mod cache;
mod error;
mod registry;
mod resolve;

pub use cache::{CachePolicy, CacheStats, CachingResolver, ResolverCache};
pub use error::RegistryError;
pub use registry::{HandlerRegistry, Match, Registration, RegistryBuilder};
pub use resolve::{FnResolver, Resolve};
