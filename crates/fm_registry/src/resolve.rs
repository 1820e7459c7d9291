//! The lookup seam shared by registries, caches and plain functions.

use std::marker::PhantomData;
use std::sync::Arc;

use fm_hierarchy::TypeIdx;

/// Finds the handler for a runtime failure type.
///
/// `None` means no handler applies; it is an expected outcome, never an
/// error. Implementations must be pure: the same target always resolves
/// to an equal handler.
pub trait Resolve {
    type Handler: Clone;

    fn resolve(&self, target: TypeIdx) -> Option<Self::Handler>;
}

impl<R: Resolve + ?Sized> Resolve for &R {
    type Handler = R::Handler;

    #[inline]
    fn resolve(&self, target: TypeIdx) -> Option<Self::Handler> {
        (**self).resolve(target)
    }
}

impl<R: Resolve + ?Sized> Resolve for Box<R> {
    type Handler = R::Handler;

    #[inline]
    fn resolve(&self, target: TypeIdx) -> Option<Self::Handler> {
        (**self).resolve(target)
    }
}

impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    type Handler = R::Handler;

    #[inline]
    fn resolve(&self, target: TypeIdx) -> Option<Self::Handler> {
        (**self).resolve(target)
    }
}

/// Adapts a closure into a [`Resolve`] implementation.
pub struct FnResolver<F, H> {
    f: F,
    _handler: PhantomData<fn() -> H>,
}

impl<F, H> FnResolver<F, H>
where
    F: Fn(TypeIdx) -> Option<H>,
    H: Clone,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _handler: PhantomData,
        }
    }
}

impl<F, H> Resolve for FnResolver<F, H>
where
    F: Fn(TypeIdx) -> Option<H>,
    H: Clone,
{
    type Handler = H;

    #[inline]
    fn resolve(&self, target: TypeIdx) -> Option<H> {
        (self.f)(target)
    }
}
