//! # Lenses
//!
//! A [`Lens`] is a reified accessor for some part `P` of a whole `W`: a `get`
//! that reads the part and a `set` that produces a *new* whole with the part
//! replaced. Entities in this crate are immutable values, so every nested
//! update is written as "focus with a lens, then set".
//!
//! Lenses compose: a `Lens<A, B>` and a `Lens<B, C>` give a `Lens<A, C>` whose
//! `get` reads through both levels and whose `set` rebuilds both levels.
//!
//! ```rust
//! use qunotes::lens::{pipe, Lens};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Inner { value: u32 }
//! #[derive(Clone, Debug, PartialEq)]
//! struct Outer { inner: Inner }
//!
//! let inner = Lens::new(|o: &Outer| o.inner.clone(), |inner, o: Outer| Outer { inner, ..o });
//! let value = Lens::new(|i: &Inner| i.value, |value, i: Inner| Inner { value, ..i });
//! let deep = inner.compose(&value);
//!
//! let outer = Outer { inner: Inner { value: 1 } };
//! let updated = pipe(outer, deep.setter(7));
//! assert_eq!(deep.get(&updated), 7);
//! ```
//!
//! ## Laws
//!
//! Constructing a lens performs no validation. Callers supplying `get`/`set`
//! are responsible for the usual laws:
//!
//! - `get(&set(p, w)) == p`
//! - `set(get(&w), w) == w`
//!
//! Composition preserves both laws and is associative.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

type Getter<W, P> = dyn Fn(&W) -> P + Send + Sync;
type Setter<W, P> = dyn Fn(P, W) -> W + Send + Sync;

/// A composable, pure get/set pair focusing a `P` inside a `W`.
pub struct Lens<W, P> {
    get: Arc<Getter<W, P>>,
    set: Arc<Setter<W, P>>,
}

// Manual impl: cloning a lens only clones the shared closures.
impl<W, P> Clone for Lens<W, P> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

impl<W, P> fmt::Debug for Lens<W, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lens<{}, {}>", type_name::<W>(), type_name::<P>())
    }
}

impl<W: 'static, P: 'static> Lens<W, P> {
    /// Builds a lens from a getter and a setter.
    pub fn new<G, S>(get: G, set: S) -> Self
    where
        G: Fn(&W) -> P + Send + Sync + 'static,
        S: Fn(P, W) -> W + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }

    pub fn get(&self, whole: &W) -> P {
        (self.get)(whole)
    }

    pub fn set(&self, part: P, whole: W) -> W {
        (self.set)(part, whole)
    }

    /// Replaces the focused part with `f` applied to its current value.
    pub fn over<F>(&self, whole: W, f: F) -> W
    where
        F: FnOnce(P) -> P,
    {
        let part = self.get(&whole);
        self.set(f(part), whole)
    }

    /// Partially applied [`Lens::set`], convenient together with [`pipe`].
    pub fn setter(&self, part: P) -> impl FnOnce(W) -> W {
        let set = Arc::clone(&self.set);
        move |whole| set(part, whole)
    }

    /// Focuses further into the part with `inner`.
    pub fn compose<Q: 'static>(&self, inner: &Lens<P, Q>) -> Lens<W, Q> {
        let outer_get = Arc::clone(&self.get);
        let outer_get_for_set = Arc::clone(&self.get);
        let outer_set = Arc::clone(&self.set);
        let inner_get = Arc::clone(&inner.get);
        let inner_set = Arc::clone(&inner.set);

        Lens {
            get: Arc::new(move |whole: &W| inner_get(&outer_get(whole))),
            set: Arc::new(move |sub: Q, whole: W| {
                let part = outer_get_for_set(&whole);
                let part = inner_set(sub, part);
                outer_set(part, whole)
            }),
        }
    }
}

/// Free-function form of [`Lens::compose`].
pub fn compose<A: 'static, B: 'static, C: 'static>(
    outer: &Lens<A, B>,
    inner: &Lens<B, C>,
) -> Lens<A, C> {
    outer.compose(inner)
}

/// The lens focusing the whole value itself.
pub fn identity<W>() -> Lens<W, W>
where
    W: Clone + 'static,
{
    Lens::new(|whole: &W| whole.clone(), |part, _| part)
}

/// Feeds `value` into `f`. Reads left to right when chaining setters.
pub fn pipe<A, B, F>(value: A, f: F) -> B
where
    F: FnOnce(A) -> B,
{
    f(value)
}
