//! Wrapping strategy bodies into measured cognitive functions.

use std::collections::BTreeSet;

use cogseq_types::{AttrValue, Attribute, CogError, Probability, Token};

use crate::complexity::Complexity;
use crate::context::Context;
use crate::memory::{Lexicon, List, Mode, Pair, Queue, Sequence, Trackable};

/// The top-level arguments of a cognitive function, as seen by the harness.
///
/// Trackable structures hand themselves to `register`; plain values (an
/// attribute, a probability, a count) visit nothing. Tuples and references
/// forward to their parts, so one argument bundle can mix both. A struct of
/// named fields implementing this trait stands in for keyword arguments.
pub trait Operands {
    fn visit(&self, register: &mut dyn FnMut(&dyn Trackable));
}

impl Operands for Token {
    fn visit(&self, register: &mut dyn FnMut(&dyn Trackable)) {
        register(self);
    }
}

impl Operands for Lexicon {
    fn visit(&self, register: &mut dyn FnMut(&dyn Trackable)) {
        register(self);
    }
}

impl<T> Operands for List<T> {
    fn visit(&self, register: &mut dyn FnMut(&dyn Trackable)) {
        register(self);
    }
}

impl<T> Operands for Queue<T> {
    fn visit(&self, register: &mut dyn FnMut(&dyn Trackable)) {
        register(self);
    }
}

impl<T> Operands for Mode<T> {
    fn visit(&self, register: &mut dyn FnMut(&dyn Trackable)) {
        register(self);
    }
}

impl<T> Operands for Pair<T> {
    fn visit(&self, register: &mut dyn FnMut(&dyn Trackable)) {
        register(self);
    }
}

// Output accumulators are not part of working memory.
impl<T> Operands for Sequence<T> {
    fn visit(&self, _register: &mut dyn FnMut(&dyn Trackable)) {}
}

macro_rules! inert_operands {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Operands for $ty {
                fn visit(&self, _register: &mut dyn FnMut(&dyn Trackable)) {}
            }
        )*
    };
}

inert_operands!((), bool, u32, u64, usize, f64, Attribute, AttrValue, Probability);

impl<T: Operands + ?Sized> Operands for &T {
    fn visit(&self, register: &mut dyn FnMut(&dyn Trackable)) {
        (**self).visit(register);
    }
}

impl<T: Operands + ?Sized> Operands for &mut T {
    fn visit(&self, register: &mut dyn FnMut(&dyn Trackable)) {
        (**self).visit(register);
    }
}

impl<T: Operands> Operands for Option<T> {
    fn visit(&self, register: &mut dyn FnMut(&dyn Trackable)) {
        if let Some(inner) = self {
            inner.visit(register);
        }
    }
}

macro_rules! tuple_operands {
    ($($ty:ident => $part:ident),+) => {
        impl<$($ty: Operands),+> Operands for ($($ty,)+) {
            fn visit(&self, register: &mut dyn FnMut(&dyn Trackable)) {
                let ($($part,)+) = self;
                $($part.visit(register);)+
            }
        }
    };
}

tuple_operands!(A => a);
tuple_operands!(A => a, B => b);
tuple_operands!(A => a, B => b, C => c);
tuple_operands!(A => a, B => b, C => c, D => d);

/// A strategy body paired with the label its runs are recorded under.
#[derive(Debug, Clone)]
pub struct CognitiveFunction<F> {
    name: &'static str,
    body: F,
}

/// Wrap `body` so that every call is measured in its own run scope.
pub fn cognitive_function<F>(name: &'static str, body: F) -> CognitiveFunction<F> {
    CognitiveFunction { name, body }
}

impl<F> CognitiveFunction<F> {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the body once under a fresh scope.
    ///
    /// Every trackable structure among `args` is registered with the scope,
    /// once per identity and at its current weight, before the body starts.
    /// On error the previous scope is current again and no history exists.
    pub fn call<A, T>(&self, ctx: &mut Context, args: &mut A) -> Result<(T, Complexity), CogError>
    where
        A: Operands + ?Sized,
        F: Fn(&mut Context, &mut A) -> Result<T, CogError>,
    {
        let mut history = Complexity::new();
        let value = ctx.measure(self.name, &mut history, |ctx| {
            let mut seen = BTreeSet::new();
            args.visit(&mut |structure| {
                if seen.insert(structure.structure_id()) {
                    ctx.register(structure);
                }
            });
            tracing::trace!(function = self.name, operands = seen.len(), "operands registered");
            (self.body)(ctx, args)
        })?;
        Ok((value, history))
    }
}
