//! The query bridge: what an external algebraic (SPARQL-like) evaluator needs from a model.
//!
//! Parsing and optimizing queries is not the job of this crate.
//! Instead, a model exposes three capabilities,
//! each blanket-implemented for every [`QuadModel`]:
//! * [`PatternSource`]: the physical iterator over the quads matching a pattern;
//! * [`CardinalityEstimator`]: a fast cost oracle for a pattern;
//! * [`TermNormalizer`]: a mapping from externally built terms (e.g. query constants)
//!   to the model's own representation.
//!
//! An [`Evaluator`] consumes them to evaluate its own expressions,
//! see [`QuadModel::evaluate`].

use std::error::Error;

use quadmodel_term::Term;

use crate::model::{QuadIter, QuadModel};
use crate::pattern::QuadPattern;

/// A source of quads matching a pattern.
pub trait PatternSource {
    /// The quads matching `pattern`.
    ///
    /// An empty `pattern.contexts` is a wildcard;
    /// a `None` entry in it stands for the default graph.
    fn statements<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a>;
}

/// A cost oracle for query optimizers.
pub trait CardinalityEstimator {
    /// An approximate number of quads matching `pattern`.
    fn cardinality(&self, pattern: &QuadPattern) -> usize;
}

/// A mapping from arbitrary terms to a model's representation of them.
pub trait TermNormalizer {
    /// The model's representation of `term`.
    ///
    /// This may be called concurrently from several threads.
    fn normalize_term(&self, term: &Term) -> Term;
}

impl<M: QuadModel + ?Sized> PatternSource for M {
    fn statements<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        self.quads_matching(pattern)
    }
}

impl<M: QuadModel + ?Sized> CardinalityEstimator for M {
    fn cardinality(&self, pattern: &QuadPattern) -> usize {
        self.estimate(pattern)
    }
}

impl<M: QuadModel + ?Sized> TermNormalizer for M {
    fn normalize_term(&self, term: &Term) -> Term {
        self.normalize(term)
    }
}

/// An external evaluator of algebraic expressions.
pub trait Evaluator {
    /// The expressions this evaluator understands.
    type Expr;
    /// A solution of an expression.
    type Bindings;
    /// The errors this evaluator may raise.
    type Error: Error + 'static;

    /// Evaluate `expr` against `source`, starting from `bindings`.
    fn evaluate<'s, S>(
        &self,
        source: &'s S,
        expr: &Self::Expr,
        bindings: &Self::Bindings,
    ) -> Result<Box<dyn Iterator<Item = Self::Bindings> + 's>, Self::Error>
    where
        S: PatternSource + CardinalityEstimator + TermNormalizer + ?Sized;
}

/// An evaluator for basic graph patterns,
/// checking that the bridge traits are enough to implement one.
#[cfg(test)]
pub(crate) mod dummy {
    use std::collections::HashMap;

    use super::*;

    /// A term or a variable.
    #[derive(Clone, Debug)]
    pub enum Node {
        Const(Term),
        Var(&'static str),
    }

    pub type Bindings = HashMap<&'static str, Term>;

    #[derive(Debug, thiserror::Error)]
    #[error("empty basic graph pattern")]
    pub struct EmptyBgp;

    /// Evaluates a conjunction of triple patterns over every graph,
    /// always picking next the pattern with the lowest estimated cardinality.
    pub struct BgpEvaluator;

    impl Evaluator for BgpEvaluator {
        type Expr = Vec<[Node; 3]>;
        type Bindings = Bindings;
        type Error = EmptyBgp;

        fn evaluate<'s, S>(
            &self,
            source: &'s S,
            expr: &Self::Expr,
            bindings: &Bindings,
        ) -> Result<Box<dyn Iterator<Item = Bindings> + 's>, EmptyBgp>
        where
            S: PatternSource + CardinalityEstimator + TermNormalizer + ?Sized,
        {
            if expr.is_empty() {
                return Err(EmptyBgp);
            }
            let normalized: Vec<[Node; 3]> = expr
                .iter()
                .map(|tp| {
                    tp.clone().map(|n| match n {
                        Node::Const(t) => Node::Const(source.normalize_term(&t)),
                        var => var,
                    })
                })
                .collect();
            let mut solutions = vec![];
            solve(source, normalized, bindings.clone(), &mut solutions);
            Ok(Box::new(solutions.into_iter()))
        }
    }

    fn resolve(node: &Node, bindings: &Bindings) -> Option<Term> {
        match node {
            Node::Const(t) => Some(t.clone()),
            Node::Var(v) => bindings.get(v).cloned(),
        }
    }

    fn to_pattern(tp: &[Node; 3], bindings: &Bindings) -> QuadPattern {
        QuadPattern::new(
            resolve(&tp[0], bindings),
            resolve(&tp[1], bindings),
            resolve(&tp[2], bindings),
            [],
        )
    }

    fn solve<S>(source: &S, mut todo: Vec<[Node; 3]>, bindings: Bindings, out: &mut Vec<Bindings>)
    where
        S: PatternSource + CardinalityEstimator + ?Sized,
    {
        let Some((best, _)) = todo
            .iter()
            .enumerate()
            .min_by_key(|(_, tp)| source.cardinality(&to_pattern(tp, &bindings)))
        else {
            out.push(bindings);
            return;
        };
        let tp = todo.swap_remove(best);
        let pattern = to_pattern(&tp, &bindings);
        for q in source.statements(&pattern) {
            let mut extended = bindings.clone();
            let consistent = [(&tp[0], &q.subject), (&tp[1], &q.predicate), (&tp[2], &q.object)]
                .into_iter()
                .all(|(node, term)| match node {
                    Node::Const(_) => true,
                    Node::Var(v) => *extended.entry(*v).or_insert_with(|| term.clone()) == *term,
                });
            if consistent {
                solve(source, todo.clone(), extended, out);
            }
        }
    }
}
