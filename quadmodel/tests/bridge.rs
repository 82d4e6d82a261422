//! Evaluating basic graph patterns over a store,
//! through the query bridge only.
use std::collections::BTreeMap;

use lazy_static::lazy_static;
use quadmodel::prelude::*;
use quadmodel::term::ns::rdf;
use test_case::test_case;

type Bindings = BTreeMap<&'static str, Term>;

#[derive(Clone, Debug)]
enum Node {
    Const(Term),
    Var(&'static str),
}

use Node::{Const, Var};

/// A triple pattern, looked up in every graph or in the given one.
#[derive(Clone, Debug)]
struct Tp([Node; 3], Option<GraphName>);

#[derive(Debug, thiserror::Error)]
enum BgpError {
    #[error("empty basic graph pattern")]
    Empty,
    #[error("variable {0} is never bound")]
    Unbound(&'static str),
}

/// Evaluates conjunctions of triple patterns with nested loops,
/// joining first the pattern with the lowest cardinality.
struct Bgp;

impl Evaluator for Bgp {
    type Expr = (Vec<Tp>, Vec<&'static str>);
    type Bindings = Bindings;
    type Error = BgpError;

    fn evaluate<'s, S>(
        &self,
        source: &'s S,
        (tps, projection): &Self::Expr,
        bindings: &Bindings,
    ) -> Result<Box<dyn Iterator<Item = Bindings> + 's>, BgpError>
    where
        S: PatternSource + CardinalityEstimator + TermNormalizer + ?Sized,
    {
        if tps.is_empty() {
            return Err(BgpError::Empty);
        }
        for v in projection {
            let used = tps.iter().any(|tp| tp.0.iter().any(|n| matches!(n, Var(w) if w == v)));
            if !used && !bindings.contains_key(v) {
                return Err(BgpError::Unbound(*v));
            }
        }
        let normalized: Vec<Tp> = tps
            .iter()
            .map(|Tp(nodes, graph)| {
                let nodes = nodes.clone().map(|n| match n {
                    Const(t) => Const(source.normalize_term(&t)),
                    var => var,
                });
                Tp(nodes, graph.clone())
            })
            .collect();
        let mut solutions = vec![];
        join(source, normalized, bindings.clone(), &mut solutions);
        let projection = projection.clone();
        Ok(Box::new(solutions.into_iter().map(move |mut b| {
            b.retain(|k, _| projection.contains(k));
            b
        })))
    }
}

fn pattern(Tp(nodes, graph): &Tp, bindings: &Bindings) -> QuadPattern {
    let [s, p, o] = nodes.clone().map(|n| match n {
        Const(t) => Some(t),
        Var(v) => bindings.get(v).cloned(),
    });
    QuadPattern::new(s, p, o, graph.clone())
}

fn join<S>(source: &S, mut todo: Vec<Tp>, bindings: Bindings, out: &mut Vec<Bindings>)
where
    S: PatternSource + CardinalityEstimator + ?Sized,
{
    let Some(best) = (0..todo.len()).min_by_key(|i| source.cardinality(&pattern(&todo[*i], &bindings)))
    else {
        out.push(bindings);
        return;
    };
    let tp = todo.remove(best);
    for q in source.statements(&pattern(&tp, &bindings)) {
        let mut extended = bindings.clone();
        let terms = [&q.subject, &q.predicate, &q.object];
        let consistent = tp.0.iter().zip(terms).all(|(node, term)| match node {
            Const(_) => true,
            Var(v) => extended.entry(*v).or_insert_with(|| term.clone()) == term,
        });
        if consistent {
            join(source, todo.clone(), extended, out);
        }
    }
}

fn ex(suffix: &str) -> Term {
    Term::iri(format!("http://example.org/{suffix}")).unwrap()
}

lazy_static! {
    static ref TYPE: Term = Term::from(&*rdf::type_);
    static ref KNOWS: Term = ex("knows");
    static ref NAME: Term = ex("name");
    static ref PERSON: Term = ex("Person");
    static ref ALICE: Term = ex("alice");
    static ref BOB: Term = ex("bob");
    static ref CAROL: Term = ex("carol");
    static ref G1: Term = ex("g1");
}

fn store() -> QuadStore {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut store = QuadStore::new();
    for (s, name) in [(&*ALICE, "Alice"), (&*BOB, "Bob"), (&*CAROL, "Carol")] {
        store.insert(s, &TYPE, &PERSON, None).unwrap();
        store.insert(s, &NAME, &Term::simple_literal(name), None).unwrap();
    }
    store.insert(&ALICE, &KNOWS, &BOB, Some(&*G1)).unwrap();
    store.insert(&BOB, &KNOWS, &CAROL, Some(&*G1)).unwrap();
    store.insert(&CAROL, &KNOWS, &ALICE, None).unwrap();
    store
}

fn names_of_friends(graph: Option<GraphName>) -> (Vec<Tp>, Vec<&'static str>) {
    (
        vec![
            Tp([Var("x"), Const(TYPE.clone()), Const(PERSON.clone())], None),
            Tp([Var("x"), Const(KNOWS.clone()), Var("y")], graph),
            Tp([Var("y"), Const(NAME.clone()), Var("n")], None),
        ],
        vec!["x", "n"],
    )
}

#[test_case(None, 3; "any graph")]
#[test_case(Some(Some(G1.clone())), 2; "named graph")]
#[test_case(Some(None), 1; "default graph")]
fn friends(graph: Option<GraphName>, expected: usize) -> Result<(), BgpError> {
    let store = store();
    let solutions: Vec<Bindings> = store
        .evaluate(&Bgp, &names_of_friends(graph), &Bindings::new())?
        .collect();
    assert_eq!(solutions.len(), expected);
    assert!(solutions.iter().all(|b| b.len() == 2));
    Ok(())
}

#[test]
fn initial_bindings() -> Result<(), BgpError> {
    let store = store();
    let mut bindings = Bindings::new();
    bindings.insert("x", ALICE.clone());
    let solutions: Vec<Bindings> = store
        .evaluate(&Bgp, &names_of_friends(None), &bindings)?
        .collect();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0]["n"], Term::simple_literal("Bob"));
    Ok(())
}

#[test]
fn through_views() -> Result<(), BgpError> {
    let store = store();
    let view = View::filtered(&store, QuadPattern::any().in_default_graph());
    assert_eq!(view.evaluate(&Bgp, &names_of_friends(None), &Bindings::new())?.count(), 1);
    let empty = view.filter(&QuadPattern::any().with_context(Some(G1.clone())));
    assert_eq!(empty.evaluate(&Bgp, &names_of_friends(None), &Bindings::new())?.count(), 0);
    Ok(())
}

#[test]
fn errors() {
    let store = store();
    assert!(matches!(
        store.evaluate(&Bgp, &(vec![], vec![]), &Bindings::new()),
        Err(BgpError::Empty)
    ));
    let (tps, _) = names_of_friends(None);
    assert!(matches!(
        store.evaluate(&Bgp, &(tps, vec!["z"]), &Bindings::new()),
        Err(BgpError::Unbound("z"))
    ));
}

#[test]
fn query_constants_are_normalized() {
    let store = store();
    let alice = ex("alice");
    assert!(!alice.same_as(&ALICE));
    let normalized = store.normalize_term(&alice);
    let stored = store
        .statements(&QuadPattern::any().with_subject(alice.clone()))
        .next()
        .map(|q| q.subject);
    assert!(stored.is_some_and(|s| s.same_as(&normalized)));
}

#[test]
fn cardinality_follows_selectivity() {
    let store = store();
    let by_type = QuadPattern::any().with_predicate(TYPE.clone());
    let by_type_and_subject = by_type.clone().with_subject(ALICE.clone());
    assert_eq!(store.cardinality(&QuadPattern::any()), 9);
    assert_eq!(store.cardinality(&by_type), 3);
    assert_eq!(store.cardinality(&by_type_and_subject), 3);
    assert_eq!(store.cardinality(&by_type.clone().with_object(ex("nothing"))), 0);
    assert_eq!(store.cardinality(&QuadPattern::any().with_context(Some(G1.clone()))), 2);
    let multi = QuadPattern::any().with_context(Some(G1.clone())).in_default_graph();
    assert_eq!(store.cardinality(&multi), 9);
}
