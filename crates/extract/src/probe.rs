//! Ordered first-match resolution.
//!
//! A fact that several sources may provide is resolved by a [`ProbeChain`]:
//! an ordered list of named [`Probe`]s evaluated against the same state until
//! one of them finds a value.

use tracing::instrument;

/// A single attempt to extract a value of type `T` from one source in `S`.
pub struct Probe<'a, S: ?Sized, T> {
    name: &'static str,
    run: Box<dyn Fn(&S) -> Option<T> + 'a>,
}
impl<'a, S: ?Sized, T> Probe<'a, S, T> {
    pub fn new(name: &'static str, run: impl Fn(&S) -> Option<T> + 'a) -> Self {
        Self { name, run: Box::new(run) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(&self, state: &S) -> Option<T> {
        (self.run)(state)
    }
}

/// Probes in priority order; the first one that finds a value wins.
pub struct ProbeChain<'a, S: ?Sized, T> {
    fact: &'static str,
    probes: Vec<Probe<'a, S, T>>,
}
impl<'a, S: ?Sized, T> ProbeChain<'a, S, T> {
    pub fn new(fact: &'static str) -> Self {
        Self { fact, probes: Vec::new() }
    }

    /// Appends a probe with lower priority than every probe added so far.
    pub fn probe(mut self, name: &'static str, run: impl Fn(&S) -> Option<T> + 'a) -> Self {
        self.probes.push(Probe::new(name, run));
        self
    }

    pub fn fact(&self) -> &'static str {
        self.fact
    }

    /// Probe names in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.probes.iter().map(Probe::name).collect()
    }

    /// Evaluates probes in order, stopping at the first match.
    pub fn resolve(&self, state: &S) -> Option<T> {
        self.resolve_named(state).map(|(_, value)| value)
    }

    /// Like [`resolve`](Self::resolve), also reporting which probe matched.
    #[instrument(level = "trace", skip_all, fields(fact = self.fact, probe))]
    pub fn resolve_named(&self, state: &S) -> Option<(&'static str, T)> {
        for probe in &self.probes {
            if let Some(value) = probe.run(state) {
                tracing::Span::current().record("probe", probe.name);
                tracing::trace!(fact = self.fact, probe = probe.name, "resolved");
                return Some((probe.name, value));
            }
        }
        tracing::trace!(fact = self.fact, "no probe matched");
        None
    }

    /// Evaluates the chain, falling back to `default` when no probe matches.
    pub fn resolve_or(&self, state: &S, default: T) -> T {
        self.resolve(state).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct State {
        a: Option<u32>,
        b: Option<u32>,
    }

    fn chain<'a>() -> ProbeChain<'a, State, u32> {
        ProbeChain::new("number").probe("a", |s: &State| s.a).probe("b", |s: &State| s.b).probe("fixed", |_| Some(7))
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(chain().resolve_named(&State { a: Some(1), b: Some(2) }), Some(("a", 1)));
        assert_eq!(chain().resolve_named(&State { a: None, b: Some(2) }), Some(("b", 2)));
        assert_eq!(chain().resolve_named(&State { a: None, b: None }), Some(("fixed", 7)));
    }

    #[test]
    fn test_stops_at_first_match() {
        let calls = Cell::new(0);
        let chain = ProbeChain::<(), u32>::new("counted")
            .probe("hit", |_| {
                calls.set(calls.get() + 1);
                Some(1)
            })
            .probe("never", |_| {
                calls.set(calls.get() + 100);
                Some(2)
            });
        assert_eq!(chain.resolve(&()), Some(1));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_empty_and_default() {
        let chain = ProbeChain::<(), u32>::new("empty");
        assert_eq!(chain.resolve(&()), None);
        assert_eq!(chain.resolve_or(&(), 8080), 8080);
        assert!(chain.names().is_empty());
    }

    #[test]
    fn test_names_in_order() {
        assert_eq!(chain().names(), ["a", "b", "fixed"]);
        assert_eq!(chain().fact(), "number");
    }
}
