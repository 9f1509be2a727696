//! Handlers and the chains they form.
//!
//! A [`Handler`] pairs a name with an injected [`Responder`] and owns at most
//! one successor. A chain is nothing more than the path of successors starting
//! at whichever handler the caller picks as an entry point.
//!
//! # Delegation
//!
//! [`Handler::handle`] asks the local responder first. If it declines, the
//! request moves on to the successor, and so on until either someone answers
//! or the path ends, in which case the outcome is [`Outcome::Unhandled`].
//! Delegation lives in the handler, not in each responder, so no responder can
//! skip it.
//!
//! # Example
//!
//! ```rust
//! use handoff_core::{Handler, Outcome, Template};
//!
//! let mut monkey: Handler<str, String> = Handler::accepting("Monkey", ["Banana"], Template::default());
//! monkey
//!     .set_next(Handler::accepting("Squirrel", ["Nut"], Template::default()))
//!     .set_next(Handler::accepting("Dog", ["Meatball"], Template::default()));
//!
//! assert_eq!(
//!     monkey.handle("Meatball"),
//!     Outcome::Handled("Dog: I'll eat the Meatball.".to_string())
//! );
//!
//! // Any handler can serve as the entry point.
//! let squirrel = monkey.find("Squirrel").unwrap();
//! assert!(squirrel.handle("Banana").is_unhandled());
//! ```

use std::fmt::{self, Display};

use tracing::{Level, debug, span, trace};

use crate::outcome::Outcome;
use crate::responder::{Accepts, BoxedResponder, Responder, Template, When};

/// One link in a chain of responsibility.
///
/// The successor is owned exclusively, so a chain cannot loop back on itself
/// and dropping a handler drops everything after it.
pub struct Handler<Req: ?Sized, Res> {
    name: String,
    responder: BoxedResponder<Req, Res>,
    next: Option<Box<Handler<Req, Res>>>,
}

impl<Req: ?Sized, Res> Handler<Req, Res> {
    /// Creates a handler with no successor.
    pub fn new<R>(name: impl Into<String>, responder: R) -> Self
    where
        R: Responder<Req, Res> + 'static,
    {
        Self {
            name: name.into(),
            responder: Box::new(responder),
            next: None,
        }
    }

    /// Creates a handler from a closure returning `Some` on a match.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Req) -> Option<Res> + Send + Sync + 'static,
    {
        Self::new(name, f)
    }

    /// Creates a handler from a predicate and the producer to run when it holds.
    pub fn when<P, F>(name: impl Into<String>, predicate: P, produce: F) -> Self
    where
        P: Fn(&Req) -> bool + Send + Sync + 'static,
        F: Fn(&Req) -> Res + Send + Sync + 'static,
    {
        Self::new(name, When::new(predicate, produce))
    }

    /// Returns the handler's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Links `next` as this handler's successor and returns it.
    ///
    /// Any previous successor, together with everything after it, is dropped.
    /// Returning the new link rather than `self` is what makes
    /// `a.set_next(b).set_next(c)` build `a -> b -> c`.
    pub fn set_next(&mut self, next: Handler<Req, Res>) -> &mut Handler<Req, Res> {
        if let Some(previous) = &self.next {
            debug!(
                handler = %self.name,
                previous = %previous.name,
                next = %next.name,
                "Replacing successor"
            );
        } else {
            trace!(handler = %self.name, next = %next.name, "Linking successor");
        }

        &mut **self.next.insert(Box::new(next))
    }

    /// Detaches and returns the successor, leaving this handler as a chain end.
    pub fn take_next(&mut self) -> Option<Handler<Req, Res>> {
        self.next.take().map(|next| *next)
    }

    /// Borrows the successor, if any.
    pub fn next(&self) -> Option<&Handler<Req, Res>> {
        self.next.as_deref()
    }

    /// Mutably borrows the successor, if any.
    pub fn next_mut(&mut self) -> Option<&mut Handler<Req, Res>> {
        self.next.as_deref_mut()
    }

    /// Iterates over this handler and every successor, in order.
    pub fn links(&self) -> Links<'_, Req, Res> {
        Links {
            current: Some(self),
        }
    }

    /// Number of handlers reachable from here, this one included.
    pub fn chain_len(&self) -> usize {
        self.links().count()
    }

    /// Finds the first handler named `name` on the path starting here.
    pub fn find(&self, name: &str) -> Option<&Handler<Req, Res>> {
        self.links().find(|handler| handler.name == name)
    }

    /// Mutable counterpart of [`find`](Self::find), for rewiring mid-chain.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Handler<Req, Res>> {
        let mut current = Some(self);
        while let Some(handler) = current {
            if handler.name == name {
                return Some(handler);
            }
            current = handler.next.as_deref_mut();
        }
        None
    }

    /// Asks only this handler's responder, without delegating.
    pub fn respond_locally(&self, request: &Req) -> Option<Res> {
        self.responder.respond(request)
    }

    /// Dispatches `request` starting at this handler.
    ///
    /// The first handler whose responder recognizes the request produces the
    /// outcome and nothing after it runs. If none does, the result is
    /// [`Outcome::Unhandled`].
    pub fn handle(&self, request: &Req) -> Outcome<Res> {
        let span = span!(Level::DEBUG, "handle", entry = %self.name);
        let _enter = span.enter();

        let mut current = Some(self);
        let mut visited = 0usize;

        while let Some(handler) = current {
            visited += 1;

            if let Some(value) = handler.responder.respond(request) {
                debug!(handler = %handler.name, visited, "Request handled");
                return Outcome::Handled(value);
            }

            trace!(handler = %handler.name, "No match, passing to successor");
            current = handler.next();
        }

        debug!(visited, "No handler in the chain recognized the request");
        Outcome::Unhandled
    }
}

impl<Req> Handler<Req, String>
where
    Req: ?Sized + PartialEq<String> + Display,
{
    /// Creates a handler that recognizes exactly the given values and answers
    /// with `template` rendered for its own name and the request.
    pub fn accepting<I>(name: impl Into<String>, accepted: I, template: Template) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let name = name.into();
        let responder = Accepts::<String>::new(name.clone(), accepted, template);
        Self::new(name, responder)
    }
}

impl<Req: ?Sized, Res> Drop for Handler<Req, Res> {
    fn drop(&mut self) {
        // Unlink iteratively so long chains don't recurse once per link.
        let mut next = self.next.take();
        while let Some(mut handler) = next {
            next = handler.next.take();
        }
    }
}

impl<Req: ?Sized, Res> fmt::Debug for Handler<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("next", &self.next.as_ref().map(|next| next.name.as_str()))
            .finish_non_exhaustive()
    }
}

/// Iterator over a handler and its successors.
///
/// Created by [`Handler::links`].
pub struct Links<'a, Req: ?Sized, Res> {
    current: Option<&'a Handler<Req, Res>>,
}

impl<'a, Req: ?Sized, Res> Iterator for Links<'a, Req, Res> {
    type Item = &'a Handler<Req, Res>;

    fn next(&mut self) -> Option<Self::Item> {
        let handler = self.current?;
        self.current = handler.next.as_deref();
        Some(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Visits = Arc<Mutex<Vec<&'static str>>>;

    fn animal(name: &str, food: &str) -> Handler<str, String> {
        Handler::accepting(name, [food], Template::default())
    }

    /// Monkey -> Squirrel -> Dog
    fn zoo() -> Handler<str, String> {
        let mut monkey = animal("Monkey", "Banana");
        monkey
            .set_next(animal("Squirrel", "Nut"))
            .set_next(animal("Dog", "Meatball"));
        monkey
    }

    fn recording(name: &'static str, accepts: &'static str, visits: &Visits) -> Handler<str, String> {
        let visits = Arc::clone(visits);
        Handler::from_fn(name, move |request: &str| {
            visits.lock().push(name);
            (request == accepts).then(|| format!("{name} took {request}"))
        })
    }

    fn names(handler: &Handler<str, String>) -> Vec<&str> {
        handler.links().map(Handler::name).collect()
    }

    #[test]
    fn test_fluent_set_next_builds_in_order() {
        let chain = zoo();
        assert_eq!(names(&chain), ["Monkey", "Squirrel", "Dog"]);
        assert_eq!(chain.chain_len(), 3);
        assert_eq!(
            chain.handle("Meatball"),
            Outcome::Handled("Dog: I'll eat the Meatball.".to_string())
        );
    }

    #[test]
    fn test_entry_point_mid_chain() {
        let chain = zoo();
        let squirrel = chain.find("Squirrel").expect("squirrel is linked");

        assert_eq!(
            squirrel.handle("Nut"),
            Outcome::Handled("Squirrel: I'll eat the Nut.".to_string())
        );
        // Monkey precedes the entry point and is not reachable from it.
        assert_eq!(squirrel.handle("Banana"), Outcome::Unhandled);
    }

    #[test]
    fn test_unrecognized_request_traverses_whole_chain() {
        let visits = Visits::default();
        let mut monkey = recording("Monkey", "Banana", &visits);
        monkey
            .set_next(recording("Squirrel", "Nut", &visits))
            .set_next(recording("Dog", "Meatball", &visits));

        assert_eq!(monkey.handle("Coffee cup"), Outcome::Unhandled);
        assert_eq!(*visits.lock(), ["Monkey", "Squirrel", "Dog"]);
    }

    #[test]
    fn test_match_stops_propagation() {
        let visits = Visits::default();
        let mut monkey = recording("Monkey", "Banana", &visits);
        monkey
            .set_next(recording("Squirrel", "Nut", &visits))
            .set_next(recording("Dog", "Meatball", &visits));

        assert_eq!(
            monkey.handle("Nut"),
            Outcome::Handled("Squirrel took Nut".to_string())
        );
        assert_eq!(*visits.lock(), ["Monkey", "Squirrel"]);
    }

    #[test]
    fn test_successor_never_invoked_after_match() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut first = animal("First", "ping");
        first.set_next(Handler::from_fn("Counter", move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            None
        }));

        for _ in 0..3 {
            assert!(first.handle("ping").is_handled());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(first.handle("pong").is_unhandled());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_single_handler_without_successor() {
        let dog = animal("Dog", "Meatball");
        assert!(dog.next().is_none());
        assert_eq!(dog.handle("Coffee cup"), Outcome::Unhandled);
    }

    #[test]
    fn test_set_next_last_write_wins() {
        let mut head = animal("Head", "a");
        head.set_next(animal("First", "b"));
        head.set_next(animal("Second", "c"));

        assert_eq!(names(&head), ["Head", "Second"]);
        assert!(head.handle("b").is_unhandled());
        assert!(head.handle("c").is_handled());
    }

    #[test]
    fn test_take_next_clears_successor() {
        let mut chain = zoo();
        let detached = chain.take_next().expect("monkey had a successor");

        assert_eq!(names(&chain), ["Monkey"]);
        assert_eq!(names(&detached), ["Squirrel", "Dog"]);
        assert!(chain.handle("Nut").is_unhandled());
        assert!(detached.handle("Nut").is_handled());
        assert!(chain.take_next().is_none());
    }

    #[test]
    fn test_find_mut_rewires_tail() {
        let mut chain = zoo();
        chain
            .find_mut("Dog")
            .expect("dog is linked")
            .set_next(animal("Cat", "Fish"));

        assert_eq!(names(&chain), ["Monkey", "Squirrel", "Dog", "Cat"]);
        assert_eq!(
            chain.handle("Fish").handled().as_deref(),
            Some("Cat: I'll eat the Fish.")
        );
        assert!(chain.find_mut("Parrot").is_none());
    }

    #[test]
    fn test_when_handler() {
        let mut upper = Handler::when(
            "Upper",
            |s: &str| s.chars().all(char::is_uppercase),
            |s: &str| s.to_lowercase(),
        );
        upper.set_next(Handler::when("Any", |_: &str| true, |s: &str| s.to_string()));

        assert_eq!(upper.handle("ABC"), Outcome::Handled("abc".to_string()));
        assert_eq!(upper.handle("Abc"), Outcome::Handled("Abc".to_string()));
        assert_eq!(upper.respond_locally("Abc"), None);
    }

    #[test]
    fn test_sized_requests() {
        let mut small = Handler::from_fn("small", |n: &u32| (*n < 10).then_some("small"));
        small.set_next(Handler::from_fn("large", |n: &u32| (*n >= 10).then_some("large")));

        assert_eq!(small.handle(&3), Outcome::Handled("small"));
        assert_eq!(small.handle(&30), Outcome::Handled("large"));
    }

    #[test]
    fn test_long_chain_handles_and_drops() {
        const LEN: usize = 100_000;

        let mut head = Handler::from_fn("0", |_: &usize| None::<usize>);
        let mut tail = &mut head;
        for i in 1..LEN {
            tail = tail.set_next(Handler::from_fn(i.to_string(), |_: &usize| None));
        }
        tail.set_next(Handler::from_fn("end", |n: &usize| Some(*n)));

        assert_eq!(head.chain_len(), LEN + 1);
        assert_eq!(head.handle(&7), Outcome::Handled(7));
        drop(head);
    }

    #[test]
    fn test_shared_read_only_across_threads() {
        let chain = Arc::new(zoo());

        std::thread::scope(|scope| {
            for food in ["Banana", "Nut", "Meatball"] {
                let chain = Arc::clone(&chain);
                scope.spawn(move || assert!(chain.handle(food).is_handled()));
            }
        });
    }

    #[test]
    fn test_debug_shows_successor_name() {
        let chain = zoo();
        let debug = format!("{chain:?}");
        assert!(debug.contains("Monkey"));
        assert!(debug.contains("Squirrel"));
    }
}
