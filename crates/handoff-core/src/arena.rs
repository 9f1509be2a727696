//! Index-addressed chains with shareable tails.
//!
//! [`Handler`](crate::Handler) owns its successor, which keeps a chain simple
//! but means a tail can belong to only one head. A [`ChainArena`] stores every
//! handler once and records successors as [`HandlerId`]s, so several entry
//! points may converge on the same tail. Linking checks ids and refuses to
//! close a loop.
//!
//! # Example
//!
//! ```rust
//! use handoff_core::{ChainArena, Outcome};
//!
//! let mut arena: ChainArena<str, &str> = ChainArena::new();
//! let monkey = arena.insert("Monkey", |r: &str| (r == "Banana").then(|| "monkey"));
//! let parrot = arena.insert("Parrot", |r: &str| (r == "Seed").then(|| "parrot"));
//! let dog = arena.insert("Dog", |r: &str| (r == "Meatball").then(|| "dog"));
//!
//! arena.link(monkey, dog)?;
//! arena.link(parrot, dog)?;
//!
//! assert_eq!(arena.handle(monkey, "Meatball")?, Outcome::Handled("dog"));
//! assert_eq!(arena.handle(parrot, "Meatball")?, Outcome::Handled("dog"));
//! // Dog already follows Monkey, so Monkey cannot follow Dog.
//! assert!(arena.link(dog, monkey).is_err());
//! # Ok::<(), handoff_core::ChainError>(())
//! ```

use std::fmt;

use tracing::{Level, debug, span, trace};

use crate::error::{ChainError, ChainResult};
use crate::outcome::Outcome;
use crate::responder::{BoxedResponder, Responder};

/// Position of a handler inside a [`ChainArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(usize);

impl HandlerId {
    /// The raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Node<Req: ?Sized, Res> {
    name: String,
    responder: BoxedResponder<Req, Res>,
    next: Option<HandlerId>,
}

/// Handlers stored by index, with index successors.
pub struct ChainArena<Req: ?Sized, Res> {
    nodes: Vec<Node<Req, Res>>,
}

impl<Req: ?Sized, Res> Default for ChainArena<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req: ?Sized, Res> ChainArena<Req, Res> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of handlers stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no handler has been inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stores a handler without a successor and returns its id.
    pub fn insert<R>(&mut self, name: impl Into<String>, responder: R) -> HandlerId
    where
        R: Responder<Req, Res> + 'static,
    {
        let id = HandlerId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            responder: Box::new(responder),
            next: None,
        });
        id
    }

    fn node(&self, id: HandlerId) -> ChainResult<&Node<Req, Res>> {
        self.nodes.get(id.0).ok_or(ChainError::UnknownHandler(id))
    }

    /// Sets `to` as the successor of `from` and returns `to`.
    ///
    /// Any previous successor of `from` is replaced. Fails if either id is
    /// unknown or if `from` is reachable from `to`.
    pub fn link(&mut self, from: HandlerId, to: HandlerId) -> ChainResult<HandlerId> {
        self.node(from)?;
        self.node(to)?;

        let mut cursor = Some(to);
        while let Some(id) = cursor {
            if id == from {
                return Err(ChainError::Cycle { from, to });
            }
            cursor = self.nodes[id.0].next;
        }

        let node = &mut self.nodes[from.0];
        if let Some(previous) = node.next.replace(to) {
            debug!(handler = %node.name, %previous, next = %to, "Replacing successor");
        } else {
            trace!(handler = %node.name, next = %to, "Linking successor");
        }
        Ok(to)
    }

    /// Clears the successor of `from`, returning the old one.
    pub fn unlink(&mut self, from: HandlerId) -> ChainResult<Option<HandlerId>> {
        self.node(from)?;
        Ok(self.nodes[from.0].next.take())
    }

    /// The successor of `id`, if any.
    pub fn next(&self, id: HandlerId) -> ChainResult<Option<HandlerId>> {
        Ok(self.node(id)?.next)
    }

    /// The name `id` was inserted with.
    pub fn name(&self, id: HandlerId) -> ChainResult<&str> {
        Ok(&self.node(id)?.name)
    }

    /// Finds the first inserted handler called `name`.
    pub fn find(&self, name: &str) -> Option<HandlerId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(HandlerId)
    }

    /// The ids visited when dispatching from `entry`, in order.
    pub fn path(&self, entry: HandlerId) -> ChainResult<Vec<HandlerId>> {
        self.node(entry)?;

        let mut path = Vec::new();
        let mut cursor = Some(entry);
        while let Some(id) = cursor {
            path.push(id);
            cursor = self.nodes[id.0].next;
        }
        Ok(path)
    }

    /// Dispatches `request` starting at `entry`.
    ///
    /// Same semantics as [`Handler::handle`](crate::Handler::handle); the only
    /// error is an `entry` that does not belong to this arena.
    pub fn handle(&self, entry: HandlerId, request: &Req) -> ChainResult<Outcome<Res>> {
        let first = self.node(entry)?;
        let span = span!(Level::DEBUG, "handle", entry = %first.name);
        let _enter = span.enter();

        let mut cursor = Some(entry);
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            if let Some(value) = node.responder.respond(request) {
                debug!(handler = %node.name, "Request handled");
                return Ok(Outcome::Handled(value));
            }
            trace!(handler = %node.name, "No match, passing to successor");
            cursor = node.next;
        }

        debug!("No handler in the chain recognized the request");
        Ok(Outcome::Unhandled)
    }
}

impl<Req: ?Sized, Res> fmt::Debug for ChainArena<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.nodes
                    .iter()
                    .map(|node| (node.name.as_str(), node.next.map(HandlerId::index))),
            )
            .finish()
    }
}
