//! Local match-and-produce logic injected into handlers.
//!
//! A [`Responder`] only answers for itself: it either recognizes a request and
//! returns a value, or returns `None`. Forwarding to a successor is the
//! handler's job and never the responder's, so a responder cannot forget to
//! delegate.
//!
//! # Example
//!
//! ```rust
//! use handoff_core::{Accepts, Responder, Template, When};
//!
//! let even = When::new(|n: &u32| n % 2 == 0, |n: &u32| n / 2);
//! assert_eq!(even.respond(&8), Some(4));
//! assert_eq!(even.respond(&7), None);
//!
//! let monkey: Accepts<String> = Accepts::new("Monkey", ["Banana"], Template::default());
//! assert_eq!(
//!     monkey.respond("Banana").as_deref(),
//!     Some("Monkey: I'll eat the Banana.")
//! );
//! ```

use std::fmt::{self, Display, Write};
use std::str::FromStr;

/// Decides whether a request is recognized and, if so, what to produce.
pub trait Responder<Req: ?Sized, Res>: Send + Sync {
    /// Returns `Some` if this responder recognizes `request`.
    fn respond(&self, request: &Req) -> Option<Res>;
}

impl<Req, Res, F> Responder<Req, Res> for F
where
    Req: ?Sized,
    F: Fn(&Req) -> Option<Res> + Send + Sync,
{
    fn respond(&self, request: &Req) -> Option<Res> {
        self(request)
    }
}

/// A type-erased responder stored inside a handler.
pub type BoxedResponder<Req, Res> = Box<dyn Responder<Req, Res>>;

// ============================================================================
// When - predicate + producer
// ============================================================================

/// A responder built from a separate predicate and producer.
#[derive(Clone)]
pub struct When<P, F> {
    predicate: P,
    produce: F,
}

impl<P, F> When<P, F> {
    /// Pairs a predicate with the producer to run when it holds.
    pub fn new(predicate: P, produce: F) -> Self {
        Self { predicate, produce }
    }
}

impl<Req, Res, P, F> Responder<Req, Res> for When<P, F>
where
    Req: ?Sized,
    P: Fn(&Req) -> bool + Send + Sync,
    F: Fn(&Req) -> Res + Send + Sync,
{
    fn respond(&self, request: &Req) -> Option<Res> {
        if (self.predicate)(request) {
            Some((self.produce)(request))
        } else {
            None
        }
    }
}

impl<P, F> fmt::Debug for When<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("When").finish_non_exhaustive()
    }
}

// ============================================================================
// Template - "{handler}: I'll eat the {request}."
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Handler,
    Request,
}

/// A reply template with `{handler}` and `{request}` placeholders.
///
/// Any other text, including unknown `{...}` sequences, is copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

impl Template {
    /// The template used by the illustrative handlers.
    pub const DEFAULT: &'static str = "{handler}: I'll eat the {request}.";

    /// Parses a template string.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let pieces = parse_pieces(&source);
        Self { source, pieces }
    }

    /// The original template text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the template mentions the request at all.
    pub fn mentions_request(&self) -> bool {
        self.pieces.contains(&Piece::Request)
    }

    /// Renders the template for one handler and one request.
    pub fn render(&self, handler: &str, request: &dyn Display) -> String {
        let mut out = String::with_capacity(self.source.len() + handler.len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Handler => out.push_str(handler),
                Piece::Request => {
                    let _ = write!(out, "{request}");
                }
            }
        }
        out
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl FromStr for Template {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

fn parse_pieces(source: &str) -> Vec<Piece> {
    const HANDLER: &str = "{handler}";
    const REQUEST: &str = "{request}";

    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut rest = source;

    while !rest.is_empty() {
        let placeholder = if rest.starts_with(HANDLER) {
            Some((Piece::Handler, HANDLER.len()))
        } else if rest.starts_with(REQUEST) {
            Some((Piece::Request, REQUEST.len()))
        } else {
            None
        };

        match placeholder {
            Some((piece, len)) => {
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(piece);
                rest = &rest[len..];
            }
            None => {
                let ch_len = rest.chars().next().map_or(1, char::len_utf8);
                literal.push_str(&rest[..ch_len]);
                rest = &rest[ch_len..];
            }
        }
    }

    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    pieces
}

// ============================================================================
// Accepts - exact match against a fixed set of values
// ============================================================================

/// Recognizes requests equal to one of a fixed set of values and answers
/// with a rendered [`Template`].
#[derive(Debug, Clone)]
pub struct Accepts<V> {
    handler: String,
    accepted: Vec<V>,
    template: Template,
}

impl<V> Accepts<V> {
    /// Creates a responder answering as `handler` for each value in `accepted`.
    pub fn new<I>(handler: impl Into<String>, accepted: I, template: Template) -> Self
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        Self {
            handler: handler.into(),
            accepted: accepted.into_iter().map(Into::into).collect(),
            template,
        }
    }

    /// The values this responder recognizes.
    pub fn accepted(&self) -> &[V] {
        &self.accepted
    }
}

impl<Req, V> Responder<Req, String> for Accepts<V>
where
    Req: ?Sized + PartialEq<V> + Display,
    V: Send + Sync,
{
    fn respond(&self, request: &Req) -> Option<String> {
        if self.accepted.iter().any(|value| request == value) {
            Some(self.template.render(&self.handler, &request))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_responder() {
        let double = |n: &i32| (*n > 0).then(|| n * 2);
        assert_eq!(double.respond(&4), Some(8));
        assert_eq!(double.respond(&-1), None);
    }

    #[test]
    fn test_when_runs_producer_only_on_match() {
        let when = When::new(|s: &str| s.starts_with('/'), |s: &str| s[1..].to_string());
        assert_eq!(when.respond("/ping"), Some("ping".to_string()));
        assert_eq!(when.respond("ping"), None);
    }

    #[test]
    fn test_template_render() {
        let template = Template::default();
        assert_eq!(
            template.render("Squirrel", &"Nut"),
            "Squirrel: I'll eat the Nut."
        );
        assert!(template.mentions_request());
    }

    #[test]
    fn test_template_keeps_unknown_braces() {
        let template = Template::new("{who} {handler}{request}{");
        assert_eq!(template.render("Dog", &"Meatball"), "{who} DogMeatball{");
    }

    #[test]
    fn test_template_without_request_placeholder() {
        let template = Template::new("{handler} is full");
        assert!(!template.mentions_request());
        assert_eq!(template.render("Dog", &"Meatball"), "Dog is full");
    }

    #[test]
    fn test_template_multibyte_literal() {
        let template = Template::new("¿{request}?");
        assert_eq!(template.render("x", &"Nuez"), "¿Nuez?");
    }

    #[test]
    fn test_accepts_exact_match() {
        let dog: Accepts<String> = Accepts::new("Dog", ["Meatball"], Template::default());
        assert_eq!(
            dog.respond("Meatball").as_deref(),
            Some("Dog: I'll eat the Meatball.")
        );
        assert_eq!(dog.respond("meatball"), None);
        assert_eq!(dog.accepted(), ["Meatball".to_string()]);
    }
}
