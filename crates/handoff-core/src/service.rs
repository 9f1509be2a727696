//! Tower integration for handler chains.
//!
//! A [`Handler`] implements `tower::Service<Req>`, so an assembled chain can be
//! wrapped with ordinary Tower middleware. Dispatch is synchronous; the future
//! is ready as soon as it is created.
//!
//! ```rust
//! use handoff_core::{Handler, Outcome};
//! use tower::ServiceExt;
//!
//! let chain: Handler<u32, &str> = Handler::from_fn("even", |n: &u32| (n % 2 == 0).then_some("even"));
//! let outcome = tokio_test::block_on(chain.oneshot(4));
//! assert_eq!(outcome, Ok(Outcome::Handled("even")));
//! ```

use std::convert::Infallible;
use std::task::{Context, Poll};

use futures::future::{Ready, ready};
use tower::Service;

use crate::handler::Handler;
use crate::outcome::Outcome;

impl<Req, Res> Service<Req> for Handler<Req, Res> {
    type Response = Outcome<Res>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Req) -> Self::Future {
        ready(Ok(self.handle(&request)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::Template;
    use tower::ServiceExt;

    fn zoo() -> Handler<String, String> {
        let mut monkey = Handler::accepting("Monkey", ["Banana"], Template::default());
        monkey
            .set_next(Handler::accepting("Squirrel", ["Nut"], Template::default()))
            .set_next(Handler::accepting("Dog", ["Meatball"], Template::default()));
        monkey
    }

    #[test]
    fn test_call_matches_handle() {
        let mut chain = zoo();
        let expected = chain.handle(&"Nut".to_string());

        let outcome = tokio_test::block_on(async {
            chain.ready().await?.call("Nut".to_string()).await
        });

        assert_eq!(outcome, Ok(expected));
    }

    #[test]
    fn test_oneshot_unhandled() {
        let outcome = tokio_test::block_on(zoo().oneshot("Coffee cup".to_string()));
        assert_eq!(outcome, Ok(Outcome::Unhandled));
    }

    #[test]
    fn test_map_response_layer() {
        let service = zoo().map_response(|outcome: Outcome<String>| {
            outcome.handled_or_else(|| "left untouched".to_string())
        });

        let reply = tokio_test::block_on(service.oneshot("Tea".to_string()));
        assert_eq!(reply, Ok("left untouched".to_string()));
    }
}
