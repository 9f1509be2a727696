//! The result of dispatching a request through a chain.

/// What came back from a dispatch.
///
/// `Unhandled` is an ordinary value, not an error: it means no handler
/// reachable from the entry point recognized the request. A handler that
/// matched and produced an "empty" value still yields `Handled`.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<T> {
    /// A handler recognized the request and produced this value.
    Handled(T),
    /// No handler in the reachable chain recognized the request.
    Unhandled,
}

impl<T> Outcome<T> {
    /// Returns `true` if a handler produced a value.
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    /// Returns `true` if the request fell off the end of the chain.
    pub fn is_unhandled(&self) -> bool {
        matches!(self, Self::Unhandled)
    }

    /// Borrows the produced value, if any.
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Handled(value) => Outcome::Handled(value),
            Self::Unhandled => Outcome::Unhandled,
        }
    }

    /// Maps the produced value, leaving `Unhandled` untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Handled(value) => Outcome::Handled(f(value)),
            Self::Unhandled => Outcome::Unhandled,
        }
    }

    /// Returns the produced value, or computes a fallback.
    pub fn handled_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Handled(value) => value,
            Self::Unhandled => f(),
        }
    }

    /// Converts into an `Option`.
    pub fn handled(self) -> Option<T> {
        self.into()
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Handled(value),
            None => Self::Unhandled,
        }
    }
}

impl<T> From<Outcome<T>> for Option<T> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Handled(value) => Some(value),
            Outcome::Unhandled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_is_still_handled() {
        let outcome = Outcome::Handled(String::new());
        assert!(outcome.is_handled());
        assert_ne!(outcome, Outcome::Unhandled);
    }

    #[test]
    fn test_handled_or_else() {
        let unhandled: Outcome<&str> = Outcome::Unhandled;
        assert_eq!(unhandled.handled_or_else(|| "fallback"), "fallback");
        assert_eq!(Outcome::Handled("value").handled_or_else(|| "fallback"), "value");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Outcome::from(Some(3)), Outcome::Handled(3));
        assert_eq!(Outcome::<i32>::from(None), Outcome::Unhandled);
        assert_eq!(Outcome::Handled(3).map(|v| v * 2).handled(), Some(6));
    }
}
