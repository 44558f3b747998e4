/// Answer of a single predicate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check<T> {
    /// The condition holds; polling stops with this value.
    Success(T),
    /// Not there yet; poll again after the interval.
    NotYetReady,
    /// The condition can no longer become true; stop immediately.
    Fatal(String),
}

impl<T> Check<T> {
    pub fn fatal(reason: impl Into<String>) -> Self {
        Check::Fatal(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Check::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Check<U> {
        match self {
            Check::Success(v) => Check::Success(f(v)),
            Check::NotYetReady => Check::NotYetReady,
            Check::Fatal(reason) => Check::Fatal(reason),
        }
    }
}
