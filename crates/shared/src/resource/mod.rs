use tracing::debug;

/// State of one server-backed value.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncResource<T> {
    Idle,
    Loading,
    Succeeded(T),
    Failed(String),
}

impl<T> AsyncResource<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, AsyncResource::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AsyncResource::Loading)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, AsyncResource::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AsyncResource::Failed(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            AsyncResource::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AsyncResource::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for AsyncResource<T> {
    fn default() -> Self {
        AsyncResource::Idle
    }
}

/// Token identifying one issued request against a [`ResourceSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Couples an [`AsyncResource`] with a monotonically increasing request
/// counter. `begin` bumps the counter; completions carry the token they
/// were issued with and are discarded when a newer request has been
/// issued since. In-flight transports are never cancelled, only their
/// completions are ignored.
#[derive(Debug)]
pub struct ResourceSlot<T> {
    state: AsyncResource<T>,
    issued: u64,
}

impl<T> Default for ResourceSlot<T> {
    fn default() -> Self {
        Self {
            state: AsyncResource::Idle,
            issued: 0,
        }
    }
}

impl<T> ResourceSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AsyncResource<T> {
        &self.state
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Transitions to `Loading` and returns the token the eventual
    /// completion must present.
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.state = AsyncResource::Loading;
        RequestToken(self.issued)
    }

    /// Applies a successful completion. Returns false when the token is
    /// stale, in which case the state is left untouched.
    pub fn succeed(&mut self, token: RequestToken, value: T) -> bool {
        if !self.is_current(token) {
            debug!(
                "discarding stale success (token {} < {})",
                token.0, self.issued
            );
            return false;
        }
        self.state = AsyncResource::Succeeded(value);
        true
    }

    /// Applies a failed completion, clearing any prior value. Stale
    /// failures are discarded like stale successes.
    pub fn fail(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.is_current(token) {
            debug!(
                "discarding stale failure (token {} < {})",
                token.0, self.issued
            );
            return false;
        }
        self.state = AsyncResource::Failed(message.into());
        true
    }

    /// Returns the slot to `Idle` and invalidates every outstanding
    /// request, so late completions of prior calls cannot resurrect it.
    pub fn reset(&mut self) {
        self.issued += 1;
        self.state = AsyncResource::Idle;
    }
}
