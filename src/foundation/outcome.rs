/// Result of an acquisition that may have degraded to a fallback value.
///
/// Components that must never fail (script generation, background fetch, font loading) return
/// this instead of swallowing errors, so callers and tests can see which path was taken.
#[derive(Clone, Debug, PartialEq)]
pub enum Acquired<T> {
    /// The primary source produced the value.
    Fetched(T),
    /// The primary source failed; `value` is the fallback and `reason` says why.
    Fallback { value: T, reason: String },
}

impl<T> Acquired<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Fetched(v) | Self::Fallback { value: v, .. } => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Fetched(v) | Self::Fallback { value: v, .. } => v,
        }
    }

    /// Failure reason when the fallback was used.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Fetched(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }
}
