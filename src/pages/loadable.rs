//! Per-resource load state for aggregated page loads.

use crate::api::ApiError;

/// Outcome of one resource in a page load.
///
/// Each resource a page needs is held in its own `Loadable`, so a failing
/// endpoint only blanks its own section.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Loadable<T> {
    /// The request has not completed yet.
    #[default]
    Pending,
    /// The request succeeded.
    Loaded(T),
    /// The request failed.
    Failed(ApiError),
}

impl<T> Loadable<T> {
    /// Wraps a finished request.
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(error) => Self::Failed(error),
        }
    }

    /// Borrows the loaded value.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    /// Borrows the failure, if the request failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Pending | Self::Loaded(_) => None,
        }
    }

    /// Returns true while the request is outstanding.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Converts the loaded value, keeping pending and failed states.
    pub fn map<U>(self, transform: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Self::Pending => Loadable::Pending,
            Self::Loaded(value) => Loadable::Loaded(transform(value)),
            Self::Failed(error) => Loadable::Failed(error),
        }
    }
}

impl<T: Default> Loadable<T> {
    /// Returns the loaded value or the type's empty value.
    #[must_use]
    pub fn loaded_or_default(&self) -> T
    where
        T: Clone,
    {
        self.loaded().cloned().unwrap_or_default()
    }
}
