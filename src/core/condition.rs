//! Conditions gating whether a log call commits

use super::{error::BoxError, level::Level};
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(Level) -> Result<bool, BoxError> + Send + Sync>;

/// One element of a logger's condition stack
#[derive(Clone)]
pub enum Condition {
    /// Passes or fails every call
    Bool(bool),
    /// Passes iff the call's level is at least this severe
    Floor(Level),
    /// Passes iff the predicate returns `Ok(true)`
    Predicate(Predicate),
}

impl Condition {
    /// Wrap an infallible predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(Level) -> bool + Send + Sync + 'static,
    {
        Condition::Predicate(Arc::new(move |level: Level| Ok::<bool, BoxError>(f(level))))
    }

    /// Wrap a predicate that may fail; a failure rejects the log call
    pub fn try_predicate<F>(f: F) -> Self
    where
        F: Fn(Level) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        Condition::Predicate(Arc::new(f))
    }

    pub fn evaluate(&self, level: Level) -> Result<bool, BoxError> {
        match self {
            Condition::Bool(pass) => Ok(*pass),
            Condition::Floor(floor) => Ok(level >= *floor),
            Condition::Predicate(check) => check(level),
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Bool(pass) => f.debug_tuple("Bool").field(pass).finish(),
            Condition::Floor(level) => f.debug_tuple("Floor").field(level).finish(),
            Condition::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<bool> for Condition {
    fn from(pass: bool) -> Self {
        Condition::Bool(pass)
    }
}

impl From<Level> for Condition {
    fn from(floor: Level) -> Self {
        Condition::Floor(floor)
    }
}

/// Conversion accepted by `Logger::if`.
///
/// `()` and `None` stand for an absent condition and append nothing.
pub trait IntoCondition {
    fn into_condition(self) -> Option<Condition>;
}

impl IntoCondition for Condition {
    fn into_condition(self) -> Option<Condition> {
        Some(self)
    }
}

impl IntoCondition for bool {
    fn into_condition(self) -> Option<Condition> {
        Some(Condition::Bool(self))
    }
}

impl IntoCondition for Level {
    fn into_condition(self) -> Option<Condition> {
        Some(Condition::Floor(self))
    }
}

impl IntoCondition for () {
    fn into_condition(self) -> Option<Condition> {
        None
    }
}

impl<T: IntoCondition> IntoCondition for Option<T> {
    fn into_condition(self) -> Option<Condition> {
        self.and_then(IntoCondition::into_condition)
    }
}
