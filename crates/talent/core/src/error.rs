//! Common error infrastructure for talent-core.
//!
//! This module provides shared types and traits used across all error types in
//! talent-core. Domain-specific errors (e.g. [`Refusal`](crate::check::Refusal),
//! [`AttemptError`](crate::execute::AttemptError)) are defined next to the
//! component that raises them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each component has its own error type with specific variants
//! - **Rich Context**: Errors include the ability, slot and nonce for debugging
//! - **Severity Classification**: Errors are categorized for recovery strategies

use crate::ability::AbilityKind;
use crate::state::SlotKey;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the attempt is aborted, the player keeps the turn
/// - **Validation**: invalid input or data, should not retry without changes
/// - **Internal**: unexpected inconsistency that requires investigation
/// - **Fatal**: the turn loop must stop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the player may pick another action.
    ///
    /// Examples: too confused, not enough magic, cancelled a prompt
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: duplicate ability definition, malformed slot rule
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: an effect handler ignored a failed roll
    Internal,

    /// Fatal error - the turn cannot continue.
    ///
    /// Examples: missing oracle, ability without an effect handler
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorContext {
    /// Ability being resolved when the error was raised.
    pub ability: Option<AbilityKind>,

    /// Input slot the ability was invoked from (if any).
    pub slot: Option<SlotKey>,

    /// Roll nonce at the time of error.
    ///
    /// Identifies the attempt sequence so log lines can be correlated with
    /// replayed rolls.
    pub nonce: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context with the given nonce.
    #[must_use]
    pub const fn new(nonce: u64) -> Self {
        Self {
            ability: None,
            slot: None,
            nonce,
            message: None,
        }
    }

    /// Attaches an ability to this context (builder pattern).
    #[must_use]
    pub const fn with_ability(mut self, ability: AbilityKind) -> Self {
        self.ability = Some(ability);
        self
    }

    /// Attaches an input slot to this context (builder pattern).
    #[must_use]
    pub const fn with_slot(mut self, slot: Option<SlotKey>) -> Self {
        self.slot = slot;
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all talent-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Include `ErrorContext` in variants that need debugging info
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
