use thiserror::Error;

/// Every way a check-in or check-out can be refused.
///
/// None of these is fatal to the process: each one is folded into a
/// `CheckinOutcome` carrying exactly one user-facing message.
#[derive(Debug, Error)]
pub enum CheckinError {
    #[error("caller is not authenticated")]
    NotAuthenticated,
    #[error("event id is missing")]
    InvalidEvent,
    #[error("pin must have at least 4 digits")]
    InvalidPinFormat,
    #[error("pin does not match the event pin")]
    PinMismatch,
    #[error("user already checked in to this event")]
    AlreadyCheckedIn,
    #[error("user has not checked in to this event")]
    NotCheckedIn,
    #[error("user already checked out of this event")]
    AlreadyCheckedOut,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CheckinError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CheckinError::NotAuthenticated => "Usuário não autenticado.",
            CheckinError::InvalidEvent => "Evento inválido.",
            CheckinError::InvalidPinFormat => "O PIN deve ter pelo menos 4 dígitos.",
            CheckinError::PinMismatch => "PIN inválido. Tente novamente.",
            CheckinError::AlreadyCheckedIn => "Você já fez check-in neste evento.",
            CheckinError::NotCheckedIn => "Você ainda não fez check-in neste evento.",
            CheckinError::AlreadyCheckedOut => "Você já fez check-out deste evento.",
            CheckinError::Internal(_) => "Erro interno. Tente novamente.",
        }
    }

    /// Whether the user can fix the problem and submit again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckinError::InvalidPinFormat | CheckinError::PinMismatch | CheckinError::Internal(_)
        )
    }
}
