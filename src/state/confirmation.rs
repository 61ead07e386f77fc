//! Confirmation for destructive actions.
//!
//! Hosts with native dialogs answer synchronously; everywhere else an in-app
//! modal overlay is shown and the answer arrives later through
//! [`ConfirmationFlow::resolve`]. The strategy is picked once, from the host's
//! capabilities, when the flow is built.

use std::fmt;

use super::host::HostCapabilities;

/// The only two results a confirmation can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Confirmed,
    Cancelled,
}

impl ConfirmationOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Text shown by either presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    pub cancel_label: String,
    pub confirm_label: String,
    /// Confirm action is styled as destructive
    pub destructive: bool,
}

impl ConfirmationPrompt {
    /// Prompt guarding "start over".
    pub fn start_over() -> Self {
        Self {
            title: "Start Over".to_string(),
            message: "Are you sure? All previously played levels will be lost".to_string(),
            cancel_label: "Cancel".to_string(),
            confirm_label: "Start Over".to_string(),
            destructive: true,
        }
    }
}

/// What a strategy did with a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Blocking dialog already answered
    Resolved(ConfirmationOutcome),
    /// Overlay shown, waiting for the user
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Native,
    Modal,
}

/// A way of asking the user to confirm.
pub trait ConfirmationStrategy {
    fn kind(&self) -> StrategyKind;

    fn present(&mut self, prompt: &ConfirmationPrompt) -> Presentation;

    /// Hide any presentation left on screen.
    fn dismiss(&mut self) {}

    /// Prompt the host should render as an overlay, if any.
    fn overlay(&self) -> Option<&ConfirmationPrompt> {
        None
    }
}

/// Host-provided blocking dialog (an OS alert).
pub trait NativeDialog {
    fn confirm(&mut self, prompt: &ConfirmationPrompt) -> ConfirmationOutcome;
}

/// Strategy backed by a [`NativeDialog`].
pub struct NativeConfirmation {
    dialog: Box<dyn NativeDialog>,
}

impl NativeConfirmation {
    pub fn new(dialog: Box<dyn NativeDialog>) -> Self {
        Self { dialog }
    }
}

impl ConfirmationStrategy for NativeConfirmation {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Native
    }

    fn present(&mut self, prompt: &ConfirmationPrompt) -> Presentation {
        Presentation::Resolved(self.dialog.confirm(prompt))
    }
}

/// In-app modal overlay.
#[derive(Debug, Clone, Default)]
pub struct ModalConfirmation {
    visible: Option<ConfirmationPrompt>,
}

impl ModalConfirmation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfirmationStrategy for ModalConfirmation {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Modal
    }

    fn present(&mut self, prompt: &ConfirmationPrompt) -> Presentation {
        self.visible = Some(prompt.clone());
        Presentation::Pending
    }

    fn dismiss(&mut self) {
        self.visible = None;
    }

    fn overlay(&self) -> Option<&ConfirmationPrompt> {
        self.visible.as_ref()
    }
}

/// Error driving a [`ConfirmationFlow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationError {
    AlreadyPending,
    NotPending,
}

impl fmt::Display for ConfirmationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPending => write!(f, "A confirmation is already pending"),
            Self::NotPending => write!(f, "No confirmation is pending"),
        }
    }
}

impl std::error::Error for ConfirmationError {}

/// One confirmation at a time, through a fixed strategy.
pub struct ConfirmationFlow {
    strategy: Box<dyn ConfirmationStrategy>,
    pending: bool,
}

impl ConfirmationFlow {
    pub fn new(strategy: Box<dyn ConfirmationStrategy>) -> Self {
        Self {
            strategy,
            pending: false,
        }
    }

    /// Native dialog when the host has one and provided it, modal otherwise.
    pub fn for_host(host: &HostCapabilities, native: Option<Box<dyn NativeDialog>>) -> Self {
        match native {
            Some(dialog) if host.native_dialogs => {
                Self::new(Box::new(NativeConfirmation::new(dialog)))
            }
            _ => Self::new(Box::new(ModalConfirmation::new())),
        }
    }

    /// Ask for confirmation. `Ok(None)` means the answer will come through
    /// [`resolve`](Self::resolve).
    pub fn request(
        &mut self,
        prompt: &ConfirmationPrompt,
    ) -> Result<Option<ConfirmationOutcome>, ConfirmationError> {
        if self.pending {
            return Err(ConfirmationError::AlreadyPending);
        }

        match self.strategy.present(prompt) {
            Presentation::Resolved(outcome) => Ok(Some(outcome)),
            Presentation::Pending => {
                self.pending = true;
                Ok(None)
            }
        }
    }

    /// Deliver the user's answer to a pending request.
    pub fn resolve(
        &mut self,
        outcome: ConfirmationOutcome,
    ) -> Result<ConfirmationOutcome, ConfirmationError> {
        if !self.pending {
            return Err(ConfirmationError::NotPending);
        }

        self.pending = false;
        self.strategy.dismiss();
        Ok(outcome)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn overlay(&self) -> Option<&ConfirmationPrompt> {
        self.strategy.overlay()
    }
}

impl fmt::Debug for ConfirmationFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmationFlow")
            .field("kind", &self.kind())
            .field("pending", &self.pending)
            .finish()
    }
}
