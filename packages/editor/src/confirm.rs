//! Confirmation gate for destructive operations

/// Asked before a block is deleted; answering `false` leaves the document untouched
pub trait ConfirmationGate: Send {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Gate that accepts every prompt. Hosts that ask the user themselves before issuing a
/// delete use this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl ConfirmationGate for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

impl<F> ConfirmationGate for F
where
    F: FnMut(&str) -> bool + Send,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
