use crate::core::SessionResult;

/// Hands control back to the surrounding application.
pub trait Navigator {
    fn return_to_assessment(&mut self, result: &SessionResult);
}

impl<F: FnMut(&SessionResult)> Navigator for F {
    fn return_to_assessment(&mut self, result: &SessionResult) {
        self(result)
    }
}

/// Navigator for hosts without a surrounding screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNavigation;

impl Navigator for NoNavigation {
    fn return_to_assessment(&mut self, _result: &SessionResult) {}
}
