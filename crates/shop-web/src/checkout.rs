//! Buy-Now Request State
//!
//! The buy-now control walks through `Idle → Pending → Redirecting` on
//! success, or back to an enabled `Failed` state when the checkout request
//! fails. Only `Idle` and `Failed` accept a click, so one view never has two
//! checkout requests in flight.

use async_trait::async_trait;
use thiserror::Error;

/// Alert shown when the checkout cannot be started
pub const FAILURE_NOTICE: &str = "Falha ao redirecionar ao checkout!";

/// State of the buy-now control
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CheckoutState {
    /// Enabled, nothing attempted yet
    #[default]
    Idle,
    /// Disabled while the checkout request is in flight
    Pending,
    /// Enabled again after a failed attempt
    Failed,
    /// Terminal: the browser is leaving for the hosted checkout
    Redirecting { url: String },
}

impl CheckoutState {
    /// Whether the control accepts a click
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }

    /// State after a click, or `None` if the click must be ignored
    pub const fn begin(&self) -> Option<Self> {
        if self.is_enabled() {
            Some(Self::Pending)
        } else {
            None
        }
    }

    /// Handle a click in place
    ///
    /// Returns `true` when the click moved the control to `Pending` and a
    /// checkout request must be sent.
    pub fn start(&mut self) -> bool {
        match self.begin() {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    /// Apply the outcome of the checkout request
    ///
    /// Outcomes only move a `Pending` control; any other state is returned
    /// unchanged.
    #[must_use]
    pub fn resolve(self, outcome: Result<String, CheckoutFailure>) -> Self {
        match (self, outcome) {
            (Self::Pending, Ok(url)) => Self::Redirecting { url },
            (Self::Pending, Err(_)) => Self::Failed,
            (other, _) => other,
        }
    }
}

/// Why a checkout request failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutFailure {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Checkout endpoint returned status {0}")]
    Status(u16),

    #[error("Malformed checkout response: {0}")]
    MalformedResponse(String),
}

/// Server-side endpoint that turns a price id into a checkout URL
#[async_trait(?Send)]
pub trait CheckoutApi {
    async fn create_checkout(&self, price_id: &str) -> Result<String, CheckoutFailure>;
}

/// The parts of the browsing context the control touches
pub trait Browser {
    /// Full-page navigation
    fn redirect(&self, url: &str);

    /// Blocking notice
    fn alert(&self, message: &str);
}

/// Run one checkout attempt for a control already in `Pending`
///
/// Navigates away on success and alerts on failure. No retry.
pub async fn complete_checkout<A, B>(api: &A, browser: &B, price_id: &str) -> CheckoutState
where
    A: CheckoutApi + ?Sized,
    B: Browser + ?Sized,
{
    let next = CheckoutState::Pending.resolve(api.create_checkout(price_id).await);

    match &next {
        CheckoutState::Redirecting { url } => browser.redirect(url),
        _ => browser.alert(FAILURE_NOTICE),
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct FakeApi {
        response: Result<String, CheckoutFailure>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeApi {
        fn new(response: Result<String, CheckoutFailure>) -> Self {
            Self {
                response,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl CheckoutApi for FakeApi {
        async fn create_checkout(&self, price_id: &str) -> Result<String, CheckoutFailure> {
            self.requests.borrow_mut().push(price_id.to_string());
            self.response.clone()
        }
    }

    #[derive(Default)]
    struct FakeBrowser {
        location: RefCell<Option<String>>,
        alerts: Cell<usize>,
    }

    impl Browser for FakeBrowser {
        fn redirect(&self, url: &str) {
            *self.location.borrow_mut() = Some(url.to_string());
        }

        fn alert(&self, message: &str) {
            assert_eq!(message, FAILURE_NOTICE);
            self.alerts.set(self.alerts.get() + 1);
        }
    }

    /// Click, then run the request the click started
    async fn click(state: &CheckoutState, api: &FakeApi, browser: &FakeBrowser) -> CheckoutState {
        let pending = state.begin().expect("control should be enabled");
        assert!(!pending.is_enabled());
        complete_checkout(api, browser, "price_1").await
    }

    #[test]
    fn test_initial_state_is_enabled() {
        assert_eq!(CheckoutState::default(), CheckoutState::Idle);
        assert!(CheckoutState::Idle.is_enabled());
    }

    #[test]
    fn test_pending_ignores_clicks() {
        assert_eq!(CheckoutState::Pending.begin(), None);
        let redirecting = CheckoutState::Redirecting { url: "https://x".into() };
        assert_eq!(redirecting.begin(), None);
    }

    #[test]
    fn test_outcome_ignored_outside_pending() {
        let state = CheckoutState::Idle.resolve(Ok("https://x".into()));
        assert_eq!(state, CheckoutState::Idle);
    }

    #[test]
    fn test_start_accepts_one_click() {
        let mut state = CheckoutState::Idle;
        assert!(state.start());
        assert_eq!(state, CheckoutState::Pending);

        // Further clicks while pending send nothing
        assert!(!state.start());
        assert!(!state.start());
        assert_eq!(state, CheckoutState::Pending);

        let mut failed = CheckoutState::Failed;
        assert!(failed.start());
        assert_eq!(failed, CheckoutState::Pending);
    }

    #[tokio::test]
    async fn test_double_click_sends_one_request() {
        let api = FakeApi::new(Err(CheckoutFailure::Status(503)));
        let browser = FakeBrowser::default();
        let mut state = CheckoutState::Idle;

        let mut sent = 0;
        for _ in 0..2 {
            if state.start() {
                sent += 1;
            }
        }
        assert_eq!(sent, 1);

        state = complete_checkout(&api, &browser, "price_1").await;
        assert_eq!(api.requests.borrow().len(), 1);
        assert_eq!(browser.alerts.get(), 1);

        // Enabled again, and the next click starts a new attempt
        assert!(state.start());
    }

    #[tokio::test]
    async fn test_successful_click_redirects() {
        let api = FakeApi::new(Ok("https://checkout.stripe.com/c/pay/cs_1".into()));
        let browser = FakeBrowser::default();

        let state = click(&CheckoutState::Idle, &api, &browser).await;

        assert_eq!(
            state,
            CheckoutState::Redirecting {
                url: "https://checkout.stripe.com/c/pay/cs_1".into()
            }
        );
        assert_eq!(*api.requests.borrow(), vec!["price_1"]);
        assert_eq!(
            browser.location.borrow().as_deref(),
            Some("https://checkout.stripe.com/c/pay/cs_1")
        );
        assert_eq!(browser.alerts.get(), 0);
        assert!(!state.is_enabled());
    }

    #[tokio::test]
    async fn test_failed_click_recovers() {
        let api = FakeApi::new(Err(CheckoutFailure::Status(502)));
        let browser = FakeBrowser::default();

        let state = click(&CheckoutState::Idle, &api, &browser).await;
        assert_eq!(state, CheckoutState::Failed);
        assert!(state.is_enabled());
        assert_eq!(browser.alerts.get(), 1);
        assert!(browser.location.borrow().is_none());

        // A second click behaves like the first
        let state = click(&state, &api, &browser).await;
        assert_eq!(state, CheckoutState::Failed);
        assert_eq!(browser.alerts.get(), 2);
        assert_eq!(api.requests.borrow().len(), 2);
    }
}
