//! Forward-only pager over the intro screens.
//!
//! Leaving the pager, whether by finishing the last page or skipping, is
//! terminal and sends the user to sign-up.

use crate::core::{Guard, State, StateHistory, StateTransition};
use crate::navigation::{NavigationIntent, Navigator, Route};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Number of intro screens shipped with the app.
pub const ONBOARDING_PAGES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingState {
    /// Zero-based index of the visible page.
    Page(usize),
    Exited,
}

impl State for OnboardingState {
    fn name(&self) -> &str {
        match self {
            Self::Page(_) => "Page",
            Self::Exited => "Exited",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Exited)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PagerError {
    #[error("page {index} is out of range, there are {pages} pages")]
    OutOfRange { index: usize, pages: usize },

    #[error("cannot move back from page {current} to page {index}")]
    Backward { current: usize, index: usize },

    #[error("onboarding has already exited")]
    Exited,
}

pub struct OnboardingPager<N> {
    navigator: N,
    pages: usize,
    state: OnboardingState,
    history: StateHistory<OnboardingState>,
    active: Guard<OnboardingState>,
}

impl<N: Navigator> OnboardingPager<N> {
    pub fn new(navigator: N) -> Self {
        Self::with_pages(navigator, ONBOARDING_PAGES)
    }

    /// Pager over `pages` screens; at least one page is always shown.
    pub fn with_pages(navigator: N, pages: usize) -> Self {
        Self {
            navigator,
            pages: pages.max(1),
            state: OnboardingState::Page(0),
            history: StateHistory::new(),
            active: Guard::not_final(),
        }
    }

    pub fn current(&self) -> OnboardingState {
        self.state
    }

    /// Visible page, `None` once exited.
    pub fn index(&self) -> Option<usize> {
        match self.state {
            OnboardingState::Page(index) => Some(index),
            OnboardingState::Exited => None,
        }
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Whether the primary button should read "Get Started".
    pub fn on_last_page(&self) -> bool {
        self.index() == Some(self.pages - 1)
    }

    pub fn history(&self) -> &StateHistory<OnboardingState> {
        &self.history
    }

    /// Next page, or exit from the last one. No-op after exit.
    pub fn advance(&mut self) -> OnboardingState {
        if !self.active.check(&self.state) {
            return self.state;
        }
        match self.state {
            OnboardingState::Page(index) if index + 1 < self.pages => {
                self.move_to(OnboardingState::Page(index + 1));
            }
            _ => self.exit("finished"),
        }
        self.state
    }

    /// Leave onboarding from any page. Calling it again does nothing.
    pub fn skip(&mut self) -> OnboardingState {
        if self.active.check(&self.state) {
            self.exit("skipped");
        }
        self.state
    }

    /// Move forward to `index`, as when a pagination dot is tapped.
    pub fn jump_to(&mut self, index: usize) -> Result<OnboardingState, PagerError> {
        let current = match self.state {
            OnboardingState::Page(current) => current,
            OnboardingState::Exited => return Err(PagerError::Exited),
        };
        if index >= self.pages {
            return Err(PagerError::OutOfRange {
                index,
                pages: self.pages,
            });
        }
        if index < current {
            return Err(PagerError::Backward { current, index });
        }
        if index > current {
            self.move_to(OnboardingState::Page(index));
        }
        Ok(self.state)
    }

    fn exit(&mut self, reason: &'static str) {
        self.move_to(OnboardingState::Exited);
        debug!(reason, "onboarding exited");
        self.navigator.navigate(NavigationIntent::Push(Route::SignUp));
    }

    fn move_to(&mut self, next: OnboardingState) {
        self.history = self.history.record(StateTransition::now(self.state, next));
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use std::sync::Arc;

    fn pager() -> (OnboardingPager<Arc<RecordingNavigator>>, Arc<RecordingNavigator>) {
        let nav = Arc::new(RecordingNavigator::new());
        (OnboardingPager::new(Arc::clone(&nav)), nav)
    }

    #[test]
    fn advance_walks_pages_then_exits() {
        let (mut pager, nav) = pager();

        assert_eq!(pager.advance(), OnboardingState::Page(1));
        assert_eq!(pager.advance(), OnboardingState::Page(2));
        assert!(pager.on_last_page());
        assert!(nav.intents().is_empty());

        assert_eq!(pager.advance(), OnboardingState::Exited);
        assert_eq!(nav.intents(), vec![NavigationIntent::Push(Route::SignUp)]);
        assert_eq!(pager.index(), None);
    }

    #[test]
    fn skip_exits_once() {
        let (mut pager, nav) = pager();
        pager.advance();

        assert_eq!(pager.skip(), OnboardingState::Exited);
        assert_eq!(pager.skip(), OnboardingState::Exited);
        assert_eq!(pager.advance(), OnboardingState::Exited);
        assert_eq!(nav.intents().len(), 1);
    }

    #[test]
    fn jump_is_forward_only() {
        let (mut pager, nav) = pager();

        assert_eq!(pager.jump_to(2), Ok(OnboardingState::Page(2)));
        assert_eq!(pager.jump_to(2), Ok(OnboardingState::Page(2)));
        assert_eq!(
            pager.jump_to(1),
            Err(PagerError::Backward {
                current: 2,
                index: 1
            })
        );
        assert_eq!(
            pager.jump_to(3),
            Err(PagerError::OutOfRange { index: 3, pages: 3 })
        );
        assert!(nav.intents().is_empty());

        pager.skip();
        assert_eq!(pager.jump_to(0), Err(PagerError::Exited));
    }

    #[test]
    fn history_records_the_walk() {
        let (mut pager, _nav) = pager();
        pager.jump_to(1).unwrap();
        pager.skip();

        let path: Vec<_> = pager.history().get_path().into_iter().copied().collect();
        assert_eq!(
            path,
            vec![
                OnboardingState::Page(0),
                OnboardingState::Page(1),
                OnboardingState::Exited
            ]
        );
    }

    #[test]
    fn single_page_pager_exits_on_first_advance() {
        let nav = RecordingNavigator::new();
        let mut pager = OnboardingPager::with_pages(nav, 0);

        assert_eq!(pager.pages(), 1);
        assert!(pager.on_last_page());
        assert_eq!(pager.advance(), OnboardingState::Exited);
    }
}
