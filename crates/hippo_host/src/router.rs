//! Navigation surface the runtime uses to keep the URL in sync with state.

use std::cell::RefCell;
use std::rc::Rc;

/// Outbound routing: read the current location, move to a new route.
///
/// Browser hosts back this with the history API; tests use
/// [`MemoryRouteNavigator`].
pub trait RouteNavigator {
    /// Navigates to `route`, an app-internal path such as `/hippo/filter=c5`.
    fn navigate(&self, route: &str);

    /// The full current href, fragment included.
    fn current_href(&self) -> String;
}

/// Navigator that goes nowhere, for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRouteNavigator;

impl RouteNavigator for NoopRouteNavigator {
    fn navigate(&self, _route: &str) {}

    fn current_href(&self) -> String {
        String::new()
    }
}

/// Recording navigator for tests: keeps a navigation log and a settable href.
///
/// Clones share the same log and href, so a test can keep a handle while
/// handing another to the runtime.
#[derive(Debug, Clone, Default)]
pub struct MemoryRouteNavigator {
    href: Rc<RefCell<String>>,
    log: Rc<RefCell<Vec<String>>>,
}

impl MemoryRouteNavigator {
    /// Creates a navigator positioned at `initial_href`.
    pub fn new(initial_href: &str) -> Self {
        Self {
            href: Rc::new(RefCell::new(initial_href.to_string())),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Moves the href without logging, as an external navigation would.
    pub fn set_href(&self, href: &str) {
        *self.href.borrow_mut() = href.to_string();
    }

    /// Every route passed to [`RouteNavigator::navigate`], oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// The most recent navigation, if any.
    pub fn last_navigation(&self) -> Option<String> {
        self.log.borrow().last().cloned()
    }
}

impl RouteNavigator for MemoryRouteNavigator {
    fn navigate(&self, route: &str) {
        self.log.borrow_mut().push(route.to_string());
        *self.href.borrow_mut() = route.to_string();
    }

    fn current_href(&self) -> String {
        self.href.borrow().clone()
    }
}
