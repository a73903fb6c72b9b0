use serde::Serialize;
use tracing::debug;

use super::page::Page;
use crate::store::User;

/// Whatever displays the pages. The controller asks it to scroll to the top
/// after every navigation.
pub trait Viewport {
    fn scroll_to_top(&mut self);
}

/// Viewport for contexts with nothing to scroll (servers, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Viewport for Headless {
    fn scroll_to_top(&mut self) {}
}

/// Outcome of the access gate for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Page),
}

/// Access rules evaluated before a page is rendered.
///
/// Shipment detail only needs an id: anonymous visitors may follow a
/// tracking link. Ownership is checked when the shipment is loaded.
pub fn check_access(page: &Page, user: Option<&User>) -> Access {
    match page {
        Page::Dashboard | Page::Profile | Page::BookShipment if user.is_none() => {
            Access::Redirect(Page::Login)
        }
        Page::Admin if !user.is_some_and(User::is_admin) => Access::Redirect(Page::Home),
        Page::ShipmentDetail { shipment_id: None } => Access::Redirect(Page::Home),
        _ => Access::Allow,
    }
}

/// What ended up on screen after the gate ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub page: Page,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<Page>,
}

/// Single source of truth for the visible page and the signed-in user.
/// State lives only as long as the controller; nothing is persisted.
#[derive(Debug)]
pub struct SessionController<V = Headless> {
    page: Page,
    user: Option<User>,
    viewport: V,
}

impl SessionController<Headless> {
    pub fn new() -> Self {
        Self::with_viewport(Headless)
    }
}

impl Default for SessionController<Headless> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Viewport> SessionController<V> {
    pub fn with_viewport(viewport: V) -> Self {
        Self {
            page: Page::Home,
            user: None,
            viewport,
        }
    }

    /// Restores a controller for an already signed-in user without moving
    /// away from the home page.
    pub fn resume(user: Option<User>, viewport: V) -> Self {
        Self {
            page: Page::Home,
            user,
            viewport,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The only way the visible page changes. No checks happen here; the
    /// gate runs in [`render`](Self::render).
    pub fn navigate(&mut self, page: Page) {
        debug!(from = self.page.name(), to = page.name(), "navigate");
        self.page = page;
        self.viewport.scroll_to_top();
    }

    pub fn login(&mut self, user: User) {
        debug!(user_id = %user.id, "session started");
        self.user = Some(user);
        self.navigate(Page::Dashboard);
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            debug!(user_id = %user.id, "session ended");
        }
        self.navigate(Page::Home);
    }

    /// Swaps in a fresh copy of the session user. The page stays put.
    pub fn update_profile(&mut self, user: User) {
        debug!(user_id = %user.id, "session user updated");
        self.user = Some(user);
    }

    /// Runs the access gate on the current page, following redirects, and
    /// returns the page that is actually shown.
    pub fn render(&mut self) -> Rendered {
        let mut redirected_from = None;
        while let Access::Redirect(target) = check_access(&self.page, self.user.as_ref()) {
            debug!(from = self.page.name(), to = target.name(), "access gate redirect");
            if redirected_from.is_none() {
                redirected_from = Some(self.page.clone());
            }
            self.navigate(target);
        }
        Rendered {
            page: self.page.clone(),
            redirected_from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Role;

    #[derive(Debug, Default)]
    struct CountingViewport {
        scrolls: usize,
    }

    impl Viewport for CountingViewport {
        fn scroll_to_top(&mut self) {
            self.scrolls += 1;
        }
    }

    fn user(role: Role) -> User {
        User {
            id: "1".into(),
            name: "John Doe".into(),
            email: "john@test.com".into(),
            role,
        }
    }

    #[test]
    fn starts_on_home_without_user() {
        let session = SessionController::new();
        assert_eq!(session.page(), &Page::Home);
        assert!(session.user().is_none());
    }

    #[test]
    fn protected_pages_redirect_anonymous_visitors_to_login() {
        for page in [Page::Dashboard, Page::Profile, Page::BookShipment] {
            let mut session = SessionController::new();
            session.navigate(page.clone());
            let rendered = session.render();
            assert_eq!(rendered.page, Page::Login);
            assert_eq!(rendered.redirected_from, Some(page));
            assert_eq!(session.page(), &Page::Login);
        }
    }

    #[test]
    fn admin_page_requires_admin_role() {
        let mut session = SessionController::new();
        session.login(user(Role::User));
        session.navigate(Page::Admin);
        assert_eq!(session.render().page, Page::Home);

        let mut anonymous = SessionController::new();
        anonymous.navigate(Page::Admin);
        assert_eq!(anonymous.render().page, Page::Home);

        let mut admin = SessionController::new();
        admin.login(user(Role::Admin));
        admin.navigate(Page::Admin);
        let rendered = admin.render();
        assert_eq!(rendered.page, Page::Admin);
        assert!(rendered.redirected_from.is_none());
    }

    #[test]
    fn shipment_detail_needs_an_id_but_no_user() {
        let mut session = SessionController::new();
        session.navigate(Page::ShipmentDetail { shipment_id: None });
        assert_eq!(session.render().page, Page::Home);

        session.navigate(Page::shipment_detail("3"));
        assert_eq!(session.render().page, Page::shipment_detail("3"));
    }

    #[test]
    fn login_lands_on_dashboard_and_logout_on_home() {
        let mut session = SessionController::new();
        session.login(user(Role::User));
        assert_eq!(session.page(), &Page::Dashboard);
        assert_eq!(session.render().page, Page::Dashboard);

        session.logout();
        assert_eq!(session.page(), &Page::Home);
        assert!(session.user().is_none());
    }

    #[test]
    fn update_profile_replaces_session_user() {
        let mut session = SessionController::new();
        session.update_profile(user(Role::User));
        assert_eq!(session.user().unwrap().id, "1");
        assert_eq!(session.page(), &Page::Home);

        session.login(user(Role::User));
        let mut renamed = user(Role::User);
        renamed.name = "Johnny".into();
        session.update_profile(renamed);
        assert_eq!(session.user().unwrap().name, "Johnny");
        assert_eq!(session.page(), &Page::Dashboard);
    }

    #[test]
    fn every_navigation_scrolls_to_top() {
        let mut session = SessionController::with_viewport(CountingViewport::default());
        session.navigate(Page::About);
        session.navigate(Page::About);
        session.login(user(Role::User));
        session.logout();
        assert_eq!(session.viewport.scrolls, 4);

        session.navigate(Page::Profile);
        session.render();
        assert_eq!(session.viewport.scrolls, 6);
    }

    #[test]
    fn public_pages_are_always_allowed() {
        for page in [Page::Home, Page::Login, Page::About, Page::NotFound] {
            assert_eq!(check_access(&page, None), Access::Allow);
        }
    }
}
