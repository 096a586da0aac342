//! Request-scoped session marker.

/// Session state carried by one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    /// Login name, set once authenticated.
    pub user: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            user: Some(user.into()),
        }
    }
}

/// Per-request context handed to every handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub session: Session,
}

impl RequestContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn anonymous() -> Self {
        Self::new(Session::anonymous())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }
}
