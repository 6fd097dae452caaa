//! Navigation [`Guard`] definitions.

use service::domain::{user, Session};

use crate::Route;

/// Stateless predicate permitting or redirecting navigation based on the
/// current [`Session`].
#[derive(Clone, Debug)]
pub enum Guard {
    /// Passes while a token is present, regardless of role.
    Authenticated,

    /// Passes while no token is present.
    ///
    /// Keeps signed-in users off sign-in/registration screens.
    Guest,

    /// Passes only for the listed [`user::Role`]s.
    RoleRestricted {
        /// [`user::Role`]s allowed to pass.
        allowed: &'static [user::Role],

        /// [`Route`] to redirect everyone else to.
        redirect_to: Route,
    },
}

impl Guard {
    /// Creates a [`Guard::RoleRestricted`] with the default fallback
    /// [`Route`].
    #[must_use]
    pub fn role_restricted(allowed: &'static [user::Role]) -> Self {
        Self::RoleRestricted {
            allowed,
            redirect_to: Route::Home,
        }
    }

    /// Checks this [`Guard`] against the provided [`Session`].
    #[must_use]
    pub fn check(&self, session: &Session) -> Outcome {
        match self {
            Self::Authenticated => {
                if session.is_authenticated() {
                    Outcome::Pass
                } else {
                    Outcome::Redirect(Route::Login)
                }
            }
            Self::Guest => {
                if session.is_authenticated() {
                    Outcome::Redirect(Route::Home)
                } else {
                    Outcome::Pass
                }
            }
            Self::RoleRestricted {
                allowed,
                redirect_to,
            } => match session.role() {
                Some(role) if allowed.contains(&role) => Outcome::Pass,
                Some(_) | None => Outcome::Redirect(redirect_to.clone()),
            },
        }
    }
}

/// Outcome of a [`Guard`] check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Navigation may proceed.
    Pass,

    /// Navigation is redirected to the carried [`Route`].
    Redirect(Route),
}

/// Resolves the provided [`Route`]'s whole [`Guard`] chain against the
/// provided [`Session`].
///
/// Guards compose hierarchically: the first non-passing [`Guard`] wins.
#[must_use]
pub fn resolve(route: &Route, session: &Session) -> Outcome {
    route
        .guards()
        .iter()
        .map(|guard| guard.check(session))
        .find(|outcome| matches!(outcome, Outcome::Redirect(_)))
        .unwrap_or(Outcome::Pass)
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use service::domain::{session, user, Session};

    use crate::Route;

    use super::{resolve, Guard, Outcome};

    fn token(role: Option<&str>, expires_at: DateTime) -> session::Token {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &session::Claims {
                user_id: user::Id::new(),
                role: role.map(ToOwned::to_owned),
                expires_at: expires_at.coerce(),
            },
            &jsonwebtoken::EncodingKey::from_secret(b"irrelevant"),
        )
        .unwrap()
        .into()
    }

    fn signed_in(role: Option<&str>) -> Session {
        let now = DateTime::now();
        Session::derive(
            Some(token(role, now + Duration::from_secs(600))),
            now,
        )
        .unwrap()
    }

    #[test]
    fn authenticated_guard_redirects_guests_to_login() {
        let guest = Session::Guest;

        assert_eq!(
            Guard::Authenticated.check(&guest),
            Outcome::Redirect(Route::Login),
        );
        assert_eq!(
            resolve(&Route::Assets, &guest),
            Outcome::Redirect(Route::Login),
        );
    }

    #[test]
    fn expired_token_is_kept_out_of_authenticated_routes() {
        let now = DateTime::now();
        // An expired token derives to a guest session, regardless of the
        // payload's other contents.
        let session = Session::derive(
            Some(token(Some("ADMIN"), now - Duration::from_secs(1))),
            now,
        )
        .unwrap_or(Session::Guest);

        assert_eq!(
            resolve(&Route::Assets, &session),
            Outcome::Redirect(Route::Login),
        );
    }

    #[test]
    fn authenticated_guard_passes_any_role() {
        for role in [None, Some("USER"), Some("SUPERVISOR")] {
            assert_eq!(
                Guard::Authenticated.check(&signed_in(role)),
                Outcome::Pass,
            );
        }
    }

    #[test]
    fn role_guard_redirects_disallowed_roles_to_fallback() {
        let session = signed_in(Some("USER"));

        assert_eq!(
            resolve(&Route::Users, &session),
            Outcome::Redirect(Route::Home),
        );
    }

    #[test]
    fn role_guard_passes_allowed_roles() {
        for role in ["ADMIN", "MANAGER"] {
            assert_eq!(
                resolve(&Route::Users, &signed_in(Some(role))),
                Outcome::Pass,
            );
        }
    }

    #[test]
    fn role_guard_redirects_unrecognized_roles() {
        assert_eq!(
            resolve(&Route::Users, &signed_in(Some("SUPERVISOR"))),
            Outcome::Redirect(Route::Home),
        );
    }

    #[test]
    fn guest_guard_passes_guests_and_redirects_signed_in() {
        assert_eq!(resolve(&Route::Login, &Session::Guest), Outcome::Pass);
        assert_eq!(
            resolve(&Route::Login, &signed_in(Some("USER"))),
            Outcome::Redirect(Route::Home),
        );
    }

    #[test]
    fn shared_asset_route_is_unguarded() {
        let route = Route::SharedAsset(
            "0191d3b5-4b58-7e3c-b8f5-7f52df6fb53c".parse().unwrap(),
        );

        assert_eq!(resolve(&route, &Session::Guest), Outcome::Pass);
        assert_eq!(resolve(&route, &signed_in(Some("USER"))), Outcome::Pass);
    }
}
