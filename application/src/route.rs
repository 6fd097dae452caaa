//! [`Route`] definitions.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error as StdError};
use service::domain::{asset, invitation, user};

use crate::guard::Guard;

/// Client-side navigation route.
///
/// No server involvement: paths parse into [`Route`]s and display back as
/// the same strings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Route {
    /// Sign-in screen.
    Login,

    /// Invitation acceptance screen.
    RegisterInvite(Option<invitation::Token>),

    /// Home screen.
    Home,

    /// Asset listing screen.
    Assets,

    /// Listing of shares received by the current user.
    SharedWithMe,

    /// Platform user directory.
    Users,

    /// Publicly shared asset screen.
    SharedAsset(asset::Id),
}

impl Route {
    /// Returns the [`Guard`] chain protecting this [`Route`], outermost
    /// first.
    #[must_use]
    pub fn guards(&self) -> Vec<Guard> {
        match self {
            Self::Login | Self::RegisterInvite(_) => vec![Guard::Guest],
            Self::Home | Self::Assets | Self::SharedWithMe => {
                vec![Guard::Authenticated]
            }
            Self::Users => vec![
                Guard::Authenticated,
                Guard::role_restricted(&[user::Role::Admin, user::Role::Manager]),
            ],
            Self::SharedAsset(_) => vec![],
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "/login"),
            Self::RegisterInvite(None) => write!(f, "/register/invite"),
            Self::RegisterInvite(Some(token)) => {
                write!(f, "/register/invite?token={token}")
            }
            Self::Home => write!(f, "/"),
            Self::Assets => write!(f, "/assets"),
            Self::SharedWithMe => write!(f, "/shared-with-me"),
            Self::Users => write!(f, "/users"),
            Self::SharedAsset(id) => write!(f, "/shared/{id}"),
        }
    }
}

impl FromStr for Route {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ParseError as E;

        let (path, query) = s
            .split_once('?')
            .map_or((s, None), |(path, query)| (path, Some(query)));

        match path {
            "/" => Ok(Self::Home),
            "/login" => Ok(Self::Login),
            "/assets" => Ok(Self::Assets),
            "/shared-with-me" => Ok(Self::SharedWithMe),
            "/users" => Ok(Self::Users),
            "/register/invite" => {
                Ok(Self::RegisterInvite(query.and_then(|query| {
                    query.split('&').find_map(|pair| {
                        pair.strip_prefix("token=")
                            .map(invitation::Token::from)
                    })
                })))
            }
            p => p
                .strip_prefix("/shared/")
                .ok_or_else(|| E::UnknownPath(s.to_owned()))
                .and_then(|raw| {
                    raw.parse()
                        .map(Self::SharedAsset)
                        .map_err(|_| E::InvalidAssetId(raw.to_owned()))
                }),
        }
    }
}

/// Error of parsing a [`Route`] from a path string.
#[derive(Clone, Debug, Display, StdError)]
pub enum ParseError {
    /// Path does not name any known [`Route`].
    #[display("`{_0}` is not a known route")]
    UnknownPath(#[error(not(source))] String),

    /// Shared asset path carries a malformed asset ID.
    #[display("`{_0}` is not a valid asset ID")]
    InvalidAssetId(#[error(not(source))] String),
}

#[cfg(test)]
mod spec {
    use service::domain::asset;

    use super::Route;

    #[test]
    fn parses_known_paths() {
        assert_eq!("/".parse::<Route>().unwrap(), Route::Home);
        assert_eq!("/login".parse::<Route>().unwrap(), Route::Login);
        assert_eq!("/assets".parse::<Route>().unwrap(), Route::Assets);
        assert_eq!(
            "/shared-with-me".parse::<Route>().unwrap(),
            Route::SharedWithMe,
        );
        assert_eq!("/users".parse::<Route>().unwrap(), Route::Users);
        assert_eq!(
            "/register/invite".parse::<Route>().unwrap(),
            Route::RegisterInvite(None),
        );
        assert_eq!(
            "/register/invite?token=abc".parse::<Route>().unwrap(),
            Route::RegisterInvite(Some("abc".into())),
        );
    }

    #[test]
    fn parses_shared_asset_path() {
        let id = "0191d3b5-4b58-7e3c-b8f5-7f52df6fb53c";
        assert_eq!(
            format!("/shared/{id}").parse::<Route>().unwrap(),
            Route::SharedAsset(id.parse::<asset::Id>().unwrap()),
        );

        assert!("/shared/not-an-id".parse::<Route>().is_err());
    }

    #[test]
    fn rejects_unknown_paths() {
        assert!("/nope".parse::<Route>().is_err());
        assert!("".parse::<Route>().is_err());
        assert!("assets".parse::<Route>().is_err());
    }

    #[test]
    fn displays_back_the_same_path() {
        for path in [
            "/",
            "/login",
            "/assets",
            "/shared-with-me",
            "/users",
            "/register/invite",
            "/register/invite?token=abc",
            "/shared/0191d3b5-4b58-7e3c-b8f5-7f52df6fb53c",
        ] {
            assert_eq!(path.parse::<Route>().unwrap().to_string(), path);
        }
    }
}
