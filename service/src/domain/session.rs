//! [`Session`] definitions.

use common::{unit, DateTime, DateTimeOf};
use derive_more::{AsRef, Display, Error as StdError, From, FromStr};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::user;

/// Client's belief about which user, if any, is currently authenticated and
/// with what [`user::Role`].
#[derive(Clone, Debug)]
pub enum Session {
    /// Nobody is authenticated.
    Guest,

    /// A user is authenticated with a valid unexpired [`Token`].
    Authenticated(Authenticated),
}

impl Session {
    /// Derives a [`Session`] from the provided raw [`Token`] at the provided
    /// instant.
    ///
    /// Pure: performs no I/O and consults no clock, so the very same inputs
    /// always yield the very same outcome. Callers are responsible for
    /// persisting/removing the [`Token`] according to the result.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if the [`Token`] is present, but unusable.
    /// Every [`Rejection`] converges to a logged-out state: it carries the
    /// reason for logs and tests, not a recoverable condition.
    pub fn derive(
        token: Option<Token>,
        at: DateTime,
    ) -> Result<Self, Rejection> {
        let Some(token) = token else {
            return Ok(Self::Guest);
        };

        let claims = Claims::decode(&token).map_err(Rejection::Malformed)?;
        if claims.expires_at <= at.coerce() {
            return Err(Rejection::Expired {
                at: claims.expires_at,
            });
        }

        let role = claims.role.as_deref().and_then(user::Role::recognize);
        Ok(Self::Authenticated(Authenticated {
            token,
            user_id: claims.user_id,
            role,
            expires_at: claims.expires_at,
        }))
    }

    /// Indicates whether this [`Session`] holds a [`Token`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the [`Token`] of this [`Session`], if any.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::Guest => None,
            Self::Authenticated(auth) => Some(&auth.token),
        }
    }

    /// Returns the [`user::Id`] of this [`Session`], if any.
    #[must_use]
    pub fn user_id(&self) -> Option<user::Id> {
        match self {
            Self::Guest => None,
            Self::Authenticated(auth) => Some(auth.user_id),
        }
    }

    /// Returns the recognized [`user::Role`] of this [`Session`], if any.
    #[must_use]
    pub fn role(&self) -> Option<user::Role> {
        match self {
            Self::Guest => None,
            Self::Authenticated(auth) => auth.role,
        }
    }
}

/// State of an authenticated [`Session`].
#[derive(Clone, Debug)]
pub struct Authenticated {
    /// [`Token`] this [`Session`] was derived from.
    pub token: Token,

    /// ID of the user this [`Session`] belongs to.
    pub user_id: user::Id,

    /// Recognized [`user::Role`] of the user.
    ///
    /// [`None`] if the [`Token`] payload carries no role, or an unrecognized
    /// one.
    pub role: Option<user::Role>,

    /// [`DateTime`] when this [`Session`] expires.
    pub expires_at: ExpirationDateTime,
}

/// Access token of a [`Session`].
///
/// Opaque bearer credential: the client never verifies its signature (that
/// is the server's concern) and never validates its structure on
/// construction.
#[derive(AsRef, Clone, Debug, Display, Eq, From, FromStr, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Token(String);

/// Decoded payload of a [`Token`].
///
/// Transient read-only view: recomputed on every derivation pass and
/// discarded right away.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Claims {
    /// ID of the user the [`Token`] was issued to.
    #[serde(rename = "userId")]
    pub user_id: user::Id,

    /// Raw role of the user, as the issuer put it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// [`DateTime`] when the [`Token`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

impl Claims {
    /// Decodes [`Claims`] out of the provided [`Token`] without verifying its
    /// signature.
    ///
    /// Expiry is not checked here either: [`Session::derive()`] compares it
    /// against an injected instant instead of the wall clock.
    fn decode(token: &Token) -> Result<Self, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        jsonwebtoken::decode::<Self>(
            token.as_ref(),
            &DecodingKey::from_secret(&[]),
            &validation,
        )
        .map(|data| data.claims)
    }
}

/// Reason why a [`Token`] failed to derive an authenticated [`Session`].
#[derive(Debug, Display, StdError)]
pub enum Rejection {
    /// [`Token`] payload could not be decoded.
    #[display("`Token` payload cannot be decoded: {_0}")]
    Malformed(jsonwebtoken::errors::Error),

    /// [`Token`] has already expired.
    #[display("`Token` expired at {}", at.to_rfc3339())]
    Expired {
        /// [`DateTime`] when the [`Token`] expired.
        at: ExpirationDateTime,
    },
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use super::{user, Claims, Rejection, Session, Token};

    fn encode(claims: &Claims) -> Token {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            claims,
            &jsonwebtoken::EncodingKey::from_secret(b"irrelevant"),
        )
        .unwrap()
        .into()
    }

    fn claims(role: Option<&str>, expires_at: DateTime) -> Claims {
        Claims {
            user_id: user::Id::new(),
            role: role.map(ToOwned::to_owned),
            expires_at: expires_at.coerce(),
        }
    }

    #[test]
    fn absent_token_derives_guest() {
        let session = Session::derive(None, DateTime::now()).unwrap();

        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user_id().is_none());
        assert!(session.role().is_none());
    }

    #[test]
    fn valid_token_derives_authenticated() {
        let now = DateTime::now();
        let claims = claims(Some("ADMIN"), now + Duration::from_secs(600));
        let token = encode(&claims);

        let session = Session::derive(Some(token.clone()), now).unwrap();

        assert_eq!(session.token(), Some(&token));
        assert_eq!(session.user_id(), Some(claims.user_id));
        assert_eq!(session.role(), Some(user::Role::Admin));
    }

    #[test]
    fn expired_token_is_rejected_regardless_of_payload() {
        let now = DateTime::now();
        let token =
            encode(&claims(Some("ADMIN"), now - Duration::from_secs(1)));

        let rejection = Session::derive(Some(token), now).unwrap_err();

        assert!(matches!(rejection, Rejection::Expired { .. }));
    }

    #[test]
    fn token_expiring_this_instant_is_rejected() {
        let now = DateTime::now();
        let token = encode(&claims(None, now));

        let rejection = Session::derive(Some(token), now).unwrap_err();

        assert!(matches!(rejection, Rejection::Expired { .. }));
    }

    #[test]
    fn undecodable_token_is_rejected() {
        for garbage in ["not-a-jwt", "", "a.b.c", "?!.?!.?!"] {
            let rejection =
                Session::derive(Some(garbage.into()), DateTime::now())
                    .unwrap_err();

            assert!(
                matches!(rejection, Rejection::Malformed(_)),
                "`{garbage}` should be malformed",
            );
        }
    }

    #[test]
    fn unrecognized_role_is_dropped() {
        let now = DateTime::now();
        let token = encode(&claims(
            Some("SUPERVISOR"),
            now + Duration::from_secs(600),
        ));

        let session = Session::derive(Some(token), now).unwrap();

        assert!(session.is_authenticated());
        assert!(session.role().is_none());
    }

    #[test]
    fn missing_role_is_not_an_error() {
        let now = DateTime::now();
        let token = encode(&claims(None, now + Duration::from_secs(600)));

        let session = Session::derive(Some(token), now).unwrap();

        assert!(session.is_authenticated());
        assert!(session.role().is_none());
    }
}
