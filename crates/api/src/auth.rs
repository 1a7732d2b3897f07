// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use tiketto_persistence::{BusinessUserData, Persistence, SessionData};

use crate::error::AuthError;

/// Storage format for session timestamps.
///
/// Matches the persistence layer's text timestamp convention so
/// expiry comparisons against `CURRENT_TIMESTAMP` stay consistent.
pub(crate) const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Business user roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Manager role: company operators with administrative authority
    /// over the company's venues, events, and staff accounts.
    Manager,
    /// Seller role: box-office operators authorized to create, confirm,
    /// abandon, and cancel reservations for the company's events.
    Seller,
}

impl Role {
    /// Returns the storage string for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Seller => "Seller",
        }
    }

    /// Parses a stored role string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not name a known role.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value {
            "Manager" => Ok(Self::Manager),
            "Seller" => Ok(Self::Seller),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {other}"),
            }),
        }
    }
}

/// An authenticated business user with an associated role and company.
///
/// This represents a company operator who has presented valid
/// credentials or a live session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique identifier for this user.
    pub user_id: i64,
    /// The company this user belongs to. All event access is scoped
    /// to this company.
    pub company_id: i64,
    /// The normalized login name.
    pub login_name: String,
    /// The role assigned to this user.
    pub role: Role,
}

/// Authorization service for enforcing company-scoped access control.
///
/// Business users may only operate on events and venues owned by
/// their own company.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that a user may act on a resource owned by `owner_company_id`.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    /// * `owner_company_id` - The company that owns the resource
    /// * `action` - The action being attempted, for the error message
    ///
    /// # Errors
    ///
    /// Returns an error if the resource belongs to another company.
    pub fn authorize_company_access(
        user: &AuthenticatedUser,
        owner_company_id: i64,
        action: &str,
    ) -> Result<(), AuthError> {
        if user.company_id == owner_company_id {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from(action),
                reason: String::from("resource belongs to another company"),
            })
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration.
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::hours(12);

    /// Authenticates a business user by credentials and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `login_name` - The user's login name (case-insensitive)
    /// * `password` - The password to verify against the stored hash
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_user`, `user_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown or disabled, the
    /// password does not match, or the session cannot be created.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedUser, BusinessUserData), AuthError> {
        let user: BusinessUserData = persistence
            .get_business_user_by_login(login_name)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Unknown login or wrong password"),
            })?;

        if user.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        let password_matches: bool = persistence
            .verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Password verification error: {e}"),
            })?;
        if !password_matches {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Unknown login or wrong password"),
            });
        }

        let role: Role = Role::parse(&user.role)?;

        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at.format(&TIMESTAMP_FORMAT).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            }
        })?;

        persistence
            .create_session(&session_token, user.user_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(user.user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        let authenticated_user: AuthenticatedUser = AuthenticatedUser {
            user_id: user.user_id,
            company_id: user.company_id,
            login_name: user.login_name.clone(),
            role,
        };

        Ok((session_token, authenticated_user, user))
    }

    /// Validates a session token and returns the authenticated user.
    ///
    /// Bumps the session's activity timestamp on success.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or the
    /// user behind it no longer exists or is disabled.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            PrimitiveDateTime::parse(&session.expires_at, &TIMESTAMP_FORMAT)
                .map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Failed to parse session expiration: {e}"),
                })?
                .assume_utc();

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: BusinessUserData = persistence
            .get_business_user_by_id(session.user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        if user.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        let role: Role = Role::parse(&user.role)?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update session activity: {e}"),
            })?;

        Ok(AuthenticatedUser {
            user_id: user.user_id,
            company_id: user.company_id,
            login_name: user.login_name,
            role,
        })
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a session token.
    ///
    /// In a production system, this would use a cryptographically secure
    /// random number generator. For simplicity, we use a timestamp-based
    /// approach here.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }
}
