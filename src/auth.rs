// src/auth.rs
use anyhow::Result;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

use crate::core::models::User;
use crate::core::repos::UserRepository;
use crate::core::Database;

const FIREBASE_KEYS_URL: &str =
    "https://www.googleapis.com/robot/v1/metadata/x509/securetoken@system.gserviceaccount.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseUser {
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub email_verified: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub aud: String, // Firebase project ID
    pub iss: String,
    pub sub: String, // uid
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub exp: usize,
    pub iat: usize,
}

impl From<Claims> for FirebaseUser {
    fn from(claims: Claims) -> Self {
        Self {
            uid: claims.sub,
            email: claims.email,
            name: claims.name,
            email_verified: claims.email_verified,
        }
    }
}

pub struct AuthConfig {
    pub project_id: String,
    pub firebase_keys: HashMap<String, String>, // kid -> public key
    static_tokens: HashMap<String, FirebaseUser>,
}

impl AuthConfig {
    pub fn new(project_id: String) -> Self {
        Self {
            project_id,
            firebase_keys: HashMap::new(),
            static_tokens: HashMap::new(),
        }
    }

    /// Accept `token` as `user` without verification (local development, tests)
    pub fn with_static_token(mut self, token: &str, user: FirebaseUser) -> Self {
        self.static_tokens.insert(token.to_string(), user);
        self
    }

    /// Fetch Firebase public keys for JWT verification
    pub async fn update_firebase_keys(&mut self) -> Result<()> {
        let response = reqwest::get(FIREBASE_KEYS_URL).await?.error_for_status()?;
        let keys: HashMap<String, String> = response.json().await?;

        info!("Updated Firebase public keys ({} keys)", keys.len());
        self.firebase_keys = keys;
        Ok(())
    }

    fn verify(&self, token: &str) -> Result<FirebaseUser> {
        if let Some(user) = self.static_tokens.get(token) {
            return Ok(user.clone());
        }

        let header = jsonwebtoken::decode_header(token)?;
        let kid = header
            .kid
            .ok_or_else(|| anyhow::anyhow!("Missing kid in token header"))?;

        let public_key = self
            .firebase_keys
            .get(&kid)
            .ok_or_else(|| anyhow::anyhow!("Unknown key ID: {}", kid))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!(
            "https://securetoken.google.com/{}",
            self.project_id
        )]);

        let decoding_key = DecodingKey::from_rsa_pem(public_key.as_bytes())?;
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

        Ok(token_data.claims.into())
    }
}

/// Caller identified by a verified identity token
pub struct AuthenticatedUser {
    pub firebase_user: FirebaseUser,
}

impl AuthenticatedUser {
    pub fn uid(&self) -> &str {
        &self.firebase_user.uid
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    TokenVerificationFailed,
    NotAdmin,
    DatabaseError,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Authorization token required",
            AuthError::InvalidToken => "Invalid authorization token format",
            AuthError::TokenVerificationFailed => "Token verification failed",
            AuthError::NotAdmin => "Administrator access required",
            AuthError::DatabaseError => "Database error occurred",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "AUTH_REQUIRED",
            AuthError::InvalidToken | AuthError::TokenVerificationFailed => "INVALID_TOKEN",
            AuthError::NotAdmin => "ADMIN_REQUIRED",
            AuthError::DatabaseError => "DATABASE_ERROR",
        }
    }
}

impl AuthError {
    /// Failure recorded by a guard on this request, read back by the catchers
    pub fn cached(req: &Request<'_>) -> Option<AuthError> {
        *req.local_cache(|| None::<AuthError>)
    }
}

fn reject<S>(req: &Request<'_>, status: Status, error: AuthError) -> Outcome<S, AuthError> {
    req.local_cache(|| Some(error));
    Outcome::Error((status, error))
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_config = match req.guard::<&State<AuthConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => return reject(req, status, AuthError::DatabaseError),
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let token = match req.headers().get_one("Authorization") {
            Some(header) => match header.strip_prefix("Bearer ") {
                Some(token) => token.trim(),
                None => {
                    warn!("Invalid Authorization header format");
                    return reject(req, Status::Unauthorized, AuthError::InvalidToken);
                }
            },
            None => {
                debug!("Missing Authorization header");
                return reject(req, Status::Unauthorized, AuthError::MissingToken);
            }
        };

        match auth_config.verify(token) {
            Ok(firebase_user) => {
                debug!("Authenticated user {}", firebase_user.uid);
                Outcome::Success(AuthenticatedUser { firebase_user })
            }
            Err(e) => {
                warn!("Token verification failed: {}", e);
                reject(req, Status::Unauthorized, AuthError::TokenVerificationFailed)
            }
        }
    }
}

/// Authenticated caller whose profile carries the admin flag
pub struct AdminUser {
    pub user: User,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth = match AuthenticatedUser::from_request(req).await {
            Outcome::Success(auth) => auth,
            Outcome::Error(e) => return Outcome::Error(e),
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let db = match req.guard::<&State<Database>>().await {
            Outcome::Success(db) => db,
            Outcome::Error((status, _)) => return reject(req, status, AuthError::DatabaseError),
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        match UserRepository::new(db.pool()).find(auth.uid()).await {
            Ok(Some(user)) if user.is_admin => Outcome::Success(AdminUser { user }),
            Ok(_) => {
                warn!("User {} attempted an admin action", auth.uid());
                reject(req, Status::Forbidden, AuthError::NotAdmin)
            }
            Err(e) => {
                error!("Failed to load user {}: {}", auth.uid(), e);
                reject(req, Status::InternalServerError, AuthError::DatabaseError)
            }
        }
    }
}
