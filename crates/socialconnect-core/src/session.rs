use tracing::{debug, info};

use socialconnect_types::api::SignupRequest;
use socialconnect_types::events::Notification;
use socialconnect_types::models::{Profile, Session};

use crate::dispatcher::Dispatcher;
use crate::error::{CoreError, Result};
use crate::verifier::CredentialVerifier;

/// Owns the viewer's session and the only transitions that change it.
pub struct SessionManager<V> {
    verifier: V,
    session: Session,
    dispatcher: Dispatcher,
}

impl<V: CredentialVerifier> SessionManager<V> {
    pub fn new(verifier: V, dispatcher: Dispatcher) -> Self {
        Self {
            verifier,
            session: Session::Unauthenticated,
            dispatcher,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.session.active_profile()
    }

    /// Sign in with an existing identifier and secret.
    ///
    /// On any error the session is left exactly as it was and nothing is
    /// broadcast.
    pub fn login(&mut self, identifier: &str, secret: &str) -> Result<Session> {
        require(identifier.trim(), "identifier")?;
        require(secret, "secret")?;

        let profile = self.verifier.verify(identifier.trim(), secret)?;

        info!("{} ({}) logged in", profile.handle, profile.id);
        self.dispatcher.broadcast(Notification::LoginSucceeded {
            profile_id: profile.id,
            display_name: profile.display_name.clone(),
        });
        self.session = Session::Authenticated(profile);
        Ok(self.session.clone())
    }

    /// Register a new profile and sign in as it.
    pub fn signup(&mut self, request: &SignupRequest) -> Result<Session> {
        require(request.display_name.trim(), "display name")?;
        require(request.identifier.trim(), "identifier")?;
        require(&request.secret, "secret")?;

        let profile = self.verifier.register(request)?;

        info!("{} ({}) signed up", profile.handle, profile.id);
        self.dispatcher.broadcast(Notification::SignupSucceeded {
            profile_id: profile.id,
            display_name: profile.display_name.clone(),
        });
        self.session = Session::Authenticated(profile);
        Ok(self.session.clone())
    }

    /// Always succeeds. Calling it while signed out changes nothing.
    pub fn logout(&mut self) -> Session {
        if let Some(profile) = self.session.active_profile() {
            info!("{} ({}) logged out", profile.handle, profile.id);
        }
        self.session = Session::Unauthenticated;
        self.session.clone()
    }
}

fn require(value: &str, field: &str) -> Result<()> {
    if value.is_empty() {
        debug!("rejected session transition: empty {}", field);
        return Err(CoreError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
