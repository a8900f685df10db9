use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::{
    api::DynAPI,
    entities::{ProfileUpdate, SignupFields, User},
    error::Error,
    notify::DynNotifier,
    screen::Screen,
    validation,
};

/// Who is signed in. Created once at startup and passed to the screens that need it.
pub struct Session {
    api: DynAPI,
    notifier: DynNotifier,
    user: RwLock<Option<User>>,
    loading: AtomicBool,
}

impl Session {
    pub fn new(api: DynAPI, notifier: DynNotifier) -> Self {
        Self {
            api,
            notifier,
            user: RwLock::new(None),
            loading: AtomicBool::new(true),
        }
    }

    pub fn api(&self) -> &DynAPI {
        &self.api
    }

    pub fn user(&self) -> Option<User> {
        self.user.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn set_user(&self, user: Option<User>) {
        *self.user.write() = user;
    }

    pub fn clear(&self) {
        self.set_user(None);
    }

    /// Restores the session from the backend cookie, if any.
    #[tracing::instrument(skip(self))]
    pub async fn initialize(&self) {
        let user = match self.api.current_user().await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(%err, "fetching current user failed");
                None
            }
        };

        self.set_user(user);
        self.loading.store(false, Ordering::SeqCst);
    }

    /// Signs in and loads the full profile. Returns `None` on any failure.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Option<User> {
        if let Err(err) = validation::email(email)
            .and_then(|_| validation::required("Password", password))
        {
            self.notifier.error(&err.message);
            return None;
        }

        let basic = match self.api.login(email.trim(), password).await {
            Ok(user) => user,
            Err(err) => {
                self.report(&err, "Login failed");
                return None;
            }
        };
        self.set_user(Some(basic));

        match self.api.current_user().await {
            Ok(Some(user)) => {
                self.set_user(Some(user.clone()));
                self.notifier.success("Login successful");
                Some(user)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::error!(%err, "profile fetch after login failed");
                self.notifier.error("Failed to fetch profile");
                None
            }
        }
    }

    #[tracing::instrument(skip_all, fields(email = %fields.email))]
    pub async fn signup(&self, fields: &SignupFields) -> bool {
        if let Err(err) = validation::signup(fields) {
            self.notifier.error(&err.message);
            return false;
        }

        match self.api.signup(fields).await {
            Ok(()) => {
                self.notifier.success(
                    "Account created successfully! Please login with your email and password",
                );
                true
            }
            Err(err) => {
                self.report(&err, "Signup failed");
                false
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Option<Screen> {
        match self.api.logout().await {
            Ok(()) => {
                self.clear();
                self.notifier.success("Logged out");
                Some(Screen::Home)
            }
            Err(err) => {
                tracing::error!(%err, "logout failed");
                self.notifier.error("Logout failed");
                None
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn send_reset_password(&self, email: &str) -> bool {
        if let Err(err) = validation::email(email) {
            self.notifier.error(&err.message);
            return false;
        }

        match self.api.reset_password(email.trim()).await {
            Ok(message) => {
                self.notifier.success(
                    message
                        .as_deref()
                        .unwrap_or("Password reset link sent to your email"),
                );
                true
            }
            Err(err) => {
                tracing::error!(%err, "reset password failed");
                self.notifier.error("Failed to send reset link");
                false
            }
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn update_password(&self, password: &str, confirmation: &str) -> Result<(), Error> {
        validation::password_confirmation(password, confirmation)?;
        validation::password(password)?;

        self.api.update_password(password).await?;
        self.notifier.success("Password updated successfully");

        Ok(())
    }

    /// Saves profile edits and merges the stored copy into the session user.
    #[tracing::instrument(skip_all)]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, Error> {
        let saved = match self.api.update_profile(update).await {
            Ok(saved) => saved,
            Err(err) => {
                self.report(&err, "Something went wrong while updating profile!");
                return Err(err);
            }
        };

        let user = {
            let mut user = self.user.write();
            match user.as_mut() {
                Some(current) => {
                    current.apply(&saved);
                    current.clone()
                }
                None => {
                    *user = Some(saved.clone());
                    saved
                }
            }
        };

        self.notifier.success("Profile updated successfully!");

        Ok(user)
    }

    /// Where a freshly signed-in user lands.
    pub fn home(&self) -> Screen {
        match self.user() {
            Some(user) if user.is_driver() => Screen::DriverDashboard,
            Some(_) => Screen::Dashboard,
            None => Screen::Login,
        }
    }

    fn report(&self, err: &Error, fallback: &str) {
        tracing::error!(%err, "{}", fallback);
        match err.is_rejection() {
            true => self.notifier.error(&err.message),
            false => self.notifier.error(fallback),
        }
    }
}
