use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use quizdeck_backend::{Backend, BackendError, NewUser, UserRecord};

use crate::{AuthStore, StoreSubscription};

/// Everything needed to create an account.
/// Field-level validation belongs to the form layer, see [crate::validate].
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub password_confirm: String,
}

/// Exposes the current session and the operations that change it.
///
/// The manager subscribes to its [AuthStore] at construction and mirrors
/// every change into its own state, so sign-ins and sign-outs from anywhere
/// in the application are reflected here. The subscription is released when
/// the manager is dropped.
pub struct Auth<B> {
    backend: Arc<B>,
    store: Arc<AuthStore>,

    user: Arc<RwLock<Option<UserRecord>>>,
    is_loading: AtomicBool,

    // Keeps the store mirror alive for the manager's lifetime
    _subscription: StoreSubscription,
}

impl<B> Auth<B>
where
    B: Backend,
{
    pub fn new(backend: &Arc<B>, store: &Arc<AuthStore>) -> Self {
        // A pre-populated store must be reflected before any operation runs
        let user = Arc::new(RwLock::new(store.record()));

        let mirror = user.clone();
        let subscription = store.on_change(move |_token, record| {
            *mirror.write() = record.cloned();
        });

        Self {
            backend: backend.clone(),
            store: store.clone(),
            user,
            is_loading: AtomicBool::new(false),
            _subscription: subscription,
        }
    }

    /// The signed-in identity, if any
    pub fn user(&self) -> Option<UserRecord> {
        self.user.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    /// True while an authentication request is outstanding
    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }

    /// Exchanges credentials for a session. On failure the session is left
    /// unchanged and the backend's error is passed through.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), BackendError> {
        let _guard = LoadingGuard::hold(&self.is_loading);

        let response = self.backend.auth_with_password(email, password).await?;
        self.store.save(&response.token, response.record);

        Ok(())
    }

    /// Creates an account, then signs it in with the same credentials.
    /// If the second step fails the account still exists; the failure is
    /// surfaced and nothing is rolled back.
    pub async fn register(&self, registration: Registration) -> Result<(), BackendError> {
        let _guard = LoadingGuard::hold(&self.is_loading);

        self.backend
            .create_user(NewUser {
                email: registration.email.clone(),
                password: registration.password.clone(),
                password_confirm: registration.password_confirm,
                display_name: registration.display_name,
            })
            .await?;

        let response = self
            .backend
            .auth_with_password(&registration.email, &registration.password)
            .await?;

        self.store.save(&response.token, response.record);

        Ok(())
    }

    /// Clears the session. Synchronous, idempotent, no network involved.
    pub fn logout(&self) {
        self.store.clear();
    }

    /// Asks the backend to send reset instructions.
    ///
    /// Always reports completion, so callers cannot tell whether the address
    /// has an account. The underlying failure, if any, is only logged.
    pub async fn request_password_reset(&self, email: &str) {
        let _guard = LoadingGuard::hold(&self.is_loading);

        if let Err(e) = self.backend.request_password_reset(email).await {
            debug!("Password reset request for {email} did not go through: {e}");
        }
    }
}

/// Raises the in-flight flag and lowers it again on every exit path
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn hold(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
