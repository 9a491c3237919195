//! Account flows: login, registration, logout, and profile self-service.
//!
//! Every flow validates client-side first, then makes the backend call, and
//! only touches the persisted session after the backend acknowledges.

use std::sync::atomic::{AtomicBool, Ordering};

use ampunv_auth::{SessionStore, StoredUser};
use ampunv_core::validate::{
    check_email_shape, check_password_complexity, check_password_confirmation, require_non_blank,
};

use crate::dto::{LoginRequest, RegistrationForm, UpdatePasswordRequest, UpdateProfileRequest};
use crate::error::ApiError;
use crate::gateway::{AuthApi, UserApi};

/// Login/registration over the auth surface, persisting into the session.
#[derive(Debug)]
pub struct AccountFlow<G> {
    gateway: G,
    session: SessionStore,
}

impl<G: AuthApi> AccountFlow<G> {
    pub fn new(gateway: G, session: SessionStore) -> Self {
        Self { gateway, session }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<StoredUser, ApiError> {
        check_email_shape(email)?;
        require_non_blank("password", password)?;

        let response = self
            .gateway
            .login(&LoginRequest {
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .await?;

        let (token, user) = response.into_session();
        self.session.save(token, &user);
        Ok(user)
    }

    /// Validate, refuse already-registered emails early, register, and
    /// persist the fresh session.
    pub async fn register(&self, form: RegistrationForm) -> Result<StoredUser, ApiError> {
        let request = form.validate()?;

        if self.gateway.check_email(&request.email).await? {
            return Err(ApiError::validation("this email is already registered"));
        }

        let response = self.gateway.register(&request).await?;
        let (token, user) = response.into_session();
        self.session.save(token, &user);
        Ok(user)
    }

    pub fn logout(&self) {
        self.session.clear();
    }
}

/// Handle for the irreversible account deletion; produced by
/// `ProfileEditor::begin_account_deletion`, consumed by
/// `confirm_account_deletion`. Dropping it cancels.
#[derive(Debug)]
pub struct AccountDeletion {
    email: String,
}

impl AccountDeletion {
    /// Shown in the confirmation prompt.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Profile self-service over the user surface.
///
/// At most one profile or password request is outstanding at a time: a
/// second submission while one is in flight is refused client-side, so a
/// double-clicked form never issues two requests.
#[derive(Debug)]
pub struct ProfileEditor<G> {
    gateway: G,
    session: SessionStore,
    in_flight: AtomicBool,
}

/// Lowers the editor's in-flight flag when the request settles (or is
/// cancelled).
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<G: UserApi> ProfileEditor<G> {
    pub fn new(gateway: G, session: SessionStore) -> Self {
        Self {
            gateway,
            session,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit controls are disabled while this is true.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin_request(&self) -> Result<InFlight<'_>, ApiError> {
        if self.in_flight.swap(true, Ordering::Acquire) {
            return Err(ApiError::validation("an update is already in progress"));
        }
        Ok(InFlight {
            flag: &self.in_flight,
        })
    }

    /// Update names/email/city. The persisted user record follows the
    /// backend's acknowledged copy, never the submitted form.
    pub async fn update_profile(&self, request: UpdateProfileRequest) -> Result<StoredUser, ApiError> {
        request.validate()?;
        let _guard = self.begin_request()?;

        let updated = self.gateway.update_my_profile(&request).await?;
        if let Some(token) = self.session.token() {
            self.session.save(token, &updated);
        }
        Ok(updated)
    }

    pub async fn update_password(
        &self,
        current: &str,
        new: &str,
        confirmation: &str,
    ) -> Result<(), ApiError> {
        require_non_blank("current password", current)?;
        check_password_complexity(new)?;
        check_password_confirmation(new, confirmation)?;
        let _guard = self.begin_request()?;

        self.gateway
            .update_my_password(&UpdatePasswordRequest {
                current_password: current.to_string(),
                new_password: new.to_string(),
            })
            .await
    }

    /// First step of account deletion: capture what is about to go.
    pub fn begin_account_deletion(&self) -> Result<AccountDeletion, ApiError> {
        let user = self
            .session
            .current_user()
            .ok_or(ApiError::Unauthorized)?;
        Ok(AccountDeletion { email: user.email })
    }

    /// Second step: the user confirmed; delete and clear the session.
    pub async fn confirm_account_deletion(
        &self,
        _confirmation: AccountDeletion,
    ) -> Result<(), ApiError> {
        self.gateway.delete_my_account().await?;
        self.session.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampunv_auth::Role;
    use ampunv_core::{CityId, InMemoryStore, UserId};
    use std::sync::{Arc, Mutex};

    use crate::dto::{AuthResponse, PublicUserProfile, RegisterRequest};

    fn session() -> SessionStore {
        SessionStore::new(Arc::new(InMemoryStore::new()))
    }

    struct FakeAuthApi {
        known_email: Option<String>,
        register_calls: Mutex<u32>,
    }

    fn auth_response(email: &str, role: Role) -> AuthResponse {
        AuthResponse {
            token: "tok-1".into(),
            user_id: UserId::new(3),
            email: email.into(),
            firstname: "Ada".into(),
            lastname: "Martin".into(),
            role,
            city_id: Some(CityId::new(1)),
            is_original_admin: false,
        }
    }

    impl AuthApi for &FakeAuthApi {
        async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
            *self.register_calls.lock().unwrap() += 1;
            Ok(auth_response(&req.email, Role::Seller))
        }

        async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
            if req.password == "wrong-password" {
                return Err(ApiError::Business("invalid credentials".into()));
            }
            Ok(auth_response(&req.email, Role::Seller))
        }

        async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
            Ok(self.known_email.as_deref() == Some(email))
        }
    }

    fn registration(email: &str) -> RegistrationForm {
        RegistrationForm {
            firstname: "Ada".into(),
            lastname: "Martin".into(),
            email: email.into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            city_id: CityId::new(1),
        }
    }

    #[tokio::test]
    async fn login_persists_the_session() {
        let api = FakeAuthApi { known_email: None, register_calls: Mutex::new(0) };
        let session = session();
        let flow = AccountFlow::new(&api, session.clone());

        let user = flow.login("ada@example.com", "secret1").await.unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn failed_login_leaves_the_session_anonymous() {
        let api = FakeAuthApi { known_email: None, register_calls: Mutex::new(0) };
        let session = session();
        let flow = AccountFlow::new(&api, session.clone());

        let err = flow.login("ada@example.com", "wrong-password").await.unwrap_err();

        assert_eq!(err, ApiError::Business("invalid credentials".into()));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn registering_a_taken_email_is_refused_before_the_register_call() {
        let api = FakeAuthApi {
            known_email: Some("taken@example.com".into()),
            register_calls: Mutex::new(0),
        };
        let flow = AccountFlow::new(&api, session());

        let err = flow.register(registration("taken@example.com")).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(*api.register_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn successful_registration_logs_the_user_in() {
        let api = FakeAuthApi { known_email: None, register_calls: Mutex::new(0) };
        let session = session();
        let flow = AccountFlow::new(&api, session.clone());

        flow.register(registration("new@example.com")).await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.current_user().unwrap().email, "new@example.com");
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let api = FakeAuthApi { known_email: None, register_calls: Mutex::new(0) };
        let session = session();
        let flow = AccountFlow::new(&api, session.clone());
        flow.login("ada@example.com", "secret1").await.unwrap();

        flow.logout();

        assert!(!session.is_authenticated());
    }

    struct FakeUserApi {
        delete_calls: Mutex<u32>,
    }

    impl UserApi for &FakeUserApi {
        async fn list_users(&self) -> Result<Vec<StoredUser>, ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn get_user(&self, _id: UserId) -> Result<StoredUser, ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn public_profile(&self, _id: UserId) -> Result<PublicUserProfile, ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn my_profile(&self) -> Result<StoredUser, ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn promote_to_admin(&self, _id: UserId) -> Result<(), ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn demote_to_seller(&self, _id: UserId) -> Result<(), ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn delete_user(&self, _id: UserId) -> Result<(), ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn update_my_profile(
            &self,
            req: &UpdateProfileRequest,
        ) -> Result<StoredUser, ApiError> {
            Ok(StoredUser {
                id: UserId::new(3),
                firstname: req.firstname.clone(),
                lastname: req.lastname.clone(),
                email: req.email.clone(),
                role: Role::Seller,
                city_id: Some(req.city_id),
                is_original_admin: false,
            })
        }

        async fn update_my_password(&self, _req: &UpdatePasswordRequest) -> Result<(), ApiError> {
            Ok(())
        }

        async fn delete_my_account(&self) -> Result<(), ApiError> {
            *self.delete_calls.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn logged_in_session() -> SessionStore {
        let session = session();
        let (token, user) = auth_response("ada@example.com", Role::Seller).into_session();
        session.save(token, &user);
        session
    }

    #[tokio::test]
    async fn profile_update_refreshes_the_persisted_user_record() {
        let api = FakeUserApi { delete_calls: Mutex::new(0) };
        let session = logged_in_session();
        let editor = ProfileEditor::new(&api, session.clone());

        editor
            .update_profile(UpdateProfileRequest {
                firstname: "Adeline".into(),
                lastname: "Martin".into(),
                email: "adeline@example.com".into(),
                city_id: CityId::new(2),
            })
            .await
            .unwrap();

        assert_eq!(session.current_user().unwrap().firstname, "Adeline");
        assert_eq!(session.current_user().unwrap().email, "adeline@example.com");
    }

    #[tokio::test]
    async fn password_change_validates_before_the_network() {
        let api = FakeUserApi { delete_calls: Mutex::new(0) };
        let editor = ProfileEditor::new(&api, logged_in_session());

        assert!(editor.update_password("old", "short", "short").await.is_err());
        assert!(editor.update_password("old", "secret1", "other1").await.is_err());
        assert!(editor.update_password("old", "secret1", "secret1").await.is_ok());
    }

    /// Fake whose profile update stalls until released, so a second
    /// submission can arrive while the first is outstanding.
    struct BlockingUserApi {
        release: tokio::sync::Notify,
        calls: Mutex<u32>,
    }

    impl UserApi for &BlockingUserApi {
        async fn list_users(&self) -> Result<Vec<StoredUser>, ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn get_user(&self, _id: UserId) -> Result<StoredUser, ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn public_profile(&self, _id: UserId) -> Result<PublicUserProfile, ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn my_profile(&self) -> Result<StoredUser, ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn promote_to_admin(&self, _id: UserId) -> Result<(), ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn demote_to_seller(&self, _id: UserId) -> Result<(), ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn delete_user(&self, _id: UserId) -> Result<(), ApiError> {
            unimplemented!("not used by the profile editor")
        }

        async fn update_my_profile(
            &self,
            req: &UpdateProfileRequest,
        ) -> Result<StoredUser, ApiError> {
            *self.calls.lock().unwrap() += 1;
            self.release.notified().await;
            Ok(StoredUser {
                id: UserId::new(3),
                firstname: req.firstname.clone(),
                lastname: req.lastname.clone(),
                email: req.email.clone(),
                role: Role::Seller,
                city_id: Some(req.city_id),
                is_original_admin: false,
            })
        }

        async fn update_my_password(&self, _req: &UpdatePasswordRequest) -> Result<(), ApiError> {
            unimplemented!("not used by this fake")
        }

        async fn delete_my_account(&self) -> Result<(), ApiError> {
            unimplemented!("not used by this fake")
        }
    }

    #[tokio::test]
    async fn an_overlapping_profile_update_is_refused_without_a_second_request() {
        let api = BlockingUserApi {
            release: tokio::sync::Notify::new(),
            calls: Mutex::new(0),
        };
        let editor = ProfileEditor::new(&api, logged_in_session());
        let request = UpdateProfileRequest {
            firstname: "Adeline".into(),
            lastname: "Martin".into(),
            email: "adeline@example.com".into(),
            city_id: CityId::new(2),
        };

        let (first, second) = tokio::join!(editor.update_profile(request.clone()), async {
            // Let the first submission reach the gateway, then overlap it.
            tokio::task::yield_now().await;
            let second = editor.update_profile(request.clone()).await;
            api.release.notify_one();
            second
        });

        assert!(first.is_ok());
        assert!(matches!(second.unwrap_err(), ApiError::Validation(_)));
        assert_eq!(*api.calls.lock().unwrap(), 1);
        assert!(!editor.is_in_flight());
    }

    #[tokio::test]
    async fn account_deletion_requires_confirmation_and_clears_the_session() {
        let api = FakeUserApi { delete_calls: Mutex::new(0) };
        let session = logged_in_session();
        let editor = ProfileEditor::new(&api, session.clone());

        let confirmation = editor.begin_account_deletion().unwrap();
        assert_eq!(confirmation.email(), "ada@example.com");
        assert_eq!(*api.delete_calls.lock().unwrap(), 0);

        editor.confirm_account_deletion(confirmation).await.unwrap();
        assert_eq!(*api.delete_calls.lock().unwrap(), 1);
        assert!(!session.is_authenticated());
    }
}
