//! Vendor accounts and the active session.

use bazaar_store::Store;
use tracing::{debug, info, warn};

use crate::vendor::{NewVendor, Vendor};
use crate::AuthError;

/// Storage key holding every registered vendor.
pub const VENDORS_KEY: &str = "vendors";
/// Storage key holding the signed-in vendor.
pub const SESSION_KEY: &str = "currentVendor";

/// Registers vendors, checks credentials and tracks who is signed in.
///
/// The vendor list is re-read from storage on every call, so two stores on
/// the same backend see each other's registrations.
#[derive(Debug)]
pub struct CredentialStore {
    store: Store,
    session: Option<Vendor>,
}

impl CredentialStore {
    /// Open the credential store and restore any persisted session.
    pub fn open(store: Store) -> Self {
        let mut credentials = Self {
            store,
            session: None,
        };
        credentials.restore_session();
        credentials
    }

    /// Create an account and sign it in.
    ///
    /// Returns the session copy of the new vendor (password blanked).
    ///
    /// The account is written to `vendors` before the session is written to
    /// `currentVendor`. If only the session write fails, the account is
    /// already saved: the call errors, a repeat registration reports
    /// [`AuthError::DuplicateEmail`], and signing in with the same
    /// credentials recovers the session.
    pub fn register(&mut self, candidate: NewVendor) -> Result<Vendor, AuthError> {
        let mut vendors = self.vendors();
        if vendors.iter().any(|v| v.email == candidate.email) {
            debug!(email = %candidate.email, "registration rejected, email taken");
            return Err(AuthError::DuplicateEmail(candidate.email));
        }

        let vendor = Vendor::from_new(candidate);
        let session = vendor.without_password();
        vendors.push(vendor);
        self.store.set(VENDORS_KEY, &vendors)?;
        self.begin_session(session.clone())?;

        info!(vendor = %session.id, "vendor registered");
        Ok(session)
    }

    /// Sign in with an exact email and password match.
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<Vendor, AuthError> {
        let Some(vendor) = self.vendors().into_iter().find(|v| v.matches(email, password)) else {
            debug!("sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let session = vendor.without_password();
        self.begin_session(session.clone())?;
        info!(vendor = %session.id, "vendor signed in");
        Ok(session)
    }

    /// End the active session. Signing out twice is harmless.
    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        self.store.delete(SESSION_KEY)?;
        if let Some(vendor) = self.session.take() {
            info!(vendor = %vendor.id, "vendor signed out");
        }
        Ok(())
    }

    /// Reload the active session from storage.
    pub fn restore_session(&mut self) -> Option<&Vendor> {
        self.session = match self.store.get::<Vendor>(SESSION_KEY) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "stored session unreadable, ignoring");
                None
            }
        };
        self.session.as_ref()
    }

    /// The signed-in vendor, without password.
    pub fn current_vendor(&self) -> Option<&Vendor> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Every registered vendor. Unreadable data counts as none.
    pub fn vendors(&self) -> Vec<Vendor> {
        match self.store.get::<Vec<Vendor>>(VENDORS_KEY) {
            Ok(vendors) => vendors.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "stored vendors unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    fn begin_session(&mut self, session: Vendor) -> Result<(), AuthError> {
        self.store.set(SESSION_KEY, &session)?;
        self.session = Some(session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(email: &str) -> NewVendor {
        NewVendor {
            business_name: "Ganga Arti Store".to_string(),
            email: email.to_string(),
            password: "Diya#2024x".to_string(),
            contact_person: "Ravi Mishra".to_string(),
            phone: "9876543210".to_string(),
            address: "Dashashwamedh Ghat, Varanasi".to_string(),
        }
    }

    #[test]
    fn test_register_signs_in() {
        let mut creds = CredentialStore::open(Store::in_memory());
        assert!(!creds.is_authenticated());

        let session = creds.register(candidate("ravi@example.com")).unwrap();
        assert!(session.password.is_empty());
        assert_eq!(creds.current_vendor(), Some(&session));

        let stored = creds.vendors();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].password, "Diya#2024x");
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut creds = CredentialStore::open(Store::in_memory());
        creds.register(candidate("ravi@example.com")).unwrap();
        let err = creds.register(candidate("ravi@example.com")).unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail(ref e) if e == "ravi@example.com"));
        assert_eq!(creds.vendors().len(), 1);

        // Case differs, so it is a different account
        creds.register(candidate("Ravi@example.com")).unwrap();
        assert_eq!(creds.vendors().len(), 2);
    }

    #[test]
    fn test_wrong_password_is_generic() {
        let mut creds = CredentialStore::open(Store::in_memory());
        creds.register(candidate("ravi@example.com")).unwrap();
        creds.sign_out().unwrap();

        let wrong = creds.authenticate("ravi@example.com", "nope").unwrap_err();
        let unknown = creds.authenticate("who@example.com", "Diya#2024x").unwrap_err();
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(!creds.is_authenticated());
        assert_eq!(creds.vendors()[0].password, "Diya#2024x");
    }

    #[test]
    fn test_sign_out_idempotent() {
        let store = Store::in_memory();
        let mut creds = CredentialStore::open(store.clone());
        creds.register(candidate("ravi@example.com")).unwrap();

        creds.sign_out().unwrap();
        creds.sign_out().unwrap();
        assert!(!creds.is_authenticated());
        assert!(!store.exists(SESSION_KEY).unwrap());
    }

    #[test]
    fn test_corrupt_session_ignored() {
        let store = Store::in_memory();
        store.set_raw(SESSION_KEY, b"not json").unwrap();
        let creds = CredentialStore::open(store);
        assert!(creds.current_vendor().is_none());
    }
}
