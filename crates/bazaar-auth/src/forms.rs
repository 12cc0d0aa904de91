//! Sign-up, sign-in and password-reset form validation.

use bazaar_catalog::FieldErrors;

use crate::vendor::NewVendor;

/// Characters that satisfy the special-character password rule.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

/// One rule a registration password must pass.
#[derive(Debug, Clone, Copy)]
pub struct PasswordRequirement {
    pub label: &'static str,
    check: fn(&str) -> bool,
}

impl PasswordRequirement {
    pub fn is_met(&self, password: &str) -> bool {
        (self.check)(password)
    }
}

/// Password rules in display order.
pub static PASSWORD_REQUIREMENTS: [PasswordRequirement; 5] = [
    PasswordRequirement {
        label: "At least 8 characters",
        check: long_enough,
    },
    PasswordRequirement {
        label: "One uppercase letter",
        check: has_uppercase,
    },
    PasswordRequirement {
        label: "One lowercase letter",
        check: has_lowercase,
    },
    PasswordRequirement {
        label: "One number",
        check: has_digit,
    },
    PasswordRequirement {
        label: "One special character",
        check: has_special,
    },
];

fn long_enough(password: &str) -> bool {
    password.chars().count() >= 8
}

fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

fn has_special(password: &str) -> bool {
    password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Labels of the password rules `password` fails.
pub fn unmet_password_requirements(password: &str) -> Vec<&'static str> {
    PASSWORD_REQUIREMENTS
        .iter()
        .filter(|req| !req.is_met(password))
        .map(|req| req.label)
        .collect()
}

/// Loose email shape check: somewhere in the input a run of non-space
/// characters looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    email.split_whitespace().any(|token| {
        token.char_indices().any(|(at, c)| {
            if c != '@' || at == 0 {
                return false;
            }
            let domain: Vec<char> = token[at + 1..].chars().collect();
            // Needs at least one character on each side of some dot.
            domain.len() >= 3 && domain[1..domain.len() - 1].contains(&'.')
        })
    })
}

/// Phone numbers: optional leading `+`, then at least ten digits, spaces,
/// dashes or parentheses.
pub fn is_valid_phone(phone: &str) -> bool {
    let body = phone.strip_prefix('+').unwrap_or(phone);
    let allowed = |c: char| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')');
    body.chars().count() >= 10 && body.chars().all(allowed)
}

/// The vendor registration form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub business_name: String,
    pub email: String,
    pub password: String,
    pub contact_person: String,
    pub phone: String,
    pub address: String,
}

impl RegistrationForm {
    /// Check every field; on success the form becomes a registration.
    pub fn validate(&self) -> Result<NewVendor, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.business_name.trim().is_empty() {
            errors.insert("businessName", "Business name is required");
        }
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Email is invalid");
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if !unmet_password_requirements(&self.password).is_empty() {
            errors.insert("password", "Password does not meet all requirements");
        }
        if self.contact_person.trim().is_empty() {
            errors.insert("contactPerson", "Contact person is required");
        }
        if self.phone.trim().is_empty() {
            errors.insert("phone", "Phone number is required");
        } else if !is_valid_phone(&self.phone) {
            errors.insert("phone", "Please enter a valid phone number");
        }
        if self.address.trim().is_empty() {
            errors.insert("address", "Address is required");
        }

        errors.into_result(NewVendor {
            business_name: self.business_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            contact_person: self.contact_person.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        })
    }
}

/// The sign-in form.
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Email is invalid");
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if self.password.chars().count() < 6 {
            errors.insert("password", "Password must be at least 6 characters");
        }

        errors.into_result(())
    }
}

/// A "forgot password" request. Only the email shape is checked; no account
/// lookup happens.
#[derive(Debug, Clone, Default)]
pub struct PasswordResetRequest {
    pub email: String,
}

impl PasswordResetRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        if self.email.trim().is_empty() {
            return Err(FieldErrors::single("email", "Email is required"));
        }
        if !is_valid_email(&self.email) {
            return Err(FieldErrors::single(
                "email",
                "Please enter a valid email address",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RegistrationForm {
        RegistrationForm {
            business_name: "Shiva Puja Bhandar".to_string(),
            email: "asha@example.com".to_string(),
            password: "Namaste@123".to_string(),
            contact_person: "Asha Verma".to_string(),
            phone: "+91 (987) 654-3210".to_string(),
            address: "12 Temple Road, Varanasi".to_string(),
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("  a@b.c  "));
        assert!(is_valid_email("a@b.c.d"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("asha@.com"));
        assert!(!is_valid_email("asha@example."));
        assert!(!is_valid_email("asha example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_phone_shape() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(is_valid_phone("(555) 000-0000"));
        assert!(!is_valid_phone("98765"));
        assert!(!is_valid_phone("+987654321"));
        assert!(!is_valid_phone("98765-43210 ext"));
        assert!(!is_valid_phone("++9876543210"));
    }

    #[test]
    fn test_password_requirements() {
        assert!(unmet_password_requirements("Namaste@123").is_empty());
        assert_eq!(
            unmet_password_requirements("namaste123"),
            vec!["One uppercase letter", "One special character"]
        );
        assert_eq!(unmet_password_requirements("").len(), 5);
        assert!(unmet_password_requirements("Ab1\"defgh").is_empty());
    }

    #[test]
    fn test_registration_valid() {
        let vendor = complete().validate().unwrap();
        assert_eq!(vendor.email, "asha@example.com");
        assert_eq!(vendor.phone, "+91 (987) 654-3210");
    }

    #[test]
    fn test_registration_errors() {
        let errors = RegistrationForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get("businessName"), Some("Business name is required"));
        assert_eq!(errors.get("contactPerson"), Some("Contact person is required"));
        assert_eq!(errors.get("phone"), Some("Phone number is required"));

        let mut form = complete();
        form.email = "asha-at-example".to_string();
        form.password = "weakpass".to_string();
        form.phone = "12345".to_string();
        form.address = "   ".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is invalid"));
        assert_eq!(
            errors.get("password"),
            Some("Password does not meet all requirements")
        );
        assert_eq!(errors.get("phone"), Some("Please enter a valid phone number"));
        assert_eq!(errors.get("address"), Some("Address is required"));
    }

    #[test]
    fn test_sign_in_form() {
        assert!(SignInForm::new("asha@example.com", "secret").validate().is_ok());

        let errors = SignInForm::new("", "").validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let errors = SignInForm::new("asha", "12345").validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is invalid"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_password_reset_request() {
        assert!(PasswordResetRequest::new("asha@example.com").validate().is_ok());
        assert_eq!(
            PasswordResetRequest::new(" ").validate().unwrap_err().get("email"),
            Some("Email is required")
        );
        assert_eq!(
            PasswordResetRequest::new("asha").validate().unwrap_err().get("email"),
            Some("Please enter a valid email address")
        );
    }
}
