//! Authentication primitives: login credentials and registration requests.
//!
//! Handlers pass raw strings in; these constructors decide which inputs are
//! acceptable before any port is consulted.

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and lower-cased, and never empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use support_desk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Admin@Example.com", "password").unwrap();
/// assert_eq!(creds.email(), "admin@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used to identify the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Field of a registration request that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    Name,
    Email,
    Password,
}

impl RegistrationField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// Registration input that failed the presence check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing registration fields: {}", join_fields(.missing))]
pub struct RegistrationValidationError {
    missing: Vec<RegistrationField>,
}

impl RegistrationValidationError {
    /// Fields that were absent or blank, in declaration order.
    pub fn missing(&self) -> &[RegistrationField] {
        &self.missing
    }

    /// Wire names of the missing fields.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.missing.iter().map(|field| field.as_str()).collect()
    }
}

fn join_fields(fields: &[RegistrationField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A registration request whose fields are all present.
///
/// Nothing is persisted or hashed; holding one only proves the payload was
/// complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// Every absent or blank field is reported, not just the first.
    ///
    /// # Examples
    /// ```
    /// use support_desk::domain::{Registration, RegistrationField};
    ///
    /// let err = Registration::try_from_parts(Some("Ada"), None, Some(" ")).unwrap_err();
    /// assert_eq!(err.missing(), &[RegistrationField::Email, RegistrationField::Password]);
    /// ```
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, RegistrationValidationError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }
        let name_value = present(name);
        let email_value = present(email);
        let password_value = present(password);

        let missing: Vec<RegistrationField> = [
            (RegistrationField::Name, name_value.is_none()),
            (RegistrationField::Email, email_value.is_none()),
            (RegistrationField::Password, password_value.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        match (name_value, email_value, password, missing.is_empty()) {
            (Some(n), Some(e), Some(p), true) => Ok(Self {
                name: n.to_owned(),
                email: e.to_lowercase(),
                password: Zeroizing::new(p.to_owned()),
            }),
            _ => Err(RegistrationValidationError { missing }),
        }
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Normalised email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Raw password as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("user@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_login_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn login_password_keeps_whitespace() {
        let creds = LoginCredentials::try_from_parts("a@example.com", " secret ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.password(), " secret ");
    }

    #[rstest]
    #[case(None, Some("a@example.com"), Some("pw"), &[RegistrationField::Name])]
    #[case(Some("Ada"), Some(""), Some("pw"), &[RegistrationField::Email])]
    #[case(Some("Ada"), Some("a@example.com"), Some("  "), &[RegistrationField::Password])]
    #[case(None, None, None, &[
        RegistrationField::Name,
        RegistrationField::Email,
        RegistrationField::Password,
    ])]
    fn registration_reports_missing_fields(
        #[case] name: Option<&str>,
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
        #[case] expected: &[RegistrationField],
    ) {
        let err = Registration::try_from_parts(name, email, password)
            .expect_err("incomplete registration must fail");
        assert_eq!(err.missing(), expected);
    }

    #[rstest]
    fn registration_accepts_complete_payload() {
        let registration =
            Registration::try_from_parts(Some(" Ada "), Some("Ada@Example.com"), Some("pw"))
                .expect("complete registration");
        assert_eq!(registration.name(), "Ada");
        assert_eq!(registration.email(), "ada@example.com");
        assert_eq!(registration.password(), "pw");
    }
}
