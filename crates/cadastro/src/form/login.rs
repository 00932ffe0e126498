//! Demo login gate.
//!
//! There are no accounts: any well-formed e-mail is accepted together with
//! the fixed demo password.

use thiserror::Error;
use tracing::debug;

use crate::format::validate_email;

/// The only password the demo gate accepts.
pub const DEMO_PASSWORD: &str = "123456";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Por favor, preencha todos os campos.")]
    MissingFields,

    #[error("Email inválido.")]
    InvalidEmail,

    #[error("Email ou senha inválidos")]
    BadCredentials,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoginForm {
    pub email: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing, default))]
    pub password: String,
    pub remember_me: bool,
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    pub email: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    /// Checks the credentials, in the order the login screen reports them:
    /// missing fields, e-mail shape, then the password.
    pub fn authenticate(&self) -> Result<Session, LoginError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(LoginError::MissingFields);
        }
        if !validate_email(email) {
            return Err(LoginError::InvalidEmail);
        }
        if self.password != DEMO_PASSWORD {
            debug!(email, "login rejected");
            return Err(LoginError::BadCredentials);
        }

        debug!(email, remember_me = self.remember_me, "login accepted");
        Ok(Session {
            email: email.to_string(),
            remember_me: self.remember_me,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_demo_password() {
        let form = LoginForm {
            remember_me: true,
            ..LoginForm::new(" admin@universidade.br ", DEMO_PASSWORD)
        };
        assert_eq!(
            form.authenticate(),
            Ok(Session {
                email: "admin@universidade.br".to_string(),
                remember_me: true,
            })
        );
    }

    #[test]
    fn test_error_order() {
        assert_eq!(
            LoginForm::new("", "").authenticate(),
            Err(LoginError::MissingFields)
        );
        assert_eq!(
            LoginForm::new("not-an-email", "").authenticate(),
            Err(LoginError::MissingFields)
        );
        assert_eq!(
            LoginForm::new("not-an-email", "wrong").authenticate(),
            Err(LoginError::InvalidEmail)
        );
        assert_eq!(
            LoginForm::new("a@b.co", "wrong").authenticate(),
            Err(LoginError::BadCredentials)
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            LoginError::MissingFields.to_string(),
            "Por favor, preencha todos os campos."
        );
        assert_eq!(LoginError::BadCredentials.to_string(), "Email ou senha inválidos");
    }
}
