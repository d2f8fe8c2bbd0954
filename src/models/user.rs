//! Session user and language preference models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Signed-in user. Derived from a mocked login, never verified by a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

/// Interface language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Vi,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Some(Self::En),
            "vi" => Some(Self::Vi),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        if !self.email.contains('@') {
            return Err("Email is invalid".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
        .validate()?;
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }
}

/// Current session flags.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub language: Language,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetLanguageRequest {
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("VI"), Some(Language::Vi));
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("fr"), None);
    }

    #[test]
    fn test_register_password_mismatch() {
        let req = RegisterRequest {
            name: "An".into(),
            email: "an@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret2".into(),
        };
        assert_eq!(req.validate(), Err("Passwords do not match".to_string()));
    }

    #[test]
    fn test_login_requires_fields() {
        let req = LoginRequest {
            email: "".into(),
            password: "x".into(),
        };
        assert!(req.validate().is_err());
        let req = LoginRequest {
            email: "qa@example.com".into(),
            password: "".into(),
        };
        assert!(req.validate().is_err());
    }
}
