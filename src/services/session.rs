//! Session flags.
//!
//! A small string key-value store holding the "authenticated" flag, the
//! serialized signed-in user and the language preference. It is optionally
//! mirrored to a JSON file so the flags survive a restart; project data is
//! never written here. Login is mocked: any well-formed credentials succeed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{Language, LoginRequest, RegisterRequest, SessionResponse, User};

pub const KEY_AUTHENTICATED: &str = "isAuthenticated";
pub const KEY_USER: &str = "user";
pub const KEY_LANGUAGE: &str = "language";

const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

pub struct SessionStore {
    path: Option<PathBuf>,
    values: RwLock<BTreeMap<String, String>>,
    default_language: Language,
}

impl SessionStore {
    /// Store that lives only as long as the process.
    pub fn in_memory(default_language: Language) -> Self {
        Self {
            path: None,
            values: RwLock::new(BTreeMap::new()),
            default_language,
        }
    }

    /// Open a file-backed store. A missing file starts empty; an unreadable
    /// or corrupt file is logged and replaced on the next write.
    pub async fn open(path: impl Into<PathBuf>, default_language: Language) -> AppResult<Self> {
        let path = path.into();
        let values = match tokio::fs::read_to_string(&path).await {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path),
            values: RwLock::new(values),
            default_language,
        })
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    pub async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value);
        self.persist(&values).await
    }

    pub async fn remove(&self, key: &str) -> AppResult<()> {
        let mut values = self.values.write().await;
        if values.remove(key).is_some() {
            self.persist(&values).await?;
        }
        Ok(())
    }

    async fn persist(&self, values: &BTreeMap<String, String>) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_atomically(path, &serde_json::to_vec_pretty(values)?).await
    }

    /// Mocked sign-in.
    pub async fn login(&self, req: &LoginRequest) -> AppResult<User> {
        req.validate().map_err(AppError::Validation)?;

        let name = req
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        let user = make_user(name, &req.email);
        self.sign_in(&user).await?;
        Ok(user)
    }

    /// Mocked account creation, signs the new user in.
    pub async fn register(&self, req: &RegisterRequest) -> AppResult<User> {
        req.validate().map_err(AppError::Validation)?;

        let user = make_user(req.name.trim().to_string(), &req.email);
        self.sign_in(&user).await?;
        Ok(user)
    }

    async fn sign_in(&self, user: &User) -> AppResult<()> {
        self.set(KEY_USER, serde_json::to_string(user)?).await?;
        self.set(KEY_AUTHENTICATED, "true".to_string()).await?;
        info!(email = %user.email, "User signed in");
        Ok(())
    }

    /// Clear the user and the authenticated flag. The language stays.
    pub async fn logout(&self) -> AppResult<()> {
        self.remove(KEY_AUTHENTICATED).await?;
        self.remove(KEY_USER).await?;
        info!("User signed out");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.get(KEY_AUTHENTICATED).await.as_deref() == Some("true")
    }

    pub async fn current_user(&self) -> Option<User> {
        if !self.is_authenticated().await {
            return None;
        }
        let raw = self.get(KEY_USER).await?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user record is unreadable");
                None
            }
        }
    }

    pub async fn language(&self) -> Language {
        self.get(KEY_LANGUAGE)
            .await
            .and_then(|code| Language::parse(&code))
            .unwrap_or(self.default_language)
    }

    pub async fn set_language(&self, language: Language) -> AppResult<()> {
        self.set(KEY_LANGUAGE, language.as_str().to_string()).await
    }

    pub async fn session(&self) -> SessionResponse {
        let user = self.current_user().await;
        SessionResponse {
            authenticated: user.is_some(),
            user,
            language: self.language().await,
        }
    }
}

fn make_user(name: String, email: &str) -> User {
    let avatar = format!(
        "{}?name={}&background=random",
        AVATAR_SERVICE,
        urlencoding::encode(&name)
    );
    User {
        name,
        email: email.trim().to_string(),
        avatar,
    }
}

async fn write_atomically(path: &Path, contents: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
