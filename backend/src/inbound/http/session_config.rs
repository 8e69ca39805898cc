//! Cookie session settings read from the environment.
//!
//! Release builds insist on explicit, valid values. Debug builds fall back to
//! permissive defaults and log a warning instead, so a local server starts
//! without any session configuration at all.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const KEY_FILE_DEFAULT: &str = "/var/run/secrets/session_key";
const KEY_MIN_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Strictness applied when reading session settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or malformed values fall back to defaults with a warning.
    Debug,
    /// Missing or malformed values are errors.
    Release,
}

impl BuildMode {
    /// The mode matching `cfg!(debug_assertions)`.
    ///
    /// ```
    /// use recipe_book::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie session settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for the cookie store.
    pub key: Key,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// `SameSite` policy for the session cookie.
    pub same_site: SameSite,
}

/// Errors raised while reading session settings.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read session settings from `env` under the rules of `mode`.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = flag_from_env(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = flag_from_env(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Apply the debug fallback or surface `error` in release builds.
fn lenient<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn!(%error, "session setting falls back to its debug default");
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn flag_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return lenient(mode, debug_default, SessionConfigError::MissingEnv { name });
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => lenient(
            mode,
            debug_default,
            SessionConfigError::InvalidEnv {
                name,
                value,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let Some(value) = env.string(SAMESITE_ENV) else {
        return lenient(
            mode,
            SameSite::Lax,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
        );
    };
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => lenient(mode, SameSite::None, SessionConfigError::InsecureSameSiteNone),
        _ => lenient(
            mode,
            SameSite::Lax,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            },
        ),
    }
}

fn key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| KEY_FILE_DEFAULT.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if !mode.is_debug() && length < KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(source) if mode.is_debug() || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "using temporary session key");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn key_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp key file");
        file.write_all(&vec![b'k'; len]).expect("write key");
        file
    }

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    fn release_env(key_path: &str, overrides: &[(&'static str, &'static str)]) -> MockEnv {
        let mut vars = vec![
            (KEY_FILE_ENV, key_path),
            (COOKIE_SECURE_ENV, "1"),
            (SAMESITE_ENV, "Strict"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ];
        for &(name, value) in overrides {
            vars.retain(|(existing, _)| *existing != name);
            vars.push((name, value));
        }
        mock_env(&vars)
    }

    #[rstest]
    fn release_accepts_complete_configuration() {
        let key = key_file(KEY_MIN_LEN);
        let path = key.path().to_str().expect("utf-8 path");
        let settings = session_settings_from_env(&release_env(path, &[]), BuildMode::Release)
            .expect("valid settings");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    fn debug_defaults_when_nothing_is_set() {
        let env = mock_env(&[(KEY_FILE_ENV, "/nonexistent/session_key")]);
        let settings = session_settings_from_env(&env, BuildMode::Debug).expect("defaults");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[rstest]
    #[case::missing_secure(COOKIE_SECURE_ENV, None)]
    #[case::missing_samesite(SAMESITE_ENV, None)]
    #[case::bad_secure(COOKIE_SECURE_ENV, Some("maybe"))]
    #[case::bad_samesite(SAMESITE_ENV, Some("sometimes"))]
    fn release_rejects_missing_or_malformed_toggles(
        #[case] name: &'static str,
        #[case] value: Option<&'static str>,
    ) {
        let key = key_file(KEY_MIN_LEN);
        let path = key.path().to_str().expect("utf-8 path").to_owned();
        let mut vars: Vec<(&str, &str)> = vec![
            (KEY_FILE_ENV, path.as_str()),
            (COOKIE_SECURE_ENV, "1"),
            (SAMESITE_ENV, "Strict"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ];
        vars.retain(|(existing, _)| *existing != name);
        if let Some(value) = value {
            vars.push((name, value));
        }

        let err = session_settings_from_env(&mock_env(&vars), BuildMode::Release)
            .err()
            .expect("release rejects");
        assert!(matches!(
            err,
            SessionConfigError::MissingEnv { .. } | SessionConfigError::InvalidEnv { .. }
        ));
    }

    #[rstest]
    fn release_rejects_short_keys() {
        let key = key_file(16);
        let path = key.path().to_str().expect("utf-8 path");
        let err = session_settings_from_env(&release_env(path, &[]), BuildMode::Release)
            .err()
            .expect("short key");
        assert!(matches!(err, SessionConfigError::KeyTooShort { length: 16, .. }));
    }

    #[rstest]
    fn release_rejects_insecure_samesite_none() {
        let key = key_file(KEY_MIN_LEN);
        let path = key.path().to_str().expect("utf-8 path");
        let env = release_env(path, &[(COOKIE_SECURE_ENV, "0"), (SAMESITE_ENV, "None")]);
        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("insecure none");
        assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
    }

    #[rstest]
    fn release_refuses_ephemeral_keys() {
        let env = release_env("/nonexistent/session_key", &[(ALLOW_EPHEMERAL_ENV, "1")]);
        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("ephemeral refused");
        assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
    }

    #[rstest]
    fn release_requires_a_readable_key() {
        let env = release_env("/nonexistent/session_key", &[]);
        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("unreadable key");
        assert!(matches!(err, SessionConfigError::KeyRead { .. }));
    }

    #[rstest]
    #[case("YES", Some(true))]
    #[case(" 0 ", Some(false))]
    #[case("y", None)]
    fn booleans_parse_case_insensitively(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }
}
