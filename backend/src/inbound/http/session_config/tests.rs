//! Unit tests for session configuration parsing.

use std::collections::HashMap;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;

/// Key file removed again when the test finishes.
struct TempKeyFile(PathBuf);

impl TempKeyFile {
    fn with_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("noticeboard-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write key file");
        Self(path)
    }

    fn path(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[fixture]
fn key_file() -> TempKeyFile {
    TempKeyFile::with_len(SESSION_KEY_MIN_LEN)
}

fn env_from(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

fn release_vars(key_path: String) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_path),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match SessionSettings::from_env(&env_from(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(key_file: TempKeyFile, #[case] missing: &'static str) {
    let mut vars = release_vars(key_file.path());
    vars.remove(missing);
    let error = release_error(vars);
    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sideways")]
#[case(ALLOW_EPHEMERAL_ENV, "perhaps")]
fn release_rejects_invalid_values(
    key_file: TempKeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(key_file.path());
    vars.insert(name, value.to_owned());
    let error = release_error(vars);
    assert!(matches!(error, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(key_file: TempKeyFile) {
    let mut vars = release_vars(key_file.path());
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_missing_key_file() {
    let vars = release_vars("/nonexistent/noticeboard/session_key".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = TempKeyFile::with_len(SESSION_KEY_MIN_LEN - 1);
    let error = release_error(release_vars(short.path()));
    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_insecure_same_site_none(key_file: TempKeyFile) {
    let mut vars = release_vars(key_file.path());
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_accepts_complete_settings(key_file: TempKeyFile) {
    let env = env_from(release_vars(key_file.path()));
    let settings = SessionSettings::from_env(&env, BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
fn same_key_file_gives_same_fingerprint(key_file: TempKeyFile) {
    let env = env_from(release_vars(key_file.path()));
    let first = SessionSettings::from_env(&env, BuildMode::Release).expect("valid settings");
    let second = SessionSettings::from_env(&env, BuildMode::Release).expect("valid settings");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[rstest]
fn cloned_settings_keep_key_and_cookie_policy(key_file: TempKeyFile) {
    let env = env_from(release_vars(key_file.path()));
    let settings = SessionSettings::from_env(&env, BuildMode::Release).expect("valid settings");
    let worker_copy = settings.clone();
    assert_eq!(worker_copy.fingerprint(), settings.fingerprint());
    assert_eq!(worker_copy.same_site, settings.same_site);
    assert_eq!(worker_copy.cookie_secure, settings.cookie_secure);
}

#[rstest]
fn debug_builds_fall_back_to_defaults() {
    let vars = HashMap::from([
        (KEY_FILE_ENV, "/nonexistent/noticeboard/session_key".to_owned()),
        (SAMESITE_ENV, "unexpected".to_owned()),
        (COOKIE_SECURE_ENV, "perhaps".to_owned()),
    ]);
    let settings =
        SessionSettings::from_env(&env_from(vars), BuildMode::Debug).expect("debug fallback");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_insecure_same_site_none(key_file: TempKeyFile) {
    let mut vars = release_vars(key_file.path());
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "none".to_owned());
    let settings =
        SessionSettings::from_env(&env_from(vars), BuildMode::Debug).expect("debug fallback");
    assert_eq!(settings.same_site, SameSite::None);
    assert!(!settings.cookie_secure);
}
