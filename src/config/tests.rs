use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_tracksmith_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TRACKSMITH_CONFIG_PATH", "/tmp/tracksmith-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tracksmith-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("tracksmith")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("tracksmith")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[download]
output_dir = "/music/incoming"
quality = 320
update_tags = false
concatenate = true
randomize = false

[library]
extensions = ["mp3", "flac"]
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKSMITH_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TRACKSMITH__DOWNLOAD__QUALITY");

    let s = Settings::load().unwrap();
    assert_eq!(s.download.output_dir, "/music/incoming");
    assert_eq!(s.download.quality, 320);
    assert!(!s.download.update_tags);
    assert!(s.download.concatenate);
    assert!(!s.download.randomize);
    assert_eq!(
        s.library.extensions,
        vec!["mp3".to_string(), "flac".to_string()]
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[download]
quality = 192
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKSMITH_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TRACKSMITH__DOWNLOAD__QUALITY", "128");

    let s = Settings::load().unwrap();
    assert_eq!(s.download.quality, 128);
}

#[test]
fn validate_rejects_unknown_quality() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());
    s.download.quality = 200;
    assert!(s.validate().is_err());
}
