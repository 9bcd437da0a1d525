//! Tests for settings resolution.

use super::*;
use crate::dirs::MockBaseDirs;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use tempfile::TempDir;

struct TempHome {
    _temp: TempDir,
    home: Utf8PathBuf,
}

impl TempHome {
    fn dirs(&self) -> MockBaseDirs {
        let home = self.home.clone().into_std_path_buf();
        let mut dirs = MockBaseDirs::new();
        dirs.expect_home_dir().returning(move || Some(home.clone()));
        dirs
    }

    fn write_config(&self, root: &Utf8Path, contents: &str) {
        std::fs::create_dir_all(root).expect("create root");
        std::fs::write(root.join(CONFIG_FILE), contents).expect("write config");
    }
}

#[fixture]
fn temp_home() -> TempHome {
    let temp = tempfile::tempdir().expect("create temp dir");
    let home = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("UTF-8 temp dir");
    TempHome { _temp: temp, home }
}

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[rstest]
fn defaults_to_dot_govm_under_home(temp_home: TempHome) {
    let settings =
        Settings::load_with(None, &temp_home.dirs(), env_of(&[])).expect("settings load");

    assert_eq!(settings.root, temp_home.home.join(".govm"));
    assert_eq!(settings.registry, DEFAULT_REGISTRY);
    assert_eq!(settings.tags_url, DEFAULT_TAGS_URL);
    assert_eq!(settings.self_tags_url, DEFAULT_SELF_TAGS_URL);
    assert_eq!(settings.self_download_url, DEFAULT_SELF_DOWNLOAD_URL);
}

#[rstest]
fn root_flag_beats_environment(temp_home: TempHome) {
    let flag = temp_home.home.join("flag-root");
    let env = env_of(&[(HOME_ENV, "/somewhere/else")]);

    let settings = Settings::load_with(Some(&flag), &temp_home.dirs(), env).expect("settings load");

    assert_eq!(settings.root, flag);
}

#[rstest]
fn govm_home_overrides_home_directory(temp_home: TempHome) {
    let custom = temp_home.home.join("custom");
    let env = env_of(&[(HOME_ENV, custom.as_str())]);

    let settings = Settings::load_with(None, &temp_home.dirs(), env).expect("settings load");

    assert_eq!(settings.root, custom);
}

#[rstest]
fn registry_environment_beats_config_file(temp_home: TempHome) {
    let root = temp_home.home.join(".govm");
    temp_home.write_config(&root, "registry = \"https://mirror.test/go\"\n");
    let env = env_of(&[(REGISTRY_ENV, "https://env.test/dl")]);

    let settings = Settings::load_with(None, &temp_home.dirs(), env).expect("settings load");

    assert_eq!(settings.registry, "https://env.test/dl/");
}

#[rstest]
fn config_file_supplies_urls(temp_home: TempHome) {
    let root = temp_home.home.join(".govm");
    temp_home.write_config(
        &root,
        concat!(
            "registry = \"https://mirror.test/go/\"\n",
            "tags_url = \"https://mirror.test/tags.json\"\n",
            "self_download_url = \"https://mirror.test/govm\"\n",
        ),
    );

    let settings =
        Settings::load_with(None, &temp_home.dirs(), env_of(&[])).expect("settings load");

    assert_eq!(settings.registry, "https://mirror.test/go/");
    assert_eq!(settings.tags_url, "https://mirror.test/tags.json");
    assert_eq!(settings.self_download_url, "https://mirror.test/govm/");
    assert_eq!(settings.self_tags_url, DEFAULT_SELF_TAGS_URL);
}

#[rstest]
fn blank_values_are_ignored(temp_home: TempHome) {
    let root = temp_home.home.join(".govm");
    temp_home.write_config(&root, "registry = \"  \"\n");
    let env = env_of(&[(REGISTRY_ENV, ""), (HOME_ENV, " ")]);

    let settings = Settings::load_with(None, &temp_home.dirs(), env).expect("settings load");

    assert_eq!(settings.root, root);
    assert_eq!(settings.registry, DEFAULT_REGISTRY);
}

#[rstest]
#[case::unknown_key("mirror = \"https://mirror.test\"\n")]
#[case::bad_syntax("registry = \n")]
fn malformed_config_is_fatal(temp_home: TempHome, #[case] contents: &str) {
    let root = temp_home.home.join(".govm");
    temp_home.write_config(&root, contents);

    let err = Settings::load_with(None, &temp_home.dirs(), env_of(&[])).expect_err("bad config");

    assert!(matches!(err, GovmError::InvalidConfig { .. }), "got {err:?}");
}

#[test]
fn missing_home_directory_is_reported() {
    let mut dirs = MockBaseDirs::new();
    dirs.expect_home_dir().returning(|| None);

    let err = Settings::load_with(None, &dirs, env_of(&[])).expect_err("no home");

    assert!(matches!(err, GovmError::HomeDirectory));
}

#[rstest]
fn load_reads_process_environment(temp_home: TempHome) {
    let custom = temp_home.home.join("from-env");
    temp_env::with_vars(
        [
            (HOME_ENV, Some(custom.as_str())),
            (REGISTRY_ENV, Some("https://proc.test/dl")),
        ],
        || {
            let settings = Settings::load(None, &temp_home.dirs()).expect("settings load");
            assert_eq!(settings.root, custom);
            assert_eq!(settings.registry, "https://proc.test/dl/");
        },
    );
}

#[rstest]
fn load_ignores_unset_variables(temp_home: TempHome) {
    temp_env::with_vars_unset([HOME_ENV, REGISTRY_ENV], || {
        let settings = Settings::load(None, &temp_home.dirs()).expect("settings load");
        assert_eq!(settings.root, temp_home.home.join(".govm"));
        assert_eq!(settings.registry, DEFAULT_REGISTRY);
    });
}
