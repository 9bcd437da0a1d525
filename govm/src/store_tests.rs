//! Tests for the install-root layout.

use crate::test_utils::TempStore;
use rstest::{fixture, rstest};

#[fixture]
fn temp() -> TempStore {
    TempStore::new()
}

#[rstest]
fn layout_paths_hang_off_the_root(temp: TempStore) {
    let store = &temp.store;
    let root = store.root();
    assert_eq!(store.version_dir("1.16.1"), root.join("versions/1.16.1"));
    assert_eq!(store.version_goroot("1.16.1"), root.join("versions/1.16.1/go"));
    assert_eq!(store.current_bin(), root.join("current/bin"));
    assert_eq!(store.current_go(), root.join("current/go"));
    assert_eq!(store.downloads_dir(), root.join("downloads"));
}

#[rstest]
fn exists_requires_the_go_subdirectory(temp: TempStore) {
    temp.store.ensure_dirs("1.16.1").expect("create dirs");
    assert!(!temp.store.exists("1.16.1"));

    temp.fake_install("1.16.1");
    assert!(temp.store.exists("1.16.1"));
}

#[rstest]
fn ensure_dirs_is_idempotent(temp: TempStore) {
    temp.store.ensure_dirs("1.17").expect("first call");
    temp.store.ensure_dirs("1.17").expect("second call");

    assert!(temp.store.current_dir().is_dir());
    assert!(temp.store.version_dir("1.17").is_dir());
    assert!(temp.store.downloads_dir().is_dir());
}

#[rstest]
fn installed_versions_lists_unpacked_versions_only(temp: TempStore) {
    temp.fake_install("1.17");
    temp.fake_install("1.16.1");
    temp.store.ensure_dirs("1.18rc1").expect("half-created version");

    let versions = temp.store.installed_versions().expect("list versions");

    assert_eq!(versions, ["1.16.1", "1.17"]);
}

#[rstest]
fn installed_versions_is_empty_before_first_install(temp: TempStore) {
    assert!(temp.store.installed_versions().expect("list versions").is_empty());
}

#[rstest]
fn remove_version_deletes_the_tree(temp: TempStore) {
    temp.fake_install("1.16.1");

    temp.store.remove_version("1.16.1").expect("remove");

    assert!(!temp.store.version_dir("1.16.1").exists());
    temp.store.remove_version("1.16.1").expect("removing twice is fine");
}

#[rstest]
fn clean_downloads_removes_scratch_files(temp: TempStore) {
    temp.store.ensure_dirs("1.17").expect("create dirs");
    let archive = temp.store.downloads_dir().join("go1.17.linux-amd64.tar.gz");
    std::fs::write(&archive, b"partial").expect("write archive");

    temp.store.clean_downloads().expect("clean");

    assert!(!archive.exists());
}

#[rstest]
fn no_current_version_without_links(temp: TempStore) {
    temp.fake_install("1.17");
    assert_eq!(temp.store.current_version(), None);
}

#[cfg(unix)]
mod links {
    use super::*;

    #[rstest]
    fn relink_points_both_links_at_the_version(temp: TempStore) {
        temp.fake_install("1.16.1");

        temp.store.relink("1.16.1").expect("relink");

        assert_eq!(temp.store.current_version().as_deref(), Some("1.16.1"));
        let goroot = std::fs::read_link(temp.store.current_go()).expect("go link");
        assert_eq!(goroot, temp.store.version_goroot("1.16.1").as_std_path());
        assert!(temp.store.current_bin().join("go").is_file());
    }

    #[rstest]
    fn relink_replaces_an_existing_link(temp: TempStore) {
        temp.fake_install("1.16.1");
        temp.fake_install("1.17");
        temp.store.relink("1.16.1").expect("first relink");

        temp.store.relink("1.17").expect("second relink");

        assert_eq!(temp.store.current_version().as_deref(), Some("1.17"));
        let leftovers: Vec<_> = temp
            .store
            .current_dir()
            .read_dir_utf8()
            .expect("read current dir")
            .map(|entry| entry.expect("entry").file_name().to_owned())
            .filter(|name| name.starts_with('.'))
            .collect();
        assert!(leftovers.is_empty(), "staging links left behind: {leftovers:?}");
    }

    #[rstest]
    fn relink_replaces_a_plain_directory(temp: TempStore) {
        temp.fake_install("1.17");
        std::fs::create_dir_all(temp.store.current_bin()).expect("stray dir");

        temp.store.relink("1.17").expect("relink");

        assert_eq!(temp.store.current_version().as_deref(), Some("1.17"));
    }

    #[rstest]
    fn dangling_link_reports_no_version(temp: TempStore) {
        temp.fake_install("1.17");
        temp.store.relink("1.17").expect("relink");
        temp.store.remove_version("1.17").expect("remove");

        assert_eq!(temp.store.current_version(), None);
    }

    #[rstest]
    fn link_outside_versions_reports_no_version(temp: TempStore) {
        let elsewhere = temp.store.root().join("elsewhere/bin");
        std::fs::create_dir_all(&elsewhere).expect("create target");
        std::fs::create_dir_all(temp.store.current_dir()).expect("create current");
        std::os::unix::fs::symlink(&elsewhere, temp.store.current_bin()).expect("symlink");

        assert_eq!(temp.store.current_version(), None);
    }
}
