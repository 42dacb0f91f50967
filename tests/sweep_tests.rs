mod common;

use std::path::PathBuf;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use common::{DAY, exts, file_aged, set_age};
use predicates::prelude::*;
use proptest::prelude::*;
use sysclean::sweep::{
    CleanupResult, ExclusionSet, delete_candidates, matches_extension, prune_empty_dirs,
    select_candidates,
};

#[test]
fn test_selection_scenario_age_and_extension() {
    let dir = TempDir::new().unwrap();
    file_aged(&dir, "t/a.tmp", "a", 10);
    file_aged(&dir, "t/b.tmp", "b", 1);
    file_aged(&dir, "t/c.txt", "c", 10);

    let root = dir.child("t");
    let selected = select_candidates(
        &[root.to_path_buf()],
        DAY * 7,
        &exts(&[".tmp"]),
        &ExclusionSet::new(),
    );

    let paths: Vec<PathBuf> = selected.into_iter().map(|c| c.path).collect();
    assert_eq!(paths, vec![root.child("a.tmp").to_path_buf()]);
}

#[test]
fn test_selection_scenario_excluded_subdirectory() {
    let dir = TempDir::new().unwrap();
    file_aged(&dir, "t/sub/old.tmp", "old", 30);

    let root = dir.child("t");
    let exclusions: ExclusionSet = [root.child("sub").to_path_buf()].into_iter().collect();
    let selected = select_candidates(&[root.to_path_buf()], DAY * 7, &exts(&[".tmp"]), &exclusions);

    assert!(selected.is_empty());
}

#[test]
fn test_full_pass_on_tree() {
    let dir = TempDir::new().unwrap();
    file_aged(&dir, "cache/a/b/stale.cache", "0123456789", 20);
    file_aged(&dir, "cache/a/fresh.cache", "fresh", 0);
    file_aged(&dir, "cache/c/stale.cache", "01234", 20);
    dir.child("cache/d/e").create_dir_all().unwrap();

    let roots = vec![dir.child("cache").to_path_buf()];
    let selected = select_candidates(&roots, DAY * 7, &exts(&[".cache"]), &ExclusionSet::new());
    assert_eq!(selected.len(), 2);

    let result = delete_candidates(&selected, false);
    assert_eq!(
        result,
        CleanupResult {
            files_deleted: 2,
            bytes_freed: 15,
        }
    );

    // a/b, c, d/e, d become empty; a still holds fresh.cache
    let removed = prune_empty_dirs(&roots, &ExclusionSet::new(), false);
    assert_eq!(removed, 4);

    dir.child("cache").assert(predicate::path::is_dir());
    dir.child("cache/a/fresh.cache").assert("fresh");
    dir.child("cache/a/b").assert(predicate::path::missing());
    dir.child("cache/c").assert(predicate::path::missing());
    dir.child("cache/d").assert(predicate::path::missing());
}

#[test]
fn test_dry_run_pass_leaves_tree_untouched() {
    let dir = TempDir::new().unwrap();
    file_aged(&dir, "tmp/x.swp", "swap contents", 9);
    file_aged(&dir, "tmp/y/z.bak", "backup", 9);
    dir.child("tmp/empty").create_dir_all().unwrap();

    let roots = vec![dir.child("tmp").to_path_buf()];
    let selected = select_candidates(
        &roots,
        DAY * 7,
        &exts(&[".swp", ".bak"]),
        &ExclusionSet::new(),
    );
    assert_eq!(selected.len(), 2);

    assert_eq!(delete_candidates(&selected, true), CleanupResult::default());
    assert_eq!(prune_empty_dirs(&roots, &ExclusionSet::new(), true), 0);

    dir.child("tmp/x.swp").assert("swap contents");
    dir.child("tmp/y/z.bak").assert("backup");
    dir.child("tmp/empty").assert(predicate::path::is_dir());
}

#[test]
fn test_age_boundary_is_exclusive() {
    let dir = TempDir::new().unwrap();
    dir.child("edge.old").touch().unwrap();
    // Slightly younger than the threshold
    let mtime = std::time::SystemTime::now() - DAY * 7 + std::time::Duration::from_secs(60);
    filetime::set_file_mtime(
        dir.child("edge.old").path(),
        filetime::FileTime::from_system_time(mtime),
    )
    .unwrap();

    let selected = select_candidates(
        &[dir.path().to_path_buf()],
        DAY * 7,
        &exts(&[".old"]),
        &ExclusionSet::new(),
    );
    assert!(selected.is_empty());

    set_age(dir.child("edge.old").path(), 8);
    let selected = select_candidates(
        &[dir.path().to_path_buf()],
        DAY * 7,
        &exts(&[".old"]),
        &ExclusionSet::new(),
    );
    assert_eq!(selected.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_delete_failure_does_not_abort_batch() {
    use std::os::unix::fs::PermissionsExt;

    // Root ignores directory permissions, so the failure cannot be provoked
    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let dir = TempDir::new().unwrap();
    file_aged(&dir, "a/locked.tmp", "locked", 30);
    file_aged(&dir, "b/free.tmp", "free", 30);

    let selected = select_candidates(
        &[dir.path().to_path_buf()],
        DAY,
        &exts(&[".tmp"]),
        &ExclusionSet::new(),
    );
    assert_eq!(selected.len(), 2);

    let locked_dir = dir.child("a");
    std::fs::set_permissions(locked_dir.path(), std::fs::Permissions::from_mode(0o555)).unwrap();

    let result = delete_candidates(&selected, false);

    std::fs::set_permissions(locked_dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(result.files_deleted, 1);
    assert_eq!(result.bytes_freed, 4);
    dir.child("a/locked.tmp").assert("locked");
    dir.child("b/free.tmp").assert(predicate::path::missing());
}

proptest! {
    #[test]
    fn prop_empty_extension_list_matches_everything(name in "[a-zA-Z0-9_.-]{1,24}") {
        prop_assert!(matches_extension(&PathBuf::from("/scratch").join(&name), &[]));
    }

    #[test]
    fn prop_suffix_always_matches(stem in "[a-z]{1,12}", ext in "\\.[a-z0-9]{1,5}") {
        let path = PathBuf::from(format!("/scratch/{stem}{ext}"));
        prop_assert!(matches_extension(&path, std::slice::from_ref(&ext)));
    }

    #[test]
    fn prop_selection_respects_age(
        ages in proptest::collection::vec((0u64..30).prop_filter("boundary", |a| *a != 7), 1..8)
    ) {
        let dir = TempDir::new().unwrap();
        for (i, age) in ages.iter().enumerate() {
            file_aged(&dir, &format!("f{i}.tmp"), "x", *age);
        }

        let selected = select_candidates(
            &[dir.path().to_path_buf()],
            DAY * 7,
            &exts(&[".tmp"]),
            &ExclusionSet::new(),
        );

        let expected = ages.iter().filter(|age| **age > 7).count();
        prop_assert_eq!(selected.len(), expected);
    }
}
