//! Recursive file discovery filtered by extension token.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use globset::{Glob, GlobMatcher};
use walkdir::WalkDir;

use crate::check::{SystemPathStatus, require_folder};
use crate::spec::{
    EnumPathStyle, EnumSuffixFilter, IoFsError, ResultIoFs, SpecFindOptions, TypeFoundPath,
};
use crate::util::{absolutize_path, derive_suffix_token};

/// List every file under `root` whose extension token matches `suffix_filter`.
///
/// Walks all depths. Directories are never listed. Paths are absolute
/// (joined onto the current directory, not canonicalized) and returned in
/// walk order.
///
/// # Errors
/// - [`IoFsError::NotFound`] when `root` is not a directory.
/// - [`IoFsError::Io`] when a directory cannot be read during the walk.
pub fn find<P: AsRef<Path>>(
    root: P,
    suffix_filter: EnumSuffixFilter,
    path_style: EnumPathStyle,
) -> ResultIoFs<Vec<TypeFoundPath>> {
    let spec_find_options = SpecFindOptions {
        suffix_filter,
        path_style,
        ..SpecFindOptions::default()
    };
    find_with_options(root, &spec_find_options)
}

/// [`find`] with the extra traversal knobs of [`SpecFindOptions`].
///
/// # Errors
/// As [`find`], plus [`IoFsError::InvalidArgument`] for `depth_limit == Some(0)`
/// or an invalid `pattern_name` glob.
pub fn find_with_options<P: AsRef<Path>>(
    root: P,
    spec_find_options: &SpecFindOptions,
) -> ResultIoFs<Vec<TypeFoundPath>> {
    let path_dir_root = root.as_ref();
    require_folder(&SystemPathStatus, path_dir_root)?;

    if spec_find_options.depth_limit == Some(0) {
        return Err(IoFsError::InvalidArgument(
            "Arg `depth_limit` must be >= 1 or None.".to_string(),
        ));
    }
    let matcher_name = _compile_name_pattern(spec_find_options.pattern_name.as_deref())?;
    let set_suffixes = spec_find_options.suffix_filter.to_suffix_set();

    let path_dir_root_abs = absolutize_path(path_dir_root)?;
    let mut walker = WalkDir::new(&path_dir_root_abs)
        .min_depth(1)
        .follow_links(spec_find_options.if_follow_links);
    if let Some(n_depth) = spec_find_options.depth_limit {
        walker = walker.max_depth(n_depth);
    }
    if spec_find_options.if_sort {
        walker = walker.sort_by_file_name();
    }

    let mut l_files = Vec::new();
    for entry_res in walker {
        let entry = entry_res.map_err(io::Error::from)?;
        if !_is_file_entry(&entry) {
            continue;
        }
        if !_is_suffix_matching(entry.path(), set_suffixes.as_ref()) {
            continue;
        }
        if let Some(matcher) = &matcher_name {
            if !matcher.is_match(entry.file_name()) {
                continue;
            }
        }
        l_files.push(TypeFoundPath::from_path(
            entry.into_path(),
            spec_find_options.path_style,
        ));
    }

    tracing::debug!(
        "found {} file(s) under {}",
        l_files.len(),
        path_dir_root_abs.display()
    );
    Ok(l_files)
}

fn _compile_name_pattern(pattern: Option<&str>) -> ResultIoFs<Option<GlobMatcher>> {
    let Some(pattern) = pattern else {
        return Ok(None);
    };
    let matcher = Glob::new(pattern)
        .map_err(|e| IoFsError::InvalidArgument(format!("Invalid name pattern: {e}")))?
        .compile_matcher();
    Ok(Some(matcher))
}

/// Regular files, plus symlinks that resolve to regular files.
fn _is_file_entry(entry: &walkdir::DirEntry) -> bool {
    let cfg_file_type = entry.file_type();
    if cfg_file_type.is_file() {
        return true;
    }
    cfg_file_type.is_symlink() && entry.path().is_file()
}

fn _is_suffix_matching(path: &Path, set_suffixes: Option<&BTreeSet<String>>) -> bool {
    match set_suffixes {
        None => true,
        Some(set_suffixes) => set_suffixes.contains(&derive_suffix_token(path)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::{Path, PathBuf};

    use proptest::prelude::*;
    use tempfile::TempDir;

    use super::{find, find_with_options};
    use crate::spec::{
        EnumPathStyle, EnumSuffixFilter, IoFsError, SpecFindOptions, TypeFoundPath,
    };

    fn write_text(path: &Path, txt: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, txt).expect("write text");
    }

    fn names(l_found: &[TypeFoundPath]) -> BTreeSet<String> {
        l_found
            .iter()
            .map(|p| {
                p.as_path()
                    .file_name()
                    .expect("file name")
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[test]
    fn find_suffix_is_exact() {
        let tmp = TempDir::new().expect("tempdir");
        write_text(&tmp.path().join("a.txt"), "t");
        write_text(&tmp.path().join("a.png"), "p");
        write_text(&tmp.path().join("a.txtx"), "x");
        write_text(&tmp.path().join("b.TXT"), "u");

        let l_found = find(tmp.path(), ".txt".into(), EnumPathStyle::PathBuf).expect("find");
        assert_eq!(names(&l_found), BTreeSet::from(["a.txt".to_string()]));

        let l_found = find(tmp.path(), "txt".into(), EnumPathStyle::PathBuf).expect("find");
        assert!(l_found.is_empty());

        let l_found =
            find(tmp.path(), EnumSuffixFilter::NoFilter, EnumPathStyle::PathBuf).expect("find");
        assert_eq!(l_found.len(), 4);
    }

    #[test]
    fn find_recurses_and_skips_directories() {
        let tmp = TempDir::new().expect("tempdir");
        write_text(&tmp.path().join("root.jpg"), "r");
        write_text(&tmp.path().join("a/one.png"), "1");
        write_text(&tmp.path().join("a/b/c/two.png"), "2");
        fs::create_dir_all(tmp.path().join("dir.png")).expect("mkdir");

        let l_found = find(
            tmp.path(),
            EnumSuffixFilter::from(&[".png", ".jpg"][..]),
            EnumPathStyle::PathBuf,
        )
        .expect("find");
        assert_eq!(
            names(&l_found),
            BTreeSet::from([
                "root.jpg".to_string(),
                "one.png".to_string(),
                "two.png".to_string()
            ])
        );
        assert!(l_found.iter().all(|p| p.as_path().is_file()));

        let l_found =
            find(tmp.path(), EnumSuffixFilter::NoFilter, EnumPathStyle::PathBuf).expect("find");
        assert_eq!(l_found.len(), 3);
    }

    #[test]
    fn find_missing_root_is_not_found() {
        let err = find(
            "/does/not/exist",
            EnumSuffixFilter::NoFilter,
            EnumPathStyle::PathBuf,
        )
        .expect_err("must fail");
        assert!(matches!(err, IoFsError::NotFound(p) if p == Path::new("/does/not/exist")));
    }

    #[test]
    fn find_root_that_is_a_file_is_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        let path_file = tmp.path().join("f.txt");
        write_text(&path_file, "x");
        let err = find(&path_file, EnumSuffixFilter::NoFilter, EnumPathStyle::PathBuf)
            .expect_err("must fail");
        assert!(matches!(err, IoFsError::NotFound(_)));
    }

    #[test]
    fn find_string_style_returns_absolute_strings() {
        let tmp = TempDir::new().expect("tempdir");
        write_text(&tmp.path().join("x/y.csv"), "c");

        let l_found = find(tmp.path(), ".csv".into(), EnumPathStyle::String).expect("find");
        assert_eq!(l_found.len(), 1);
        let TypeFoundPath::Text(txt) = &l_found[0] else {
            panic!("expected string style");
        };
        assert!(Path::new(txt).is_absolute());
        assert_eq!(
            PathBuf::from(txt),
            tmp.path().join("x").join("y.csv")
        );
    }

    #[test]
    fn find_empty_suffix_set_matches_nothing() {
        let tmp = TempDir::new().expect("tempdir");
        write_text(&tmp.path().join("a.txt"), "t");
        let l_found = find(
            tmp.path(),
            EnumSuffixFilter::SuffixSet(vec![]),
            EnumPathStyle::PathBuf,
        )
        .expect("find");
        assert!(l_found.is_empty());
    }

    #[test]
    fn find_empty_suffix_token_matches_extensionless_files() {
        let tmp = TempDir::new().expect("tempdir");
        write_text(&tmp.path().join("Makefile"), "m");
        write_text(&tmp.path().join("a.rs"), "r");
        let l_found = find(tmp.path(), "".into(), EnumPathStyle::PathBuf).expect("find");
        assert_eq!(names(&l_found), BTreeSet::from(["Makefile".to_string()]));
    }

    #[test]
    fn find_with_options_applies_glob_depth_and_sort() {
        let tmp = TempDir::new().expect("tempdir");
        write_text(&tmp.path().join("img_02.png"), "2");
        write_text(&tmp.path().join("img_01.png"), "1");
        write_text(&tmp.path().join("cover.png"), "c");
        write_text(&tmp.path().join("deep/img_03.png"), "3");

        let spec_find_options = SpecFindOptions {
            suffix_filter: ".png".into(),
            pattern_name: Some("img_*".to_string()),
            depth_limit: Some(1),
            if_sort: true,
            ..SpecFindOptions::default()
        };
        let l_found = find_with_options(tmp.path(), &spec_find_options).expect("find");
        let l_names: Vec<_> = l_found
            .iter()
            .map(|p| {
                p.as_path()
                    .file_name()
                    .expect("name")
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(l_names, vec!["img_01.png", "img_02.png"]);
    }

    #[test]
    fn find_with_options_rejects_bad_arguments() {
        let tmp = TempDir::new().expect("tempdir");

        let spec_find_options = SpecFindOptions {
            depth_limit: Some(0),
            ..SpecFindOptions::default()
        };
        let err = find_with_options(tmp.path(), &spec_find_options).expect_err("depth 0");
        assert!(matches!(err, IoFsError::InvalidArgument(_)));

        let spec_find_options = SpecFindOptions {
            pattern_name: Some("[unclosed".to_string()),
            ..SpecFindOptions::default()
        };
        let err = find_with_options(tmp.path(), &spec_find_options).expect_err("bad glob");
        assert!(matches!(err, IoFsError::InvalidArgument(_)));
    }

    #[cfg(unix)]
    #[test]
    fn find_lists_symlinked_files_but_not_symlinked_dirs() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().expect("tempdir");
        let outside = TempDir::new().expect("tempdir");
        write_text(&tmp.path().join("real.txt"), "r");
        write_text(&outside.path().join("hidden.txt"), "h");
        symlink(tmp.path().join("real.txt"), tmp.path().join("alias.txt")).expect("symlink");
        symlink(outside.path(), tmp.path().join("linked_dir")).expect("symlink dir");

        let l_found = find(tmp.path(), ".txt".into(), EnumPathStyle::PathBuf).expect("find");
        assert_eq!(
            names(&l_found),
            BTreeSet::from(["real.txt".to_string(), "alias.txt".to_string()])
        );

        let spec_find_options = SpecFindOptions {
            suffix_filter: ".txt".into(),
            if_follow_links: true,
            ..SpecFindOptions::default()
        };
        let l_found = find_with_options(tmp.path(), &spec_find_options).expect("find");
        assert!(names(&l_found).contains("hidden.txt"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn find_only_returns_requested_suffix(
            l_stems in prop::collection::btree_set("[a-z]{1,8}", 1..6),
            c_ext_hit in "[a-z]{1,4}",
            c_ext_miss in "[A-Z]{1,4}",
        ) {
            let tmp = TempDir::new().expect("tempdir");
            for stem in &l_stems {
                write_text(&tmp.path().join(format!("{stem}.{c_ext_hit}")), "h");
                write_text(&tmp.path().join("sub").join(format!("{stem}.{c_ext_miss}")), "m");
            }

            let c_suffix = format!(".{c_ext_hit}");
            let l_found = find(tmp.path(), c_suffix.clone().into(), EnumPathStyle::PathBuf)
                .expect("find");
            prop_assert_eq!(l_found.len(), l_stems.len());
            for found in &l_found {
                let c_name = found.as_path().file_name().expect("name").to_string_lossy();
                prop_assert!(c_name.ends_with(&c_suffix));
            }
        }
    }
}
