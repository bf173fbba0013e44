use std::path::{Path, PathBuf};

use crate::classify::{
    Classification, absolutize, classify, extension_of, is_absolute_path, normalize_lexically,
};
use crate::options::{DynimportOptions, PluginConfig};

fn config(extensions: Option<&[&str]>, change_relative_to_absolute: bool) -> PluginConfig {
    PluginConfig::from_options(&DynimportOptions {
        transform_extensions: extensions
            .map(|list| list.iter().map(|ext| ext.to_string()).collect()),
        change_relative_to_absolute,
        ..DynimportOptions::default()
    })
    .unwrap()
}

#[test]
fn json_destination_is_always_absolutized() {
    let got = classify(
        "./config.json",
        Path::new("/app/src"),
        &config(Some(&[]), false),
    );
    assert_eq!(
        got,
        Classification::RewriteAbsolute {
            absolute: "/app/src/config.json".to_string()
        }
    );
}

#[test]
fn interpolated_json_is_still_absolutized_not_globbed() {
    let got = classify(
        "./locales/${lang}.json",
        Path::new("/app/src"),
        &config(Some(&[".json"]), false),
    );
    assert_eq!(
        got,
        Classification::RewriteAbsolute {
            absolute: "/app/src/locales/${lang}.json".to_string()
        }
    );
}

#[test]
fn absolutizing_an_absolute_json_path_is_a_fixed_point() {
    let got = classify(
        "/app/src/config.json",
        Path::new("/elsewhere"),
        &config(Some(&[]), false),
    );
    assert_eq!(
        got,
        Classification::RewriteAbsolute {
            absolute: "/app/src/config.json".to_string()
        }
    );
}

#[test]
fn relative_js_is_absolutized_when_enabled() {
    let got = classify("./foo.js", Path::new("/a/b"), &config(None, true));
    assert_eq!(
        got,
        Classification::RewriteAbsolute {
            absolute: "/a/b/foo.js".to_string()
        }
    );
}

#[test]
fn absolute_js_is_left_alone_even_when_enabled() {
    let got = classify("/a/b/foo.js", Path::new("/a/b"), &config(None, true));
    assert_eq!(got, Classification::Keep);
}

#[test]
fn relative_js_is_kept_when_disabled_and_unmatched() {
    let got = classify("./foo.js", Path::new("/a/b"), &config(Some(&[".css"]), false));
    assert_eq!(got, Classification::Keep);
}

#[test]
fn interpolated_js_matching_an_extension_is_glob_transformed() {
    let got = classify(
        "./mod-${x}.js",
        Path::new("/a/b"),
        &config(Some(&[".js"]), false),
    );
    assert_eq!(got, Classification::GlobTransform);
}

#[test]
fn matching_extension_without_interpolation_is_kept() {
    let got = classify(
        "./mod-plain.js",
        Path::new("/a/b"),
        &config(Some(&[".js"]), false),
    );
    assert_eq!(got, Classification::Keep);
}

#[test]
fn relative_to_absolute_wins_over_glob_for_relative_js() {
    let got = classify(
        "./mod-${x}.js",
        Path::new("/a/b"),
        &config(Some(&[".js"]), true),
    );
    assert_eq!(
        got,
        Classification::RewriteAbsolute {
            absolute: "/a/b/mod-${x}.js".to_string()
        }
    );
}

#[test]
fn non_matching_extension_is_kept() {
    let got = classify(
        "./widget-${x}.css",
        Path::new("/a/b"),
        &config(Some(&[".js"]), false),
    );
    assert_eq!(got, Classification::Keep);
}

#[test]
fn custom_extensions_participate_in_glob_transforms() {
    let got = classify(
        "./widget-${x}.css",
        Path::new("/a/b"),
        &config(Some(&[".css"]), false),
    );
    assert_eq!(got, Classification::GlobTransform);
}

#[test]
fn destination_without_an_extension_is_kept() {
    let got = classify(
        "./pages/${name}",
        Path::new("/a/b"),
        &config(Some(&[".js"]), true),
    );
    assert_eq!(got, Classification::Keep);
}

#[test]
fn extension_of_reads_the_final_component() {
    assert_eq!(extension_of("./a.js"), Some(".js".to_string()));
    assert_eq!(extension_of("./mod-${x}.js"), Some(".js".to_string()));
    assert_eq!(extension_of("./a.test.json"), Some(".json".to_string()));
    assert_eq!(extension_of("noext"), None);
    assert_eq!(extension_of("a.dir/noext"), None);
}

#[test]
fn absolute_detection_is_prefix_based() {
    assert!(is_absolute_path("/x/y.js"));
    assert!(!is_absolute_path("./x/y.js"));
    assert!(!is_absolute_path("x/y.js"));
}

#[test]
fn absolutize_folds_dot_segments() {
    assert_eq!(
        absolutize("../shared/util.js", Path::new("/app/src/pages")),
        "/app/shared/util.js"
    );
    assert_eq!(
        absolutize("./x/../y.js", Path::new("/a/b")),
        "/a/b/y.js"
    );
}

#[test]
fn normalize_lexically_keeps_leading_parent_components() {
    assert_eq!(
        normalize_lexically(Path::new("../../x")),
        PathBuf::from("../../x")
    );
    assert_eq!(
        normalize_lexically(Path::new("a/../../b")),
        PathBuf::from("../b")
    );
    assert_eq!(
        normalize_lexically(Path::new("/a/b/../c/./d")),
        PathBuf::from("/a/c/d")
    );
}
