use wildcard_mask_rs::composite::{PatternList, PatternSetOptions, PatternSetOptionsError};
use wildcard_mask_rs::{CompositePattern, compile};

#[test]
fn composite_when_include_and_exclude_match_then_rejects() {
    let set = CompositePattern::new(&["/static/**"], &["/static/private/**"], Some('/'));

    assert!(!set.accepts("/static/private/x"));
    assert!(set.accepts("/static/public/x"));
    assert!(!set.accepts("/other/x"));
}

#[test]
fn composite_when_include_empty_then_accepts_everything_not_excluded() {
    let set = CompositePattern::new(&[], &["/admin/**"], Some('/'));

    assert!(set.accepts("/home"));
    assert!(!set.accepts("/admin/x"));
}

#[test]
fn composite_when_any_include_matches_then_accepts() {
    let set = CompositePattern::new(&["/a/*", "/b/*"], &[], Some('/'));

    assert!(set.accepts("/a/1"));
    assert!(set.accepts("/b/2"));
    assert!(!set.accepts("/c/3"));
    assert!(!set.accepts("/a/1/2"));
}

#[test]
fn composite_when_separator_is_dot_then_members_share_it() {
    let set = CompositePattern::new(&["com.*.Bean"], &["com.internal.*"], Some('.'));

    assert_eq!(set.include()[0], compile("com.*.Bean", Some('.')));
    assert!(set.accepts("com.app.Bean"));
    assert!(!set.accepts("com.internal.Bean"));
}

#[test]
fn composite_when_built_from_deserialized_options_then_uses_default_separator() {
    let options: PatternSetOptions = serde_json::from_str(
        r#"{ "include": ["/static/**"], "exclude": ["/static/private/**"] }"#,
    )
    .expect("options should deserialize");

    assert_eq!(options.separator, Some('/'));

    let set = CompositePattern::from_options(&options).expect("options should validate");
    assert!(set.accepts("/static/public/x"));
    assert!(!set.accepts("/static/private/x"));
}

#[test]
fn composite_when_separator_is_null_then_stars_are_unbounded() {
    let options: PatternSetOptions =
        serde_json::from_str(r#"{ "include": ["a*"], "separator": null }"#)
            .expect("options should deserialize");

    let set = CompositePattern::from_options(&options).expect("options should validate");
    assert!(set.accepts("a/b/c"));
}

#[test]
fn composite_when_built_from_builder_options_then_applies_both_lists() {
    let options = PatternSetOptions::builder()
        .include(["/api/**"])
        .exclude(vec![String::from("/api/internal/**")])
        .separator(Some('/'))
        .build()
        .expect("options should build");

    let set = CompositePattern::from_options(&options).expect("options should validate");
    assert!(set.accepts("/api/users/1"));
    assert!(!set.accepts("/api/internal/metrics"));
}

#[test]
fn composite_when_options_hold_empty_pattern_then_returns_error() {
    let options = PatternSetOptions {
        include: vec![String::new()],
        ..Default::default()
    };

    match CompositePattern::from_options(&options) {
        Err(PatternSetOptionsError::EmptyPattern { list, index }) => {
            assert_eq!(list, PatternList::Include);
            assert_eq!(index, 0);
        }
        other => panic!("expected EmptyPattern, got {other:?}"),
    }
}

#[test]
fn composite_when_shared_across_threads_then_answers_consistently() {
    let set = std::sync::Arc::new(CompositePattern::new(
        &["/static/**"],
        &["/static/private/**"],
        Some('/'),
    ));

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let set = std::sync::Arc::clone(&set);
            std::thread::spawn(move || {
                let public = format!("/static/public/{n}");
                let private = format!("/static/private/{n}");
                set.accepts(&public) && !set.accepts(&private)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("worker should not panic"));
    }
}
