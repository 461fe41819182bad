//! Integration tests for live scheme loading.
//!
//! Every test injects a mock OS and probe, so nothing is spawned and the
//! results do not depend on the machine running them.

use syscolour::probe::{MockOs, MockProbe};
use syscolour::{BundledSchemes, Colour, SystemLoader, Variant};

fn mac_loader(probe: MockProbe) -> SystemLoader<MockOs, MockProbe> {
    SystemLoader::new(MockOs::macos("10.15.7"), probe)
}

// ============================================================================
// Supported systems
// ============================================================================

#[test]
fn unresolved_flag_is_taken_from_interface_style() {
    let loader = mac_loader(
        MockProbe::new()
            .with_scheme(r#"{"labelColor":"rgba(0,0,0,255)","_isDarkTheme":null}"#)
            .with_interface_style("Dark\n"),
    );

    let scheme = loader.load().unwrap();
    assert_eq!(scheme.label_color, Some(Colour::rgba(0, 0, 0, 255)));
    assert!(scheme.is_dark_theme());
    assert_eq!(loader.probe().scheme_calls(), 1);
    assert_eq!(loader.probe().style_calls(), 1);
}

#[test]
fn missing_flag_with_light_style_is_light() {
    let loader = mac_loader(
        MockProbe::new()
            .with_scheme(r#"{"textColor":"rgba(0,0,0,255)"}"#)
            .with_interface_style("Light"),
    );
    let scheme = loader.load().unwrap();
    assert_eq!(scheme.dark_theme_flag(), Some(false));
}

#[test]
fn failed_style_query_means_light() {
    // no interface style configured: the mock reports no response
    let loader = mac_loader(MockProbe::new().with_scheme(r#"{"_isDarkTheme":null}"#));
    let scheme = loader.load().unwrap();
    assert_eq!(scheme.dark_theme_flag(), Some(false));
    assert_eq!(loader.probe().style_calls(), 1);
}

#[test]
fn reported_flag_skips_style_query() {
    let loader = mac_loader(
        MockProbe::new()
            .with_scheme(r#"{"_isDarkTheme":true}"#)
            .with_interface_style("Light"),
    );
    let scheme = loader.load().unwrap();
    assert!(scheme.is_dark_theme());
    assert_eq!(loader.probe().style_calls(), 0);
}

#[test]
fn unprefixed_dark_key_is_ignored() {
    let loader = mac_loader(
        MockProbe::new()
            .with_scheme(
                r#"{"labelColor":"rgba(0,0,0,255)","_isDarkTheme":false,"isDarkTheme":true}"#,
            )
            .with_interface_style("Dark"),
    );
    let scheme = loader.load().unwrap();
    assert_eq!(scheme.dark_theme_flag(), Some(false));
    assert_eq!(loader.probe().style_calls(), 0);
}

#[test]
fn fractional_control_tint_is_accepted() {
    let loader = mac_loader(
        MockProbe::new().with_scheme(r#"{"_isDarkTheme":true,"currentControlTint":1.0}"#),
    );
    assert_eq!(loader.load().unwrap().current_control_tint, Some(1));
}

#[test]
fn nil_colours_stay_absent() {
    let loader = mac_loader(MockProbe::new().with_scheme(
        r#"{"_isDarkTheme":false,"linkColor":"nil","systemRed":"rgba(255,59,48,255)"}"#,
    ));
    let scheme = loader.load().unwrap();
    assert_eq!(scheme.link_color, None);
    assert_eq!(scheme.system_red, Some(Colour::rgb(255, 59, 48)));
}

#[test]
fn newer_major_release_is_supported() {
    let loader = SystemLoader::new(
        MockOs::macos("14.2.1"),
        MockProbe::new().with_scheme(r#"{"_isDarkTheme":false}"#),
    );
    assert!(loader.load().is_some());
}

// ============================================================================
// Unavailable
// ============================================================================

#[test]
fn old_release_never_runs_helper() {
    let loader = SystemLoader::new(
        MockOs::macos("10.13.6"),
        MockProbe::new().with_scheme(r#"{"_isDarkTheme":true}"#),
    );
    assert!(loader.load().is_none());
    assert_eq!(loader.probe().scheme_calls(), 0);
    assert_eq!(loader.probe().style_calls(), 0);
}

#[test]
fn other_os_is_unavailable() {
    let loader = SystemLoader::new(
        MockOs::new("linux", Some("6.8.0")),
        MockProbe::new().with_scheme(r#"{"_isDarkTheme":true}"#),
    );
    assert!(loader.load().is_none());
    assert_eq!(loader.probe().scheme_calls(), 0);
}

#[test]
fn malformed_output_is_unavailable() {
    let loader = mac_loader(MockProbe::new().with_scheme("not json at all"));
    assert!(loader.load().is_none());
    assert_eq!(loader.probe().scheme_calls(), 1);
}

#[test]
fn truncated_output_is_unavailable() {
    // what a helper killed mid-write leaves behind
    let loader = mac_loader(MockProbe::new().with_scheme(r#"{"labelColor":"rgba(0,0"#));
    assert!(loader.load().is_none());
}

#[test]
fn helper_failure_is_unavailable() {
    let loader = mac_loader(MockProbe::new());
    assert!(loader.load().is_none());
}

// ============================================================================
// Bundled fallback
// ============================================================================

#[test]
fn fallback_uses_bundled_variant() {
    let bundled = BundledSchemes::embedded();
    let loader = SystemLoader::new(MockOs::new("linux", None), MockProbe::new());

    let dark = loader.load_or(&bundled, || Variant::Dark).unwrap();
    assert_eq!(&dark, bundled.dark().unwrap());

    let light = loader.load_or(&bundled, || Variant::Light).unwrap();
    assert_eq!(&light, bundled.light().unwrap());
}

#[test]
fn live_scheme_wins_over_fallback() {
    let bundled = BundledSchemes::embedded();
    let loader = mac_loader(
        MockProbe::new().with_scheme(r#"{"_isDarkTheme":true,"labelColor":"rgba(1,2,3,4)"}"#),
    );

    let scheme = loader
        .load_or(&bundled, || panic!("fallback must not be consulted"))
        .unwrap();
    assert_eq!(scheme.label_color, Some(Colour::rgba(1, 2, 3, 4)));
}
