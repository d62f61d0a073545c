//! View-load lifecycle integration tests
//!
//! Drives the core state machines through whole navigation scenarios the way
//! the browser glue does: acquire the indicator, arm the safety deadline,
//! settle the load, release, tick the clock forward. No browser required.

use rumbo_router::indicator::HIDE_GRACE_MS;
use rumbo_router::{
    error_markup, HeroConfig, HeroEngine, IndicatorPhase, IndicatorState, LoadTracker, RouteError,
    RouteTable, ViewKey, SAFETY_HIDE_MS,
};

/// A successful load releases its acquire, disarms the deadline, and the
/// overlay is fully hidden within the grace period.
#[test]
fn test_successful_load_hides_indicator() {
    let mut indicator = IndicatorState::new();
    let mut loads = LoadTracker::new();

    let generation = loads.begin();
    indicator.acquire();
    indicator.arm_safety(0.0);

    // Fetch + parse + inject happen here; the load settles at t = 850
    assert!(loads.is_current(generation));
    indicator.disarm_safety();
    indicator.release(850.0);

    assert_eq!(
        indicator.tick(850.0 + HIDE_GRACE_MS),
        Some(IndicatorPhase::Hidden)
    );

    // The redundant secondary hide 300 ms later observes nothing to do
    assert!(!indicator.force_hide(1150.0));
    assert_eq!(indicator.phase(), IndicatorPhase::Hidden);
}

/// A failed load follows the same cleanup contract and renders an inline
/// error naming the failure.
#[test]
fn test_failed_load_hides_indicator_and_renders_error() {
    let mut indicator = IndicatorState::new();
    let mut loads = LoadTracker::new();

    let generation = loads.begin();
    indicator.acquire();
    indicator.arm_safety(0.0);

    let err = RouteError::Http {
        status: 404,
        url: "servicio.html".to_string(),
    };

    assert!(loads.is_current(generation));
    let markup = error_markup(&err);
    assert!(markup.contains("HTTP 404"));

    indicator.disarm_safety();
    indicator.release(500.0);
    assert_eq!(
        indicator.tick(500.0 + HIDE_GRACE_MS),
        Some(IndicatorPhase::Hidden)
    );
}

/// A hung fetch never settles, but the safety deadline still forces the
/// overlay hidden at 6000 ms.
#[test]
fn test_hung_fetch_is_rescued_by_safety_deadline() {
    let mut indicator = IndicatorState::new();
    let mut loads = LoadTracker::new();

    let _generation = loads.begin();
    indicator.acquire();
    indicator.arm_safety(0.0);

    // No settle, no release. The periodic tick crosses the deadline.
    assert_eq!(indicator.tick(SAFETY_HIDE_MS - 500.0), None);
    assert!(indicator.is_visible());

    let phase = indicator.tick(SAFETY_HIDE_MS + 1.0).expect("forced hide");
    assert!(matches!(phase, IndicatorPhase::Hiding { .. }));
    assert_eq!(
        indicator.tick(SAFETY_HIDE_MS + 1.0 + HIDE_GRACE_MS),
        Some(IndicatorPhase::Hidden)
    );
}

/// Rapid back-to-back navigations: the first load is superseded before its
/// fetch settles, so it must not commit anything; the overlay stays up until
/// the second load settles.
#[test]
fn test_superseded_load_commits_nothing() {
    let mut indicator = IndicatorState::new();
    let mut loads = LoadTracker::new();

    let first = loads.begin();
    indicator.acquire();
    indicator.arm_safety(0.0);

    // User navigates again before the first fetch returns
    let second = loads.begin();
    indicator.acquire();

    // First fetch settles late: its generation is stale, so the glue skips
    // injection, styles, and the error block, and only releases its acquire.
    assert!(!loads.is_current(first));
    indicator.release(900.0);
    assert!(indicator.is_visible(), "newer load still holds the overlay");

    // Second load settles normally
    assert!(loads.is_current(second));
    indicator.disarm_safety();
    indicator.release(1400.0);

    assert_eq!(
        indicator.tick(1400.0 + HIDE_GRACE_MS),
        Some(IndicatorPhase::Hidden)
    );
}

/// Re-entering a view rebuilds the hero engine from scratch: the index
/// restarts at zero and exactly one autoplay decision is made per engine.
#[test]
fn test_hero_reinit_resets_engine() {
    let config = HeroConfig {
        images: vec!["banner.png".to_string(), "promo.jpg".to_string()],
        captions: None,
        autoplay_ms: Some(4000.0),
    };

    let mut engine = HeroEngine::new(config.clone());
    engine.advance();
    assert_eq!(engine.index(), 1);
    assert_eq!(config.autoplay_interval(), Some(4000.0));

    // Second view load: the glue clears the old interval and installs a
    // fresh engine before starting a new one.
    let engine = HeroEngine::new(config.clone());
    assert_eq!(engine.index(), 0);
    assert_eq!(config.autoplay_interval(), Some(4000.0));
}

/// The end-to-end routing scenario from the navigation contract: the
/// servicio fragment resolves to the servicio descriptor with its single
/// stylesheet.
#[test]
fn test_servicio_routing_scenario() {
    let table = RouteTable::standard();

    let key = ViewKey::resolve("#/servicio");
    assert_eq!(key, ViewKey::Servicio);

    let descriptor = table.get(key).expect("servicio descriptor");
    assert_eq!(descriptor.url, "servicio.html");
    assert_eq!(descriptor.css, &["estilos-servicios.css"]);

    // A nav click on a [data-view="servicio"] element produces this hash
    assert_eq!(ViewKey::resolve("#/servicio"), key);
}
