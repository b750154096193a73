//! Behavioural tests for `BoundaryResolver` source chains.

use mapstory_core::test_support::{ScriptedFetcher, named_dataset};
use mapstory_core::{AdminLevel, BoundaryResolver, Resolution};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[fixture]
fn fetcher() -> RefCell<ScriptedFetcher> {
    RefCell::new(ScriptedFetcher::new())
}

#[fixture]
fn resolution() -> RefCell<Option<Resolution>> {
    RefCell::new(None)
}

fn script(
    fetcher: &RefCell<ScriptedFetcher>,
    update: impl FnOnce(ScriptedFetcher) -> ScriptedFetcher,
) {
    let current = std::mem::take(&mut *fetcher.borrow_mut());
    *fetcher.borrow_mut() = update(current);
}

fn split(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).collect()
}

fn provenance_of(resolution: &RefCell<Option<Resolution>>, level: AdminLevel) -> Option<String> {
    resolution
        .borrow()
        .as_ref()
        .expect("resolution should have run")
        .get(level)
        .map(|boundary| boundary.provenance().tag().to_owned())
}

#[given("source \"{id}\" serves the regions \"{names}\"")]
fn given_regions(id: String, names: String, #[from(fetcher)] fetcher: &RefCell<ScriptedFetcher>) {
    script(fetcher, |f| f.with_dataset(&id, named_dataset(&split(&names))));
}

#[given("source \"{id}\" answers with status {status}")]
fn given_status(id: String, status: u16, #[from(fetcher)] fetcher: &RefCell<ScriptedFetcher>) {
    script(fetcher, |f| f.with_status(&id, status));
}

#[given("source \"{id}\" times out")]
fn given_timeout(id: String, #[from(fetcher)] fetcher: &RefCell<ScriptedFetcher>) {
    script(fetcher, |f| f.with_timeout(&id));
}

#[given("source \"{id}\" serves a malformed payload")]
fn given_malformed(id: String, #[from(fetcher)] fetcher: &RefCell<ScriptedFetcher>) {
    script(fetcher, |f| f.with_malformed(&id));
}

#[when("the boundaries are resolved")]
fn when_resolved(
    #[from(fetcher)] fetcher: &RefCell<ScriptedFetcher>,
    #[from(resolution)] resolution: &RefCell<Option<Resolution>>,
) {
    let scripted = fetcher.borrow();
    *resolution.borrow_mut() = Some(BoundaryResolver::new(&*scripted).resolve());
}

#[then("the country comes from \"{tag}\"")]
fn then_country(tag: String, #[from(resolution)] resolution: &RefCell<Option<Resolution>>) {
    assert_eq!(provenance_of(resolution, AdminLevel::Country), Some(tag));
}

#[then("the province comes from \"{tag}\"")]
fn then_province(tag: String, #[from(resolution)] resolution: &RefCell<Option<Resolution>>) {
    assert_eq!(provenance_of(resolution, AdminLevel::Province), Some(tag));
}

#[then("the municipality comes from \"{tag}\"")]
fn then_municipality(tag: String, #[from(resolution)] resolution: &RefCell<Option<Resolution>>) {
    assert_eq!(provenance_of(resolution, AdminLevel::Municipality), Some(tag));
}

#[then("the province is labelled \"{label}\"")]
fn then_province_label(label: String, #[from(resolution)] resolution: &RefCell<Option<Resolution>>) {
    let borrow = resolution.borrow();
    let province = borrow
        .as_ref()
        .and_then(Resolution::province)
        .expect("province should be resolved");
    assert_eq!(province.label(), label);
}

#[then("no municipality was resolved")]
fn then_no_municipality(#[from(resolution)] resolution: &RefCell<Option<Resolution>>) {
    assert_eq!(provenance_of(resolution, AdminLevel::Municipality), None);
}

#[then("every level is drawn from the static fallback")]
fn then_all_fallback(#[from(resolution)] resolution: &RefCell<Option<Resolution>>) {
    let borrow = resolution.borrow();
    let outcome = borrow.as_ref().expect("resolution should have run");
    assert_eq!(outcome.boundaries().count(), 3);
    assert!(
        outcome
            .boundaries()
            .all(|boundary| boundary.provenance().is_fallback() && !boundary.is_complete())
    );
}

#[then("the static fallback was used")]
fn then_fallback_used(#[from(resolution)] resolution: &RefCell<Option<Resolution>>) {
    let borrow = resolution.borrow();
    assert!(borrow.as_ref().is_some_and(|r| r.diagnostics().fallback_used));
}

#[then("the static fallback was not used")]
fn then_fallback_unused(#[from(resolution)] resolution: &RefCell<Option<Resolution>>) {
    let borrow = resolution.borrow();
    assert!(borrow.as_ref().is_some_and(|r| !r.diagnostics().fallback_used));
}

#[then("the sources were fetched in the order \"{ids}\"")]
fn then_fetch_order(ids: String, #[from(fetcher)] fetcher: &RefCell<ScriptedFetcher>) {
    assert_eq!(fetcher.borrow().calls(), split(&ids));
}

#[scenario(path = "tests/features/resolution.feature", index = 0)]
fn primary_sources_satisfy_every_level(
    fetcher: RefCell<ScriptedFetcher>,
    resolution: RefCell<Option<Resolution>>,
) {
    let _ = (fetcher, resolution);
}

#[scenario(path = "tests/features/resolution.feature", index = 1)]
fn failing_primary_sources_escalate(
    fetcher: RefCell<ScriptedFetcher>,
    resolution: RefCell<Option<Resolution>>,
) {
    let _ = (fetcher, resolution);
}

#[scenario(path = "tests/features/resolution.feature", index = 2)]
fn every_country_source_fails(
    fetcher: RefCell<ScriptedFetcher>,
    resolution: RefCell<Option<Resolution>>,
) {
    let _ = (fetcher, resolution);
}

#[scenario(path = "tests/features/resolution.feature", index = 3)]
fn missing_province_uses_district_proxy(
    fetcher: RefCell<ScriptedFetcher>,
    resolution: RefCell<Option<Resolution>>,
) {
    let _ = (fetcher, resolution);
}
