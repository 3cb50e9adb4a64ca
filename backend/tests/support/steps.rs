//! Step definitions shared by the HTTP behaviour suites.

use actix_web::http::Method;
use rstest::fixture;
use rstest_bdd_macros::{given, then, when};
use serde_json::Value;

use super::api_world::ApiWorld;

#[fixture]
pub fn world() -> ApiWorld {
    ApiWorld::new()
}

#[given("a running API over fixture adapters")]
fn a_running_api_over_fixture_adapters(world: &ApiWorld) {
    world.forget_session();
}

#[given("the client is signed in")]
fn the_client_is_signed_in(world: &ApiWorld) {
    world.sign_in_as_admin();
}

#[when("the client signs in as \"{email}\" with password \"{password}\"")]
fn the_client_signs_in(world: &ApiWorld, email: String, password: String) {
    world.sign_in(&email, &password);
}

#[when("the client signs in with blank credentials")]
fn the_client_signs_in_with_blank_credentials(world: &ApiWorld) {
    world.sign_in("  ", "");
}

#[when("the client requests the current session")]
fn the_client_requests_the_current_session(world: &ApiWorld) {
    world.request(Method::GET, "/auth/session", None);
}

#[when("the client signs out")]
fn the_client_signs_out(world: &ApiWorld) {
    world.request(Method::POST, "/auth/sign-out", None);
}

#[when("the client lists \"{path}\"")]
fn the_client_lists(world: &ApiWorld, path: String) {
    world.request(Method::GET, &path, None);
}

#[when("the client creates a client named \"{name}\"")]
fn the_client_creates_a_client(world: &ApiWorld, name: String) {
    world.request(
        Method::POST,
        "/clients",
        Some(serde_json::json!({ "name": name, "email": "ops@acme.test" })),
    );
    if world.status() == 200 {
        world.remember_created_id();
    }
}

#[when("the client renames the created client to \"{name}\"")]
fn the_client_renames_the_created_client(world: &ApiWorld, name: String) {
    let path = format!("/clients/{}", world.remembered_id());
    world.request(Method::PUT, &path, Some(serde_json::json!({ "name": name })));
}

#[when("the client deletes the created client")]
fn the_client_deletes_the_created_client(world: &ApiWorld) {
    let path = format!("/clients/{}", world.remembered_id());
    world.request(Method::DELETE, &path, None);
}

#[when("the client fetches the created client")]
fn the_client_fetches_the_created_client(world: &ApiWorld) {
    let path = format!("/clients/{}", world.remembered_id());
    world.request(Method::GET, &path, None);
}

#[when("the client registers a worker with email \"{email}\"")]
fn the_client_registers_a_worker(world: &ApiWorld, email: String) {
    world.request(
        Method::POST,
        "/workers",
        Some(serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": email,
        })),
    );
}

#[then("the action succeeds")]
fn the_action_succeeds(world: &ApiWorld) {
    world.assert_success();
}

#[then("the action fails with status {status} and code {code}")]
fn the_action_fails(world: &ApiWorld, status: u16, code: String) {
    world.assert_failure(status, &code);
}

#[then("the field \"{field}\" has an error")]
fn the_field_has_an_error(world: &ApiWorld, field: String) {
    let body = world.body();
    let messages = body
        .pointer(&format!("/error/fieldErrors/{field}"))
        .and_then(Value::as_array)
        .expect("field error messages");
    assert!(!messages.is_empty());
}

#[then("the signed-in email is \"{email}\"")]
fn the_signed_in_email_is(world: &ApiWorld, email: String) {
    assert_eq!(world.body().pointer("/data/email"), Some(&Value::String(email)));
}

#[then("the listing holds {count} record")]
fn the_listing_holds(world: &ApiWorld, count: usize) {
    let body = world.body();
    let records = body
        .pointer("/data")
        .and_then(Value::as_array)
        .expect("listing array");
    assert_eq!(records.len(), count);
}

#[then("the record name is \"{name}\"")]
fn the_record_name_is(world: &ApiWorld, name: String) {
    assert_eq!(world.body().pointer("/data/name"), Some(&Value::String(name)));
}

#[then("the dashboard reports {count} client")]
fn the_dashboard_reports(world: &ApiWorld, count: u64) {
    assert_eq!(
        world.body().pointer("/data/clients").and_then(Value::as_u64),
        Some(count)
    );
}
