//! Behavioural tests for the menu, cart, coupon and offer endpoints.
//!
//! Each scenario drives a real server over HTTP and replays the session
//! cookie between requests, so the cart only survives through the cookie.

#[path = "support/harness.rs"]
mod harness;
#[path = "support/http.rs"]
mod http;

use actix_web::http::Method;
use harness::WorldFixture;
use http::{JsonRequest, last_status, perform_json_request, with_last_body};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use storefront::inbound::http::cache_control::PRIVATE_NO_CACHE_MUST_REVALIDATE;

const MENU_PATH: &str = "/api/v1/menu";
const CART_PATH: &str = "/api/v1/cart";
const ITEMS_PATH: &str = "/api/v1/cart/items";
const COUPON_PATH: &str = "/api/v1/cart/coupon";
const OFFERS_PATH: &str = "/api/v1/cart/offers";

fn assert_amount(body: &Value, pointer: &str, expected: f64) {
    let actual = body
        .pointer(pointer)
        .and_then(Value::as_f64)
        .unwrap_or_else(|| panic!("{pointer} should be a number in {body}"));
    assert!(
        (actual - expected).abs() < 1e-9,
        "{pointer}: expected {expected}, got {actual}"
    );
}

fn add_item(world: &WorldFixture, id: u32) {
    perform_json_request(
        world,
        JsonRequest::send(Method::POST, ITEMS_PATH, json!({ "itemId": id })),
    );
}

fn apply_coupon(world: &WorldFixture, code: &str) {
    perform_json_request(
        world,
        JsonRequest::send(Method::PUT, COUPON_PATH, json!({ "code": code })),
    );
}

fn assert_ok(world: &WorldFixture) {
    assert_eq!(last_status(world), Some(200));
}

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

#[given("a running storefront")]
fn a_running_storefront(world: &WorldFixture) {
    assert!(world.world().borrow().session_cookie.is_none());
}

#[given("the client has item {id} in the cart")]
fn the_client_has_item_in_the_cart(world: &WorldFixture, id: u32) {
    add_item(world, id);
    assert_ok(world);
}

#[given("the client has applied coupon {code}")]
fn the_client_has_applied_coupon(world: &WorldFixture, code: String) {
    apply_coupon(world, &code);
    assert_ok(world);
}

#[given("the menu source is offline")]
fn the_menu_source_is_offline(world: &WorldFixture) {
    world.world().borrow().menu.go_offline();
}

#[when("the client requests the menu")]
fn the_client_requests_the_menu(world: &WorldFixture) {
    perform_json_request(world, JsonRequest::get(MENU_PATH));
}

#[when("the client requests the cart")]
fn the_client_requests_the_cart(world: &WorldFixture) {
    perform_json_request(world, JsonRequest::get(CART_PATH));
}

#[when("the client requests the offers")]
fn the_client_requests_the_offers(world: &WorldFixture) {
    perform_json_request(world, JsonRequest::get(OFFERS_PATH));
}

#[when("the client adds item {id} to the cart")]
fn the_client_adds_item_to_the_cart(world: &WorldFixture, id: u32) {
    add_item(world, id);
}

#[when("the client increments item {id}")]
fn the_client_increments_item(world: &WorldFixture, id: u32) {
    let path = format!("{ITEMS_PATH}/{id}/increment");
    perform_json_request(world, JsonRequest::bare(Method::POST, &path));
}

#[when("the client decrements item {id}")]
fn the_client_decrements_item(world: &WorldFixture, id: u32) {
    let path = format!("{ITEMS_PATH}/{id}/decrement");
    perform_json_request(world, JsonRequest::bare(Method::POST, &path));
}

#[when("the client removes item {id}")]
fn the_client_removes_item(world: &WorldFixture, id: u32) {
    let path = format!("{ITEMS_PATH}/{id}");
    perform_json_request(world, JsonRequest::bare(Method::DELETE, &path));
}

#[when("the client applies coupon {code}")]
fn the_client_applies_coupon(world: &WorldFixture, code: String) {
    apply_coupon(world, &code);
}

#[when("the client removes the coupon")]
fn the_client_removes_the_coupon(world: &WorldFixture) {
    perform_json_request(world, JsonRequest::bare(Method::DELETE, COUPON_PATH));
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(last_status(world), Some(status));
}

#[then("the menu has categories burgers and pizzas")]
fn the_menu_has_categories_burgers_and_pizzas(world: &WorldFixture) {
    with_last_body(world, |body| {
        for category in ["burgers", "pizzas"] {
            let items = body
                .get(category)
                .and_then(Value::as_array)
                .unwrap_or_else(|| panic!("{category} should be listed"));
            assert_eq!(items.len(), 3, "{category} should list three items");
        }
    });
}

#[then("the cart total is {total}")]
fn the_cart_total_is(world: &WorldFixture, total: f64) {
    with_last_body(world, |body| assert_amount(body, "/total", total));
}

#[then("the cart holds {count} items")]
fn the_cart_holds_items(world: &WorldFixture, count: u64) {
    with_last_body(world, |body| {
        assert_eq!(body.get("itemCount").and_then(Value::as_u64), Some(count));
    });
}

#[then("the discounted total is {total}")]
fn the_discounted_total_is(world: &WorldFixture, total: f64) {
    with_last_body(world, |body| {
        assert_amount(body, "/discount/discountedTotal", total);
        assert_amount(body, "/payable", total);
    });
}

#[then("the amount saved is {saved}")]
fn the_amount_saved_is(world: &WorldFixture, saved: f64) {
    with_last_body(world, |body| assert_amount(body, "/discount/savedAmount", saved));
}

#[then("no coupon is applied")]
fn no_coupon_is_applied(world: &WorldFixture) {
    with_last_body(world, |body| {
        assert_eq!(body.get("discount"), Some(&Value::Null));
    });
}

#[then("the cart is empty")]
fn the_cart_is_empty(world: &WorldFixture) {
    with_last_body(world, |body| {
        let lines = body.get("lines").and_then(Value::as_array).expect("lines");
        assert!(lines.is_empty());
        assert_eq!(body.get("itemCount").and_then(Value::as_u64), Some(0));
    });
}

#[then("the error message is {message}")]
fn the_error_message_is(world: &WorldFixture, message: String) {
    with_last_body(world, |body| {
        assert_eq!(body.get("message").and_then(Value::as_str), Some(message.as_str()));
        assert_eq!(
            body.pointer("/details/code").and_then(Value::as_str),
            Some("invalid_coupon")
        );
    });
}

#[then("the response is not cacheable")]
fn the_response_is_not_cacheable(world: &WorldFixture) {
    let shared = world.world();
    let ctx = shared.borrow();
    assert_eq!(
        ctx.last_cache_control.as_deref(),
        Some(PRIVATE_NO_CACHE_MUST_REVALIDATE)
    );
}

#[then("the response carries a trace id")]
fn the_response_carries_a_trace_id(world: &WorldFixture) {
    let shared = world.world();
    let ctx = shared.borrow();
    let header = ctx.last_trace_id.clone().expect("trace-id header");
    with_last_body(world, |body| {
        assert_eq!(body.get("traceId").and_then(Value::as_str), Some(header.as_str()));
    });
}

#[then("no offer qualifies")]
fn no_offer_qualifies(world: &WorldFixture) {
    with_last_body(world, |body| {
        let offers = body.get("offers").and_then(Value::as_array).expect("offers");
        assert_eq!(offers.len(), 3);
        assert!(
            offers
                .iter()
                .all(|offer| offer.get("qualifies") == Some(&Value::Bool(false)))
        );
    });
}

#[scenario(path = "tests/features/cart_checkout.feature")]
fn cart_checkout(world: WorldFixture) {
    drop(world);
}
