#![cfg(target_arch = "wasm32")]

use checkers::CheckersApp;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn wasm_is_ready() {
    assert!(checkers::wasm_ready());
}

#[wasm_bindgen_test]
fn clicks_drive_the_turn_loop() {
    let mut app = CheckersApp::new();

    assert!(!app.handle_click(0, 0));
    assert!(app.handle_click(5, 2));
    assert!(app.handle_click(4, 3));
    assert_eq!(app.cell_contents(4, 3), 1);
    assert_eq!(app.cell_contents(5, 2), 0);

    let state = app.state().unwrap();
    assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));
    assert_eq!(field(&state, "is_game_over").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn pointer_coordinates_map_to_squares() {
    let mut app = CheckersApp::new();

    assert!(app.handle_pointer(90.0, 210.0, 40.0));
    assert!(!app.handle_pointer(400.0, 10.0, 40.0));
    assert_eq!(app.square_shade(0, 0), 0);
    assert_eq!(app.square_shade(0, 1), 1);
}

#[wasm_bindgen_test]
fn rules_come_from_a_plain_object() {
    let options = Object::new();
    Reflect::set(
        &options,
        &JsValue::from_str("first_player"),
        &JsValue::from_str("white"),
    )
    .unwrap();
    let app = CheckersApp::with_rules(options.into()).unwrap();

    let state = app.state().unwrap();
    assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));

    let bad = Object::new();
    Reflect::set(
        &bad,
        &JsValue::from_str("jump_rule"),
        &JsValue::from_str("sideways"),
    )
    .unwrap();
    assert!(CheckersApp::with_rules(bad.into()).is_err());
}

#[wasm_bindgen_test]
fn unknown_players_have_no_moves() {
    let app = CheckersApp::new();

    let red = Array::from(&app.legal_moves_for(1).unwrap());
    let nobody = Array::from(&app.legal_moves_for(7).unwrap());

    assert_eq!(red.length(), 7);
    assert_eq!(nobody.length(), 0);
    assert!(!app.is_game_over());
}
