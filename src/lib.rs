pub mod error;
pub mod language;
pub mod prompt;
pub mod pumping;
pub mod render;

use wasm_bindgen::prelude::*;

use crate::{language::Language, pumping::demonstrate, render::render_to_string};

#[wasm_bindgen]
pub fn pumping_report(word: &str, p: usize, language_id: u32) -> String {
    match Language::from_id(language_id) {
        Some(language) => render_to_string(&demonstrate(word, p, language)),
        None => format!("Unknown language {}, expected 1 to 5.\n", language_id),
    }
}

#[test]
fn test_pumping_report() {
    let text = pumping_report("aabb", 2, 1);
    assert!(text.contains("Result: The language is NOT regular"));
    assert_eq!(pumping_report("aabb", 2, 9), "Unknown language 9, expected 1 to 5.\n");
}
