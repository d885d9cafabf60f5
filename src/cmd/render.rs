//! Render command module

use note_refactor::{template, PlaceholderValues};

pub fn run(
    template_text: &str,
    input: &str,
    values: &PlaceholderValues,
) -> note_refactor::Result<()> {
    let rendered = template::render(Some(template_text), input, values);
    println!("{}", rendered);
    Ok(())
}
