use tajine_import::{parse_ingredient_line, parse_instructions, parse_servings};

pub fn parse_ingredient(line: &str) -> anyhow::Result<()> {
    super::print_json(&parse_ingredient_line(line))
}

pub fn parse_instruction_text(text: &str) -> anyhow::Result<()> {
    super::print_json(&parse_instructions(text))
}

pub fn parse_servings_text(text: &str) -> anyhow::Result<()> {
    super::print_json(&parse_servings(text))
}
