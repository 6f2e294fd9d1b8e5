use anyhow::Result;
use console::style;
use mindhub::providers::registry::{allowed_models, supports_native_schema};

pub fn execute() -> Result<()> {
    for model in allowed_models() {
        if supports_native_schema(model) {
            println!("{} {}", model, style("(structured output)").green());
        } else {
            println!("{} {}", model, style("(instructions only)").dim());
        }
    }
    Ok(())
}
