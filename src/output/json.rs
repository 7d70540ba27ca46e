use crate::model::Catalog;
use anyhow::Result;

pub fn render_json(catalog: &Catalog) -> Result<String> {
    Ok(serde_json::to_string_pretty(catalog)?)
}

pub fn print_json(catalog: &Catalog) -> Result<()> {
    println!("{}", render_json(catalog)?);
    Ok(())
}
