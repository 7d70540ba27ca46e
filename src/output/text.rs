use crate::model::{Catalog, CriticalFlag, Patch};
use anyhow::Result;
use std::fmt::Write;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct PatchRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Products")]
    products: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Released")]
    released: String,
    #[tabled(rename = "Critical")]
    critical: String,
    #[tabled(rename = "QFE ID")]
    qfe_id: String,
    #[tabled(rename = "Files")]
    files: String,
}

impl From<&Patch> for PatchRow {
    fn from(patch: &Patch) -> Self {
        Self {
            name: placeholder(&truncate(&patch.name, 40)),
            products: placeholder(&truncate(&patch.products.join(", "), 50)),
            platform: placeholder(&patch.platform),
            released: patch.release_date.to_string(),
            critical: patch.critical.to_string(),
            qfe_id: placeholder(&patch.qfe_id),
            files: patch.patch_files.len().to_string(),
        }
    }
}

/// Renders the catalog as version headers followed by a patch table per
/// version, with a trailing summary.
pub fn render_text(catalog: &Catalog) -> String {
    let mut out = String::new();

    if catalog.products.is_empty() {
        let _ = writeln!(out, "No products in catalog.");
        return out;
    }

    for product in &catalog.products {
        let _ = writeln!(out, "Version {}:", product.version);

        if product.patches.is_empty() {
            let _ = writeln!(out, "  (no patches)");
            let _ = writeln!(out);
            continue;
        }

        let rows: Vec<PatchRow> = product.patches.iter().map(PatchRow::from).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        let _ = writeln!(out, "{}", table);

        for patch in &product.patches {
            if patch.patch_files.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {} files:", placeholder(&patch.name));
            for file in &patch.patch_files {
                let _ = writeln!(out, "    {}", file);
            }
        }
        let _ = writeln!(out);
    }

    let total: usize = catalog.products.iter().map(|p| p.patches.len()).sum();
    let critical = catalog
        .products
        .iter()
        .flat_map(|p| &p.patches)
        .filter(|patch| patch.critical == CriticalFlag::Flag(true))
        .count();

    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  Products: {}", catalog.products.len());
    let _ = writeln!(out, "  Patches: {} ({} critical)", total, critical);

    out
}

pub fn print_text(catalog: &Catalog) -> Result<()> {
    print!("{}", render_text(catalog));
    Ok(())
}

fn placeholder(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_catalog;

    const SAMPLE: &str = r#"{
        "Product": [
            {
                "version": "10.9",
                "patches": [
                    {
                        "Name": "Patch-1",
                        "Products": "ArcGIS Pro",
                        "Platform": "Windows",
                        "ReleaseDate": "2023/05/10",
                        "Critical": "true",
                        "PatchFiles": ["https://downloads.esri.com/patches/p1.msp"]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_render_text_groups_by_version() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let text = render_text(&catalog);

        assert!(text.contains("Version 10.9:"));
        assert!(text.contains("Patch-1"));
        assert!(text.contains("ArcGIS Pro"));
        assert!(text.contains("2023-05-10"));
        assert!(text.contains("true"));
        assert!(text.contains("https://downloads.esri.com/patches/p1.msp"));
    }

    #[test]
    fn test_render_text_summary() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let text = render_text(&catalog);

        assert!(text.contains("Products: 1"));
        assert!(text.contains("Patches: 1 (1 critical)"));
    }

    #[test]
    fn test_render_text_empty_catalog() {
        let catalog = parse_catalog(r#"{"Product": []}"#).unwrap();
        assert_eq!(render_text(&catalog), "No products in catalog.\n");
    }

    #[test]
    fn test_render_text_missing_fields_use_placeholders() {
        let catalog = parse_catalog(
            r#"{"Product": [{"version": "11.0", "patches": [{"Name": "Bare"}]}]}"#,
        )
        .unwrap();
        let text = render_text(&catalog);

        assert!(text.contains("Version 11.0:"));
        assert!(text.contains("Bare"));
        assert!(text.contains("-"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 40), "short");
        let long = "x".repeat(50);
        let cut = truncate(&long, 40);
        assert_eq!(cut.len(), 40);
        assert!(cut.ends_with("..."));
    }
}
