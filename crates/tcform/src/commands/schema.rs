use super::offline;
use colored::Colorize;
use tcform_cloud::{AttributeSchema, CloudProvider, ResourceSchema};

fn print_schema(kind: &str, schema: &ResourceSchema) {
    println!("{} {}", kind.dimmed(), schema.type_name.cyan().bold());
    if !schema.description.is_empty() {
        println!("  {}", schema.description);
    }
    println!();
    for attribute in &schema.attributes {
        println!("  {}", describe(attribute));
        if !attribute.description.is_empty() {
            println!("      {}", attribute.description.dimmed());
        }
    }
}

fn describe(attribute: &AttributeSchema) -> String {
    let mut flags = Vec::new();
    if attribute.required {
        flags.push("required".red().to_string());
    }
    if attribute.optional {
        flags.push("optional".to_string());
    }
    if attribute.computed {
        flags.push("computed".blue().to_string());
    }
    if attribute.force_new {
        flags.push("force-new".magenta().to_string());
    }
    if attribute.immutable {
        flags.push("immutable".yellow().to_string());
    }
    format!(
        "{} ({}) [{}]",
        attribute.name.bold(),
        attribute.attr_type.as_str(),
        flags.join(", ")
    )
}

pub fn handle(type_name: Option<&str>, json: bool) -> anyhow::Result<()> {
    let provider = offline()?;

    let Some(type_name) = type_name else {
        println!("{}", "リソース:".bold());
        for name in provider.resource_types() {
            println!("  - {}", name.cyan());
        }
        println!("{}", "データソース:".bold());
        for name in provider.data_source_types() {
            println!("  - {}", name.cyan());
        }
        return Ok(());
    };

    let (kind, schema) = if let Some(handler) = provider.resource(type_name) {
        ("resource", handler.schema())
    } else if let Some(handler) = provider.data_source(type_name) {
        ("data", handler.schema())
    } else {
        anyhow::bail!(
            "未対応のタイプです: {}\n`tcform schema` で一覧を確認できます",
            type_name
        );
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        print_schema(kind, &schema);
    }
    Ok(())
}
