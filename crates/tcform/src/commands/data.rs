use super::connect;
use colored::Colorize;
use serde_json::Value;
use tcform_cloud::{AttributeType, Attributes, CloudProvider, ResourceSchema, read_data_source};

/// `key=value` をスキーマの型に合わせて変換
///
/// 文字列以外は JSON として解釈し、Set/List はカンマ区切りも受け付ける。
pub fn parse_args(schema: &ResourceSchema, pairs: &[String]) -> anyhow::Result<Attributes> {
    let mut args = Attributes::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            anyhow::bail!("引数は key=value 形式で指定してください: {}", pair);
        };
        let Some(attribute) = schema.get(key) else {
            anyhow::bail!("{} に {} という引数はありません", schema.type_name, key);
        };

        let value = match attribute.attr_type {
            AttributeType::String => Value::String(raw.to_string()),
            AttributeType::Set | AttributeType::List => {
                serde_json::from_str(raw).unwrap_or_else(|_| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| serde_json::from_str(s).unwrap_or_else(|_| Value::from(s)))
                        .collect()
                })
            }
            _ => serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw)),
        };
        args.insert(key.to_string(), value);
    }
    Ok(args)
}

pub async fn handle(type_name: &str, pairs: &[String]) -> anyhow::Result<()> {
    let config = tcform_config::load_provider_config()?;
    let provider = connect(&config)?;
    let handler = provider.require_data_source(type_name)?;
    let args = parse_args(&handler.schema(), pairs)?;

    let result = read_data_source(handler.as_ref(), &args).await?;

    println!("{} {}", "id:".dimmed(), result.id);
    println!("{}", serde_json::to_string_pretty(result.list())?);
    Ok(())
}
