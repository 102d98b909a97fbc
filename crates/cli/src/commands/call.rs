use serde_json::Value;
use thingsctl_config::Config;
use thingsctl_task::{call_tool, get_mcp_tools, ThingsService};

pub async fn execute(config: &Config, tool: &str, args: Option<&str>) -> eyre::Result<()> {
    let arguments = parse_arguments(args)?;
    let mut service = ThingsService::from_config(config);

    let output = call_tool(&mut service, tool, arguments)
        .await
        .map_err(|e| eyre::eyre!("{e}"))?;

    if output.is_error {
        eyre::bail!("{}", output.text);
    }
    println!("{}", output.text);
    Ok(())
}

pub fn list_tools() -> eyre::Result<()> {
    for tool in get_mcp_tools() {
        let name = tool["name"].as_str().unwrap_or_default();
        let description = tool["description"].as_str().unwrap_or_default();
        println!("{name:<32} {description}");
    }
    Ok(())
}

fn parse_arguments(args: Option<&str>) -> eyre::Result<Value> {
    let Some(raw) = args else {
        return Ok(Value::Object(Default::default()));
    };
    let value: Value =
        serde_json::from_str(raw).map_err(|e| eyre::eyre!("--args is not valid JSON: {e}"))?;
    if !value.is_object() {
        eyre::bail!("--args must be a JSON object");
    }
    Ok(value)
}
