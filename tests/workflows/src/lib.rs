use std::path::Path;

use anyhow::Context as _;
use launch_gen::{GenerateOptions, OutputFormat, generate, render, write_output};
use serde_json::Value;

/// Run the generator end to end into `out` and read the document back.
pub fn generate_document(options: &GenerateOptions, out: &Path) -> anyhow::Result<Value> {
    let config = generate(options)?;
    let rendered = render(&config, OutputFormat::Pretty)?;
    write_output(&rendered, Some(out))?;

    let written = std::fs::read_to_string(out)
        .with_context(|| format!("failed to read {}", out.display()))?;
    Ok(serde_json::from_str(&written)?)
}

/// Every `(port, rpcPort, wsPort)` value in the document, in node order.
pub fn document_ports(document: &Value) -> Vec<u64> {
    let relay = std::iter::once(&document["relaychain"]);
    let parachains = document["parachains"].as_array().into_iter().flatten();
    relay
        .chain(parachains)
        .filter_map(|network| network["nodes"].as_array())
        .flatten()
        .flat_map(|node| ["port", "rpcPort", "wsPort"].map(|key| node[key].as_u64()))
        .flatten()
        .collect()
}
