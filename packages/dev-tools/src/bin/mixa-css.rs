//! Mixa stylesheet inspector
//!
//! Loads a stored mix document and prints the stylesheet the editor would
//! generate, followed by an outline of the element tree.
//!
//! # Usage
//!
//! ```bash
//! mixa-css document.json
//! MIXA_CONFIG=editor.json RUST_LOG=debug mixa-css document.json
//! ```
//!
//! The input is either a bare `{ "treeData": ..., "cssData": ... }` document
//! or a full mix record with `jsonContent`. Logs go to stderr so stdout can be
//! redirected into a `.css` file.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use mixa_core::config::EditorConfig;
use mixa_core::db::{InMemoryMixStore, MixStore};
use mixa_core::models::{Mix, NodeTree};
use mixa_core::services::DocumentContext;

/// Accept either a mix record or its bare content
fn document_content(value: serde_json::Value) -> serde_json::Value {
    match serde_json::from_value::<Mix>(value.clone()) {
        Ok(mix) => mix.json_content,
        Err(_) => value,
    }
}

fn write_outline(tree: &NodeTree, id: &str, depth: usize, out: &mut String) {
    let Some(node) = tree.node(id) else {
        return;
    };

    out.push_str(&"  ".repeat(depth));
    out.push('<');
    out.push_str(&node.tag);
    out.push('>');
    if !node.title.is_empty() {
        out.push(' ');
        out.push_str(&node.title);
    }
    let classes: Vec<&str> = node
        .classes
        .iter()
        .map(String::as_str)
        .filter(|c| !c.is_empty())
        .collect();
    if !classes.is_empty() {
        out.push_str(" .");
        out.push_str(&classes.join(" ."));
    }
    out.push_str(&format!(" [{}]\n", node.id));

    for child in node.child_ids() {
        write_outline(tree, child, depth + 1, out);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("Usage: mixa-css <document.json>"))?;

    let config = match env::var("MIXA_CONFIG") {
        Ok(config_path) => EditorConfig::load(&config_path)?,
        Err(_) => EditorConfig::default(),
    };

    let raw = tokio::fs::read_to_string(&path).await?;
    let content = document_content(serde_json::from_str(&raw)?);

    let store = Arc::new(InMemoryMixStore::new());
    let mix = store.create_mix(content).await?;

    let mut ctx = DocumentContext::new(config);
    ctx.load(store, mix.id).await?;

    tracing::info!(
        "Loaded {} ({} nodes, {} classes)",
        path.display(),
        ctx.tree().node_count(),
        ctx.css_tree().len()
    );

    println!("{}", ctx.stylesheet());
    println!();

    let mut outline = String::new();
    write_outline(ctx.tree(), ctx.tree().root_id(), 0, &mut outline);
    print!("{}", outline);

    Ok(())
}
