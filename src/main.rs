//! Command line inspector for service-worker precache manifests.
//!
//! Runs the same decision procedure the bundler plugin runs, but against a bundle graph
//! snapshot on disk, so "why is this bundle (not) being cached?" can be answered without
//! a full build.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use sw_precache_runtime::{
  MemoryBundleGraph, PluginOptions, RUNTIME_SPECIFIER, RuntimeConfig, ServiceWorkerRuntime,
  collect_manifest, select_assets,
};

/// Inspect which bundles a service worker would precache.
#[derive(Debug, Parser)]
#[command(name = "sw-precache", version, about)]
struct Cli {
  /// Path to a bundle graph snapshot JSON file.
  #[arg(long)]
  graph: PathBuf,

  /// Identifier of the service-worker bundle within the snapshot.
  #[arg(long)]
  bundle: String,

  /// Project root used to normalise asset paths and discover configuration.
  #[arg(long, default_value = ".")]
  project_root: PathBuf,

  /// Explicit configuration file, overriding project-root discovery.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Print the full generated install script instead of the manifest URLs.
  #[arg(long)]
  emit: bool,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let text = fs::read_to_string(&cli.graph)
    .with_context(|| format!("failed to read {}", cli.graph.display()))?;
  let graph =
    MemoryBundleGraph::from_json(&text).context("failed to parse bundle graph snapshot")?;

  let Some(bundle) = graph.bundle_by_id(&cli.bundle) else {
    bail!("bundle '{}' not found in the snapshot", cli.bundle);
  };

  let config = match &cli.config {
    Some(path) => RuntimeConfig::load_from_path(path)?,
    None => RuntimeConfig::discover(&cli.project_root)?,
  };
  let options = PluginOptions {
    project_root: cli.project_root.to_string_lossy().into_owned(),
  };

  if cli.emit {
    let runtime = ServiceWorkerRuntime;
    let outputs = runtime.apply_with_config(&graph, bundle, &options, &config)?;
    if outputs.is_empty() {
      bail!(
        "bundle '{}' is not a service worker using the {} helper",
        cli.bundle,
        RUNTIME_SPECIFIER
      );
    }
    for output in outputs {
      print!("{}", output.code);
    }
  } else {
    let selected = select_assets(&graph, config.files_to_cache.as_deref(), &options.project_root);
    for url in collect_manifest(&graph, &selected, &cli.bundle) {
      println!("{url}");
    }
  }

  Ok(())
}
