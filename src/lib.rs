#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod codegen;
pub mod config;
pub mod graph;
pub mod manifest;
pub mod models;
pub mod plugin;
pub mod project;
pub mod selection;

pub use codegen::{RUNTIME_SPECIFIER, render_install_script};
pub use config::{CONFIG_FILE_NAMES, RuntimeConfig, RuntimeConfigError};
pub use graph::{BundleGraph, GraphSnapshot, MemoryBundleGraph};
pub use manifest::{collect_manifest, url_join};
pub use models::{Asset, Bundle, BundleBehavior, BundleContext, Dependency, RuntimeAsset};
pub use plugin::{PluginOptions, ServiceWorkerRuntime};
pub use project::to_project_path;
pub use selection::{FileSelector, SelectedAssets, select_assets};
