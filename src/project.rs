//! Project-root-relative path normalisation.
//!
//! User configuration names files by their path relative to the project root, while the
//! host bundler reports absolute paths in whatever separator style the platform used when
//! the files were discovered. Both sides are funnelled through [`to_project_path`] so the
//! comparison is a plain string equality on a canonical spelling.

/// Normalise a file path into its project-root-relative comparison key.
///
/// The result always uses forward slashes and carries no leading `/` or `./`. When the
/// path does not live under `project_root` it is kept as-is (minus the leading markers),
/// which lets configuration entries that are already project-relative pass through
/// unchanged.
pub fn to_project_path(project_root: &str, file_path: &str) -> String {
  let root = normalise_separators(project_root);
  let root = root.trim_end_matches('/');
  let path = normalise_separators(file_path);

  let relative = if root.is_empty() {
    path.as_str()
  } else {
    match path.strip_prefix(root) {
      Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
      _ => path.as_str(),
    }
  };

  relative
    .trim_start_matches('/')
    .trim_start_matches("./")
    .to_string()
}

fn normalise_separators(value: &str) -> String {
  value.replace('\\', "/")
}
