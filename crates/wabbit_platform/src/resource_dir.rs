//! Locates the asset folder so relative texture paths resolve no matter
//! where the binary is launched from (repo root, `target/debug`, an unpacked
//! release archive).

use std::env;
use std::path::{Path, PathBuf};

/// How many ancestors of the executable's directory are searched.
const MAX_EXE_ANCESTORS: usize = 3;

/// Finds a directory named `folder_name` and makes it the current working
/// directory. Returns the directory that was selected.
pub fn search_and_set_resource_dir(folder_name: &str) -> Result<PathBuf, String> {
    let roots = candidate_roots();
    let dir = find_resource_dir(folder_name, &roots).ok_or_else(|| {
        format!(
            "Resource directory '{}' not found (searched {} locations)",
            folder_name,
            roots.len()
        )
    })?;
    env::set_current_dir(&dir)
        .map_err(|e| format!("Failed to enter resource directory {}: {e}", dir.display()))?;
    log::info!("Resource directory: {}", dir.display());
    Ok(dir)
}

/// Returns `<root>/<folder_name>` for the first root that contains it.
pub fn find_resource_dir(folder_name: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    roots
        .iter()
        .map(|root| root.join(folder_name))
        .find(|candidate| candidate.is_dir())
}

/// Working directory first, then the executable's directory and its parents.
fn candidate_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) = env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
    {
        roots.extend(exe_dir.ancestors().take(MAX_EXE_ANCESTORS + 1).map(Path::to_path_buf));
    }
    roots
}
