use crate::app::command_support::{map_profile_err, profile_manager};
use std::fs;

pub fn cmd_setup() -> Result<String, String> {
    let manager = profile_manager()?;
    let root = manager.profiles_root();
    fs::create_dir_all(&root)
        .map_err(|e| format!("failed to create {}: {e}", root.display()))?;
    let created = manager.ensure_default_profile().map_err(map_profile_err)?;
    let mut lines = vec![format!("state_root={}", manager.locations().root().display())];
    match created {
        Some(profile) => lines.push(format!("created default profile at {}", profile.path.display())),
        None => lines.push("default profile already present".to_string()),
    }
    Ok(lines.join("\n"))
}
