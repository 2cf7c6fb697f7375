//! Bash script that recreates a rendered project

use super::ProjectFiles;
use crate::config::Configuration;

pub const SCRIPT_NAME: &str = "scaffold.sh";

const DELIMITER: &str = "STARTERFORGE_EOF";

/// Heredoc delimiter that no line of `contents` equals
fn delimiter_for(contents: &str) -> String {
    let mut candidate = DELIMITER.to_string();
    let mut n = 0;
    while contents.lines().any(|line| line == candidate) {
        n += 1;
        candidate = format!("{DELIMITER}_{n}");
    }
    candidate
}

/// Render the script. Running it with no argument writes next to the
/// script; the first argument overrides the target directory.
pub fn render_script(config: &Configuration, files: &ProjectFiles) -> String {
    let mut out = String::new();
    out.push_str("#!/usr/bin/env bash\n");
    out.push_str(&format!(
        "# Recreates the {} starter generated by StarterForge.\n",
        config.project_type
    ));
    out.push_str("# Usage: ./scaffold.sh [target-dir]\n");
    out.push_str("set -euo pipefail\n\n");
    out.push_str("TARGET_DIR=\"${1:-$(cd \"$(dirname \"${BASH_SOURCE[0]}\")\" && pwd)}\"\n\n");
    out.push_str("mkdir -p \"$TARGET_DIR\"\n");
    for dir in files.directories() {
        out.push_str(&format!("mkdir -p \"$TARGET_DIR/{dir}\"\n"));
    }

    for (path, contents) in files.iter() {
        let delimiter = delimiter_for(contents);
        out.push_str(&format!("\ncat > \"$TARGET_DIR/{path}\" <<'{delimiter}'\n"));
        out.push_str(contents);
        out.push_str(&delimiter);
        out.push('\n');
    }

    out.push_str(&format!(
        "\necho \"Scaffolded {} into $TARGET_DIR\"\n",
        config.project_type
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectType;

    fn sample_files() -> ProjectFiles {
        let mut files = ProjectFiles::new();
        files.add("README.md", "# Demo\n");
        files.add("src/index.js", "console.log(`$HOME ${x}`);\n");
        files
    }

    #[test]
    fn test_script_shape() {
        let script = render_script(&Configuration::minimal(ProjectType::WebApp), &sample_files());

        assert!(script.starts_with("#!/usr/bin/env bash\n"));
        assert!(script.contains("set -euo pipefail"));
        assert!(script.contains("mkdir -p \"$TARGET_DIR/src\"\n"));
        assert!(script.contains("cat > \"$TARGET_DIR/README.md\" <<'STARTERFORGE_EOF'\n# Demo\nSTARTERFORGE_EOF\n"));
        // Quoted heredocs keep shell syntax literal
        assert!(script.contains("console.log(`$HOME ${x}`);\nSTARTERFORGE_EOF"));
    }

    #[test]
    fn test_delimiter_avoids_collisions() {
        assert_eq!(delimiter_for("plain\n"), "STARTERFORGE_EOF");
        assert_eq!(
            delimiter_for("STARTERFORGE_EOF\nSTARTERFORGE_EOF_1\n"),
            "STARTERFORGE_EOF_2"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_script_reproduces_files() {
        let files = sample_files();
        let script = render_script(&Configuration::minimal(ProjectType::Custom), &files);
        let tmp = tempfile::TempDir::new().unwrap();
        let script_path = tmp.path().join(SCRIPT_NAME);
        std::fs::write(&script_path, &script).unwrap();

        let target = tmp.path().join("out");
        let status = std::process::Command::new("bash")
            .arg(&script_path)
            .arg(&target)
            .status();
        // bash may be missing on minimal hosts
        let Ok(status) = status else { return };
        assert!(status.success());

        for (path, contents) in files.iter() {
            assert_eq!(std::fs::read_to_string(target.join(path)).unwrap(), contents);
        }
    }
}
