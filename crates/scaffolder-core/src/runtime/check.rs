//! Toolchain detection for Node.js, Python, Go and Cargo

use std::fmt;
use std::process::Command;

/// Toolchains a generated backend may need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    Node,
    Python,
    Go,
    Cargo,
}

impl Toolchain {
    /// Toolchain for a backend language id, if the generator supports it
    pub fn for_language(language: &str) -> Option<Self> {
        match language {
            "node" => Some(Toolchain::Node),
            "python" => Some(Toolchain::Python),
            "go" => Some(Toolchain::Go),
            "rust" => Some(Toolchain::Cargo),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Toolchain::Node => "Node.js",
            Toolchain::Python => "Python 3",
            Toolchain::Go => "Go",
            Toolchain::Cargo => "Cargo",
        }
    }

    fn program(&self) -> &'static str {
        match self {
            Toolchain::Node => "node",
            Toolchain::Python => "python3",
            Toolchain::Go => "go",
            Toolchain::Cargo => "cargo",
        }
    }

    fn version_arg(&self) -> &'static str {
        match self {
            Toolchain::Go => "version",
            _ => "--version",
        }
    }

    pub fn install_hint(&self) -> &'static str {
        match self {
            Toolchain::Node => "install from https://nodejs.org",
            Toolchain::Python => "install from https://python.org",
            Toolchain::Go => "install from https://go.dev/dl",
            Toolchain::Cargo => "install from https://rustup.rs",
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub toolchain: Toolchain,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    pub fn name(&self) -> &'static str {
        self.toolchain.display_name()
    }
}

/// Run the toolchain's version command
pub fn check_toolchain(toolchain: Toolchain) -> RuntimeInfo {
    let output = Command::new(toolchain.program())
        .arg(toolchain.version_arg())
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                toolchain,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            toolchain,
            version: None,
            available: false,
        },
    }
}

/// Advisory check for a backend language; None for languages with no known toolchain
pub fn check_backend_toolchain(language: &str) -> Option<RuntimeInfo> {
    let toolchain = Toolchain::for_language(language)?;
    let info = check_toolchain(toolchain);
    if !info.available {
        tracing::debug!(toolchain = %toolchain, "toolchain not found");
    }
    Some(info)
}
