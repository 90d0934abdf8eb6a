//! Compilation target model
//!
//! A recipe builds either for the host machine (`Native`) or for a
//! FreeBSD/CheriBSD cross target. Recipes declare which of these they
//! support; the build driver rejects anything else up front.

use crate::error::{ForgeError, ForgeResult};
use std::fmt;

/// Processor architectures the cross targets come in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86_64,
    Aarch64,
    Riscv64,
    Morello,
}

impl Arch {
    pub fn name(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::Riscv64 => "riscv64",
            Arch::Morello => "morello",
        }
    }
}

/// A resolved compilation target
///
/// `Native` carries no OS family; platform-specific behavior for native
/// builds keys off the host OS instead (see [`CompilationTarget::is_macos`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilationTarget {
    Native,
    FreeBsd(Arch),
    CheriBsd(Arch),
}

impl CompilationTarget {
    /// Parse a target name as given on the command line or in config
    pub fn parse(s: &str) -> ForgeResult<Self> {
        let parsed = match s {
            "native" => Some(CompilationTarget::Native),
            _ => match s.split_once('-') {
                Some(("freebsd", arch)) => parse_arch(arch).map(CompilationTarget::FreeBsd),
                Some(("cheribsd", arch)) => parse_arch(arch).map(CompilationTarget::CheriBsd),
                _ => None,
            },
        };
        parsed.ok_or_else(|| ForgeError::UnknownTarget(s.to_string()))
    }

    /// True only for the host target
    pub fn is_native(&self) -> bool {
        matches!(self, CompilationTarget::Native)
    }

    /// True for FreeBSD and CheriBSD cross targets
    pub fn is_freebsd_family(&self) -> bool {
        matches!(
            self,
            CompilationTarget::FreeBsd(_) | CompilationTarget::CheriBsd(_)
        )
    }

    /// True when building natively on a macOS host
    pub fn is_macos(&self) -> bool {
        self.is_native() && std::env::consts::OS == "macos"
    }

    /// Canonical name, used for build and rootfs directory naming
    pub fn triple(&self) -> String {
        match self {
            CompilationTarget::Native => "native".to_string(),
            CompilationTarget::FreeBsd(arch) => format!("freebsd-{}", arch.name()),
            CompilationTarget::CheriBsd(arch) => format!("cheribsd-{}", arch.name()),
        }
    }

    /// The cross-target set most recipes support
    pub fn all_freebsd_and_cheribsd() -> Vec<CompilationTarget> {
        vec![
            CompilationTarget::FreeBsd(Arch::X86_64),
            CompilationTarget::FreeBsd(Arch::Aarch64),
            CompilationTarget::FreeBsd(Arch::Riscv64),
            CompilationTarget::CheriBsd(Arch::Riscv64),
            CompilationTarget::CheriBsd(Arch::Morello),
        ]
    }

    /// The cross-target set plus the host target
    pub fn all_freebsd_and_cheribsd_and_native() -> Vec<CompilationTarget> {
        let mut targets = Self::all_freebsd_and_cheribsd();
        targets.push(CompilationTarget::Native);
        targets
    }
}

impl fmt::Display for CompilationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.triple())
    }
}

fn parse_arch(s: &str) -> Option<Arch> {
    match s {
        "x86_64" => Some(Arch::X86_64),
        "aarch64" => Some(Arch::Aarch64),
        "riscv64" => Some(Arch::Riscv64),
        "morello" => Some(Arch::Morello),
        _ => None,
    }
}
