//! Platform targets and artifact naming.

use serde::Deserialize;
use std::fmt;

/// Operating system a distribution is packaged for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// Windows (both 32- and 64-bit builds use the `win32` identifier)
    Win32,
    /// macOS
    Darwin,
}

impl Os {
    /// The identifier used by the packager and in artifact names.
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Win32 => "win32",
            Os::Darwin => "darwin",
        }
    }
}

/// CPU architecture a distribution is packaged for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86 (32-bit)
    Ia32,
    /// x86_64 (64-bit)
    X64,
}

impl Arch {
    /// The identifier used by the packager and in artifact names.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Ia32 => "ia32",
            Arch::X64 => "x64",
        }
    }
}

/// One (operating system, architecture) pair the pipeline packages for.
///
/// The supported set is a fixed list; adding a target means adding an entry
/// to [`PlatformTarget::ALL`] (or the `targets` key of `irkit-build.toml`),
/// which regenerates the per-target pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
pub struct PlatformTarget {
    /// Target operating system
    pub os: Os,
    /// Target architecture
    pub arch: Arch,
}

impl PlatformTarget {
    /// The shipped platform list: 32- and 64-bit Windows plus 64-bit macOS.
    pub const ALL: [PlatformTarget; 3] = [
        PlatformTarget {
            os: Os::Win32,
            arch: Arch::Ia32,
        },
        PlatformTarget {
            os: Os::Win32,
            arch: Arch::X64,
        },
        PlatformTarget {
            os: Os::Darwin,
            arch: Arch::X64,
        },
    ];

    /// Name of the application bundle directory the packager produces,
    /// e.g. `IRKit Updater-win32-x64`.
    pub fn bundle_dir_name(&self, app_name: &str) -> String {
        format!("{}-{}-{}", app_name, self.os.as_str(), self.arch.as_str())
    }

    /// Name of the distribution archive,
    /// e.g. `IRKit Updater-win32-x64-1.2.3.zip`.
    pub fn archive_name(&self, app_name: &str, version: &str) -> String {
        format!(
            "{}-{}-{}-{}.zip",
            app_name,
            self.os.as_str(),
            self.arch.as_str(),
            version
        )
    }

    /// Suffix of the prebuilt native module for this target,
    /// e.g. `win32_x64` in `serialport.node.win32_x64`.
    pub fn native_module_suffix(&self) -> String {
        format!("{}_{}", self.os.as_str(), self.arch.as_str())
    }

    /// Task name prefix for this target's pipeline, e.g. `dist:win32:x64`.
    pub fn task_prefix(&self) -> String {
        format!("dist:{}:{}", self.os.as_str(), self.arch.as_str())
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.as_str(), self.arch.as_str())
    }
}
