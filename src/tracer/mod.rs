//! Typed views over traced syscalls.
//!
//! A trace arrives as generic records: a command name and positional
//! arguments. `classify` refines the filesystem-relevant ones into views with
//! named fields so a verifier can compare them against predicted effects.

mod views;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{RepairError, Result};

pub use views::{FStat, FStatAt, Open, OpenAt, Rename, Stat};

/// One positional syscall argument as produced by the trace parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SyscallArg {
    Int(i64),
    Str(String),
    /// Flag sets, struct fields and other bracketed arguments.
    List(Vec<SyscallArg>),
    /// Anything else the trace parser emits: unsigned values past `i64::MAX`,
    /// floats, nulls. Kept verbatim so one odd argument cannot fail a trace.
    Other(serde_json::Value),
}

impl SyscallArg {
    /// A list of flag names, e.g. `["O_RDONLY", "O_CLOEXEC"]`.
    pub fn flags<'s>(names: impl IntoIterator<Item = &'s str>) -> Self {
        Self::List(names.into_iter().map(Self::from).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SyscallArg]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for SyscallArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for SyscallArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for SyscallArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<SyscallArg>> for SyscallArg {
    fn from(value: Vec<SyscallArg>) -> Self {
        Self::List(value)
    }
}

/// A generic syscall record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syscall {
    pub cmd: String,
    #[serde(default)]
    pub args: Vec<SyscallArg>,
    #[serde(default, alias = "exitCode")]
    pub exit_code: i64,
}

impl Syscall {
    pub fn new(cmd: impl Into<String>, args: Vec<SyscallArg>, exit_code: i64) -> Self {
        Self {
            cmd: cmd.into(),
            args,
            exit_code,
        }
    }
}

/// Commands with a typed view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyscallKind {
    Open,
    OpenAt,
    /// `stat` and `lstat`.
    Stat,
    FStat,
    /// `fstatat`, `fstatat64` and `newfstatat`.
    FStatAt,
    Rename,
}

impl SyscallKind {
    pub fn from_command(cmd: &str) -> Option<Self> {
        match cmd {
            "open" => Some(Self::Open),
            "openat" => Some(Self::OpenAt),
            "stat" | "lstat" => Some(Self::Stat),
            "fstat" => Some(Self::FStat),
            "fstatat" | "fstatat64" | "newfstatat" => Some(Self::FStatAt),
            "rename" => Some(Self::Rename),
            _ => None,
        }
    }

    /// Arguments the view reads unconditionally.
    pub fn required_args(&self) -> usize {
        match self {
            Self::Open | Self::Stat | Self::FStat | Self::Rename => 2,
            Self::OpenAt => 3,
            Self::FStatAt => 4,
        }
    }
}

impl std::fmt::Display for SyscallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::OpenAt => write!(f, "openat"),
            Self::Stat => write!(f, "stat"),
            Self::FStat => write!(f, "fstat"),
            Self::FStatAt => write!(f, "fstatat"),
            Self::Rename => write!(f, "rename"),
        }
    }
}

/// Result of classification: a typed view, or the untouched record when the
/// command has none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedSyscall<'a> {
    Open(Open<'a>),
    OpenAt(OpenAt<'a>),
    Stat(Stat<'a>),
    FStat(FStat<'a>),
    FStatAt(FStatAt<'a>),
    Rename(Rename<'a>),
    Other(&'a Syscall),
}

impl<'a> TypedSyscall<'a> {
    /// The record the view projects.
    pub fn syscall(&self) -> &'a Syscall {
        match *self {
            Self::Open(v) => v.syscall(),
            Self::OpenAt(v) => v.syscall(),
            Self::Stat(v) => v.syscall(),
            Self::FStat(v) => v.syscall(),
            Self::FStatAt(v) => v.syscall(),
            Self::Rename(v) => v.syscall(),
            Self::Other(syscall) => syscall,
        }
    }

    pub fn kind(&self) -> Option<SyscallKind> {
        match self {
            Self::Open(_) => Some(SyscallKind::Open),
            Self::OpenAt(_) => Some(SyscallKind::OpenAt),
            Self::Stat(_) => Some(SyscallKind::Stat),
            Self::FStat(_) => Some(SyscallKind::FStat),
            Self::FStatAt(_) => Some(SyscallKind::FStatAt),
            Self::Rename(_) => Some(SyscallKind::Rename),
            Self::Other(_) => None,
        }
    }

    /// Named-field JSON projection, for reports.
    pub fn to_json(&self) -> serde_json::Value {
        let syscall = self.syscall();
        let fields = match self {
            Self::Open(v) => json!({ "path": v.path(), "flags": v.flags(), "mode": v.mode() }),
            Self::OpenAt(v) => json!({
                "dirfd": v.dirfd(),
                "path": v.path(),
                "flags": v.flags(),
                "mode": v.mode(),
            }),
            Self::Stat(v) => json!({ "path": v.path(), "flags": v.flags() }),
            Self::FStat(v) => json!({ "fd": v.fd(), "flags": v.flags() }),
            Self::FStatAt(v) => json!({
                "dirfd": v.dirfd(),
                "path": v.path(),
                "flags": v.flags(),
                "ored_flags": v.ored_flags(),
            }),
            Self::Rename(v) => json!({ "src": v.src(), "dst": v.dst() }),
            Self::Other(s) => json!({ "args": s.args }),
        };
        json!({
            "kind": self.kind().map(|k| k.to_string()),
            "cmd": syscall.cmd,
            "exit_code": syscall.exit_code,
            "fields": fields,
        })
    }
}

/// Refine a record into its typed view.
///
/// Unrecognized commands are not an error and come back as
/// `TypedSyscall::Other`. A recognized command whose argument list is too
/// short for the view is rejected rather than partially projected.
pub fn classify(syscall: &Syscall) -> Result<TypedSyscall<'_>> {
    let Some(kind) = SyscallKind::from_command(&syscall.cmd) else {
        tracing::trace!(cmd = %syscall.cmd, "no typed view, passing through");
        return Ok(TypedSyscall::Other(syscall));
    };

    let expected = kind.required_args();
    if syscall.args.len() < expected {
        return Err(RepairError::MalformedSyscall {
            command: syscall.cmd.clone(),
            expected,
            found: syscall.args.len(),
        });
    }

    tracing::trace!(cmd = %syscall.cmd, %kind, "classified syscall");
    Ok(match kind {
        SyscallKind::Open => TypedSyscall::Open(Open::new(syscall)),
        SyscallKind::OpenAt => TypedSyscall::OpenAt(OpenAt::new(syscall)),
        SyscallKind::Stat => TypedSyscall::Stat(Stat::new(syscall)),
        SyscallKind::FStat => TypedSyscall::FStat(FStat::new(syscall)),
        SyscallKind::FStatAt => TypedSyscall::FStatAt(FStatAt::new(syscall)),
        SyscallKind::Rename => TypedSyscall::Rename(Rename::new(syscall)),
    })
}

/// Classify every record of a trace, in order. Fails on the first malformed one.
pub fn classify_all(trace: &[Syscall]) -> Result<Vec<TypedSyscall<'_>>> {
    trace.iter().map(classify).collect()
}
