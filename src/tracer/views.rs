//! Field projections over positional syscall arguments.
//!
//! Views are only built by `classify`, after the argument count has been
//! checked against `SyscallKind::required_args`, so the fixed offsets below
//! are always in range.

use super::{Syscall, SyscallArg};

macro_rules! view {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name<'a> {
            syscall: &'a Syscall,
        }

        impl<'a> $name<'a> {
            pub(super) fn new(syscall: &'a Syscall) -> Self {
                Self { syscall }
            }

            pub fn syscall(&self) -> &'a Syscall {
                self.syscall
            }

            fn arg(&self, index: usize) -> &'a SyscallArg {
                &self.syscall.args[index]
            }
        }
    };
}

view!(
    /// `open(path, flags[, mode])`
    Open
);
view!(
    /// `openat(dirfd, path, flags[, mode])`
    OpenAt
);
view!(
    /// `stat(path, statbuf)` and `lstat`
    Stat
);
view!(
    /// `fstat(fd, statbuf)`
    FStat
);
view!(
    /// `fstatat(dirfd, path, statbuf, flags)` and its aliases
    FStatAt
);
view!(
    /// `rename(src, dst)`
    Rename
);

impl<'a> Open<'a> {
    pub fn path(&self) -> &'a SyscallArg {
        self.arg(0)
    }

    pub fn flags(&self) -> &'a SyscallArg {
        self.arg(1)
    }

    /// Only present when the call passed an explicit mode.
    pub fn mode(&self) -> Option<&'a SyscallArg> {
        self.syscall.args.get(2)
    }
}

impl<'a> OpenAt<'a> {
    pub fn dirfd(&self) -> &'a SyscallArg {
        self.arg(0)
    }

    pub fn path(&self) -> &'a SyscallArg {
        self.arg(1)
    }

    pub fn flags(&self) -> &'a SyscallArg {
        self.arg(2)
    }

    pub fn mode(&self) -> Option<&'a SyscallArg> {
        self.syscall.args.get(3)
    }
}

impl<'a> Stat<'a> {
    pub fn path(&self) -> &'a SyscallArg {
        self.arg(0)
    }

    pub fn flags(&self) -> &'a SyscallArg {
        self.arg(1)
    }
}

impl<'a> FStat<'a> {
    pub fn fd(&self) -> &'a SyscallArg {
        self.arg(0)
    }

    pub fn flags(&self) -> &'a SyscallArg {
        self.arg(1)
    }
}

impl<'a> FStatAt<'a> {
    pub fn dirfd(&self) -> &'a SyscallArg {
        self.arg(0)
    }

    pub fn path(&self) -> &'a SyscallArg {
        self.arg(1)
    }

    pub fn flags(&self) -> &'a SyscallArg {
        self.arg(2)
    }

    /// `AT_*` flags, either a single name or an OR-ed list.
    pub fn ored_flags(&self) -> &'a SyscallArg {
        self.arg(3)
    }
}

impl<'a> Rename<'a> {
    pub fn src(&self) -> &'a SyscallArg {
        self.arg(0)
    }

    pub fn dst(&self) -> &'a SyscallArg {
        self.arg(1)
    }
}
