use std::fmt;

use super::{Expr, Op, Statement};

const INDENT: &str = "  ";

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "=="),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(value) => write!(f, "{value:?}"),
            Self::Var(name) => write!(f, "{name}"),
            Self::BinOp(op, lhs, rhs) => write!(f, "({lhs} {op} {rhs})"),
            Self::Undefined => write!(f, "undef"),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statement(f, self, 0)
    }
}

fn write_statement(f: &mut fmt::Formatter<'_>, stmt: &Statement, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    match stmt {
        Statement::Skip => writeln!(f, "{pad}skip"),
        Statement::Seq { first, second } => {
            write_statement(f, first, depth)?;
            write_statement(f, second, depth)
        }
        Statement::Let {
            var,
            expr,
            label,
            body,
        } => {
            writeln!(f, "{pad}let {var} = {expr} @{label} in")?;
            write_statement(f, body, depth + 1)
        }
        Statement::If {
            cond,
            then_branch,
            else_branch,
        } => {
            writeln!(f, "{pad}if {cond} then")?;
            write_statement(f, then_branch, depth + 1)?;
            writeln!(f, "{pad}else")?;
            write_statement(f, else_branch, depth + 1)
        }
        Statement::Create { path, content } => writeln!(f, "{pad}create({path}, {content})"),
        Statement::Remove { path } => writeln!(f, "{pad}rm({path})"),
        Statement::Mkdir { path } => writeln!(f, "{pad}mkdir({path})"),
        Statement::Chown { path, owner } => writeln!(f, "{pad}chown({path}, {owner})"),
        Statement::Chmod { path, mode } => writeln!(f, "{pad}chmod({path}, {mode})"),
    }
}
