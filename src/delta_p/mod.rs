//! DeltaP: a small effect language for filesystem-mutating programs.
//!
//! The compiler lowers declarative resources into a `Statement`. A verifier
//! interprets it (substituting concrete or candidate values for variables)
//! and compares the predicted effects against an observed syscall trace.

mod display;
mod reduce;

use serde::{Deserialize, Serialize};

/// Identifies a compiled attribute occurrence, source or sketched.
///
/// Labels are unique inside one labeled unit and carry no meaning outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub usize);

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Binary operators of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Eq,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Const(String),
    Var(String),
    BinOp(Op, Box<Expr>, Box<Expr>),
    /// A value that could not be determined from the source.
    Undefined,
}

impl Expr {
    pub fn constant(value: impl Into<String>) -> Self {
        Self::Const(value.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    pub fn equals(lhs: Expr, rhs: Expr) -> Self {
        Self::BinOp(Op::Eq, Box::new(lhs), Box::new(rhs))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    Skip,
    /// `first` always runs before `second`.
    Seq {
        first: Box<Statement>,
        second: Box<Statement>,
    },
    /// Binds `var` to `expr` inside `body` only. Inner lets shadow outer ones.
    Let {
        var: String,
        expr: Expr,
        label: Label,
        body: Box<Statement>,
    },
    If {
        cond: Expr,
        then_branch: Box<Statement>,
        else_branch: Box<Statement>,
    },
    Create {
        path: Expr,
        content: Expr,
    },
    Remove {
        path: Expr,
    },
    Mkdir {
        path: Expr,
    },
    Chown {
        path: Expr,
        owner: Expr,
    },
    Chmod {
        path: Expr,
        mode: Expr,
    },
}

impl Statement {
    pub fn seq(first: Statement, second: Statement) -> Self {
        Self::Seq {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn let_in(var: impl Into<String>, expr: Expr, label: Label, body: Statement) -> Self {
        Self::Let {
            var: var.into(),
            expr,
            label,
            body: Box::new(body),
        }
    }

    pub fn if_then_else(cond: Expr, then_branch: Statement, else_branch: Statement) -> Self {
        Self::If {
            cond,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Top-level statements in execution order, with `Seq` nesting and
    /// `Skip` placeholders removed.
    pub fn sequence(&self) -> Vec<&Statement> {
        let mut out = Vec::new();
        collect_sequence(self, &mut out);
        out
    }

    /// Labels bound by every `Let` in the program, in pre-order.
    pub fn labels(&self) -> Vec<Label> {
        let mut out = Vec::new();
        collect_labels(self, &mut out);
        out
    }
}

fn collect_sequence<'a>(stmt: &'a Statement, out: &mut Vec<&'a Statement>) {
    match stmt {
        Statement::Skip => {}
        Statement::Seq { first, second } => {
            collect_sequence(first, out);
            collect_sequence(second, out);
        }
        other => out.push(other),
    }
}

fn collect_labels(stmt: &Statement, out: &mut Vec<Label>) {
    match stmt {
        Statement::Seq { first, second } => {
            collect_labels(first, out);
            collect_labels(second, out);
        }
        Statement::Let { label, body, .. } => {
            out.push(*label);
            collect_labels(body, out);
        }
        Statement::If {
            then_branch,
            else_branch,
            ..
        } => {
            collect_labels(then_branch, out);
            collect_labels(else_branch, out);
        }
        Statement::Skip
        | Statement::Create { .. }
        | Statement::Remove { .. }
        | Statement::Mkdir { .. }
        | Statement::Chown { .. }
        | Statement::Chmod { .. } => {}
    }
}
