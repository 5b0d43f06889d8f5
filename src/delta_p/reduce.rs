//! Constant propagation over DeltaP programs.
//!
//! Reduction substitutes let-bound constants into their bodies, decides
//! comparisons between constants and prunes the untaken branch. Anything that
//! depends on a free variable or on `Undefined` stays symbolic.

use std::collections::HashMap;

use super::{Expr, Op, Statement};

/// Variables in scope. `None` marks a binding whose value is not constant,
/// which still shadows any outer constant of the same name.
type Scope = HashMap<String, Option<Expr>>;

impl Statement {
    /// Partially evaluate the program.
    pub fn reduce(&self) -> Statement {
        reduce_statement(self, &mut Scope::new())
    }
}

fn reduce_expr(expr: &Expr, scope: &Scope) -> Expr {
    match expr {
        Expr::Const(_) | Expr::Undefined => expr.clone(),
        Expr::Var(name) => match scope.get(name) {
            Some(Some(value)) => value.clone(),
            _ => expr.clone(),
        },
        Expr::BinOp(op, lhs, rhs) => Expr::BinOp(
            *op,
            Box::new(reduce_expr(lhs, scope)),
            Box::new(reduce_expr(rhs, scope)),
        ),
    }
}

fn decide(cond: &Expr) -> Option<bool> {
    match cond {
        Expr::BinOp(Op::Eq, lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
            (Expr::Const(a), Expr::Const(b)) => Some(a == b),
            _ => None,
        },
        _ => None,
    }
}

fn reduce_statement(stmt: &Statement, scope: &mut Scope) -> Statement {
    match stmt {
        Statement::Skip => Statement::Skip,
        Statement::Seq { first, second } => {
            let first = reduce_statement(first, scope);
            let second = reduce_statement(second, scope);
            match (first, second) {
                (Statement::Skip, rest) | (rest, Statement::Skip) => rest,
                (first, second) => Statement::seq(first, second),
            }
        }
        Statement::Let {
            var,
            expr,
            label,
            body,
        } => {
            let value = reduce_expr(expr, scope);
            let binding = matches!(value, Expr::Const(_)).then(|| value.clone());
            let outer = scope.insert(var.clone(), binding.clone());
            let body = reduce_statement(body, scope);
            match outer {
                Some(previous) => scope.insert(var.clone(), previous),
                None => scope.remove(var),
            };
            if binding.is_some() {
                body
            } else {
                Statement::let_in(var.clone(), value, *label, body)
            }
        }
        Statement::If {
            cond,
            then_branch,
            else_branch,
        } => {
            let cond = reduce_expr(cond, scope);
            match decide(&cond) {
                Some(true) => reduce_statement(then_branch, scope),
                Some(false) => reduce_statement(else_branch, scope),
                None => Statement::if_then_else(
                    cond,
                    reduce_statement(then_branch, scope),
                    reduce_statement(else_branch, scope),
                ),
            }
        }
        Statement::Create { path, content } => Statement::Create {
            path: reduce_expr(path, scope),
            content: reduce_expr(content, scope),
        },
        Statement::Remove { path } => Statement::Remove {
            path: reduce_expr(path, scope),
        },
        Statement::Mkdir { path } => Statement::Mkdir {
            path: reduce_expr(path, scope),
        },
        Statement::Chown { path, owner } => Statement::Chown {
            path: reduce_expr(path, scope),
            owner: reduce_expr(owner, scope),
        },
        Statement::Chmod { path, mode } => Statement::Chmod {
            path: reduce_expr(path, scope),
            mode: reduce_expr(mode, scope),
        },
    }
}
