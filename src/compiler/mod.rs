//! DeltaP compiler: lowers declarative resources into effect programs.
//!
//! Each recognized property of a recognized resource type becomes one
//! statement, appended to the unit's program in resource then attribute
//! order. Variables, cross-resource references and nested scopes of the
//! source script are not modeled.

pub mod attributes;

use crate::delta_p::{Expr, Statement};
use crate::labeler::{LabelTable, LabeledUnitBlock};
use crate::names::{NamesDatabase, FILE};

pub use attributes::{CompileContext, ResourceAttributes};

/// Resource types the compiler lowers. Everything else contributes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    File,
}

impl ResourceKind {
    pub fn from_canonical(resource_type: &str) -> Option<Self> {
        match resource_type {
            FILE => Some(Self::File),
            _ => None,
        }
    }
}

/// Canonical properties of a file resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Path,
    Content,
    State,
    Owner,
    Group,
    Mode,
}

impl Property {
    pub fn from_canonical(name: &str) -> Option<Self> {
        match name {
            "path" => Some(Self::Path),
            "content" => Some(Self::Content),
            "state" => Some(Self::State),
            "owner" => Some(Self::Owner),
            "group" => Some(Self::Group),
            "mode" => Some(Self::Mode),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Content => "content",
            Self::State => "state",
            Self::Owner => "owner",
            Self::Group => "group",
            Self::Mode => "mode",
        }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const PRESENT: &str = "present";
const ABSENT: &str = "absent";
const DIRECTORY: &str = "directory";

pub struct DeltaPCompiler;

impl DeltaPCompiler {
    /// Compile every resource of the unit into one statement.
    ///
    /// Attributes the compiler needs but the script never set are sketched
    /// onto their resource (see `ResourceAttributes::create_label_var_pair`),
    /// which mutates `labeled.script` and `labeled.labels`.
    pub fn compile(labeled: &mut LabeledUnitBlock, names: &dyn NamesDatabase) -> Statement {
        let LabeledUnitBlock {
            script,
            tech,
            labels,
        } = labeled;
        let mut ctx = CompileContext::new(names, *tech);
        let mut statement = Statement::Skip;

        for (index, unit) in script.atomic_units.iter_mut().enumerate() {
            let mut attributes = ResourceAttributes::new(unit, index, &ctx);

            match ResourceKind::from_canonical(attributes.resource_type()) {
                Some(ResourceKind::File) => {}
                None => {
                    tracing::debug!(
                        resource = %attributes.unit().name,
                        resource_type = attributes.resource_type(),
                        "resource type not compiled"
                    );
                    continue;
                }
            }

            let properties: Vec<Property> = attributes
                .add_all(&ctx)
                .iter()
                .filter_map(|name| Property::from_canonical(name))
                .collect();

            tracing::debug!(
                resource = %attributes.unit().name,
                properties = properties.len(),
                "compiling file resource"
            );

            for property in properties {
                if let Some(stmt) =
                    Self::compile_property(property, &mut attributes, &mut ctx, labels)
                {
                    statement = Statement::seq(statement, stmt);
                }
            }
        }

        statement
    }

    fn compile_property(
        property: Property,
        attributes: &mut ResourceAttributes<'_>,
        ctx: &mut CompileContext<'_>,
        labels: &mut LabelTable,
    ) -> Option<Statement> {
        match property {
            Property::State => Some(Self::compile_state(attributes, ctx, labels)),
            Property::Owner => {
                let (label, var) = attributes.create_label_var_pair("owner", ctx, labels);
                Some(Statement::let_in(
                    var.clone(),
                    attributes.get_attribute_value("owner"),
                    label,
                    Statement::Chown {
                        path: attributes.get_attribute_value("path"),
                        owner: Expr::Var(var),
                    },
                ))
            }
            Property::Mode => {
                let (label, var) = attributes.create_label_var_pair("mode", ctx, labels);
                Some(Statement::let_in(
                    var.clone(),
                    attributes.get_attribute_value("mode"),
                    label,
                    Statement::Chmod {
                        path: attributes.get_attribute_value("path"),
                        mode: Expr::Var(var),
                    },
                ))
            }
            // no translation rule: read by other rules or outside the repair scope
            Property::Path | Property::Content | Property::Group => None,
        }
    }

    /// `state` selects between creating, removing and making a directory.
    fn compile_state(
        attributes: &mut ResourceAttributes<'_>,
        ctx: &mut CompileContext<'_>,
        labels: &mut LabelTable,
    ) -> Statement {
        let (state_label, state_var) = attributes.create_label_var_pair("state", ctx, labels);
        let (content_label, content_var) =
            attributes.create_label_var_pair("content", ctx, labels);
        let path = attributes.get_attribute_value("path");
        let state_is = |value: &str| Expr::equals(Expr::var(&state_var), Expr::constant(value));

        let create = Statement::let_in(
            content_var.clone(),
            attributes.get_attribute_value("content"),
            content_label,
            Statement::Create {
                path: path.clone(),
                content: Expr::Var(content_var),
            },
        );
        let mkdir_or_skip = Statement::if_then_else(
            state_is(DIRECTORY),
            Statement::Mkdir { path: path.clone() },
            Statement::Skip,
        );
        let remove_or_rest = Statement::if_then_else(
            state_is(ABSENT),
            Statement::Remove { path },
            mkdir_or_skip,
        );

        Statement::let_in(
            state_var.clone(),
            attributes.get_attribute_value("state"),
            state_label,
            Statement::if_then_else(state_is(PRESENT), create, remove_or_rest),
        )
    }
}
