//! Syntax tree consumed by the writers.
//!
//! The tree is produced by an external front end that has already resolved
//! every reference: locals, instance variables and constants arrive as
//! distinct node kinds. Writers only read it.
//!
//! # Serialized form
//!
//! Nodes serialize as JSON objects tagged by `"type"`:
//!
//! ```json
//! {"type": "local_var_write", "name": "count",
//!  "rhs": {"type": "call", "receiver": {"type": "local_var_read", "name": "count"},
//!          "method_name": "+", "positional_args": [{"type": "integer_lit", "value": 1}]}}
//! ```
//!
//! Optional fields and empty lists may be omitted.

use serde::{Deserialize, Serialize};

/// A `::`-separated constant path such as `Foo::Bar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstPath {
    pub segments: Vec<String>,
}

impl ConstPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Single-segment path.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// The path as written in source, e.g. `Foo::Bar`.
    pub fn joined(&self) -> String {
        self.segments.join("::")
    }
}

/// One node of the parsed program.
///
/// `Nil` is the explicit "no value" sentinel. It is distinct from an absent
/// optional field: `Return { argument: Nil }` is a bare `return`, while an
/// `If` with `else_branch: None` has no else at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyntaxNode {
    /// Method call, operator application, indexing, or block call.
    Call {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        receiver: Option<Box<SyntaxNode>>,
        method_name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        positional_args: Vec<SyntaxNode>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        block_params: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block_body: Option<Box<SyntaxNode>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block_forward: Option<Box<SyntaxNode>>,
    },

    /// `def name(params) ... end`
    Definition {
        method_name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        required_params: Vec<String>,
        body: Box<SyntaxNode>,
    },

    If {
        condition: Box<SyntaxNode>,
        then_branch: Box<SyntaxNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        else_branch: Option<Box<SyntaxNode>>,
    },

    Unless {
        condition: Box<SyntaxNode>,
        then_branch: Box<SyntaxNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        else_branch: Option<Box<SyntaxNode>>,
    },

    /// `clauses[i]` is the body run when `whens[i]` matches.
    Case {
        pivot: Box<SyntaxNode>,
        clauses: Vec<SyntaxNode>,
        whens: Vec<SyntaxNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        else_clause: Option<Box<SyntaxNode>>,
    },

    Return {
        argument: Box<SyntaxNode>,
    },

    Yield {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        positional_args: Vec<SyntaxNode>,
    },

    BooleanLiteral {
        value: bool,
    },

    ClassDef {
        name_path: ConstPath,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        superclass_path: Option<ConstPath>,
        body: Box<SyntaxNode>,
    },

    ModuleDef {
        name_path: ConstPath,
        body: Box<SyntaxNode>,
    },

    SelfRef,

    LogicalAnd {
        lhs: Box<SyntaxNode>,
        rhs: Box<SyntaxNode>,
    },

    LogicalOr {
        lhs: Box<SyntaxNode>,
        rhs: Box<SyntaxNode>,
    },

    LocalVarRead {
        name: String,
    },

    LocalVarWrite {
        name: String,
        rhs: Box<SyntaxNode>,
    },

    /// `name` carries the sigil, e.g. `@count`.
    InstanceVarRead {
        name: String,
    },

    InstanceVarWrite {
        name: String,
        rhs: Box<SyntaxNode>,
    },

    ConstantRead {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base: Option<Box<SyntaxNode>>,
        name: String,
    },

    ConstantWrite {
        path: Vec<String>,
        rhs: Box<SyntaxNode>,
    },

    StringLit {
        value: String,
    },

    IntegerLit {
        value: i64,
    },

    ArrayLit {
        #[serde(default)]
        elements: Vec<SyntaxNode>,
    },

    SymbolLit {
        value: String,
    },

    /// Parallel key/value lists of equal length.
    HashLit {
        #[serde(default)]
        keys: Vec<SyntaxNode>,
        #[serde(default)]
        values: Vec<SyntaxNode>,
    },

    /// `StringLit` parts are literal fragments, anything else is embedded code.
    InterpolatedString {
        parts: Vec<SyntaxNode>,
    },

    InterpolatedSymbol {
        parts: Vec<SyntaxNode>,
    },

    IncludeDirective {
        args: Vec<SyntaxNode>,
    },

    Nil,

    StatementBlock {
        #[serde(default)]
        statements: Vec<SyntaxNode>,
    },

    /// A node kind the front end could not map onto this tree.
    Opaque {
        kind: String,
    },
}

impl SyntaxNode {
    /// Snake-case name of the node kind, matching the serialized tag.
    pub fn kind(&self) -> &'static str {
        match self {
            SyntaxNode::Call { .. } => "call",
            SyntaxNode::Definition { .. } => "definition",
            SyntaxNode::If { .. } => "if",
            SyntaxNode::Unless { .. } => "unless",
            SyntaxNode::Case { .. } => "case",
            SyntaxNode::Return { .. } => "return",
            SyntaxNode::Yield { .. } => "yield",
            SyntaxNode::BooleanLiteral { .. } => "boolean_literal",
            SyntaxNode::ClassDef { .. } => "class_def",
            SyntaxNode::ModuleDef { .. } => "module_def",
            SyntaxNode::SelfRef => "self_ref",
            SyntaxNode::LogicalAnd { .. } => "logical_and",
            SyntaxNode::LogicalOr { .. } => "logical_or",
            SyntaxNode::LocalVarRead { .. } => "local_var_read",
            SyntaxNode::LocalVarWrite { .. } => "local_var_write",
            SyntaxNode::InstanceVarRead { .. } => "instance_var_read",
            SyntaxNode::InstanceVarWrite { .. } => "instance_var_write",
            SyntaxNode::ConstantRead { .. } => "constant_read",
            SyntaxNode::ConstantWrite { .. } => "constant_write",
            SyntaxNode::StringLit { .. } => "string_lit",
            SyntaxNode::IntegerLit { .. } => "integer_lit",
            SyntaxNode::ArrayLit { .. } => "array_lit",
            SyntaxNode::SymbolLit { .. } => "symbol_lit",
            SyntaxNode::HashLit { .. } => "hash_lit",
            SyntaxNode::InterpolatedString { .. } => "interpolated_string",
            SyntaxNode::InterpolatedSymbol { .. } => "interpolated_symbol",
            SyntaxNode::IncludeDirective { .. } => "include_directive",
            SyntaxNode::Nil => "nil",
            SyntaxNode::StatementBlock { .. } => "statement_block",
            SyntaxNode::Opaque { .. } => "opaque",
        }
    }

    /// Statements of a block; any other node is a block of one.
    pub fn statements(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::StatementBlock { statements } => statements,
            other => std::slice::from_ref(other),
        }
    }

    // Builders

    pub fn block(statements: Vec<SyntaxNode>) -> Self {
        SyntaxNode::StatementBlock { statements }
    }

    /// Call with an explicit receiver.
    pub fn call(receiver: SyntaxNode, method: impl Into<String>, args: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Call {
            receiver: Some(Box::new(receiver)),
            method_name: method.into(),
            positional_args: args,
            block_params: Vec::new(),
            block_body: None,
            block_forward: None,
        }
    }

    /// Receiverless call such as `puts(x)`.
    pub fn send(method: impl Into<String>, args: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Call {
            receiver: None,
            method_name: method.into(),
            positional_args: args,
            block_params: Vec::new(),
            block_body: None,
            block_forward: None,
        }
    }

    /// Binary operator call: `lhs op rhs`.
    pub fn infix(lhs: SyntaxNode, op: impl Into<String>, rhs: SyntaxNode) -> Self {
        Self::call(lhs, op, vec![rhs])
    }

    /// `!operand`
    pub fn not(operand: SyntaxNode) -> Self {
        Self::call(operand, "!", Vec::new())
    }

    /// Attach a `{ |params| body }` block to a call. Other nodes are returned unchanged.
    pub fn with_block(self, params: Vec<String>, body: SyntaxNode) -> Self {
        match self {
            SyntaxNode::Call {
                receiver,
                method_name,
                positional_args,
                block_forward,
                ..
            } => SyntaxNode::Call {
                receiver,
                method_name,
                positional_args,
                block_params: params,
                block_body: Some(Box::new(body)),
                block_forward,
            },
            other => other,
        }
    }

    /// Attach a forwarded `&block` argument to a call. Other nodes are returned unchanged.
    pub fn with_block_forward(self, block: SyntaxNode) -> Self {
        match self {
            SyntaxNode::Call {
                receiver,
                method_name,
                positional_args,
                block_params,
                block_body,
                ..
            } => SyntaxNode::Call {
                receiver,
                method_name,
                positional_args,
                block_params,
                block_body,
                block_forward: Some(Box::new(block)),
            },
            other => other,
        }
    }

    pub fn def(name: impl Into<String>, params: Vec<String>, body: SyntaxNode) -> Self {
        SyntaxNode::Definition {
            method_name: name.into(),
            required_params: params,
            body: Box::new(body),
        }
    }

    pub fn if_node(condition: SyntaxNode, then_branch: SyntaxNode, else_branch: Option<SyntaxNode>) -> Self {
        SyntaxNode::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn unless(condition: SyntaxNode, then_branch: SyntaxNode, else_branch: Option<SyntaxNode>) -> Self {
        SyntaxNode::Unless {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn ret(argument: SyntaxNode) -> Self {
        SyntaxNode::Return {
            argument: Box::new(argument),
        }
    }

    pub fn and(lhs: SyntaxNode, rhs: SyntaxNode) -> Self {
        SyntaxNode::LogicalAnd {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn or(lhs: SyntaxNode, rhs: SyntaxNode) -> Self {
        SyntaxNode::LogicalOr {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn lvar(name: impl Into<String>) -> Self {
        SyntaxNode::LocalVarRead { name: name.into() }
    }

    pub fn lasgn(name: impl Into<String>, rhs: SyntaxNode) -> Self {
        SyntaxNode::LocalVarWrite {
            name: name.into(),
            rhs: Box::new(rhs),
        }
    }

    pub fn ivar(name: impl Into<String>) -> Self {
        SyntaxNode::InstanceVarRead { name: name.into() }
    }

    pub fn iasgn(name: impl Into<String>, rhs: SyntaxNode) -> Self {
        SyntaxNode::InstanceVarWrite {
            name: name.into(),
            rhs: Box::new(rhs),
        }
    }

    pub fn constant(name: impl Into<String>) -> Self {
        SyntaxNode::ConstantRead {
            base: None,
            name: name.into(),
        }
    }

    pub fn int(value: i64) -> Self {
        SyntaxNode::IntegerLit { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        SyntaxNode::StringLit {
            value: value.into(),
        }
    }

    pub fn sym(value: impl Into<String>) -> Self {
        SyntaxNode::SymbolLit {
            value: value.into(),
        }
    }

    pub fn bool(value: bool) -> Self {
        SyntaxNode::BooleanLiteral { value }
    }

    pub fn array(elements: Vec<SyntaxNode>) -> Self {
        SyntaxNode::ArrayLit { elements }
    }

    pub fn hash(pairs: Vec<(SyntaxNode, SyntaxNode)>) -> Self {
        let (keys, values) = pairs.into_iter().unzip();
        SyntaxNode::HashLit { keys, values }
    }
}
