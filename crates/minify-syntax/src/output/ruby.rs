//! Ruby writer for the syntax tree.
//!
//! Regenerates compacted Ruby source. Every node kind has one fixed rule;
//! the `RenderConfig` picks the statement separator and the literal style
//! for the whole pass.

use crate::alias::AliasTable;
use crate::classify::*;
use crate::config::{LiteralStyle, RenderConfig};
use crate::ir::SyntaxNode;
use crate::traits::{RenderError, Writer};
use std::fmt::Write;

/// Writer trait adapter carrying a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RubyWriterImpl {
    config: RenderConfig,
}

impl RubyWriterImpl {
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }
}

impl Writer for RubyWriterImpl {
    fn language(&self) -> &'static str {
        "ruby"
    }

    fn extension(&self) -> &'static str {
        "min.rb"
    }

    fn write(&self, program: &SyntaxNode) -> Result<String, RenderError> {
        render_program(program, self.config)
    }
}

/// Render a whole program. Top-level statements that render empty are
/// dropped and the rest are joined with newlines.
///
/// Trees nested deeper than [`MAX_DEPTH`] nodes fail with
/// `UnsupportedConstruct` instead of exhausting the stack.
pub fn render_program(root: &SyntaxNode, config: RenderConfig) -> Result<String, RenderError> {
    RubyWriter::emit(root, config)
}

/// Render a single node.
pub fn render_node(node: &SyntaxNode, config: RenderConfig) -> Result<String, RenderError> {
    let mut writer = RubyWriter::new(config);
    writer.write_node(node)?;
    Ok(writer.output)
}

/// Render a statement block, joining statements with the configured separator.
pub fn render_statements(block: &SyntaxNode, config: RenderConfig) -> Result<String, RenderError> {
    let mut writer = RubyWriter::new(config);
    writer.write_statements(block)?;
    Ok(writer.output)
}

/// Deepest node nesting the writer descends into. Trees read from JSON
/// never get close: serde_json stops at 128 levels of objects and arrays.
pub const MAX_DEPTH: usize = 128;

/// Emits a syntax tree as compacted Ruby source.
pub struct RubyWriter {
    output: String,
    config: RenderConfig,
    aliases: AliasTable,
    depth: usize,
}

impl RubyWriter {
    pub fn new(config: RenderConfig) -> Self {
        Self::with_aliases(config, AliasTable::new())
    }

    pub fn with_aliases(config: RenderConfig, aliases: AliasTable) -> Self {
        Self {
            output: String::new(),
            config,
            aliases,
            depth: 0,
        }
    }

    /// Emit a program to Ruby source.
    pub fn emit(program: &SyntaxNode, config: RenderConfig) -> Result<String, RenderError> {
        let mut writer = Self::new(config);
        writer.write_program(program)?;
        Ok(writer.output)
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut AliasTable {
        &mut self.aliases
    }

    fn style(&self) -> LiteralStyle {
        self.config.literal_style
    }

    fn push_separator(&mut self) {
        self.output.push_str(self.config.separator.as_str());
    }

    fn write_program(&mut self, program: &SyntaxNode) -> Result<(), RenderError> {
        let statements = program.statements();
        tracing::debug!(
            statements = statements.len(),
            separator = %self.config.separator,
            style = %self.config.literal_style,
            "rendering program"
        );

        let mut written = 0usize;
        for (index, stmt) in statements.iter().enumerate() {
            let mark = self.output.len();
            if written > 0 {
                self.output.push('\n');
            }
            let start = self.output.len();
            self.write_node(stmt).map_err(|err| err.at_statement(index))?;
            if self.output.len() == start {
                self.output.truncate(mark);
                tracing::trace!(index, kind = stmt.kind(), "dropped empty statement");
            } else {
                written += 1;
            }
        }
        Ok(())
    }

    fn write_statements(&mut self, body: &SyntaxNode) -> Result<(), RenderError> {
        let statements = body.statements();
        if statements.is_empty() {
            self.output.push_str(self.style().empty_block());
            return Ok(());
        }
        for (i, stmt) in statements.iter().enumerate() {
            if i > 0 {
                self.push_separator();
            }
            self.write_node(stmt)?;
        }
        Ok(())
    }

    fn write_node(&mut self, node: &SyntaxNode) -> Result<(), RenderError> {
        if self.depth >= MAX_DEPTH {
            return Err(RenderError::unsupported(format!(
                "{} nested deeper than {MAX_DEPTH} levels",
                node.kind()
            )));
        }
        self.depth += 1;
        let result = self.write_kind(node);
        self.depth -= 1;
        result
    }

    fn write_kind(&mut self, node: &SyntaxNode) -> Result<(), RenderError> {
        match node {
            SyntaxNode::Call { .. } => self.write_call(node)?,

            SyntaxNode::Definition {
                method_name,
                required_params,
                body,
            } => {
                self.output.push_str("def ");
                self.output.push_str(method_name);
                if !required_params.is_empty() {
                    self.output.push('(');
                    self.output.push_str(&required_params.join(","));
                    self.output.push(')');
                }
                self.write_keyword_body(body)?;
            }

            SyntaxNode::If {
                condition,
                then_branch,
                else_branch,
            } => self.write_conditional(condition, false, then_branch, else_branch.as_deref())?,

            SyntaxNode::Unless {
                condition,
                then_branch,
                else_branch,
            } => self.write_conditional(condition, true, then_branch, else_branch.as_deref())?,

            SyntaxNode::Case {
                pivot,
                clauses,
                whens,
                else_clause,
            } => {
                if clauses.len() != whens.len() {
                    return Err(RenderError::unsupported(format!(
                        "case ({} clauses, {} whens)",
                        clauses.len(),
                        whens.len()
                    )));
                }
                self.output.push_str("case");
                if !matches!(pivot.as_ref(), SyntaxNode::Nil) {
                    self.output.push(' ');
                    self.write_operand(pivot, PREC_ASSIGN)?;
                }
                self.push_separator();
                for (clause, when) in clauses.iter().zip(whens) {
                    self.output.push_str("when ");
                    self.write_operand(when, PREC_ASSIGN)?;
                    self.push_separator();
                    self.write_statements(clause)?;
                    self.push_separator();
                }
                if let Some(else_clause) = else_clause {
                    self.output.push_str("else");
                    self.push_separator();
                    self.write_statements(else_clause)?;
                    self.push_separator();
                }
                self.output.push_str("end");
            }

            SyntaxNode::Return { argument } => match argument.as_ref() {
                SyntaxNode::Nil => self.output.push_str(self.style().no_value()),
                argument => self.write_node(argument)?,
            },

            SyntaxNode::Yield { positional_args } => {
                self.output.push_str("yield");
                if !positional_args.is_empty() {
                    self.output.push(' ');
                    self.write_args(positional_args)?;
                }
            }

            SyntaxNode::BooleanLiteral { value } => {
                self.output.push_str(self.style().boolean(*value));
            }

            SyntaxNode::ClassDef {
                name_path,
                superclass_path,
                body,
            } => {
                self.output.push_str("class ");
                self.output.push_str(&name_path.joined());
                if let Some(superclass) = superclass_path {
                    self.output.push('<');
                    self.output.push_str(&superclass.joined());
                }
                self.write_keyword_body(body)?;
            }

            SyntaxNode::ModuleDef { name_path, body } => {
                self.output.push_str("module ");
                self.output.push_str(&name_path.joined());
                self.write_keyword_body(body)?;
            }

            SyntaxNode::SelfRef => self.output.push_str("self"),

            SyntaxNode::LogicalAnd { lhs, rhs } => {
                self.write_operand(lhs, PREC_AND)?;
                self.output.push_str("&&");
                self.write_operand(rhs, PREC_AND + 1)?;
            }

            SyntaxNode::LogicalOr { lhs, rhs } => {
                self.write_operand(lhs, PREC_OR)?;
                self.output.push_str("||");
                self.write_operand(rhs, PREC_OR + 1)?;
            }

            SyntaxNode::LocalVarRead { name } | SyntaxNode::InstanceVarRead { name } => {
                self.output.push_str(name);
            }

            SyntaxNode::LocalVarWrite { name, rhs } | SyntaxNode::InstanceVarWrite { name, rhs } => {
                self.write_assignment(node, name, rhs)?;
            }

            SyntaxNode::ConstantRead { base, name } => {
                if let Some(base) = base {
                    self.write_operand(base, PREC_PRIMARY)?;
                    self.output.push_str("::");
                }
                self.output.push_str(name);
            }

            SyntaxNode::ConstantWrite { path, rhs } => {
                self.output.push_str(&path.join("::"));
                self.output.push('=');
                self.write_operand(rhs, PREC_ASSIGN)?;
            }

            SyntaxNode::StringLit { value } => {
                self.output.push('"');
                escape_into(&mut self.output, value);
                self.output.push('"');
            }

            SyntaxNode::IntegerLit { value } => {
                let _ = write!(self.output, "{value}");
            }

            SyntaxNode::ArrayLit { elements } => {
                self.output.push('[');
                self.write_args(elements)?;
                self.output.push(']');
            }

            SyntaxNode::SymbolLit { value } => {
                self.output.push(':');
                if is_plain_symbol(value) {
                    self.output.push_str(value);
                } else {
                    self.output.push('"');
                    escape_into(&mut self.output, value);
                    self.output.push('"');
                }
            }

            SyntaxNode::HashLit { keys, values } => {
                if keys.len() != values.len() {
                    return Err(RenderError::unsupported(format!(
                        "hash_lit ({} keys, {} values)",
                        keys.len(),
                        values.len()
                    )));
                }
                self.output.push('{');
                for (i, (key, value)) in keys.iter().zip(values).enumerate() {
                    if i > 0 {
                        self.output.push(',');
                    }
                    self.write_operand(key, PREC_ASSIGN)?;
                    self.output.push_str("=>");
                    self.write_operand(value, PREC_ASSIGN)?;
                }
                self.output.push('}');
            }

            SyntaxNode::InterpolatedString { parts } => {
                self.output.push('"');
                self.write_interpolated_parts(parts)?;
                self.output.push('"');
            }

            SyntaxNode::InterpolatedSymbol { parts } => {
                self.output.push_str(":\"");
                self.write_interpolated_parts(parts)?;
                self.output.push('"');
            }

            SyntaxNode::IncludeDirective { args } => {
                let Some(module) = args.first() else {
                    return Err(RenderError::unsupported("include_directive without arguments"));
                };
                self.output.push_str("include ");
                self.write_operand(module, PREC_ASSIGN)?;
            }

            SyntaxNode::Nil => {}

            SyntaxNode::StatementBlock { .. } => self.write_statements(node)?,

            SyntaxNode::Opaque { kind } => return Err(RenderError::unsupported(kind.clone())),
        }
        Ok(())
    }

    /// `<sep><body><sep>end` after a `def`/`class`/`module` header.
    fn write_keyword_body(&mut self, body: &SyntaxNode) -> Result<(), RenderError> {
        self.push_separator();
        self.write_statements(body)?;
        self.push_separator();
        self.output.push_str("end");
        Ok(())
    }

    fn write_call(&mut self, node: &SyntaxNode) -> Result<(), RenderError> {
        let SyntaxNode::Call {
            receiver,
            method_name,
            positional_args,
            block_params,
            block_body,
            block_forward,
        } = node
        else {
            return Err(RenderError::unsupported(node.kind()));
        };
        let name = method_name.as_str();

        if is_infix_operator(name) {
            let (Some(lhs), [rhs]) = (receiver.as_deref(), positional_args.as_slice()) else {
                return Err(RenderError::unsupported(format!(
                    "call `{name}` without two operands"
                )));
            };
            let prec = infix_precedence(name).unwrap_or(PREC_EQUALITY);
            let (left_min, right_min) = if name == "**" {
                (prec + 1, prec)
            } else if is_left_associative(name) {
                (prec, prec + 1)
            } else {
                (prec + 1, prec + 1)
            };
            self.write_operand(lhs, left_min)?;
            self.output.push_str(name);
            self.write_operand(rhs, right_min)?;
        } else if has_trailing_block(node) {
            self.write_call_head(receiver.as_deref(), name)?;
            if let Some(body) = block_body {
                if !positional_args.is_empty() {
                    self.output.push('(');
                    self.write_args(positional_args)?;
                    self.output.push(')');
                }
                self.output.push_str("{|");
                self.output.push_str(&block_params.join(","));
                self.output.push('|');
                if !is_empty_body(body) {
                    self.write_statements(body)?;
                }
                self.output.push('}');
            } else if let Some(block) = block_forward {
                self.output.push('(');
                if !positional_args.is_empty() {
                    self.write_args(positional_args)?;
                    self.output.push(',');
                }
                self.output.push('&');
                self.write_operand(block, PREC_ASSIGN)?;
                self.output.push(')');
            }
        } else if is_indexing_read(name) {
            let Some(target) = receiver else {
                return Err(RenderError::unsupported("call `[]` without receiver"));
            };
            self.write_operand(target, PREC_PRIMARY)?;
            self.output.push('[');
            self.write_args(positional_args)?;
            self.output.push(']');
        } else if is_indexing_write(name) {
            let (Some(target), [index @ .., value]) = (receiver.as_deref(), positional_args.as_slice())
            else {
                return Err(RenderError::unsupported("call `[]=` without receiver or value"));
            };
            if index.is_empty() {
                return Err(RenderError::unsupported("call `[]=` without index"));
            }
            self.write_operand(target, PREC_PRIMARY)?;
            self.output.push('[');
            self.write_args(index)?;
            self.output.push_str("]=");
            self.write_operand(value, PREC_ASSIGN)?;
        } else if is_unary_not(name) {
            let Some(operand) = receiver else {
                return Err(RenderError::unsupported("call `!` without receiver"));
            };
            self.output.push('!');
            self.write_operand(operand, PREC_UNARY)?;
        } else {
            self.write_call_head(receiver.as_deref(), name)?;
            if !positional_args.is_empty() {
                self.output.push('(');
                self.write_args(positional_args)?;
                self.output.push(')');
            }
        }
        Ok(())
    }

    /// `<receiver>.<name>`, or just `<name>` without a receiver.
    fn write_call_head(&mut self, receiver: Option<&SyntaxNode>, name: &str) -> Result<(), RenderError> {
        if let Some(receiver) = receiver {
            self.write_operand(receiver, PREC_PRIMARY)?;
            self.output.push('.');
        }
        self.output.push_str(name);
        Ok(())
    }

    fn write_args(&mut self, args: &[SyntaxNode]) -> Result<(), RenderError> {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_operand(arg, PREC_ASSIGN)?;
        }
        Ok(())
    }

    fn write_conditional(
        &mut self,
        condition: &SyntaxNode,
        negate: bool,
        then_branch: &SyntaxNode,
        else_branch: Option<&SyntaxNode>,
    ) -> Result<(), RenderError> {
        let style = self.style();
        if style == LiteralStyle::Verbose && else_branch.is_none() {
            self.write_operand(then_branch, PREC_ASSIGN)?;
            self.output.push_str(" if ");
            return self.write_condition(condition, negate, PREC_ASSIGN);
        }

        self.write_condition(condition, negate, PREC_TERNARY + 1)?;
        self.output.push_str(" ? ");
        self.write_operand(then_branch, PREC_TERNARY)?;
        // `work:x` would lex as a call passing the symbol `:x`.
        self.output.push_str(" : ");
        match else_branch {
            Some(else_branch) => self.write_operand(else_branch, PREC_TERNARY)?,
            None => self.output.push_str(style.no_value()),
        }
        Ok(())
    }

    fn write_condition(&mut self, condition: &SyntaxNode, negate: bool, min: u8) -> Result<(), RenderError> {
        if negate {
            self.output.push_str("!(");
            self.write_node(condition)?;
            self.output.push(')');
            Ok(())
        } else {
            self.write_operand(condition, min)
        }
    }

    fn write_assignment(&mut self, write: &SyntaxNode, name: &str, rhs: &SyntaxNode) -> Result<(), RenderError> {
        self.output.push_str(name);

        let compound = match rhs {
            SyntaxNode::LogicalAnd { rhs: value, .. } => Some(("&&", value.as_ref())),
            SyntaxNode::LogicalOr { rhs: value, .. } => Some(("||", value.as_ref())),
            SyntaxNode::Call {
                method_name,
                positional_args,
                ..
            } => positional_args.first().map(|value| (method_name.as_str(), value)),
            _ => None,
        }
        .filter(|_| is_compound_self_assignment(write, self.style()));

        match compound {
            Some((op, value)) => {
                self.output.push_str(op);
                self.output.push('=');
                self.write_operand(value, PREC_ASSIGN)
            }
            None => {
                self.output.push('=');
                self.write_operand(rhs, PREC_ASSIGN)
            }
        }
    }

    fn write_interpolated_parts(&mut self, parts: &[SyntaxNode]) -> Result<(), RenderError> {
        for part in parts {
            match part {
                SyntaxNode::StringLit { value } => escape_into(&mut self.output, value),
                embedded => {
                    self.output.push_str("#{");
                    self.write_statements(embedded)?;
                    self.output.push('}');
                }
            }
        }
        Ok(())
    }

    /// Write `node`, parenthesized when it binds more loosely than `min`.
    fn write_operand(&mut self, node: &SyntaxNode, min: u8) -> Result<(), RenderError> {
        if self.precedence(node) < min {
            self.output.push('(');
            self.write_node(node)?;
            self.output.push(')');
            Ok(())
        } else {
            self.write_node(node)
        }
    }

    /// How tightly the rendered form of `node` binds.
    fn precedence(&self, node: &SyntaxNode) -> u8 {
        let style = self.style();
        let node = rendered_node(node);
        match node {
            SyntaxNode::Call { method_name, .. } => {
                if is_infix_operator(method_name) {
                    infix_precedence(method_name).unwrap_or(PREC_EQUALITY)
                } else if is_unary_not(method_name) && !has_trailing_block(node) {
                    PREC_UNARY
                } else if is_indexing_write(method_name) && !has_trailing_block(node) {
                    PREC_ASSIGN
                } else {
                    PREC_PRIMARY
                }
            }
            SyntaxNode::If { else_branch, .. } | SyntaxNode::Unless { else_branch, .. } => {
                if style == LiteralStyle::Verbose && else_branch.is_none() {
                    PREC_MODIFIER
                } else {
                    PREC_TERNARY
                }
            }
            SyntaxNode::LocalVarWrite { .. }
            | SyntaxNode::InstanceVarWrite { .. }
            | SyntaxNode::ConstantWrite { .. } => PREC_ASSIGN,
            SyntaxNode::IncludeDirective { .. } => PREC_COMMAND,
            SyntaxNode::Yield { positional_args } if !positional_args.is_empty() => PREC_COMMAND,
            SyntaxNode::LogicalAnd { .. } => PREC_AND,
            SyntaxNode::LogicalOr { .. } => PREC_OR,
            SyntaxNode::BooleanLiteral { .. } if style == LiteralStyle::Obfuscated => PREC_UNARY,
            SyntaxNode::IntegerLit { value } if *value < 0 => PREC_NEGATIVE,
            SyntaxNode::Return { .. } => PREC_PRIMARY,
            // Renders empty; parenthesized it becomes `()`, which is nil.
            SyntaxNode::Nil => PREC_MODIFIER,
            SyntaxNode::StatementBlock { statements } => match statements.as_slice() {
                [] if style == LiteralStyle::Obfuscated => PREC_MODIFIER,
                [] => PREC_PRIMARY,
                _ => PREC_MODIFIER,
            },
            _ => PREC_PRIMARY,
        }
    }
}

/// The node whose text a `Return` or single-statement block renders as.
fn rendered_node(mut node: &SyntaxNode) -> &SyntaxNode {
    loop {
        node = match node {
            SyntaxNode::Return { argument } if !matches!(argument.as_ref(), SyntaxNode::Nil) => {
                argument.as_ref()
            }
            SyntaxNode::StatementBlock { statements } if statements.len() == 1 => &statements[0],
            _ => return node,
        };
    }
}

fn is_empty_body(body: &SyntaxNode) -> bool {
    match body {
        SyntaxNode::Nil => true,
        SyntaxNode::StatementBlock { statements } => statements.is_empty(),
        _ => false,
    }
}

/// Symbols that can be written without quotes.
const OPERATOR_SYMBOLS: &[&str] = &[
    "+", "-", "*", "/", "%", "**", "==", "===", "!=", "<=>", "<", "<=", ">", ">=", "!", "[]",
    "[]=", "<<", ">>", "&", "|", "^", "~", "+@", "-@", "=~", "!~",
];

fn is_plain_symbol(value: &str) -> bool {
    if OPERATOR_SYMBOLS.contains(&value) {
        return true;
    }
    let body = match value
        .strip_prefix("@@")
        .or_else(|| value.strip_prefix('@'))
        .or_else(|| value.strip_prefix('$'))
    {
        Some(variable) => variable,
        None => value.strip_suffix(['?', '!', '=']).unwrap_or(value),
    };
    let is_ident_char = |c: char| c == '_' || c.is_alphanumeric() || !c.is_ascii();
    let mut chars = body.chars();
    matches!(chars.next(), Some(c) if is_ident_char(c) && !c.is_ascii_digit()) && chars.all(is_ident_char)
}

/// Append `value` escaped the way `String#dump` does, without the quotes.
fn escape_into(out: &mut String, value: &str) {
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            '\x0b' => out.push_str("\\v"),
            '\x08' => out.push_str("\\b"),
            '\x07' => out.push_str("\\a"),
            '\x1b' => out.push_str("\\e"),
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => out.push_str("\\#"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c if c.is_ascii() => out.push(c),
            c if (c as u32) <= 0xFFFF => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => {
                let _ = write!(out, "\\u{{{:X}}}", c as u32);
            }
        }
    }
}
