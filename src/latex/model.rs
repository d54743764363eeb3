/*!
 * LaTeX document model used to regenerate gloss examples.
 *
 * Every node renders itself through `Display`; a node's text is the
 * newline-joined text of its parts. Nothing else is modelled: this is a
 * writer for a tiny subset of LaTeX, not a parser.
 */

use std::fmt;

use super::expex::{Example, ExamplePart, GlossedExampleBlock};

/// Class used when a document is built without a class declaration
pub const DEFAULT_DOCUMENT_CLASS: &str = "standalone";

/// Ordered `key` / `key=value` options of a declaration
pub type Options = Vec<(String, Option<String>)>;

/// Join options as `a,b=c`
pub fn linearise_options(options: &Options, sep: &str) -> String {
    options
        .iter()
        .map(|(key, value)| match value {
            Some(value) => format!("{}={}", key, value),
            None => key.clone(),
        })
        .collect::<Vec<_>>()
        .join(sep)
}

/// Write items separated by newlines
pub(super) fn write_lines<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Kind of preamble declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    DocumentClass,
    UsePackage,
}

impl DeclarationKind {
    pub fn command_name(&self) -> &'static str {
        match self {
            Self::DocumentClass => "documentclass",
            Self::UsePackage => "usepackage",
        }
    }
}

/// `\documentclass[opts]{name}` or `\usepackage[opts]{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub options: Options,
}

impl Declaration {
    pub fn document_class(name: &str) -> Self {
        Self {
            kind: DeclarationKind::DocumentClass,
            name: name.to_string(),
            options: Vec::new(),
        }
    }

    pub fn package(name: &str) -> Self {
        Self {
            kind: DeclarationKind::UsePackage,
            name: name.to_string(),
            options: Vec::new(),
        }
    }

    /// Add a bare option flag
    pub fn with_flag(mut self, key: &str) -> Self {
        self.options.push((key.to_string(), None));
        self
    }

    /// Add a `key=value` option
    pub fn with_option(mut self, key: &str, value: &str) -> Self {
        self.options.push((key.to_string(), Some(value.to_string())));
        self
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\{}", self.kind.command_name())?;
        if !self.options.is_empty() {
            write!(f, "[{}]", linearise_options(&self.options, ","))?;
        }
        write!(f, "{{{}}}", self.name)
    }
}

/// `\name{arg1}{arg2}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\{}", self.name)?;
        for arg in &self.args {
            write!(f, "{{{}}}", arg)?;
        }
        Ok(())
    }
}

/// `\begin{name}{args}` ... `\end{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub name: String,
    pub args: Vec<String>,
    pub children: Vec<LatexNode>,
}

impl Environment {
    pub fn new(name: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: impl Into<LatexNode>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\begin{{{}}}", self.name)?;
        for arg in &self.args {
            write!(f, "{{{}}}", arg)?;
        }
        writeln!(f)?;
        for child in &self.children {
            writeln!(f, "{}", child)?;
        }
        write!(f, "\\end{{{}}}", self.name)
    }
}

/// Closed set of renderable nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatexNode {
    Declaration(Declaration),
    Command(Command),
    Environment(Environment),
    GlossedBlock(GlossedExampleBlock),
    ExamplePart(ExamplePart),
    Example(Example),
}

impl fmt::Display for LatexNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration(node) => write!(f, "{}", node),
            Self::Command(node) => write!(f, "{}", node),
            Self::Environment(node) => write!(f, "{}", node),
            Self::GlossedBlock(node) => write!(f, "{}", node),
            Self::ExamplePart(node) => write!(f, "{}", node),
            Self::Example(node) => write!(f, "{}", node),
        }
    }
}

impl From<Declaration> for LatexNode {
    fn from(node: Declaration) -> Self {
        Self::Declaration(node)
    }
}

impl From<Command> for LatexNode {
    fn from(node: Command) -> Self {
        Self::Command(node)
    }
}

impl From<Environment> for LatexNode {
    fn from(node: Environment) -> Self {
        Self::Environment(node)
    }
}

impl From<GlossedExampleBlock> for LatexNode {
    fn from(node: GlossedExampleBlock) -> Self {
        Self::GlossedBlock(node)
    }
}

impl From<ExamplePart> for LatexNode {
    fn from(node: ExamplePart) -> Self {
        Self::ExamplePart(node)
    }
}

impl From<Example> for LatexNode {
    fn from(node: Example) -> Self {
        Self::Example(node)
    }
}

/// A complete document: preamble and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub preamble: Vec<LatexNode>,
    pub content: Vec<LatexNode>,
}

impl Document {
    /// Build a document, prepending `\documentclass{standalone}` when the
    /// preamble does not start with a class declaration
    pub fn new(preamble: Vec<LatexNode>, content: Vec<LatexNode>) -> Self {
        Self::with_document_class(preamble, content, DEFAULT_DOCUMENT_CLASS)
    }

    pub fn with_document_class(mut preamble: Vec<LatexNode>, content: Vec<LatexNode>, document_class: &str) -> Self {
        let has_class = matches!(
            preamble.first(),
            Some(LatexNode::Declaration(Declaration { kind: DeclarationKind::DocumentClass, .. }))
        );
        if !has_class {
            preamble.insert(0, Declaration::document_class(document_class).into());
        }

        Self { preamble, content }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.preamble {
            writeln!(f, "{}", item)?;
        }
        writeln!(f)?;
        writeln!(f, "\\begin{{document}}")?;
        writeln!(f)?;
        for item in &self.content {
            writeln!(f, "{}", item)?;
        }
        writeln!(f)?;
        write!(f, "\\end{{document}}")
    }
}
