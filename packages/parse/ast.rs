// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pistonite

//! Syntax tree of a class source file.
//!
//! Every node displays as source text. Nested blocks are not indented

use std::fmt;

use lex::TokenKind;

macro_rules! operators {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $kind:ident $symbol:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),*
        }
        impl $name {
            pub fn from_kind(kind: TokenKind) -> Option<Self> {
                match kind {
                    $(TokenKind::$kind => Some(Self::$variant),)*
                    _ => None,
                }
            }
            /// The source text of the operator
            pub fn symbol(self) -> &'static str {
                match self {
                    $(Self::$variant => $symbol),*
                }
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.symbol())
            }
        }
    };
}

operators! {
    /// Modifier keyword on a class, member or local variable
    Modifier {
        Public = Public "public",
        Sealed = Sealed "sealed",
        Abstract = Abstract "abstract",
        Static = Static "static",
        Mutable = Mutable "mut",
    }
}

operators! {
    /// Binary operator between operands of an [`Expression`]
    Operation {
        Add = Add "+",
        Sub = Sub "-",
        Mult = Mult "*",
        Div = Div "/",
        Mod = Mod "%",
        BitAnd = BitAnd "&",
        BitOr = BitOr "|",
        BitXor = BitXor "^",
        BitLshift = BitLshift "<<",
        BitRshift = BitRshift ">>",
    }
}

operators! {
    /// Comparison in a [`Condition`]
    CondOp {
        Lt = Lt "<",
        Leq = Leq "<=",
        Gt = Gt ">",
        Geq = Geq ">=",
        Neq = Neq "!=",
        Eq = Eq "==",
    }
}

operators! {
    /// Assignment in a [`VariableUpdate`]
    AssignOp {
        Set = Set "=",
        Add = SetAdd "+=",
        Sub = SetSub "-=",
        Mult = SetMult "*=",
        Div = SetDiv "/=",
        Mod = SetMod "%=",
    }
}

operators! {
    /// Joins two clauses of [`Conditions`]
    Logic {
        And = And "&&",
        Or = Or "||",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub mods: Vec<Modifier>,
    pub name: String,
    pub typedefs: Vec<String>,
    pub extends: Option<String>,
    pub body: ClassBody,
}

/// Members of a class, grouped by what they are. Source order is kept
/// within each group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassBody {
    pub vars: Vec<Variable>,
    pub constructors: Vec<Constructor>,
    pub functions: Vec<Function>,
    pub classes: Vec<Class>,
}

/// Variable declaration, as a class member, a local or a loop variable
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub mods: Vec<Modifier>,
    pub ty: String,
    pub typedefs: Vec<String>,
    pub name: String,
    pub init: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub ty: String,
    pub typedefs: Vec<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub mods: Vec<Modifier>,
    pub params: Vec<Parameter>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub mods: Vec<Modifier>,
    /// Operator overloads are named after the operator token, like `operator_ADD`
    pub name: String,
    pub return_type: String,
    pub params: Vec<Parameter>,
    /// `None` for a declaration without a body
    pub body: Option<Body>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    If(If),
    While(While),
    For(For),
    Foreach(Foreach),
    Switch(Switch),
    Break,
    Return(Option<Expression>),
    /// Inline assembly, without the surrounding quotes
    Asm(String),
    Declare(Variable),
    Update(VariableUpdate),
    /// A member access used as a statement, usually a call
    Access(MemberAccess),
}

/// Content of a control statement: a single statement or a braced body
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Statement(Box<Statement>),
    Body(Body),
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub constexpr: bool,
    pub conditions: Conditions,
    pub content: Block,
    /// `else if` branches in order. Their own `else_ifs` and `els` are empty
    pub else_ifs: Vec<If>,
    pub els: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub conditions: Conditions,
    pub content: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub declaration: Variable,
    pub conditions: Conditions,
    pub update: VariableUpdate,
    pub content: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Foreach {
    pub var: Variable,
    pub iterable: MemberAccess,
    pub content: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub value: Expression,
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// `None` for `default`
    pub value: Option<Expression>,
    pub body: Vec<Statement>,
}

/// Operands joined by binary operations, left to right without precedence.
///
/// There is always one more value than there are operations
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub values: Vec<Operand>,
    pub ops: Vec<Operation>,
}

impl Expression {
    /// Expression of a single operand
    pub fn single(value: Operand) -> Self {
        Self {
            values: vec![value],
            ops: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Literal value, as written
    Value(String),
    /// Parenthesized expression
    Group(Expression),
    Access(MemberAccess),
}

/// Chain of accesses joined by `.`, like `a.b(c).new D()`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccess {
    pub accesses: Vec<Access>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Variable(String),
    Call(FunctionCall),
    New(ConstructorCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorCall {
    pub name: String,
    pub typedefs: Vec<String>,
    pub args: Vec<Expression>,
}

/// Clauses joined by `&&`/`||`, left to right.
///
/// There is always one more clause than there are joins
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub clauses: Vec<Clause>,
    pub logic: Vec<Logic>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Condition(Condition),
    /// Parenthesized conditions, `!(...)` when negated
    Group {
        negated: bool,
        conditions: Conditions,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub left: Expression,
    pub op: CondOp,
    pub right: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableUpdate {
    pub target: MemberAccess,
    pub update: Update,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Assign { op: AssignOp, value: Expression },
    Inc { prefix: bool },
    Dec { prefix: bool },
}

/// Write `items` separated by `sep`
fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn mods(f: &mut fmt::Formatter<'_>, mods: &[Modifier]) -> fmt::Result {
    for m in mods {
        write!(f, "{m} ")?;
    }
    Ok(())
}

fn typedefs(f: &mut fmt::Formatter<'_>, typedefs: &[String]) -> fmt::Result {
    if typedefs.is_empty() {
        return Ok(());
    }
    f.write_str("<")?;
    join(f, typedefs, ", ")?;
    f.write_str(">")
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        mods(f, &self.mods)?;
        write!(f, "class {}", self.name)?;
        typedefs(f, &self.typedefs)?;
        if let Some(parent) = &self.extends {
            write!(f, " extends {parent}")?;
        }
        write!(f, " {}", self.body)
    }
}

impl fmt::Display for ClassBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{\n")?;
        for var in &self.vars {
            writeln!(f, "{var};")?;
        }
        for constructor in &self.constructors {
            writeln!(f, "{constructor}")?;
        }
        for function in &self.functions {
            writeln!(f, "{function}")?;
        }
        for class in &self.classes {
            writeln!(f, "{class}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        mods(f, &self.mods)?;
        f.write_str(&self.ty)?;
        typedefs(f, &self.typedefs)?;
        write!(f, " {}", self.name)?;
        if let Some(init) = &self.init {
            write!(f, " = {init}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ty)?;
        typedefs(f, &self.typedefs)?;
        write!(f, " {}", self.name)
    }
}

impl fmt::Display for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        mods(f, &self.mods)?;
        f.write_str("constructor(")?;
        join(f, &self.params, ", ")?;
        write!(f, ") {}", self.body)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        mods(f, &self.mods)?;
        write!(f, "{} func {}(", self.return_type, self.name)?;
        join(f, &self.params, ", ")?;
        match &self.body {
            Some(body) => write!(f, ") {body}"),
            None => f.write_str(");"),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{\n")?;
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::If(x) => write!(f, "{x}"),
            Self::While(x) => write!(f, "{x}"),
            Self::For(x) => write!(f, "{x}"),
            Self::Foreach(x) => write!(f, "{x}"),
            Self::Switch(x) => write!(f, "{x}"),
            Self::Break => f.write_str("break;"),
            Self::Return(None) => f.write_str("return;"),
            Self::Return(Some(value)) => write!(f, "return {value};"),
            Self::Asm(content) => write!(f, "asm {{\"{content}\"}}"),
            Self::Declare(var) => write!(f, "{var};"),
            Self::Update(update) => write!(f, "{update};"),
            Self::Access(access) => write!(f, "{access};"),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Statement(statement) => write!(f, "{statement}"),
            Self::Body(body) => write!(f, "{body}"),
        }
    }
}

impl fmt::Display for If {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("if ")?;
        if self.constexpr {
            f.write_str("constexpr ")?;
        }
        write!(f, "({}) {}", self.conditions, self.content)?;
        for else_if in &self.else_ifs {
            write!(f, " else {else_if}")?;
        }
        if let Some(els) = &self.els {
            write!(f, " else {els}")?;
        }
        Ok(())
    }
}

impl fmt::Display for While {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "while ({}) {}", self.conditions, self.content)
    }
}

impl fmt::Display for For {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "for ({}; {}; {}) {}",
            self.declaration, self.conditions, self.update, self.content
        )
    }
}

impl fmt::Display for Foreach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "foreach ({} in {}) {}", self.var, self.iterable, self.content)
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "switch ({}) {{", self.value)?;
        for case in &self.cases {
            write!(f, "{case}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => writeln!(f, "case {value}:")?,
            None => writeln!(f, "default:")?,
        }
        for statement in &self.body {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = self.values.iter();
        if let Some(first) = values.next() {
            write!(f, "{first}")?;
        }
        for (op, value) in self.ops.iter().zip(values) {
            write!(f, " {op} {value}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(value),
            Self::Group(expr) => write!(f, "({expr})"),
            Self::Access(access) => write!(f, "{access}"),
        }
    }
}

impl fmt::Display for MemberAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join(f, &self.accesses, ".")
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => f.write_str(name),
            Self::Call(call) => {
                write!(f, "{}(", call.name)?;
                join(f, &call.args, ", ")?;
                f.write_str(")")
            }
            Self::New(call) => {
                write!(f, "new {}", call.name)?;
                typedefs(f, &call.typedefs)?;
                f.write_str("(")?;
                join(f, &call.args, ", ")?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = self.clauses.iter();
        if let Some(first) = clauses.next() {
            write!(f, "{first}")?;
        }
        for (logic, clause) in self.logic.iter().zip(clauses) {
            write!(f, " {logic} {clause}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition(condition) => write!(f, "{condition}"),
            Self::Group { negated, conditions } => {
                if *negated {
                    f.write_str("!")?;
                }
                write!(f, "({conditions})")
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

impl fmt::Display for VariableUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = &self.target;
        match &self.update {
            Update::Assign { op, value } => write!(f, "{target} {op} {value}"),
            Update::Inc { prefix: true } => write!(f, "++{target}"),
            Update::Inc { prefix: false } => write!(f, "{target}++"),
            Update::Dec { prefix: true } => write!(f, "--{target}"),
            Update::Dec { prefix: false } => write!(f, "{target}--"),
        }
    }
}
