// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pistonite

use lex::{Lexer, Token, TokenKind};

use crate::ast::*;

/// Recursive descent parser over a [`Lexer`].
///
/// Each `parse_*` function consumes exactly the tokens of what it parses
/// and leaves the rest in the lexer
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lexer: Lexer::new(text),
        }
    }

    /// Error unless all input has been consumed
    pub fn finish(&mut self) -> cu::Result<()> {
        if let Some(token) = self.lexer.peek_next()? {
            cu::bail!("expected end of input, found '{}'", token.content);
        }
        Ok(())
    }

    pub fn parse_class(&mut self) -> cu::Result<Class> {
        let mods = self.parse_mods()?;
        self.parse_class_declaration(mods)
    }

    fn parse_mods(&mut self) -> cu::Result<Vec<Modifier>> {
        let mut mods = vec![];
        while let Some(m) = self.peek(0)?.and_then(Modifier::from_kind) {
            self.lexer.pop_token()?;
            mods.push(m);
        }
        Ok(mods)
    }

    fn parse_class_declaration(&mut self, mods: Vec<Modifier>) -> cu::Result<Class> {
        self.expect(TokenKind::Class, "'class'")?;
        let name = self.expect(TokenKind::Identifier, "class name")?.content;
        cu::trace!("class {name}");
        let typedefs = self.parse_typedef()?;
        let extends = if self.eat(TokenKind::Extends)? {
            Some(self.expect(TokenKind::Identifier, "parent class name")?.content)
        } else {
            None
        };
        self.expect(TokenKind::LBrace, "'{' to open the class body")?;
        let body = self.parse_class_body()?;
        self.expect(TokenKind::RBrace, "'}' to close the class body")?;
        Ok(Class {
            mods,
            name,
            typedefs,
            extends,
            body,
        })
    }

    /// `<A, B>` after a type name. Empty if there is no `<`
    fn parse_typedef(&mut self) -> cu::Result<Vec<String>> {
        if !self.eat(TokenKind::Lt)? {
            return Ok(vec![]);
        }
        let mut typedefs = vec![self.expect(TokenKind::Identifier, "type name")?.content];
        while self.eat(TokenKind::Comma)? {
            typedefs.push(self.expect(TokenKind::Identifier, "type name")?.content);
        }
        self.expect(TokenKind::Gt, "'>' to close the typedef")?;
        Ok(typedefs)
    }

    /// Members up to the closing `}`, which is not consumed
    fn parse_class_body(&mut self) -> cu::Result<ClassBody> {
        let mut body = ClassBody::default();
        loop {
            let mods = self.parse_mods()?;
            match (self.peek(0)?, self.peek(1)?) {
                (Some(TokenKind::RBrace), _) if mods.is_empty() => return Ok(body),
                (Some(TokenKind::Constructor), _) => {
                    body.constructors.push(self.parse_constructor(mods)?);
                }
                (Some(TokenKind::Class), _) => {
                    body.classes.push(self.parse_class_declaration(mods)?);
                }
                (Some(TokenKind::Identifier), Some(TokenKind::Function)) => {
                    body.functions.push(self.parse_function(mods)?);
                }
                (Some(TokenKind::Identifier), _) => {
                    let var = self.parse_variable(mods)?;
                    self.expect(TokenKind::Semicolon, "';' after the variable declaration")?;
                    body.vars.push(var);
                }
                _ => return self.unexpected("a class member"),
            }
        }
    }

    fn parse_constructor(&mut self, mods: Vec<Modifier>) -> cu::Result<Constructor> {
        self.expect(TokenKind::Constructor, "'constructor'")?;
        let params = self.parse_params()?;
        let body = self.parse_braced_body()?;
        Ok(Constructor { mods, params, body })
    }

    fn parse_function(&mut self, mods: Vec<Modifier>) -> cu::Result<Function> {
        let return_type = self.expect(TokenKind::Identifier, "return type")?.content;
        self.expect(TokenKind::Function, "'func'")?;
        let name = match self.peek(0)? {
            Some(TokenKind::Operator) => {
                self.lexer.pop_token()?;
                match self.peek(0)? {
                    Some(kind) if Operation::from_kind(kind).is_some() || kind == TokenKind::BitNot => {
                        self.lexer.pop_token()?;
                        format!("operator_{}", kind.name())
                    }
                    _ => return self.unexpected("an operator to overload"),
                }
            }
            _ => self.expect(TokenKind::Identifier, "function name")?.content,
        };
        cu::trace!("function {name}");
        let params = self.parse_params()?;
        let body = if self.eat(TokenKind::Semicolon)? {
            None
        } else {
            Some(self.parse_braced_body()?)
        };
        Ok(Function {
            mods,
            name,
            return_type,
            params,
            body,
        })
    }

    /// `(T a, U<V> b)`, parentheses included
    fn parse_params(&mut self) -> cu::Result<Vec<Parameter>> {
        self.expect(TokenKind::LParen, "'(' to open the parameters")?;
        let mut params = vec![];
        if self.eat(TokenKind::RParen)? {
            return Ok(params);
        }
        loop {
            let ty = self.expect(TokenKind::Identifier, "parameter type")?.content;
            let typedefs = self.parse_typedef()?;
            let name = self.expect(TokenKind::Identifier, "parameter name")?.content;
            params.push(Parameter { ty, typedefs, name });
            if !self.eat(TokenKind::Comma)? {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')' to close the parameters")?;
        Ok(params)
    }

    /// `(a, b + 1)`, parentheses included
    fn parse_args(&mut self) -> cu::Result<Vec<Expression>> {
        self.expect(TokenKind::LParen, "'(' to open the arguments")?;
        let mut args = vec![];
        if self.eat(TokenKind::RParen)? {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.eat(TokenKind::Comma)? {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')' to close the arguments")?;
        Ok(args)
    }

    /// `T name` or `T<U> name`, with an optional `= value`
    fn parse_variable(&mut self, mods: Vec<Modifier>) -> cu::Result<Variable> {
        let ty = self.expect(TokenKind::Identifier, "variable type")?.content;
        let typedefs = self.parse_typedef()?;
        let name = self.expect(TokenKind::Identifier, "variable name")?.content;
        let init = if self.eat(TokenKind::Set)? {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(Variable {
            mods,
            ty,
            typedefs,
            name,
            init,
        })
    }

    pub fn parse_expression(&mut self) -> cu::Result<Expression> {
        let mut values = vec![self.parse_operand()?];
        let mut ops = vec![];
        while let Some(op) = self.peek(0)?.and_then(Operation::from_kind) {
            self.lexer.pop_token()?;
            ops.push(op);
            values.push(self.parse_operand()?);
        }
        Ok(Expression { values, ops })
    }

    fn parse_operand(&mut self) -> cu::Result<Operand> {
        match self.peek(0)? {
            Some(TokenKind::LParen) => {
                self.lexer.pop_token()?;
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')' to close the expression")?;
                Ok(Operand::Group(expr))
            }
            Some(TokenKind::Val) => Ok(Operand::Value(
                self.expect(TokenKind::Val, "value")?.content,
            )),
            _ => Ok(Operand::Access(self.parse_member_access()?)),
        }
    }

    fn parse_member_access(&mut self) -> cu::Result<MemberAccess> {
        let mut accesses = vec![self.parse_access()?];
        while self.eat(TokenKind::Dot)? {
            accesses.push(self.parse_access()?);
        }
        Ok(MemberAccess { accesses })
    }

    fn parse_access(&mut self) -> cu::Result<Access> {
        match (self.peek(0)?, self.peek(1)?) {
            (Some(TokenKind::New), _) => {
                self.lexer.pop_token()?;
                let name = self.expect(TokenKind::Identifier, "class name after 'new'")?.content;
                let typedefs = self.parse_typedef()?;
                let args = self.parse_args()?;
                Ok(Access::New(ConstructorCall {
                    name,
                    typedefs,
                    args,
                }))
            }
            (Some(TokenKind::Identifier), Some(TokenKind::LParen)) => {
                let name = self.expect(TokenKind::Identifier, "function name")?.content;
                let args = self.parse_args()?;
                Ok(Access::Call(FunctionCall { name, args }))
            }
            (Some(TokenKind::Identifier), _) => Ok(Access::Variable(
                self.expect(TokenKind::Identifier, "variable name")?.content,
            )),
            _ => self.unexpected("a variable, call or 'new'"),
        }
    }

    /// `{ ... }`, braces included
    fn parse_braced_body(&mut self) -> cu::Result<Body> {
        self.expect(TokenKind::LBrace, "'{' to open the body")?;
        let body = self.parse_body()?;
        self.expect(TokenKind::RBrace, "'}' to close the body")?;
        Ok(body)
    }

    /// Statements up to the closing `}`, which is not consumed
    fn parse_body(&mut self) -> cu::Result<Body> {
        let mut statements = vec![];
        loop {
            match self.peek(0)? {
                Some(TokenKind::RBrace) => return Ok(Body { statements }),
                None => cu::bail!("expected '}}' to close the body, found end of input"),
                Some(_) => statements.push(self.parse_statement()?),
            }
        }
    }

    fn parse_block(&mut self) -> cu::Result<Block> {
        if self.peek(0)? == Some(TokenKind::LBrace) {
            Ok(Block::Body(self.parse_braced_body()?))
        } else {
            Ok(Block::Statement(Box::new(self.parse_statement()?)))
        }
    }

    pub fn parse_statement(&mut self) -> cu::Result<Statement> {
        let statement = match self.peek(0)? {
            None => cu::bail!("expected a statement, found end of input"),
            Some(TokenKind::If) => Statement::If(self.parse_if()?),
            Some(TokenKind::While) => Statement::While(self.parse_while()?),
            Some(TokenKind::For) => Statement::For(self.parse_for()?),
            Some(TokenKind::Foreach) => Statement::Foreach(self.parse_foreach()?),
            Some(TokenKind::Switch) => Statement::Switch(self.parse_switch()?),
            Some(TokenKind::Break) => {
                self.lexer.pop_token()?;
                self.expect(TokenKind::Semicolon, "';' after 'break'")?;
                Statement::Break
            }
            Some(TokenKind::Return) => {
                self.lexer.pop_token()?;
                let value = if self.eat(TokenKind::Semicolon)? {
                    None
                } else {
                    let value = self.parse_expression()?;
                    self.expect(TokenKind::Semicolon, "';' after the return value")?;
                    Some(value)
                };
                Statement::Return(value)
            }
            Some(TokenKind::Asm) => {
                self.lexer.pop_token()?;
                self.expect(TokenKind::LBrace, "'{' after 'asm'")?;
                let quote = self.expect(TokenKind::Quote, "quoted assembly")?;
                self.expect(TokenKind::RBrace, "'}' to close the asm block")?;
                Statement::Asm(quote.content.trim_matches('"').to_string())
            }
            Some(TokenKind::Inc | TokenKind::Dec) => {
                let update = self.parse_update()?;
                self.expect(TokenKind::Semicolon, "';' after the update")?;
                Statement::Update(update)
            }
            Some(_) => return self.parse_simple_statement(),
        };
        Ok(statement)
    }

    /// Declaration, call or update, told apart by their first tokens
    fn parse_simple_statement(&mut self) -> cu::Result<Statement> {
        let mods = self.parse_mods()?;
        let declares = self.peek(0)? == Some(TokenKind::Identifier)
            && matches!(
                self.peek(1)?,
                Some(TokenKind::Identifier | TokenKind::Lt)
            );
        if declares {
            let var = self.parse_variable(mods)?;
            self.expect(TokenKind::Semicolon, "';' after the variable declaration")?;
            return Ok(Statement::Declare(var));
        }
        if !mods.is_empty() {
            return self.unexpected("a variable declaration after the modifiers");
        }
        let access = self.parse_member_access()?;
        if self.eat(TokenKind::Semicolon)? {
            return Ok(Statement::Access(access));
        }
        let update = self.parse_update_of(access)?;
        self.expect(TokenKind::Semicolon, "';' after the update")?;
        Ok(Statement::Update(update))
    }

    fn parse_if(&mut self) -> cu::Result<If> {
        self.expect(TokenKind::If, "'if'")?;
        let constexpr = self.eat(TokenKind::Constexpr)?;
        let conditions = self.parse_paren_conditions()?;
        let content = self.parse_block()?;
        let mut block = If {
            constexpr,
            conditions,
            content,
            else_ifs: vec![],
            els: None,
        };
        if !self.eat(TokenKind::Else)? {
            return Ok(block);
        }
        if self.peek(0)? == Some(TokenKind::If) {
            // flatten the chain into this block
            let mut next = self.parse_if()?;
            let mut else_ifs = std::mem::take(&mut next.else_ifs);
            block.els = next.els.take();
            else_ifs.insert(0, next);
            block.else_ifs = else_ifs;
        } else {
            block.els = Some(self.parse_block()?);
        }
        Ok(block)
    }

    fn parse_while(&mut self) -> cu::Result<While> {
        self.expect(TokenKind::While, "'while'")?;
        let conditions = self.parse_paren_conditions()?;
        let content = self.parse_block()?;
        Ok(While {
            conditions,
            content,
        })
    }

    fn parse_for(&mut self) -> cu::Result<For> {
        self.expect(TokenKind::For, "'for'")?;
        self.expect(TokenKind::LParen, "'(' after 'for'")?;
        let declaration = self.parse_variable(vec![])?;
        self.expect(TokenKind::Semicolon, "';' after the loop variable")?;
        let conditions = self.parse_conditions()?;
        self.expect(TokenKind::Semicolon, "';' after the loop conditions")?;
        let update = self.parse_update()?;
        self.expect(TokenKind::RParen, "')' to close the loop header")?;
        let content = self.parse_block()?;
        Ok(For {
            declaration,
            conditions,
            update,
            content,
        })
    }

    fn parse_foreach(&mut self) -> cu::Result<Foreach> {
        self.expect(TokenKind::Foreach, "'foreach'")?;
        self.expect(TokenKind::LParen, "'(' after 'foreach'")?;
        let var = self.parse_variable(vec![])?;
        self.expect(TokenKind::In, "'in'")?;
        let iterable = self.parse_member_access()?;
        self.expect(TokenKind::RParen, "')' to close the loop header")?;
        let content = self.parse_block()?;
        Ok(Foreach {
            var,
            iterable,
            content,
        })
    }

    fn parse_switch(&mut self) -> cu::Result<Switch> {
        self.expect(TokenKind::Switch, "'switch'")?;
        self.expect(TokenKind::LParen, "'(' after 'switch'")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')' after the switch value")?;
        self.expect(TokenKind::LBrace, "'{' to open the switch")?;
        let mut cases = vec![];
        loop {
            match self.peek(0)? {
                Some(TokenKind::Case) => cases.push(self.parse_case()?),
                Some(TokenKind::Default) => {
                    self.lexer.pop_token()?;
                    self.expect(TokenKind::Colon, "':' after 'default'")?;
                    let body = self.parse_case_body()?;
                    cases.push(Case { value: None, body });
                    if self.peek(0)? != Some(TokenKind::RBrace) {
                        cu::bail!("'default' must be the last case in a switch");
                    }
                }
                Some(TokenKind::RBrace) if !cases.is_empty() => break,
                _ => return self.unexpected("'case' or 'default'"),
            }
        }
        self.expect(TokenKind::RBrace, "'}' to close the switch")?;
        Ok(Switch { value, cases })
    }

    fn parse_case(&mut self) -> cu::Result<Case> {
        self.expect(TokenKind::Case, "'case'")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Colon, "':' after the case value")?;
        let body = self.parse_case_body()?;
        Ok(Case {
            value: Some(value),
            body,
        })
    }

    /// Statements up to the next case or the end of the switch.
    /// `break` and `return` end the body
    fn parse_case_body(&mut self) -> cu::Result<Vec<Statement>> {
        let mut body = vec![];
        loop {
            let ends = match self.peek(0)? {
                Some(TokenKind::Case | TokenKind::Default | TokenKind::RBrace) => return Ok(body),
                None => cu::bail!("expected '}}' to close the switch, found end of input"),
                Some(kind) => matches!(kind, TokenKind::Break | TokenKind::Return),
            };
            body.push(self.parse_statement()?);
            if ends {
                return match self.peek(0)? {
                    None | Some(TokenKind::Case | TokenKind::Default | TokenKind::RBrace) => Ok(body),
                    Some(_) => self.unexpected("the next case after the end of a case"),
                };
            }
        }
    }

    /// `(conditions)`, parentheses included
    fn parse_paren_conditions(&mut self) -> cu::Result<Conditions> {
        self.expect(TokenKind::LParen, "'(' to open the conditions")?;
        let conditions = self.parse_conditions()?;
        self.expect(TokenKind::RParen, "')' to close the conditions")?;
        Ok(conditions)
    }

    pub fn parse_conditions(&mut self) -> cu::Result<Conditions> {
        let mut clauses = vec![self.parse_clause()?];
        let mut logic = vec![];
        while let Some(join) = self.peek(0)?.and_then(Logic::from_kind) {
            self.lexer.pop_token()?;
            logic.push(join);
            clauses.push(self.parse_clause()?);
        }
        Ok(Conditions { clauses, logic })
    }

    /// A `(` here always opens a group of conditions
    fn parse_clause(&mut self) -> cu::Result<Clause> {
        let negated = match self.peek(0)? {
            Some(TokenKind::Not) => {
                self.lexer.pop_token()?;
                if self.peek(0)? != Some(TokenKind::LParen) {
                    return self.unexpected("'(' after '!'");
                }
                true
            }
            Some(TokenKind::LParen) => false,
            _ => return Ok(Clause::Condition(self.parse_condition()?)),
        };
        let conditions = self.parse_paren_conditions()?;
        Ok(Clause::Group {
            negated,
            conditions,
        })
    }

    fn parse_condition(&mut self) -> cu::Result<Condition> {
        let left = self.parse_expression()?;
        let Some(op) = self.peek(0)?.and_then(CondOp::from_kind) else {
            return self.unexpected("a comparison");
        };
        self.lexer.pop_token()?;
        let right = self.parse_expression()?;
        Ok(Condition { left, op, right })
    }

    /// Prefix `++a`/`--a`, or an update of a member access
    fn parse_update(&mut self) -> cu::Result<VariableUpdate> {
        let update = match self.peek(0)? {
            Some(TokenKind::Inc) => Update::Inc { prefix: true },
            Some(TokenKind::Dec) => Update::Dec { prefix: true },
            _ => {
                let target = self.parse_member_access()?;
                return self.parse_update_of(target);
            }
        };
        self.lexer.pop_token()?;
        let target = self.parse_member_access()?;
        Ok(VariableUpdate { target, update })
    }

    /// Assignment or postfix `++`/`--` after `target`
    fn parse_update_of(&mut self, target: MemberAccess) -> cu::Result<VariableUpdate> {
        let kind = self.peek(0)?;
        if let Some(op) = kind.and_then(AssignOp::from_kind) {
            self.lexer.pop_token()?;
            let value = self.parse_expression()?;
            return Ok(VariableUpdate {
                target,
                update: Update::Assign { op, value },
            });
        }
        let update = match kind {
            Some(TokenKind::Inc) => Update::Inc { prefix: false },
            Some(TokenKind::Dec) => Update::Dec { prefix: false },
            _ => return self.unexpected("an assignment, '++' or '--'"),
        };
        self.lexer.pop_token()?;
        Ok(VariableUpdate { target, update })
    }

    fn peek(&mut self, n: usize) -> cu::Result<Option<TokenKind>> {
        self.lexer.peek_kind(n)
    }

    /// Consume the next token if it is `kind`
    fn eat(&mut self, kind: TokenKind) -> cu::Result<bool> {
        if self.peek(0)? != Some(kind) {
            return Ok(false);
        }
        self.lexer.pop_token()?;
        Ok(true)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> cu::Result<Token> {
        match self.lexer.next_token()? {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => cu::bail!("expected {what}, found '{}'", token.content),
            None => cu::bail!("expected {what}, found end of input"),
        }
    }

    fn unexpected<T>(&mut self, what: &str) -> cu::Result<T> {
        match self.lexer.peek_next()? {
            Some(token) => cu::bail!("expected {what}, found '{}'", token.content),
            None => cu::bail!("expected {what}, found end of input"),
        }
    }
}
