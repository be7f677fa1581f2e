//! Expression parsing: one function per precedence level, lowest to
//! highest.
//!
//! ```text
//! expression  := logical_or
//! logical_or  := logical_and ('||' logical_and)*
//! logical_and := equality    ('&&' equality)*
//! equality    := comparison  (('==' | '!=') comparison)*
//! comparison  := term        (('<' | '>' | '<=' | '>=') term)*
//! term        := factor      (('+' | '-') factor)*
//! factor      := exponent    (('*' | '/' | '%') exponent)*
//! exponent    := unary       ('**' exponent)?
//! unary       := ('-' | '!') primary | primary
//! primary     := NUMBER | BOOL | STRING_LIT | IDENT call_args?
//!              | '(' expression ')'
//! ```

use spadec_lex::TokenKind;
use spadec_util::span::Span;

use crate::ast::{BinOp, BinaryOperation, Expr, FunctionCall, UnOp, UnaryOperation};
use crate::Parser;

impl<'a> Parser<'a> {
    pub fn parse_expression(&mut self) -> Option<Expr> {
        self.logical_or()
    }

    fn logical_or(&mut self) -> Option<Expr> {
        let mut left = self.logical_and()?;
        while self.current_kind() == TokenKind::OrOr {
            let span = self.current_span();
            self.advance();
            let right = self.logical_and()?;
            left = binary(BinOp::Or, left, right, span);
        }
        Some(left)
    }

    fn logical_and(&mut self) -> Option<Expr> {
        let mut left = self.equality()?;
        while self.current_kind() == TokenKind::AndAnd {
            let span = self.current_span();
            self.advance();
            let right = self.equality()?;
            left = binary(BinOp::And, left, right, span);
        }
        Some(left)
    }

    fn equality(&mut self) -> Option<Expr> {
        let mut left = self.comparison()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            let span = self.current_span();
            self.advance();
            let right = self.comparison()?;
            left = binary(op, left, right, span);
        }
        Some(left)
    }

    fn comparison(&mut self) -> Option<Expr> {
        let mut left = self.term()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::LtEq => BinOp::Le,
                TokenKind::GtEq => BinOp::Ge,
                _ => break,
            };
            let span = self.current_span();
            self.advance();
            let right = self.term()?;
            left = binary(op, left, right, span);
        }
        Some(left)
    }

    fn term(&mut self) -> Option<Expr> {
        let mut left = self.factor()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let span = self.current_span();
            self.advance();
            let right = self.factor()?;
            left = binary(op, left, right, span);
        }
        Some(left)
    }

    /// `factor` additionally recognizes an implicit multiplication: if,
    /// after an operand has been parsed, the current token is `(` with no
    /// intervening operator, a `primary` is parsed and combined with the
    /// preceding operand using `*`. This preserves a historical quirk of
    /// the reference implementation rather than introducing juxtaposition
    /// as general syntax.
    fn factor(&mut self) -> Option<Expr> {
        let mut left = self.exponent()?;
        loop {
            let span = self.current_span();
            match self.current_kind() {
                TokenKind::Star => {
                    self.advance();
                    let right = self.exponent()?;
                    left = binary(BinOp::Mul, left, right, span);
                },
                TokenKind::Slash => {
                    self.advance();
                    let right = self.exponent()?;
                    left = binary(BinOp::Div, left, right, span);
                },
                TokenKind::Percent => {
                    self.advance();
                    let right = self.exponent()?;
                    left = binary(BinOp::Mod, left, right, span);
                },
                TokenKind::LParen => {
                    let right = self.primary()?;
                    left = binary(BinOp::Mul, left, right, span);
                },
                _ => break,
            }
        }
        Some(left)
    }

    /// Right-associative: the right-hand side recurses back into
    /// `exponent` rather than `unary`.
    fn exponent(&mut self) -> Option<Expr> {
        let base = self.unary()?;
        if self.current_kind() == TokenKind::StarStar {
            let span = self.current_span();
            self.advance();
            let rhs = self.exponent()?;
            return Some(binary(BinOp::Pow, base, rhs, span));
        }
        Some(base)
    }

    fn unary(&mut self) -> Option<Expr> {
        match self.current_kind() {
            TokenKind::Minus => {
                let span = self.current_span();
                self.advance();
                let operand = self.primary()?;
                Some(Expr::Unary(UnaryOperation {
                    op: UnOp::Neg,
                    operand: Box::new(operand),
                    span,
                }))
            },
            TokenKind::Bang => {
                let span = self.current_span();
                self.advance();
                let operand = self.primary()?;
                Some(Expr::Unary(UnaryOperation {
                    op: UnOp::Not,
                    operand: Box::new(operand),
                    span,
                }))
            },
            _ => self.primary(),
        }
    }

    /// An identifier is a function call iff immediately followed by `(`;
    /// an empty argument list is legal.
    fn primary(&mut self) -> Option<Expr> {
        match self.current_kind() {
            TokenKind::Number => {
                let lexeme = self.advance().lexeme;
                let value = lexeme.parse::<i32>().unwrap_or(0);
                Some(Expr::Number(value))
            },
            TokenKind::True => {
                self.advance();
                Some(Expr::Boolean(true))
            },
            TokenKind::False => {
                self.advance();
                Some(Expr::Boolean(false))
            },
            TokenKind::Null => {
                self.advance();
                Some(Expr::Null)
            },
            TokenKind::StringLiteral => {
                let lexeme = self.advance().lexeme;
                Some(Expr::StringLiteral(strip_quotes(&lexeme)))
            },
            TokenKind::Identifier => {
                let span = self.current_span();
                let name = self.advance().lexeme;
                if self.current_kind() == TokenKind::LParen {
                    let args = self.parse_call_args()?;
                    Some(Expr::FunctionCall(FunctionCall {
                        callee: name,
                        args,
                        span,
                    }))
                } else {
                    Some(Expr::Identifier(name))
                }
            },
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Some(inner)
            },
            _ => {
                self.error(format!("expected an expression, found {}", self.current_kind()));
                None
            },
        }
    }

    /// `call_args := '(' (expression (',' expression)*)? ')'`
    fn parse_call_args(&mut self) -> Option<Vec<Expr>> {
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if self.current_kind() != TokenKind::RParen {
            args.push(self.parse_expression()?);
            while self.current_kind() == TokenKind::Comma {
                self.advance();
                args.push(self.parse_expression()?);
            }
        }

        self.expect(TokenKind::RParen)?;
        Some(args)
    }
}

fn binary(op: BinOp, left: Expr, right: Expr, span: Span) -> Expr {
    Expr::Binary(BinaryOperation {
        op,
        left: Box::new(left),
        right: Box::new(right),
        span,
    })
}

fn strip_quotes(lexeme: &str) -> String {
    lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme)
        .to_string()
}

#[cfg(test)]
mod tests {
    use spadec_util::diagnostic::Handler;

    use crate::ast::{BinOp, Expr};
    use crate::Parser;

    fn parse_expr(source: &str) -> (Expr, Handler) {
        let handler = Handler::new();
        let tokens = spadec_lex::lex(source, &handler);
        let mut parser = Parser::new(tokens, &handler);
        (parser.parse_expression().unwrap(), handler)
    }

    fn assert_binop(expr: &Expr, op: BinOp) {
        match expr {
            Expr::Binary(b) => assert_eq!(b.op, op),
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let (expr, handler) = parse_expr("1 + 2 * 3");
        assert!(!handler.has_errors());
        assert_binop(&expr, BinOp::Add);
        match expr {
            Expr::Binary(b) => assert_binop(&b.right, BinOp::Mul),
            _ => unreachable!(),
        }
    }

    #[test]
    fn power_is_right_associative() {
        let (expr, _) = parse_expr("2 ** 3 ** 2");
        // 2 ** (3 ** 2), not (2 ** 3) ** 2
        match expr {
            Expr::Binary(outer) => {
                assert_eq!(outer.op, BinOp::Pow);
                assert!(matches!(*outer.left, Expr::Number(2)));
                assert_binop(&outer.right, BinOp::Pow);
            },
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        let (expr, _) = parse_expr("10 - 3 - 2");
        match expr {
            Expr::Binary(outer) => {
                assert_eq!(outer.op, BinOp::Sub);
                assert_binop(&outer.left, BinOp::Sub);
                assert!(matches!(*outer.right, Expr::Number(2)));
            },
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn logical_or_binds_loosest() {
        let (expr, _) = parse_expr("1 == 1 && 2 == 2 || 3 == 4");
        assert_binop(&expr, BinOp::Or);
    }

    #[test]
    fn function_call_with_no_arguments() {
        let (expr, handler) = parse_expr("foo()");
        assert!(!handler.has_errors());
        match expr {
            Expr::FunctionCall(call) => {
                assert_eq!(call.callee, "foo");
                assert!(call.args.is_empty());
            },
            other => panic!("expected function call, got {:?}", other),
        }
    }

    #[test]
    fn function_call_with_arguments() {
        let (expr, _) = parse_expr("add(1, 2 + 3)");
        match expr {
            Expr::FunctionCall(call) => assert_eq!(call.args.len(), 2),
            other => panic!("expected function call, got {:?}", other),
        }
    }

    #[test]
    fn bare_identifier_is_not_a_call() {
        let (expr, _) = parse_expr("x");
        assert!(matches!(expr, Expr::Identifier(name) if name == "x"));
    }

    #[test]
    fn string_literal_has_quotes_stripped() {
        let (expr, _) = parse_expr("\"hello\"");
        assert!(matches!(expr, Expr::StringLiteral(s) if s == "hello"));
    }

    #[test]
    fn implicit_multiplication_before_parenthesis() {
        let (expr, handler) = parse_expr("x(2 + 3)");
        assert!(!handler.has_errors());
        assert!(matches!(expr, Expr::FunctionCall(_)));

        let (expr2, _) = parse_expr("2(3 + 4)");
        assert_binop(&expr2, BinOp::Mul);
    }
}
