// Copyright (c) 2021-2025 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://github.com/mintlayer/mintlayer-core/blob/master/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{error::SyntaxError, expr::Expr};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Bool(bool),
    Ident(String),
    Not,
    And,
    Or,
    LParen,
    RParen,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        let token = match c {
            '!' => Token::Not,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '&' | '|' => {
                // `&&` and `||` are accepted as aliases
                if chars.peek().map(|&(_, next)| next) == Some(c) {
                    chars.next();
                }
                if c == '&' {
                    Token::And
                } else {
                    Token::Or
                }
            }
            c if is_ident_char(c) => {
                let mut end = pos + c.len_utf8();
                while let Some(&(next_pos, next)) = chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    end = next_pos + next.len_utf8();
                    chars.next();
                }
                match &input[pos..end] {
                    "true" => Token::Bool(true),
                    "false" => Token::Bool(false),
                    ident if ident.chars().any(|c| c.is_ascii_lowercase()) => {
                        return Err(SyntaxError::UnexpectedToken(pos))
                    }
                    ident => Token::Ident(ident.to_owned()),
                }
            }
            c => return Err(SyntaxError::UnexpectedCharacter(c, pos)),
        };
        tokens.push((pos, token));
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(usize::MAX, |(offset, _)| *offset)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(_, t)| t.clone());
        self.pos += 1;
        token
    }

    fn parse_or(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.next();
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.next();
            let rhs = self.parse_unary()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.peek() == Some(&Token::Not) {
            self.next();
            return Ok(Expr::Not(Box::new(self.parse_unary()?)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let offset = self.offset();
        match self.next() {
            Some(Token::Bool(b)) => Ok(Expr::Bool(b)),
            Some(Token::Ident(name)) => Ok(Expr::Qualifier(name)),
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(SyntaxError::UnbalancedParenthesis(offset)),
                }
            }
            Some(Token::RParen) => Err(SyntaxError::UnbalancedParenthesis(offset)),
            Some(Token::Not | Token::And | Token::Or) => Err(SyntaxError::UnexpectedToken(offset)),
            None => Err(SyntaxError::UnexpectedEnd),
        }
    }
}

/// Parse a stripped verifier string.
pub fn parse_stripped(input: &str) -> Result<Expr, SyntaxError> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
    };
    let expr = parser.parse_or()?;
    match parser.peek() {
        None => Ok(expr),
        Some(Token::RParen) => Err(SyntaxError::UnbalancedParenthesis(parser.offset())),
        Some(_) => Err(SyntaxError::UnexpectedToken(parser.offset())),
    }
}
