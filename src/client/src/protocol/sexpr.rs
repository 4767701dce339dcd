use crate::ParseError;

/// One node of a server message: `(see 12 ((b) 3.2 -10))`.
#[derive(Debug, Clone, PartialEq)]
pub enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
}

impl SExpr {
    pub fn parse(input: &str) -> Result<SExpr, ParseError> {
        let input = input.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        if input.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut tokens = Tokenizer::new(input);
        let expr = Self::parse_expr(&mut tokens)?;

        if tokens.next_token().is_some() {
            return Err(ParseError::Trailing);
        }

        Ok(expr)
    }

    fn parse_expr(tokens: &mut Tokenizer<'_>) -> Result<SExpr, ParseError> {
        match tokens.next_token() {
            Some(Token::Open) => {
                let mut items = Vec::new();
                loop {
                    match tokens.peek_token() {
                        Some(Token::Close) => {
                            tokens.next_token();
                            return Ok(SExpr::List(items));
                        }
                        Some(_) => items.push(Self::parse_expr(tokens)?),
                        None => return Err(ParseError::Unbalanced),
                    }
                }
            }
            Some(Token::Atom(atom)) => Ok(SExpr::Atom(atom.to_string())),
            Some(Token::Close) => Err(ParseError::Unbalanced),
            None => Err(ParseError::Empty),
        }
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(atom) => Some(atom.as_str()),
            SExpr::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::List(items) => Some(items.as_slice()),
            SExpr::Atom(_) => None,
        }
    }

    /// Head atom of a list, e.g. `see` for `(see ...)`.
    pub fn head(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.as_atom()?.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Open,
    Close,
    Atom(&'a str),
}

struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Tokenizer { input, position: 0 }
    }

    fn peek_token(&self) -> Option<Token<'a>> {
        self.scan().map(|(token, _)| token)
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let (token, end) = self.scan()?;
        self.position = end;
        Some(token)
    }

    /// Next token and the offset just past it. Quoted atoms lose their quotes.
    fn scan(&self) -> Option<(Token<'a>, usize)> {
        let rest = &self.input[self.position..];
        let skipped = rest.len() - rest.trim_start().len();
        let start = self.position + skipped;
        let rest = &self.input[start..];

        let first = rest.chars().next()?;
        match first {
            '(' => Some((Token::Open, start + 1)),
            ')' => Some((Token::Close, start + 1)),
            '"' => {
                let body = &rest[1..];
                match body.find('"') {
                    Some(close) => Some((Token::Atom(&body[..close]), start + close + 2)),
                    // Unterminated quote: take the remainder.
                    None => Some((Token::Atom(body), self.input.len())),
                }
            }
            _ => {
                let len = rest
                    .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
                    .unwrap_or(rest.len());
                Some((Token::Atom(&rest[..len]), start + len))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(value: &str) -> SExpr {
        SExpr::Atom(value.to_string())
    }

    #[test]
    fn test_nested_lists() {
        let expr = SExpr::parse("(see 12 ((b) 3.2 -10))").unwrap();

        assert_eq!(
            expr,
            SExpr::List(vec![
                atom("see"),
                atom("12"),
                SExpr::List(vec![SExpr::List(vec![atom("b")]), atom("3.2"), atom("-10")]),
            ])
        );
        assert_eq!(expr.head(), Some("see"));
    }

    #[test]
    fn test_quoted_team_names() {
        let expr = SExpr::parse("((p \"Right Team\" 3) 5 0)").unwrap();
        let name = expr.as_list().unwrap()[0].as_list().unwrap()[1].as_atom();

        assert_eq!(name, Some("Right Team"));
    }

    #[test]
    fn test_trailing_nul_is_ignored() {
        assert!(SExpr::parse("(init l 3 before_kick_off)\0").is_ok());
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(SExpr::parse("(see 12 ((b) 1 2)"), Err(ParseError::Unbalanced));
        assert_eq!(SExpr::parse(")"), Err(ParseError::Unbalanced));
    }

    #[test]
    fn test_trailing_and_empty() {
        assert_eq!(SExpr::parse("(a) (b)"), Err(ParseError::Trailing));
        assert_eq!(SExpr::parse("  \0"), Err(ParseError::Empty));
    }

    #[test]
    fn test_numbers() {
        let expr = SExpr::parse("(x 4.5 -7)").unwrap();
        let items = expr.as_list().unwrap();

        assert_eq!(items[1].as_f32(), Some(4.5));
        assert_eq!(items[2].as_f32(), Some(-7.0));
        assert_eq!(items[0].as_f32(), None);
    }
}
