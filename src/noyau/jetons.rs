// src/noyau/jetons.rs

use std::fmt;
use std::iter::{FusedIterator, Peekable};
use std::str::Chars;

use super::erreurs::LexError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Bang,  // ! (factorielle, postfixé)
    Root,  // √ (racine carrée préfixée, ou "n√x" de degré n)

    LParen,
    RParen,

    // Toujours le dernier jeton produit.
    End,
}

impl Token {
    /// Texte brut du jeton (sans guillemets), pour la “démarche”.
    pub fn symbole(&self) -> String {
        match self {
            Token::Number(v) => format!("{v}"),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Caret => "^".to_string(),
            Token::Bang => "!".to_string(),
            Token::Root => "√".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::End => "$".to_string(),
        }
    }

    /// Après ce jeton, un '-' collé à un chiffre est le signe d’un nombre.
    fn ouvre_operande(&self) -> bool {
        matches!(
            self,
            Token::Plus
                | Token::Minus
                | Token::Star
                | Token::Slash
                | Token::Caret
                | Token::Root
                | Token::LParen
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "le nombre {v}"),
            Token::End => f.write_str("fin de l’expression"),
            autre => write!(f, "'{}'", autre.symbole()),
        }
    }
}

/// Jeton + position (en caractères) de son premier caractère.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub position: usize,
}

/// Tokenisation paresseuse d’une chaîne.
///
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 5.)
/// - signe collé en position d’opérande (ex: -3, 2*-3, (-.5)) -> Number négatif
/// - opérateurs + - * / ^ ! √
/// - parenthèses ( )
///
/// Produit exactement un `End` puis s’arrête. Après une erreur, plus rien.
/// Non redémarrable : une entrée = un Tokenizer.
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
    attend_operande: bool,
    fini: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
            attend_operande: true,
            fini: false,
        }
    }

    fn avancer(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position += 1;
        Some(c)
    }

    fn sauter_espaces(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.avancer();
        }
    }

    /// Lit un nombre décimal. `texte` contient déjà ce qui a été consommé
    /// (éventuellement "-" et/ou le premier chiffre).
    fn lire_nombre(&mut self, debut: usize, mut texte: String) -> Result<Token, LexError> {
        let mut point: Option<usize> = texte.find('.').map(|_| self.position - 1);
        let mut chiffres = texte.chars().filter(char::is_ascii_digit).count();

        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                chiffres += 1;
            } else if c == '.' {
                if point.is_some() {
                    // second '.' dans le même nombre
                    return Err(LexError {
                        position: self.position,
                        character: '.',
                    });
                }
                point = Some(self.position);
            } else {
                break;
            }
            texte.push(c);
            self.avancer();
        }

        // "." ou "-." : pas un nombre
        if chiffres == 0 {
            return Err(LexError {
                position: point.unwrap_or(debut),
                character: '.',
            });
        }

        texte.parse::<f64>().map(Token::Number).map_err(|_| LexError {
            position: debut,
            character: texte.chars().next().unwrap_or('.'),
        })
    }

    fn suivant(&mut self) -> Result<Lexeme, LexError> {
        self.sauter_espaces();

        let debut = self.position;
        let Some(c) = self.avancer() else {
            return Ok(Lexeme {
                token: Token::End,
                position: debut,
            });
        };

        // Signe collé : seulement en position d’opérande, suivi d’un chiffre ou d’un '.'
        let signe_colle = c == '-'
            && self.attend_operande
            && self
                .chars
                .peek()
                .is_some_and(|n| n.is_ascii_digit() || *n == '.');

        let token = match c {
            '+' => Token::Plus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '!' => Token::Bang,
            '√' => Token::Root,
            '(' => Token::LParen,
            ')' => Token::RParen,

            '-' if signe_colle => self.lire_nombre(debut, "-".to_string())?,
            '-' => Token::Minus,

            '0'..='9' | '.' => self.lire_nombre(debut, c.to_string())?,

            _ => {
                return Err(LexError {
                    position: debut,
                    character: c,
                })
            }
        };

        Ok(Lexeme {
            token,
            position: debut,
        })
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Lexeme, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fini {
            return None;
        }

        let res = self.suivant();
        match &res {
            Ok(lx) => {
                tracing::trace!(token = %lx.token, position = lx.position, "jeton");
                self.fini = lx.token == Token::End;
                self.attend_operande = lx.token.ouvre_operande();
            }
            Err(_) => self.fini = true,
        }
        Some(res)
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Tokenise toute la chaîne (End inclus).
pub fn tokenize(input: &str) -> Result<Vec<Lexeme>, LexError> {
    Tokenizer::new(input).collect()
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(lexemes: &[Lexeme]) -> String {
    lexemes
        .iter()
        .map(|lx| lx.token.symbole())
        .collect::<Vec<_>>()
        .join(" ")
}
