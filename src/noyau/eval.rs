//! Noyau — évaluation (descente récursive, calcul à la volée)
//!
//! Grammaire :
//!   expression := term (('+' | '-') term)*
//!   term       := factor (('*' | '/') factor)*
//!   factor     := '-' factor | '√' factor | puissance
//!   puissance  := postfixe (('^' | '√') factor)?
//!   postfixe   := primaire '!'*
//!   primaire   := nombre | '(' expression ')'
//!
//! Un signe collé à un littéral ("-3") s’applique après '!', '^' et 'n√',
//! comme un moins unaire : les espaces ne changent pas le sens.
//!
//! Pas d’AST : chaque règle rend directement sa valeur f64.
//! Les erreurs sont levées dans l’ordre de lecture (la première rencontrée gagne).

use super::erreurs::EvalError;
use super::format::format_resultat;
use super::jetons::{Lexeme, Token, Tokenizer};
use super::reglages::Reglages;

/// Plus grand n tel que n! reste fini en f64.
const FACTORIELLE_MAX: f64 = 170.0;

/// Évaluateur d’UNE entrée. Possède son Tokenizer et un seul jeton d’avance.
/// Consommé par `evaluer` : rien ne survit à l’appel.
pub struct Evaluator<'a> {
    jetons: Tokenizer<'a>,
    courant: Lexeme,
    profondeur: usize,
    profondeur_max: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(input: &'a str, reglages: &Reglages) -> Result<Self, EvalError> {
        let mut jetons = Tokenizer::new(input);
        let courant = match jetons.next() {
            Some(lx) => lx?,
            None => Lexeme {
                token: Token::End,
                position: 0,
            },
        };

        Ok(Self {
            jetons,
            courant,
            profondeur: 0,
            profondeur_max: reglages.profondeur_max,
        })
    }

    /// Évalue toute l’entrée (expression complète puis End).
    pub fn evaluer(mut self) -> Result<f64, EvalError> {
        let v = self.expression()?;

        let Lexeme { token, position } = self.courant;
        match token {
            Token::End => Ok(v),
            // parenthèse fermante orpheline : c’est un déséquilibre, pas un simple surplus
            Token::RParen => Err(EvalError::UnexpectedToken {
                expected: "fin de l’expression",
                found: token,
                position,
            }),
            _ => Err(EvalError::TrailingInput { position }),
        }
    }

    /* ------------------------ Curseur ------------------------ */

    /// Consomme le jeton courant et le rend.
    fn avancer(&mut self) -> Result<Lexeme, EvalError> {
        let suivant = match self.jetons.next() {
            Some(lx) => lx?,
            // après End, on reste sur End
            None => Lexeme {
                token: Token::End,
                position: self.courant.position,
            },
        };
        Ok(std::mem::replace(&mut self.courant, suivant))
    }

    fn attendre(&mut self, token: Token, expected: &'static str) -> Result<Lexeme, EvalError> {
        if self.courant.token == token {
            return self.avancer();
        }
        Err(EvalError::UnexpectedToken {
            expected,
            found: self.courant.token,
            position: self.courant.position,
        })
    }

    /// Descend d’un niveau d’imbrication (garde-fou anti-débordement de pile).
    fn imbrique(
        &mut self,
        position: usize,
        regle: fn(&mut Self) -> Result<f64, EvalError>,
    ) -> Result<f64, EvalError> {
        if self.profondeur >= self.profondeur_max {
            return Err(EvalError::TooDeep {
                position,
                limite: self.profondeur_max,
            });
        }
        self.profondeur += 1;
        let res = regle(self);
        self.profondeur -= 1;
        res
    }

    /* ------------------------ Règles ------------------------ */

    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.term()?;

        loop {
            match self.courant.token {
                Token::Plus => {
                    let op = self.avancer()?;
                    let d = self.term()?;
                    acc = fini(acc + d, op.position)?;
                }
                Token::Minus => {
                    let op = self.avancer()?;
                    let d = self.term()?;
                    acc = fini(acc - d, op.position)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.factor()?;

        loop {
            match self.courant.token {
                Token::Star => {
                    let op = self.avancer()?;
                    let d = self.factor()?;
                    acc = fini(acc * d, op.position)?;
                }
                Token::Slash => {
                    let op = self.avancer()?;
                    let d = self.factor()?;
                    if d == 0.0 {
                        return Err(EvalError::DivisionByZero {
                            position: op.position,
                        });
                    }
                    acc = fini(acc / d, op.position)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        match self.courant.token {
            Token::Minus => {
                let op = self.avancer()?;
                let v = self.imbrique(op.position, Self::factor)?;
                Ok(-v)
            }
            Token::Root => {
                let op = self.avancer()?;
                let v = self.imbrique(op.position, Self::factor)?;
                racine(v, op.position)
            }
            _ => self.puissance(),
        }
    }

    fn puissance(&mut self) -> Result<f64, EvalError> {
        let signe = self.detacher_signe();
        let base = self.postfixe()?;

        // associativité à droite : exposant et radicande sont des factor
        let v = match self.courant.token {
            Token::Caret => {
                let op = self.avancer()?;
                let exposant = self.imbrique(op.position, Self::factor)?;
                puissance(base, exposant, op.position)?
            }
            Token::Root => {
                let op = self.avancer()?;
                let radicande = self.imbrique(op.position, Self::factor)?;
                racine_n(radicande, base, op.position)?
            }
            _ => base,
        };
        Ok(signe * v)
    }

    /// Signe collé d’un littéral : "-3!" se lit comme "- 3!", "-2^2" comme "- 2^2".
    /// Rend le signe à réappliquer après '!', '^' et 'n√'.
    fn detacher_signe(&mut self) -> f64 {
        match self.courant.token {
            Token::Number(v) if v.is_sign_negative() => {
                self.courant.token = Token::Number(-v);
                -1.0
            }
            _ => 1.0,
        }
    }

    fn postfixe(&mut self) -> Result<f64, EvalError> {
        let mut v = self.primaire()?;
        while self.courant.token == Token::Bang {
            let op = self.avancer()?;
            v = factorielle(v, op.position)?;
        }
        Ok(v)
    }

    fn primaire(&mut self) -> Result<f64, EvalError> {
        let Lexeme { token, position } = self.courant;
        match token {
            Token::Number(v) => {
                self.avancer()?;
                // littéral trop long pour f64 (ex: 400 chiffres)
                fini(v, position)
            }
            Token::LParen => {
                self.avancer()?;
                let v = self.imbrique(position, Self::expression)?;
                self.attendre(Token::RParen, "')'")?;
                Ok(v)
            }
            _ => Err(EvalError::UnexpectedToken {
                expected: "un nombre ou '('",
                found: token,
                position,
            }),
        }
    }
}

/* ------------------------ Opérations “sûres” ------------------------ */

fn fini(v: f64, position: usize) -> Result<f64, EvalError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EvalError::Overflow { position })
    }
}

fn racine(v: f64, position: usize) -> Result<f64, EvalError> {
    if v < 0.0 {
        return Err(EvalError::Domain {
            position,
            message: "racine d’un nombre négatif",
        });
    }
    Ok(v.sqrt())
}

/// Racine de degré `degre` ("3√8" = 2). Degré impair : radicande négatif admis.
fn racine_n(v: f64, degre: f64, position: usize) -> Result<f64, EvalError> {
    if degre == 0.0 {
        return Err(EvalError::Domain {
            position,
            message: "racine de degré nul",
        });
    }
    if degre == 2.0 {
        return racine(v, position);
    }
    if degre == 3.0 {
        return Ok(v.cbrt());
    }
    if v < 0.0 {
        let impair = degre.fract() == 0.0 && degre % 2.0 != 0.0;
        if !impair {
            return Err(EvalError::Domain {
                position,
                message: "racine paire ou non entière d’un nombre négatif",
            });
        }
        return fini(-(-v).powf(1.0 / degre), position);
    }
    fini(v.powf(1.0 / degre), position)
}

fn puissance(base: f64, exposant: f64, position: usize) -> Result<f64, EvalError> {
    if base == 0.0 && exposant < 0.0 {
        return Err(EvalError::DivisionByZero { position });
    }
    if base < 0.0 && exposant.fract() != 0.0 {
        return Err(EvalError::Domain {
            position,
            message: "puissance non entière d’un nombre négatif",
        });
    }
    fini(base.powf(exposant), position)
}

fn factorielle(v: f64, position: usize) -> Result<f64, EvalError> {
    if v < 0.0 || v.fract() != 0.0 {
        return Err(EvalError::Domain {
            position,
            message: "factorielle d’un nombre négatif ou non entier",
        });
    }
    if v > FACTORIELLE_MAX {
        return Err(EvalError::Overflow { position });
    }

    let mut res = 1.0;
    let mut k = 2.0;
    while k <= v {
        res *= k;
        k += 1.0;
    }
    Ok(res)
}

/* ------------------------ API publique ------------------------ */

/// Évalue une expression avec les réglages par défaut.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    evaluate_with(input, &Reglages::default())
}

pub fn evaluate_with(input: &str, reglages: &Reglages) -> Result<f64, EvalError> {
    if input.trim().is_empty() {
        return Err(EvalError::EmptyInput);
    }
    Evaluator::new(input, reglages)?.evaluer()
}

/// Commande “calculate” : une entrée texte -> texte décimal, ou erreur typée.
/// Le `Display` de l’erreur est le message à afficher tel quel.
pub fn calculate(input: &str) -> Result<String, EvalError> {
    calculate_with(input, &Reglages::default())
}

pub fn calculate_with(input: &str, reglages: &Reglages) -> Result<String, EvalError> {
    let res = evaluate_with(input, reglages).map(|v| format_resultat(v, reglages.chiffres));

    match &res {
        Ok(sortie) => tracing::debug!(entree = input, sortie = %sortie, "calculate"),
        Err(e) => tracing::debug!(entree = input, erreur = %e, "calculate: échec"),
    }
    res
}
