// src/app/console.rs
//
// Console (remplace la vue egui)
// ------------------------------
// Une ligne = une requête vers le noyau :
// - "3 + 4 * 2"     -> "= 11"
// - "2 + )"         -> l’entrée, un repère sous la position fautive, le message
// - ":commande ..." -> actions de l’état (C/AC, précision, démarche, écart-type)
//
// Toute la logique est dans `traiter_ligne` (testable sans terminal) ;
// `lancer` ne fait que lire/écrire.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::etat::AppCalc;
use crate::noyau::{calculate_with, ecart_type, format::format_resultat, jetons};

const INVITE: &str = "calc> ";

const AIDE: &str = "\
Entrez une expression : 3 + 4 * (2 - 1), 2^10, √2, 3√8, 5!
Commandes :
  :aide              cette aide
  :c                 efface l’entrée et les résultats
  :ac                remise à zéro totale (précision de départ)
  :chiffres N        nombre de décimales affichées
  :jetons EXPR       affiche les jetons de EXPR
  :ecart x1 x2 ...   écart-type d’échantillon
  :q                 quitter";

#[derive(Clone, Debug, PartialEq)]
enum Commande<'a> {
    Calcul(&'a str),
    Aide,
    Clear,
    ResetTotal,
    Chiffres(usize),
    Jetons(&'a str),
    Ecart(&'a str),
    Quitter,
}

fn analyser(ligne: &str) -> Result<Commande<'_>, String> {
    let ligne = ligne.trim();
    let Some(cmd) = ligne.strip_prefix(':') else {
        return Ok(Commande::Calcul(ligne));
    };

    let (nom, reste) = cmd.split_once(char::is_whitespace).unwrap_or((cmd, ""));
    let reste = reste.trim();

    match nom {
        "aide" | "h" | "?" => Ok(Commande::Aide),
        "c" | "clr" => Ok(Commande::Clear),
        "ac" => Ok(Commande::ResetTotal),
        "chiffres" => reste
            .parse::<usize>()
            .map(Commande::Chiffres)
            .map_err(|_| format!("nombre de chiffres invalide: {reste:?}")),
        "jetons" => Ok(Commande::Jetons(reste)),
        "ecart" => Ok(Commande::Ecart(reste)),
        "q" | "quitter" => Ok(Commande::Quitter),
        _ => Err(format!("commande inconnue: :{nom} (voir :aide)")),
    }
}

/// "  ^" sous la position (en caractères) fautive.
fn repere(position: usize) -> String {
    format!("{}^", " ".repeat(position))
}

impl AppCalc {
    /// Traite une ligne et rend le texte à afficher (None = quitter).
    pub fn traiter_ligne(&mut self, ligne: &str) -> Option<String> {
        let cmd = match analyser(ligne) {
            Ok(c) => c,
            Err(msg) => return Some(msg),
        };

        let sortie = match cmd {
            Commande::Quitter => return None,
            Commande::Aide => AIDE.to_string(),
            Commande::Clear => {
                self.clear_entree();
                self.clear_resultats();
                "effacé".to_string()
            }
            Commande::ResetTotal => {
                self.reset_total();
                "remise à zéro".to_string()
            }
            Commande::Chiffres(n) => {
                self.set_chiffres(n);
                format!("décimales : {}", self.reglages.chiffres)
            }
            Commande::Jetons(expr) => match jetons::tokenize(expr) {
                Ok(lx) => jetons::format_tokens(&lx),
                Err(e) => format!("erreur : {e}"),
            },
            Commande::Ecart(nombres) => match ecart_type::calculer(nombres, &self.reglages) {
                Ok(s) => format!("s = {}", format_resultat(s, self.reglages.chiffres)),
                Err(e) => format!("erreur : {e}"),
            },
            Commande::Calcul(expr) => {
                self.entree = expr.to_string();
                self.eval_via_noyau()
            }
        };
        Some(sortie)
    }

    /// Évalue l’entrée via le noyau, dépose résultat/erreur dans l’état, rend le texte.
    fn eval_via_noyau(&mut self) -> String {
        let s = self.entree.trim();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return "Veuillez saisir une expression".to_string();
        }

        match calculate_with(s, &self.reglages) {
            Ok(resultat) => {
                // tokenisation déjà validée par le calcul
                let demarche = jetons::tokenize(s)
                    .map(|lx| jetons::format_tokens(&lx))
                    .unwrap_or_default();
                let sortie = format!("= {resultat}");
                self.set_resultat(resultat, demarche);
                sortie
            }
            Err(e) => {
                let msg = e.to_string();
                let sortie = match e.position() {
                    Some(p) => format!("  {s}\n  {}\nerreur : {msg}", repere(p)),
                    None => format!("erreur : {msg}"),
                };
                self.set_erreur(msg);
                sortie
            }
        }
    }
}

/// Boucle interactive : lit des lignes jusqu’à :q, Ctrl-D ou Ctrl-C.
pub fn lancer(app: &mut AppCalc) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    tracing::info!(chiffres = app.reglages.chiffres, "console prête");

    loop {
        match rl.readline(INVITE) {
            Ok(ligne) => {
                if ligne.trim().is_empty() {
                    continue;
                }
                if let Err(e) = rl.add_history_entry(ligne.as_str()) {
                    tracing::warn!(erreur = %e, "historique indisponible");
                }
                match app.traiter_ligne(&ligne) {
                    Some(sortie) => println!("{sortie}"),
                    None => break,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!(erreur = %e, "lecture console");
                return Err(e);
            }
        }
    }

    tracing::info!("console fermée");
    Ok(())
}
