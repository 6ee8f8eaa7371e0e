//! src/app/etat.rs
//!
//! État UI (sans console, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, réglages, jetons)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur la précision : déléguées à `Reglages::set_chiffres`.

use crate::noyau::Reglages;

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // dernier résultat (texte de `calculate`)
    pub erreur: String,   // message d’erreur (si l’évaluation échoue)
    pub jetons: String,   // “démarche” : jetons de la dernière entrée

    // --- paramètres ---
    pub reglages: Reglages,
    reglages_initiaux: Reglages,
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            reglages,
            reglages_initiaux: reglages,
            ..Default::default()
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + réglages de départ).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.reglages = self.reglages_initiaux;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
    }

    /// CLR : effacer résultat + erreur + jetons (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.jetons.clear();
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute.
    /// - Les jetons ne sont plus fiables : on les efface.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.jetons.clear();
    }

    /// Utilitaire : déposer un résultat (efface l’erreur précédente).
    pub fn set_resultat(&mut self, resultat: impl Into<String>, jetons: impl Into<String>) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.jetons = jetons.into();
    }

    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.reglages.set_chiffres(chiffres);
    }
}
