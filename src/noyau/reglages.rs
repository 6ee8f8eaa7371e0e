// src/noyau/reglages.rs
//
// Paramètres du noyau : précision d’affichage + garde-fou d’imbrication.
// Valeurs par défaut ici, surcharge possible par variables d’environnement
// (lues une seule fois, au démarrage, par main.rs).

/// Décimales affichées par défaut.
pub const CHIFFRES_DEFAUT: usize = 10;

/// Au-delà, f64 n’a plus de chiffres significatifs à montrer.
pub const CHIFFRES_MAX: usize = 15;

/// Profondeur d’imbrication par défaut (parenthèses, préfixes, puissances).
pub const PROFONDEUR_DEFAUT: usize = 256;

/// Garde-fou : chaque niveau coûte ~7 cadres de pile (primaire -> ... -> postfixe).
/// Borne choisie pour tenir dans `PILE_MIN` octets, build debug compris.
pub const PROFONDEUR_MAX: usize = 512;

/// Pile du thread console : de quoi évaluer à `PROFONDEUR_MAX`.
pub const PILE_MIN: usize = 8 * 1024 * 1024;

pub const ENV_CHIFFRES: &str = "CALCULATRICE_CHIFFRES";
pub const ENV_PROFONDEUR: &str = "CALCULATRICE_PROFONDEUR";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub chiffres: usize,
    pub profondeur_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            chiffres: CHIFFRES_DEFAUT,
            profondeur_max: PROFONDEUR_DEFAUT,
        }
    }
}

impl Reglages {
    /// Défauts + surcharges `CALCULATRICE_CHIFFRES` / `CALCULATRICE_PROFONDEUR`.
    pub fn depuis_env() -> Self {
        Self::depuis_sources(|cle| std::env::var(cle).ok())
    }

    /// Même logique que `depuis_env`, avec une source injectable (tests).
    pub fn depuis_sources(lire: impl Fn(&str) -> Option<String>) -> Self {
        let mut r = Self::default();

        if let Some(n) = lire_usize(&lire, ENV_CHIFFRES) {
            r.set_chiffres(n);
        }
        if let Some(n) = lire_usize(&lire, ENV_PROFONDEUR) {
            r.set_profondeur_max(n);
        }

        tracing::debug!(
            chiffres = r.chiffres,
            profondeur_max = r.profondeur_max,
            "réglages"
        );
        r
    }

    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.min(CHIFFRES_MAX);
    }

    pub fn set_profondeur_max(&mut self, profondeur: usize) {
        self.profondeur_max = profondeur.clamp(1, PROFONDEUR_MAX);
    }
}

fn lire_usize(lire: &impl Fn(&str) -> Option<String>, cle: &str) -> Option<usize> {
    let brut = lire(cle)?;
    match brut.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!(variable = cle, valeur = %brut, erreur = %e, "valeur ignorée");
            None
        }
    }
}
