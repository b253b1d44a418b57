//! Severance computation contract (licenciement / rupture conventionnelle).
//!
//! Monetary amounts travel as decimal strings, never native floats, so no
//! precision is lost across the service boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRupture {
    Licenciement,
    RuptureConventionnelle,
}

impl TypeRupture {
    /// Display label used in exported documents.
    pub fn label(&self) -> &'static str {
        match self {
            TypeRupture::Licenciement => "Licenciement",
            TypeRupture::RuptureConventionnelle => "Rupture conventionnelle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotifLicenciement {
    Personnel,
    Economique,
    InaptitudeProfessionnelle,
    InaptitudeNonProfessionnelle,
    FauteGrave,
    FauteLourde,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConventionCollective {
    Aucune,
    #[serde(rename = "ccn_1966")]
    Ccn1966,
}

/// Part-time sub-period of the employment: a duration in months and the
/// fraction of full time worked over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodeTravail {
    pub duree_mois: u32,
    /// In `[0, 1]`; 1.0 is full time.
    pub coefficient_temps: f64,
}

/// Input of the severance computation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenciementInput {
    pub type_rupture: TypeRupture,
    /// ISO date `YYYY-MM-DD`.
    pub date_entree: String,
    /// Licenciement only; None for a rupture conventionnelle.
    pub date_notification: Option<String>,
    pub date_fin_contrat: String,
    pub motif: Option<MotifLicenciement>,
    pub indemnite_supralegale: Option<String>,
    pub convention_collective: ConventionCollective,
    /// Gross monthly salaries, most recent first, at most 12 entries.
    pub salaires_12_derniers_mois: Vec<String>,
    pub primes_annuelles_3_derniers_mois: String,
    pub periodes_travail: Vec<PeriodeTravail>,
    pub mois_suspendus_non_comptes: u32,
    pub mois_conge_parental_temps_plein: u32,
    pub age_salarie: Option<u32>,
    pub salaire_mensuel_actuel: Option<String>,
}

/// Output of the severance computation endpoint.
///
/// When `eligible` is false only `raison_ineligibilite` is meaningful; the
/// numeric breakdown fields still carry service-provided defaults but must
/// not be rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenciementResult {
    pub type_rupture: TypeRupture,
    pub montant_indemnite: String,
    pub montant_minimum: String,
    pub salaire_reference: String,
    pub methode_salaire_reference: String,
    pub anciennete_retenue_mois: u32,
    pub anciennete_retenue_annees: String,
    pub indemnite_legale: String,
    pub indemnite_conventionnelle: Option<String>,
    pub multiplicateur: String,
    pub preavis_mois: u32,
    pub indemnite_supralegale: String,
    pub plafond_applique: bool,
    pub plafond_description: Option<String>,
    pub explication: String,
    pub eligible: bool,
    pub raison_ineligibilite: Option<String>,
}

impl LicenciementResult {
    /// Human label for the reference-salary method sentinel.
    pub fn methode_label(&self) -> &'static str {
        if self.methode_salaire_reference == "moyenne_12_mois" {
            "Moyenne 12 derniers mois"
        } else {
            "Moyenne 3 derniers mois"
        }
    }
}

/// One gross monthly salary extracted from an uploaded payslip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaireMensuel {
    pub mois: u32,
    pub annee: i32,
    pub salaire_brut: String,
}

/// Result of the payslip-bundle extraction endpoint, used to prefill the
/// severance form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenciementPdfExtraction {
    pub extraction_success: bool,
    pub extraction_errors: Vec<String>,
    pub date_entree: Option<String>,
    pub convention_collective: ConventionCollective,
    pub convention_collective_brute: Option<String>,
    pub salaires_extraits: Vec<SalaireMensuel>,
    pub salaires_12_derniers_mois: Vec<String>,
    pub nombre_fiches_extraites: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type_rupture_wire_names() {
        assert_eq!(
            serde_json::to_string(&TypeRupture::RuptureConventionnelle).unwrap(),
            "\"rupture_conventionnelle\""
        );
        assert_eq!(
            serde_json::from_str::<TypeRupture>("\"licenciement\"").unwrap(),
            TypeRupture::Licenciement
        );
    }

    #[test]
    fn test_convention_collective_wire_names() {
        assert_eq!(
            serde_json::to_string(&ConventionCollective::Ccn1966).unwrap(),
            "\"ccn_1966\""
        );
        assert_eq!(
            serde_json::to_string(&ConventionCollective::Aucune).unwrap(),
            "\"aucune\""
        );
    }

    #[test]
    fn test_result_roundtrip_keeps_decimal_strings() {
        let json = r#"{
            "type_rupture": "licenciement",
            "montant_indemnite": "4500.00",
            "montant_minimum": "4500.00",
            "salaire_reference": "2250.50",
            "methode_salaire_reference": "moyenne_12_mois",
            "anciennete_retenue_mois": 96,
            "anciennete_retenue_annees": "8.0",
            "indemnite_legale": "4500.00",
            "indemnite_conventionnelle": null,
            "multiplicateur": "1",
            "preavis_mois": 2,
            "indemnite_supralegale": "0",
            "plafond_applique": false,
            "plafond_description": null,
            "explication": "Calcul selon le barème légal.",
            "eligible": true,
            "raison_ineligibilite": null
        }"#;
        let r: LicenciementResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.montant_indemnite, "4500.00");
        assert_eq!(r.methode_label(), "Moyenne 12 derniers mois");
        assert!(r.indemnite_conventionnelle.is_none());
    }
}
