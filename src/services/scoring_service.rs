// ==================== APPLICATION SCORING ====================
// Scoring simples baseado nos dados disponíveis da candidatura.
// Cada sub-score vai de 0 a 100; o total é a média dos sub-scores calculáveis.

use crate::models::{Application, CriteriaWeights};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const SKILL: &str = "skill";
pub const EXPERIENCE: &str = "experience";
pub const EDUCATION: &str = "education";

const POINTS_PER_SKILL: f64 = 20.0;
const POINTS_PER_YEAR: f64 = 10.0;
const DEFAULT_EDUCATION_SCORE: f64 = 50.0;
const MAX_SUB_SCORE: f64 = 100.0;

lazy_static::lazy_static! {
    static ref EDUCATION_SCORES: HashMap<&'static str, f64> = HashMap::from([
        ("high school", 30.0),
        ("associate", 50.0),
        ("bachelor", 70.0),
        ("master", 85.0),
        ("phd", 100.0),
    ]);
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub criteria_scores: BTreeMap<String, f64>,
    pub total_score: i64,
}

fn capped(value: f64) -> f64 {
    value.clamp(0.0, MAX_SUB_SCORE)
}

pub fn skill_score(key_skills: &str) -> f64 {
    capped(key_skills.split(',').count() as f64 * POINTS_PER_SKILL)
}

pub fn experience_score(years: f64) -> f64 {
    capped(years * POINTS_PER_YEAR)
}

pub fn education_score(level: &str) -> f64 {
    EDUCATION_SCORES
        .get(level.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_EDUCATION_SCORE)
}

/// Calcula os sub-scores e a média arredondada.
///
/// Campos ausentes (ou vazios / zero) ficam fora do numerador e do denominador.
/// Os pesos do ranking são aceitos mas ainda não entram no cálculo: o total é a média simples.
pub fn score_application(application: &Application, _criteria_weights: &CriteriaWeights) -> ScoreResult {
    let mut scores = BTreeMap::new();

    if let Some(skills) = application.key_skills.as_deref().filter(|s| !s.is_empty()) {
        scores.insert(SKILL.to_string(), skill_score(skills));
    }

    if let Some(years) = application.experience_years.filter(|y| *y != 0.0 && !y.is_nan()) {
        scores.insert(EXPERIENCE.to_string(), experience_score(years));
    }

    if let Some(level) = application.education_level.as_deref().filter(|l| !l.is_empty()) {
        scores.insert(EDUCATION.to_string(), education_score(level));
    }

    let total_score = if scores.is_empty() {
        0
    } else {
        (scores.values().sum::<f64>() / scores.len() as f64).round() as i64
    };

    ScoreResult { criteria_scores: scores, total_score }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application() -> Application {
        Application { id: "app-1".to_string(), ..Application::default() }
    }

    fn no_weights() -> CriteriaWeights {
        CriteriaWeights::new()
    }

    #[test]
    fn test_experience_only() {
        let app = Application { experience_years: Some(5.0), ..application() };
        let result = score_application(&app, &no_weights());

        assert_eq!(result.criteria_scores.len(), 1);
        assert_eq!(result.criteria_scores.get(EXPERIENCE), Some(&50.0));
        assert_eq!(result.total_score, 50);
    }

    #[test]
    fn test_skills_are_capped() {
        let app = Application { key_skills: Some("a,b,c,d,e,f".to_string()), ..application() };
        let result = score_application(&app, &no_weights());

        assert_eq!(result.criteria_scores.get(SKILL), Some(&100.0));
        assert_eq!(result.total_score, 100);
    }

    #[test]
    fn test_nothing_to_score() {
        let result = score_application(&application(), &no_weights());

        assert!(result.criteria_scores.is_empty());
        assert_eq!(result.total_score, 0);
    }

    #[test]
    fn test_blank_and_zero_fields_are_excluded() {
        let app = Application {
            key_skills: Some(String::new()),
            experience_years: Some(0.0),
            education_level: Some("master".to_string()),
            ..application()
        };
        let result = score_application(&app, &no_weights());

        assert_eq!(result.criteria_scores.len(), 1);
        assert_eq!(result.total_score, 85);
    }

    #[test]
    fn test_average_is_rounded() {
        // (40 + 25 + 70) / 3 = 45
        let app = Application {
            key_skills: Some("rust, sql".to_string()),
            experience_years: Some(2.5),
            education_level: Some("Bachelor".to_string()),
            ..application()
        };
        let result = score_application(&app, &no_weights());
        assert_eq!(result.total_score, 45);

        // (20 + 85) / 2 = 52.5 -> 53
        let app = Application {
            key_skills: Some("rust".to_string()),
            education_level: Some("MASTER".to_string()),
            ..application()
        };
        assert_eq!(score_application(&app, &no_weights()).total_score, 53);
    }

    #[test]
    fn test_education_lookup() {
        assert_eq!(education_score("High School"), 30.0);
        assert_eq!(education_score("phd"), 100.0);
        assert_eq!(education_score("bootcamp"), 50.0);
    }

    #[test]
    fn test_weights_do_not_change_the_mean() {
        let app = Application {
            key_skills: Some("a,b".to_string()),
            experience_years: Some(10.0),
            ..application()
        };
        let mut weights = CriteriaWeights::new();
        weights.insert("skill".to_string(), serde_json::json!(0.9));
        weights.insert("experience".to_string(), serde_json::json!(0.1));

        assert_eq!(
            score_application(&app, &weights),
            score_application(&app, &no_weights())
        );
        assert_eq!(score_application(&app, &weights).total_score, 70);
    }

    #[test]
    fn test_negative_experience_floors_at_zero() {
        assert_eq!(experience_score(-3.0), 0.0);
        assert_eq!(experience_score(12.0), 100.0);
    }
}
