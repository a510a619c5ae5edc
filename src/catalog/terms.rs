//! Term enumeration
//!
//! The remote service is keyed by human-readable term labels, so the sweep
//! plan is just seasons crossed with years. Late in the calendar year the
//! next year's Intersession and Spring are usually already listed, so they
//! are appended after July.

use chrono::{Datelike, Local, NaiveDate};

use crate::config::CatalogConfig;
use crate::model::Term;

/// Enumerates the sweep plan for a given date.
pub fn enumerate_terms(config: &CatalogConfig, today: NaiveDate) -> Vec<Term> {
    let end_year = today.year();
    let mut terms = Vec::new();

    for year in config.start_year..=end_year {
        for season in &config.seasons {
            terms.push(Term::new(format!("{} {}", season, year)));
        }
    }

    if today.month() >= 8 {
        terms.push(Term::new(format!("Intersession {}", end_year + 1)));
        terms.push(Term::new(format!("Spring {}", end_year + 1)));
    }

    terms
}

/// Enumerates the sweep plan for today.
pub fn current_terms(config: &CatalogConfig) -> Vec<Term> {
    enumerate_terms(config, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_config() -> CatalogConfig {
        CatalogConfig {
            schools: vec!["Whiting School of Engineering".to_string()],
            start_year: 2022,
            seasons: ["Intersession", "Spring", "Summer", "Fall"]
                .map(String::from)
                .to_vec(),
        }
    }

    #[test]
    fn test_enumerates_seasons_by_year() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let terms = enumerate_terms(&catalog_config(), today);

        // 3 years x 4 seasons, no late-year extension in March
        assert_eq!(terms.len(), 12);
        assert_eq!(terms[0], Term::from("Intersession 2022"));
        assert_eq!(terms[3], Term::from("Fall 2022"));
        assert_eq!(terms[11], Term::from("Fall 2024"));
    }

    #[test]
    fn test_late_year_appends_next_spring() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let terms = enumerate_terms(&catalog_config(), today);

        assert_eq!(terms.len(), 14);
        assert_eq!(terms[12], Term::from("Intersession 2025"));
        assert_eq!(terms[13], Term::from("Spring 2025"));
    }

    #[test]
    fn test_july_does_not_extend() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
        let terms = enumerate_terms(&catalog_config(), today);
        assert_eq!(terms.len(), 12);
    }

    #[test]
    fn test_custom_season_list() {
        let mut config = catalog_config();
        config.seasons = vec!["Fall".to_string()];
        let today = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        let terms = enumerate_terms(&config, today);
        assert_eq!(
            terms,
            vec![Term::from("Fall 2022"), Term::from("Fall 2023")]
        );
    }
}
