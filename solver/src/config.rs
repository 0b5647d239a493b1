// Configuration for the solver binary, read from Solver.toml

use std::fs;
use std::num::NonZero;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use floodit::{Neighborhood, SearchConfig};
use serde::Deserialize;

/// Everything tunable without recompiling
#[derive(Debug, Deserialize, Clone)]
pub struct SolverConfig {
    pub search: SearchSection,
    pub board: BoardSection,
}

/// Monte Carlo tree search parameters
#[derive(Debug, Deserialize, Clone)]
pub struct SearchSection {
    pub seed: u64,
    pub iterations: usize,
    pub exploration: f64,
    pub variance: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BoardSection {
    pub neighborhood: String,
}

impl SolverConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read config file {}", path.as_ref().display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.as_ref().display()))
    }

    /// Loads Solver.toml from the working directory
    pub fn load_default() -> Result<Self> {
        Self::from_file("Solver.toml")
    }

    /// Hardcoded fallback; should match Solver.toml
    pub fn default_hardcoded() -> Self {
        let search = SearchConfig::default();

        SolverConfig {
            search: SearchSection {
                seed: search.seed,
                iterations: search.iterations.get(),
                exploration: search.exploration,
                variance: search.variance,
            },
            board: BoardSection {
                neighborhood: Neighborhood::default().to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default()
            .unwrap_or_else(|e| {
                log::warn!("could not load Solver.toml ({:#}), using hardcoded defaults", e);
                Self::default_hardcoded()
            })
    }

    pub fn search_config(&self) -> Result<SearchConfig> {
        let iterations = NonZero::new(self.search.iterations)
            .ok_or_else(|| anyhow!("search.iterations must be at least 1"))?;

        Ok(SearchConfig::default()
            .with_seed(self.search.seed)
            .with_iterations(iterations)
            .with_exploration(self.search.exploration)
            .with_variance(self.search.variance))
    }

    pub fn neighborhood(&self) -> Result<Neighborhood> {
        self.board.neighborhood.parse::<Neighborhood>()
            .with_context(|| format!("unknown neighborhood '{}', expected four or eight", self.board.neighborhood))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardcoded_defaults_match_library() {
        let config = SolverConfig::default_hardcoded();
        assert_eq!(config.search_config().unwrap(), SearchConfig::default());
        assert_eq!(config.neighborhood().unwrap(), Neighborhood::Eight);
    }

    #[test]
    fn test_solver_toml_can_be_parsed() {
        let result = SolverConfig::from_file("Solver.toml");
        assert!(result.is_ok(), "Failed to parse Solver.toml: {:?}", result.err());
    }

    #[test]
    fn test_solver_toml_matches_hardcoded_defaults() {
        let config = SolverConfig::from_file("Solver.toml").expect("Solver.toml should be parseable");
        assert_eq!(config.search_config().unwrap(), SearchConfig::default());
        assert_eq!(config.neighborhood().unwrap(), Neighborhood::Eight);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut config = SolverConfig::default_hardcoded();
        config.search.iterations = 0;
        assert!(config.search_config().is_err());
    }

    #[test]
    fn test_unknown_neighborhood_rejected() {
        let mut config = SolverConfig::default_hardcoded();
        config.board.neighborhood = "six".to_string();
        assert!(config.neighborhood().is_err());

        config.board.neighborhood = "four".to_string();
        assert_eq!(config.neighborhood().unwrap(), Neighborhood::Four);
    }

    #[test]
    fn test_missing_file_returns_error() {
        assert!(SolverConfig::from_file("nonexistent.toml").is_err());
    }
}
