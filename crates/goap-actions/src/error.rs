use std::path::PathBuf;

use goap_goals::GoalId;
use thiserror::Error;

use crate::ActionId;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("action {0} is already registered")]
    Duplicate(ActionId),
    #[error("global action registry is already installed")]
    AlreadyInstalled,
    #[error("global action registry has not been installed")]
    NotInstalled,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config{}", path_suffix(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" from {}", p.display()),
        None => String::new(),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("goal {0:?} is already claimed by another agent")]
    GoalAlreadyClaimed(GoalId),
    #[error("no active goal")]
    NoActiveGoal,
}
