use std::io::{self, BufRead};

use thiserror::Error;

use crate::Float;

/// Stop time of every run.
pub const FINAL_TIME: Float = 0.5;

/// The stencil needs distinct left, center and right neighbours.
pub const MIN_POINTS: usize = 3;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("expected a grid size on input, found none")]
    Missing,
    #[error("grid size `{0}` is not an integer")]
    NotAnInteger(String),
    #[error("grid size must be positive, got {0}")]
    NonPositive(i64),
    #[error("grid size must be at least {min} points, got {points}")]
    TooFewPoints { points: usize, min: usize },
    #[error("couldn't read grid size")]
    Read(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub(crate) points: usize,
    pub(crate) final_time: Float,
}

impl Parameters {
    pub fn new(points: usize) -> Result<Self, ConfigError> {
        if points < MIN_POINTS {
            return Err(ConfigError::TooFewPoints {
                points,
                min: MIN_POINTS,
            });
        }

        Ok(Self {
            points,
            final_time: FINAL_TIME,
        })
    }

    pub fn with_final_time(mut self, final_time: Float) -> Self {
        self.final_time = final_time;
        self
    }

    /// Parses the first whitespace-separated token of `input` as the grid size.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let token = input.split_whitespace().next().ok_or(ConfigError::Missing)?;
        let points: i64 = token
            .parse()
            .map_err(|_| ConfigError::NotAnInteger(token.to_string()))?;

        if points <= 0 {
            return Err(ConfigError::NonPositive(points));
        }

        let points =
            usize::try_from(points).map_err(|_| ConfigError::NotAnInteger(token.to_string()))?;
        Self::new(points)
    }

    /// Reads lines until one holds a token, then parses it.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, ConfigError> {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(ConfigError::Missing);
            }
            if !line.trim().is_empty() {
                return Self::parse(&line);
            }
        }
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn final_time(&self) -> Float {
        self.final_time
    }
}
