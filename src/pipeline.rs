//! Orchestration of the full regeneration run.
//! Steps run in a fixed order and the first failure stops the pipeline.

use crate::config::Config;
use crate::embed::embed_samples;
use crate::error::Result;
use crate::extension::validate_extensions;
use crate::index::generate_indexes;
use log::info;
use std::path::{Path, PathBuf};

/// Numbers progress messages as `[n/total]`.
#[derive(Debug)]
pub struct StepCounter {
    current: usize,
    total: usize,
}

impl StepCounter {
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Advances the counter and returns the label for the new step.
    pub fn advance(&mut self, description: &str) -> String {
        self.current += 1;
        format!("[{}/{}] {}", self.current, self.total, description)
    }

    pub fn current(&self) -> usize {
        self.current
    }
}

pub struct Pipeline<'a> {
    config: &'a Config,
    project_root: PathBuf,
    skip_checks: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new<P: AsRef<Path>>(config: &'a Config, project_root: P, skip_checks: bool) -> Self {
        Self {
            config,
            project_root: project_root.as_ref().to_path_buf(),
            skip_checks,
        }
    }

    fn total_steps(&self) -> usize {
        let checks = if self.skip_checks {
            0
        } else {
            self.config.checks.len()
        };
        3 + checks
    }

    /// Runs validation, index generation, sample embedding and the
    /// collaborator checks. Returns the number of steps completed.
    pub fn run(&self) -> Result<usize> {
        let mut steps = StepCounter::new(self.total_steps());
        let source_root = self.project_root.join(&self.config.index.root);

        info!("{}", steps.advance("Validating source extensions"));
        validate_extensions(&source_root, &self.config.index)?;

        info!("{}", steps.advance("Generating barrel files"));
        let report = generate_indexes(&source_root, &self.config.index, true)?;
        info!("{} barrel file(s) updated", report.changed().len());

        info!("{}", steps.advance("Embedding sample code"));
        let report = embed_samples(&self.project_root, &self.config.embed, true)?;
        info!("{} document(s) updated", report.changed().len());

        if self.skip_checks {
            info!("Skipping checks");
        } else {
            for check in &self.config.checks {
                info!("{}", steps.advance(check.display_name()));
                check.run(&self.project_root)?;
            }
        }
        Ok(steps.current())
    }
}
