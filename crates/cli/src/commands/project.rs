// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project commands

use crate::app::App;
use crate::output::{print_list, OutputFormat};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use jw_core::JobState;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Watch a pipeline project directory
    Add {
        /// Project root (must contain default_pipeline.star)
        path: PathBuf,
        /// Project name, defaults to the directory name
        #[arg(long)]
        name: Option<String>,
        /// Scheduler tag linking jobs named <TAG>J<N> to jobNNN
        #[arg(long)]
        tag: Option<String>,
    },
    /// Stop watching a project and forget its job records
    Remove {
        name: String,
    },
    /// List watched projects
    List {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show the jobs of one project with their current and recorded state
    Jobs {
        name: String,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

#[derive(Serialize)]
struct ProjectInfo {
    name: String,
    root: PathBuf,
    tag: Option<String>,
    added_at: DateTime<Utc>,
}

impl fmt::Display for ProjectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<16} {:<6} {}",
            self.name,
            self.tag.as_deref().unwrap_or("-"),
            self.root.display()
        )
    }
}

#[derive(Serialize)]
struct JobInfo {
    job: String,
    current: JobState,
    recorded: Option<JobState>,
    updated_at: Option<DateTime<Utc>>,
}

impl fmt::Display for JobInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recorded = self.recorded.map_or("-", JobState::as_str);
        write!(f, "{:<32} {:<10} {}", self.job, self.current, recorded)
    }
}

pub fn handle(command: ProjectCommand, app: &App) -> anyhow::Result<()> {
    match command {
        ProjectCommand::Add { path, name, tag } => {
            let project = app
                .watcher
                .add_project(&path, name.as_deref(), tag.as_deref())?;
            println!("Watching '{}' at {}", project.name, project.root.display());
        }
        ProjectCommand::Remove { name } => {
            let (project, purged) = app.watcher.remove_project(&name)?;
            println!(
                "Removed '{}' ({} job records forgotten, files untouched)",
                project.name, purged
            );
        }
        ProjectCommand::List { format } => {
            let projects: Vec<ProjectInfo> = app
                .watcher
                .projects()?
                .into_iter()
                .map(|p| ProjectInfo {
                    name: p.name,
                    root: p.root,
                    tag: p.tag,
                    added_at: p.added_at,
                })
                .collect();
            print_list(&projects, format, "No projects");
        }
        ProjectCommand::Jobs { name, format } => {
            let jobs: Vec<JobInfo> = app
                .watcher
                .project_jobs(&name)?
                .into_iter()
                .map(|view| JobInfo {
                    job: view.job.id.0,
                    current: view.current,
                    recorded: view.recorded.as_ref().map(|r| r.state),
                    updated_at: view.recorded.map(|r| r.updated_at),
                })
                .collect();
            print_list(&jobs, format, "No jobs");
        }
    }
    Ok(())
}
