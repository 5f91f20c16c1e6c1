//! Static site assembly: one HTML page per catalog object, the embedded
//! ER diagram, and shared chrome.

mod assets;
mod html;
mod pages;

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::DatabaseMetadata;
use crate::paths::{sanitize_file_name, table_page};
use crate::render_diagram;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("failed to write site output: {0}")]
    Io(#[from] std::io::Error),
}

pub struct SiteGenerator {
    out_dir: PathBuf,
}

impl SiteGenerator {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write the complete site for one snapshot.
    pub fn generate(&self, metadata: &DatabaseMetadata) -> Result<(), SiteError> {
        for dir in ["", "tables", "users", "jobs", "procedures", "functions", "css"] {
            fs::create_dir_all(self.out_dir.join(dir))?;
        }

        self.write("css/style.css", assets::STYLESHEET)?;
        self.write("index.html", &pages::index(metadata))?;

        let diagram = render_diagram(metadata);
        self.write("diagram.html", &pages::diagram(metadata, &diagram.svg))?;
        self.write("statistics.html", &pages::statistics(metadata))?;

        for table in &metadata.tables {
            let file = format!("tables/{}", table_page(&table.schema, &table.name));
            self.write(&file, &pages::table(table, metadata))?;
        }
        for user in &metadata.users {
            let file = format!("users/{}.html", sanitize_file_name(&user.name));
            self.write(&file, &pages::user(user))?;
        }
        for job in &metadata.jobs {
            let file = format!("jobs/{}.html", sanitize_file_name(&job.name));
            self.write(&file, &pages::job(job))?;
        }
        for proc in &metadata.procedures {
            let file = format!("procedures/{}", table_page(&proc.schema, &proc.name));
            self.write(&file, &pages::procedure(proc))?;
        }
        for func in &metadata.functions {
            let file = format!("functions/{}", table_page(&func.schema, &func.name));
            self.write(&file, &pages::function(func))?;
        }

        Ok(())
    }

    fn write(&self, rel: &str, content: &str) -> Result<(), SiteError> {
        fs::write(self.out_dir.join(rel), content)?;
        Ok(())
    }
}
