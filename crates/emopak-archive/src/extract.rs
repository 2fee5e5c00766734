//! Writing decoded entries to disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{AssetArchive, AssetEntry, Diagnostic, Error, Result};

/// A file written during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Directory index of the entry.
    pub index: usize,
    /// Destination path.
    pub path: PathBuf,
    /// Bytes written.
    pub size: usize,
}

/// Outcome of [`AssetArchive::extract_to`].
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    /// Files written, in directory order.
    pub written: Vec<ExtractedFile>,
    /// Entries refused at extraction time.
    pub skipped: Vec<Diagnostic>,
}

/// One pending write.
struct Job<'e> {
    index: usize,
    path: PathBuf,
    content: &'e [u8],
}

impl AssetArchive<'_> {
    /// Write every extractable entry to `dir`.
    ///
    /// Entries already marked unextracted by the decoder are passed over.
    /// Names that are empty, absolute, or that climb out of `dir` are
    /// refused with [`Diagnostic::UnsafeName`]. When several entries map to
    /// the same path the last one is written and the earlier ones are
    /// reported as [`Diagnostic::Superseded`]. `progress` is called once for
    /// every entry, possibly from worker threads.
    pub fn extract_to<P, F>(&self, dir: P, progress: F) -> Result<ExtractReport>
    where
        P: AsRef<Path>,
        F: Fn(&AssetEntry<'_>) + Sync,
    {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| Error::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut report = ExtractReport::default();
        let mut jobs = Vec::with_capacity(self.entry_count());

        for entry in self.iter() {
            let Some(content) = entry.content else {
                progress(entry);
                continue;
            };

            match safe_join(dir, &entry.name) {
                Some(path) => jobs.push((
                    entry,
                    Job {
                        index: entry.index,
                        path,
                        content,
                    },
                )),
                None => {
                    tracing::debug!(index = entry.index, name = %entry.name, "refusing unsafe name");
                    report.skipped.push(Diagnostic::UnsafeName {
                        index: entry.index,
                        name: entry.name.to_string(),
                    });
                    progress(entry);
                }
            }
        }

        let jobs = drop_superseded(jobs, &mut report.skipped, &progress);

        #[cfg(feature = "parallel")]
        let written: Result<Vec<_>> = jobs
            .par_iter()
            .map(|(entry, job)| run_job(entry, job, &progress))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let written: Result<Vec<_>> = jobs
            .iter()
            .map(|(entry, job)| run_job(entry, job, &progress))
            .collect();

        report.written = written?;

        tracing::debug!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            dir = %dir.display(),
            "extraction finished"
        );

        Ok(report)
    }
}

/// Keep only the last job for each destination path.
fn drop_superseded<'e, 'a, F>(
    jobs: Vec<(&'e AssetEntry<'a>, Job<'a>)>,
    skipped: &mut Vec<Diagnostic>,
    progress: &F,
) -> Vec<(&'e AssetEntry<'a>, Job<'a>)>
where
    F: Fn(&AssetEntry<'_>),
{
    let mut last_writer: HashMap<PathBuf, usize> = HashMap::with_capacity(jobs.len());
    for (_, job) in &jobs {
        last_writer.insert(job.path.clone(), job.index);
    }

    jobs.into_iter()
        .filter(|(entry, job)| match last_writer.get(&job.path) {
            Some(&by) if by != job.index => {
                tracing::debug!(index = job.index, by, name = %entry.name, "entry superseded");
                skipped.push(Diagnostic::Superseded {
                    index: job.index,
                    name: entry.name.to_string(),
                    by,
                });
                progress(entry);
                false
            }
            _ => true,
        })
        .collect()
}

fn run_job<F>(entry: &AssetEntry<'_>, job: &Job<'_>, progress: &F) -> Result<ExtractedFile>
where
    F: Fn(&AssetEntry<'_>),
{
    let written = write_job(job)?;
    progress(entry);
    Ok(written)
}

fn write_job(job: &Job<'_>) -> Result<ExtractedFile> {
    if let Some(parent) = job.path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&job.path, job.content).map_err(|source| Error::Write {
        path: job.path.clone(),
        source,
    })?;

    Ok(ExtractedFile {
        index: job.index,
        path: job.path.clone(),
        size: job.content.len(),
    })
}

/// Join `name` onto `dir` if it is a plain relative path.
fn safe_join(dir: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    let mut components = relative.components().peekable();
    components.peek()?;

    if components.all(|c| matches!(c, Component::Normal(_))) {
        Some(dir.join(relative))
    } else {
        None
    }
}
