/*!
 * Caption extraction from MyGUI layouts into gettext translation templates.
 *
 * Every layout in a directory yields one template next to it; the templates
 * are then merged into a single aggregate file. A caption is written only
 * the first time it is seen during a run, whichever layout it comes from.
 *
 * - `layout`: layout parsing and caption collection
 * - `captions`: caption filtering and the run-wide seen set
 * - `pot`: template stanza formatting
 */

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::{debug, error, info};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::app_config::{ExtractorConfig, MalformedLayoutPolicy};
use crate::errors::ExtractError;
use crate::file_utils::FileManager;

pub use self::captions::{is_translatable, SeenCaptions};
pub use self::layout::collect_captions;
pub use self::pot::{escape_po_string, format_entry, write_entry};

pub mod captions;
pub mod layout;
pub mod pot;

/// Extract the captions of one layout into `pot_file`
///
/// Layouts must be UTF-8 encoded; any other encoding is reported as a
/// malformed layout. The layout is parsed completely before `pot_file` is
/// created, so a malformed layout leaves no template behind. New captions are recorded
/// in `seen_captions`. Returns the number of stanzas written.
pub fn translate_layout(layout_file: &Path, pot_file: &Path, seen_captions: &mut SeenCaptions) -> Result<usize> {
    debug!("Loading XML document {:?}...", layout_file);
    let bytes = fs::read(layout_file)
        .with_context(|| format!("Failed to read layout: {:?}", layout_file))?;
    let document = String::from_utf8(bytes).map_err(|e| ExtractError::Parse {
        file: layout_file.to_path_buf(),
        message: format!("layout is not UTF-8 encoded: {}", e),
    })?;
    let captions = collect_captions(&document, layout_file)?;

    let file = File::create(pot_file)
        .with_context(|| format!("Failed to open pot file: {:?}", pot_file))?;
    let mut writer = BufWriter::new(file);

    let mut written = 0;
    for caption in captions {
        if !is_translatable(&caption) || !seen_captions.insert(&caption) {
            continue;
        }

        debug!("Caption found: {}", caption);
        write_entry(&mut writer, &caption)
            .with_context(|| format!("Failed to write pot file: {:?}", pot_file))?;
        written += 1;
    }

    writer.flush()
        .with_context(|| format!("Failed to write pot file: {:?}", pot_file))?;

    Ok(written)
}

/// Summary of a finished extraction run
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Per-layout templates in merge order
    pub templates: Vec<PathBuf>,
    /// Layouts skipped because they could not be parsed
    pub skipped: Vec<PathBuf>,
    /// Distinct captions written to the aggregate
    pub captions: usize,
}

/// Extracts captions from every layout of a directory
pub struct LayoutExtractor {
    config: ExtractorConfig,
}

impl LayoutExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Convert every layout directly inside `layouts_dir` and merge the templates into `output`
    pub fn run(&self, layouts_dir: &Path, output: &Path, progress: &ProgressBar) -> Result<ExtractionReport> {
        if !FileManager::dir_exists(layouts_dir) {
            return Err(anyhow::anyhow!("Layouts directory does not exist: {:?}", layouts_dir));
        }

        let layouts = FileManager::find_files(layouts_dir, &self.config.layout_extension)?;
        info!("Found {} layout file(s) in {:?}", layouts.len(), layouts_dir);

        progress.set_length(layouts.len() as u64);

        let mut seen_captions = SeenCaptions::new();
        let mut report = ExtractionReport::default();

        for layout in &layouts {
            let pot_file = FileManager::replace_extension(
                layout,
                &self.config.layout_extension,
                &self.config.template_extension,
            );

            let file_name = layout.file_name().unwrap_or_default().to_string_lossy().to_string();
            progress.set_message(file_name.clone());
            info!("Converting {}...", file_name);

            match translate_layout(layout, &pot_file, &mut seen_captions) {
                Ok(written) => {
                    debug!("Wrote {} caption(s) to {:?}", written, pot_file);
                    report.templates.push(pot_file);
                }
                Err(e) if self.skips(&e) => {
                    error!("Skipping malformed layout: {:#}", e);
                    report.skipped.push(layout.clone());
                }
                Err(e) => return Err(e),
            }

            progress.inc(1);
        }

        progress.finish_and_clear();

        info!("Merging pot files together into {:?}...", output);
        FileManager::concatenate_files(&report.templates, output)?;
        report.captions = seen_captions.len();

        if self.config.remove_intermediate_files {
            info!("Deleting temporary POT files...");
            let temporary: Vec<PathBuf> = report
                .templates
                .iter()
                .filter(|template| !same_file(template, output))
                .cloned()
                .collect();
            FileManager::remove_files(&temporary)?;
        }

        Ok(report)
    }

    // @checks: Error is a layout parse error and the policy is to skip
    fn skips(&self, error: &anyhow::Error) -> bool {
        self.config.on_malformed_layout == MalformedLayoutPolicy::Skip
            && error.downcast_ref::<ExtractError>().is_some()
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
