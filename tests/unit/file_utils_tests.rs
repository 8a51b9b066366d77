/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use sion_tools::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that dir_exists returns false for non-existent directories
#[test]
fn test_dir_exists_withNonExistentDir_shouldReturnFalse() {
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));
}

/// Test that replace_extension derives the template path next to the layout
#[test]
fn test_replace_extension_withLayout_shouldCreatePotPath() {
    let output_path = FileManager::replace_extension(Path::new("/media/layouts/options.layout"), "layout", "pot");

    assert_eq!(output_path, Path::new("/media/layouts/options.pot"));
}

/// Test that find_files lists only direct children with the suffix, sorted by name
#[test]
fn test_find_files_withMixedEntries_shouldReturnSortedDirectLayouts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "options.layout", "")?;
    common::create_test_file(temp_dir.path(), "about.layout", "")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "")?;
    common::create_test_file(temp_dir.path(), "menu.layout.bak", "")?;
    fs::create_dir(temp_dir.path().join("nested.layout"))?;
    common::create_test_file(&temp_dir.path().join("nested.layout"), "inner.layout", "")?;

    let files = FileManager::find_files(temp_dir.path(), "layout")?;

    let names: Vec<_> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["about.layout", "options.layout"]);

    Ok(())
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = temp_dir.path().join("out").join("hero.mesh.xml");

    FileManager::write_to_file(&test_file, "<mesh/>")?;

    assert_eq!(fs::read_to_string(&test_file)?, "<mesh/>");

    Ok(())
}

/// Test that concatenate_files joins inputs in order and truncates the output
#[test]
fn test_concatenate_files_withExistingOutput_shouldOverwriteInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first = common::create_test_file(temp_dir.path(), "a.pot", "first\n")?;
    let second = common::create_test_file(temp_dir.path(), "b.pot", "second\n")?;
    let output = common::create_test_file(temp_dir.path(), "all.pot", "stale content that is longer\n")?;

    FileManager::concatenate_files(&[second, first], &output)?;

    assert_eq!(fs::read_to_string(&output)?, "second\nfirst\n");

    Ok(())
}

/// Test that concatenating nothing leaves an empty output
#[test]
fn test_concatenate_files_withNoInputs_shouldWriteEmptyFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("all.pot");

    FileManager::concatenate_files(&[], &output)?;

    assert_eq!(fs::read_to_string(&output)?, "");

    Ok(())
}

/// Test that remove_files tolerates files that are already gone
#[test]
fn test_remove_files_withMissingFile_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let existing = common::create_test_file(temp_dir.path(), "a.pot", "")?;
    let missing = temp_dir.path().join("gone.pot");

    FileManager::remove_files(&[existing.clone(), missing])?;

    assert!(!existing.exists());

    Ok(())
}
