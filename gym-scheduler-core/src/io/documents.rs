/*
 * Copyright (c) 2025 Clément GRENNERAT
 *
 * This program is free software: you can redistribute it and/or modify it under the terms of the
 * GNU General Public License as published by the Free Software Foundation, version 3.
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without
 * even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
 * See the GNU General Public License for more details.
 * You should have received a copy of the GNU General Public License along with this program.
 * If not, see https://www.gnu.org/licenses/.
 *
 */

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::model::config::Configuration;
use crate::model::event::RawEventEntry;

/// Preferences document: team name -> in-month date strings (YYYY-MM-DD).
pub type RawPreferencesDoc = IndexMap<String, Vec<String>>;

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::InputFileMissing { path: path.to_path_buf() },
        _ => Error::Io { path: path.to_path_buf(), source },
    })
}

pub fn load_configuration(path: &Path) -> Result<Configuration> {
    let contents = read_to_string(path)?;
    Configuration::from_yaml_str(&contents)
}

pub fn load_preferences(path: &Path) -> Result<RawPreferencesDoc> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| Error::Json { path: path.to_path_buf(), source })
}

pub fn load_events(path: &Path) -> Result<Vec<RawEventEntry>> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| Error::Json { path: path.to_path_buf(), source })
}
