//! Serialization of a [`CalloutTable`] into a TypeScript module.
//!
//! The output is fully deterministic: the same table always renders to the
//! same bytes. Every string (keys included) is written as a JSON string
//! literal, which is also a valid TypeScript string literal, so quotes and
//! backslashes in path data cannot break the module.

use std::{
    fmt::{self, Write as _},
    io::Write as _,
    path::Path,
};

use log::{debug, info};
use tempfile::NamedTempFile;

use callout_core::table::CalloutTable;

use crate::{config::OutputConfig, error::CalloutError};

const BANNER: &str = "// This file is generated by callout. Do not edit by hand.";

/// Renders callout tables with the declaration names of an [`OutputConfig`].
#[derive(Debug, Clone, Default)]
pub struct CodeEmitter {
    names: OutputConfig,
}

impl CodeEmitter {
    pub fn new(names: OutputConfig) -> Self {
        Self { names }
    }

    /// Renders `table` as a module exporting the entry interface, the table
    /// in table order and the default entry.
    pub fn render(&self, table: &CalloutTable) -> String {
        let mut out = String::new();
        self.write_declarations(&mut out, table)
            .expect("Writing to String buffer is infallible");

        debug!(entries = table.len(), bytes = out.len(); "Module rendered");
        out
    }

    fn write_declarations(&self, out: &mut String, table: &CalloutTable) -> fmt::Result {
        let interface = self.names.interface_name();
        let table_name = self.names.table_name();

        writeln!(out, "{BANNER}")?;
        writeln!(out)?;
        writeln!(out, "export interface {interface} {{")?;
        writeln!(out, "    id: string;")?;
        writeln!(out, "    name: string;")?;
        writeln!(out, "    path: string;")?;
        writeln!(
            out,
            "    frame: {{ width: number; height: number; centerOffsetX: number; centerOffsetY: number }};"
        )?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "export const {table_name}: Record<string, {interface}> = {{")?;

        for entry in table.entries() {
            let frame = entry.frame();
            let id = string_literal(entry.id().as_str());
            writeln!(out, "    {id}: {{")?;
            writeln!(out, "        id: {id},")?;
            writeln!(out, "        name: {},", string_literal(entry.name()))?;
            writeln!(out, "        path: {},", string_literal(entry.path()))?;
            writeln!(
                out,
                "        frame: {{ width: {}, height: {}, centerOffsetX: {}, centerOffsetY: {} }},",
                frame.width(),
                frame.height(),
                frame.center_offset_x(),
                frame.center_offset_y()
            )?;
            writeln!(out, "    }},")?;
        }

        writeln!(out, "}};")?;
        writeln!(out)?;
        writeln!(
            out,
            "export const {} = {table_name}[{}];",
            self.names.default_name(),
            string_literal(table.default_id().as_str())
        )
    }
}

fn string_literal(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Replaces the content of `path` with `contents` in one step.
///
/// The module is written to a temporary file next to `path` and renamed over
/// it, so readers never observe a partially written module.
///
/// # Errors
///
/// Returns [`CalloutError::Write`] if the temporary file cannot be created,
/// written or persisted. No rollback is attempted.
pub fn write_module(path: &Path, contents: &str) -> Result<(), CalloutError> {
    let write_error = |source| CalloutError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|err| write_error(err.error))?;

    info!(path:? = path, bytes = contents.len(); "Module written");
    Ok(())
}
