// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Output formatting

use comfy_table::{Table, presets::NOTHING};
use serde::Serialize;

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Borderless table with the given column headers
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(headers);
    table
}

/// Print `items` as JSON, or as a table with one row per item
pub fn print_list<T, F>(items: &[T], use_json: bool, headers: &[&str], row: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&T) -> Vec<String>,
{
    if use_json {
        return print_json(&items);
    }
    let mut table = create_table(headers);
    for item in items {
        table.add_row(row(item));
    }
    println!("{table}");
    Ok(())
}

/// Placeholder for absent optional fields
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
