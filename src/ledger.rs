// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Worksheet ledgers: ordered, labelled angle rows as they would be written
//! down on a manual sight reduction form.

use crate::angle::deg_to_dm;
use itertools::Itertools;
use std::fmt::Display;

/// A single worksheet line.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerRow {
    /// What the line is
    pub label: String,
    /// The angle \[degrees\], shown as degrees-minutes
    pub value: f64,
    /// The same value as a raw decimal, when it is worth showing
    pub raw: Option<f64>,
}

impl LedgerRow {
    /// The value as a `±D°MM.mm′` string.
    pub fn formatted_value(&self) -> String {
        deg_to_dm(self.value)
    }

    /// The raw decimal, if any, to full precision.
    pub fn formatted_raw(&self) -> String {
        self.raw.map(|raw| raw.to_string()).unwrap_or_default()
    }
}

/// An immutable sequence of [`LedgerRow`]s, built with [`LedgerBuilder`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    /// Heading printed above the rows
    pub title: String,
    rows: Vec<LedgerRow>,
}

impl Ledger {
    /// Start a new ledger with a heading.
    pub fn builder(title: impl Into<String>) -> LedgerBuilder {
        LedgerBuilder {
            title: title.into(),
            rows: vec![],
        }
    }

    /// The rows, in the order they were added.
    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    /// Find a row by its label.
    pub fn get(&self, label: &str) -> Option<&LedgerRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    /// `(label, value)` text pairs, with the title as the first pair.
    pub fn text_rows(&self) -> Vec<(String, String)> {
        std::iter::once((self.title.clone(), String::new()))
            .chain(
                self.rows
                    .iter()
                    .map(|row| (row.label.clone(), row.formatted_value())),
            )
            .collect()
    }
}

impl Display for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render_columns(&[self.text_rows()]))
    }
}

/// Builds a [`Ledger`] one row at a time.
#[derive(Clone, Debug)]
pub struct LedgerBuilder {
    title: String,
    rows: Vec<LedgerRow>,
}

impl LedgerBuilder {
    /// Append a row.
    pub fn row(mut self, label: impl Into<String>, value: f64) -> Self {
        self.rows.push(LedgerRow {
            label: label.into(),
            value,
            raw: None,
        });
        self
    }

    /// Append a row which also shows its raw decimal value.
    pub fn row_with_raw(mut self, label: impl Into<String>, value: f64) -> Self {
        self.rows.push(LedgerRow {
            label: label.into(),
            value,
            raw: Some(value),
        });
        self
    }

    /// Finish the ledger.
    pub fn build(self) -> Ledger {
        Ledger {
            title: self.title,
            rows: self.rows,
        }
    }
}

/// Lay out several tables of `(label, value)` pairs with shared column widths:
/// labels left aligned and padded by two, values right aligned.
pub fn render_columns(tables: &[Vec<(String, String)>]) -> String {
    let all_rows = || tables.iter().flatten();
    let label_width = all_rows()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let value_width = all_rows()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);
    all_rows()
        .map(|(label, value)| {
            format!(
                "{:<label_w$}{:>value_w$}",
                label,
                value,
                label_w = label_width + 2,
                value_w = value_width
            )
            .trim_end()
            .to_string()
        })
        .join("\n")
}
