use serde::{Deserialize, Serialize};

use crate::state::numeric;

/// Rows a fresh table or workbook starts with.
pub const DEFAULT_ROW_COUNT: usize = 6;

/// One numeric cell, kept as the text the user entered. `Invalid` only
/// appears when restoring data written before the edit boundary rejected
/// bad input; live edits never produce it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NumericField {
    #[default]
    Blank,
    Valid {
        raw: String,
        value: f64,
    },
    Invalid(String),
}

impl NumericField {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.is_empty() {
            Self::Blank
        } else if numeric::is_valid_number(&raw) {
            let value = numeric::parse_number(&raw);
            Self::Valid { raw, value }
        } else {
            Self::Invalid(raw)
        }
    }

    /// The text as entered; empty for blank cells.
    pub fn raw(&self) -> &str {
        match self {
            Self::Blank => "",
            Self::Valid { raw, .. } => raw,
            Self::Invalid(raw) => raw,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

impl From<String> for NumericField {
    fn from(raw: String) -> Self {
        Self::from_raw(raw)
    }
}

impl From<NumericField> for String {
    fn from(field: NumericField) -> Self {
        match field {
            NumericField::Blank => String::new(),
            NumericField::Valid { raw, .. } => raw,
            NumericField::Invalid(raw) => raw,
        }
    }
}

/// The eight numeric measurement columns, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum NumericColumn {
    InboundQty,
    AshTotal,
    AshInternal,
    Sulfur,
    Volatile,
    Caking,
    Middlings,
    Gangue,
}

impl NumericColumn {
    pub const ALL: [Self; 8] = [
        Self::InboundQty,
        Self::AshTotal,
        Self::AshInternal,
        Self::Sulfur,
        Self::Volatile,
        Self::Caking,
        Self::Middlings,
        Self::Gangue,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::InboundQty => "入库",
            Self::AshTotal => "全灰",
            Self::AshInternal => "内灰",
            Self::Sulfur => "硫",
            Self::Volatile => "挥发",
            Self::Caking => "粘结",
            Self::Middlings => "中煤",
            Self::Gangue => "矸石",
        }
    }
}

impl std::fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One dated record of coal-quality measurements for a unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub display_index: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub inbound_qty: NumericField,
    #[serde(default)]
    pub ash_total: NumericField,
    #[serde(default)]
    pub ash_internal: NumericField,
    #[serde(default)]
    pub sulfur: NumericField,
    #[serde(default)]
    pub volatile: NumericField,
    #[serde(default)]
    pub caking: NumericField,
    #[serde(default)]
    pub middlings: NumericField,
    #[serde(default)]
    pub gangue: NumericField,
    /// UI selection flag; carried in the persisted record but transient in
    /// meaning — loads never act on it.
    #[serde(default)]
    pub selected: bool,
}

impl Row {
    pub fn blank(display_index: u32) -> Self {
        Self {
            display_index,
            date: String::new(),
            unit: String::new(),
            inbound_qty: NumericField::Blank,
            ash_total: NumericField::Blank,
            ash_internal: NumericField::Blank,
            sulfur: NumericField::Blank,
            volatile: NumericField::Blank,
            caking: NumericField::Blank,
            middlings: NumericField::Blank,
            gangue: NumericField::Blank,
            selected: false,
        }
    }

    pub fn numeric(&self, column: NumericColumn) -> &NumericField {
        match column {
            NumericColumn::InboundQty => &self.inbound_qty,
            NumericColumn::AshTotal => &self.ash_total,
            NumericColumn::AshInternal => &self.ash_internal,
            NumericColumn::Sulfur => &self.sulfur,
            NumericColumn::Volatile => &self.volatile,
            NumericColumn::Caking => &self.caking,
            NumericColumn::Middlings => &self.middlings,
            NumericColumn::Gangue => &self.gangue,
        }
    }

    pub fn set_numeric(&mut self, column: NumericColumn, field: NumericField) {
        match column {
            NumericColumn::InboundQty => self.inbound_qty = field,
            NumericColumn::AshTotal => self.ash_total = field,
            NumericColumn::AshInternal => self.ash_internal = field,
            NumericColumn::Sulfur => self.sulfur = field,
            NumericColumn::Volatile => self.volatile = field,
            NumericColumn::Caking => self.caking = field,
            NumericColumn::Middlings => self.middlings = field,
            NumericColumn::Gangue => self.gangue = field,
        }
    }
}
