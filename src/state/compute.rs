use crate::state::numeric::{self, parse_number, safe_avg, safe_sum, to_integer};
use crate::state::row::{NumericColumn, Row};

/// One value per derived column (internal ash, volatiles, caking index).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DerivedTriple<T> {
    pub ash_internal: T,
    pub volatile: T,
    pub caking: T,
}

/// Integer column totals for the eight measurement columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldTotals {
    pub inbound_qty: i64,
    pub ash_total: i64,
    pub ash_internal: i64,
    pub sulfur: i64,
    pub volatile: i64,
    pub caking: i64,
    pub middlings: i64,
    pub gangue: i64,
}

impl FieldTotals {
    pub fn get(&self, column: NumericColumn) -> i64 {
        match column {
            NumericColumn::InboundQty => self.inbound_qty,
            NumericColumn::AshTotal => self.ash_total,
            NumericColumn::AshInternal => self.ash_internal,
            NumericColumn::Sulfur => self.sulfur,
            NumericColumn::Volatile => self.volatile,
            NumericColumn::Caking => self.caking,
            NumericColumn::Middlings => self.middlings,
            NumericColumn::Gangue => self.gangue,
        }
    }

    fn set(&mut self, column: NumericColumn, value: i64) {
        match column {
            NumericColumn::InboundQty => self.inbound_qty = value,
            NumericColumn::AshTotal => self.ash_total = value,
            NumericColumn::AshInternal => self.ash_internal = value,
            NumericColumn::Sulfur => self.sulfur = value,
            NumericColumn::Volatile => self.volatile = value,
            NumericColumn::Caking => self.caking = value,
            NumericColumn::Middlings => self.middlings = value,
            NumericColumn::Gangue => self.gangue = value,
        }
    }
}

/// Everything derived from the row set. Recomputed in full after any
/// mutation; never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aggregates {
    pub totals: FieldTotals,
    pub derived_totals: DerivedTriple<i64>,
    /// Plain arithmetic mean of the raw quality columns.
    pub simple_averages: DerivedTriple<f64>,
    /// Derived total divided by the inbound total: quality mass per unit of
    /// throughput. Distinct from the simple mean and exposed alongside it.
    pub weighted_averages: DerivedTriple<f64>,
}

/// Per-row derived values: quality metric times inbound quantity. Computed
/// on demand, never stored on the row.
pub fn derived_line(row: &Row) -> DerivedTriple<f64> {
    let inbound = parse_number(row.inbound_qty.raw());
    DerivedTriple {
        ash_internal: parse_number(row.ash_internal.raw()) * inbound,
        volatile: parse_number(row.volatile.raw()) * inbound,
        caking: parse_number(row.caking.raw()) * inbound,
    }
}

pub fn recalculate(rows: &[Row]) -> Aggregates {
    let mut totals = FieldTotals::default();
    for column in NumericColumn::ALL {
        let sum = safe_sum(rows.iter().map(|row| row.numeric(column).raw()));
        totals.set(column, to_integer(sum));
    }

    let mut derived_sum = DerivedTriple::<f64>::default();
    for row in rows {
        let line = derived_line(row);
        derived_sum.ash_internal += line.ash_internal;
        derived_sum.volatile += line.volatile;
        derived_sum.caking += line.caking;
    }
    let derived_totals = DerivedTriple {
        ash_internal: to_integer(derived_sum.ash_internal),
        volatile: to_integer(derived_sum.volatile),
        caking: to_integer(derived_sum.caking),
    };

    let simple_averages = DerivedTriple {
        ash_internal: column_avg(rows, NumericColumn::AshInternal),
        volatile: column_avg(rows, NumericColumn::Volatile),
        caking: column_avg(rows, NumericColumn::Caking),
    };

    // Weighted averages divide the rounded derived totals by the rounded
    // inbound total, exactly as the totals row displays them.
    let weighted_averages = if totals.inbound_qty > 0 {
        let inbound = totals.inbound_qty as f64;
        DerivedTriple {
            ash_internal: derived_totals.ash_internal as f64 / inbound,
            volatile: derived_totals.volatile as f64 / inbound,
            caking: derived_totals.caking as f64 / inbound,
        }
    } else {
        DerivedTriple::default()
    };

    Aggregates {
        totals,
        derived_totals,
        simple_averages,
        weighted_averages,
    }
}

fn column_avg(rows: &[Row], column: NumericColumn) -> f64 {
    safe_avg(rows.iter().map(|row| row.numeric(column).raw()))
}

/// Formats a derived triple for display with two decimal digits.
pub fn format_triple(triple: DerivedTriple<f64>) -> DerivedTriple<String> {
    DerivedTriple {
        ash_internal: numeric::to_fixed2(triple.ash_internal),
        volatile: numeric::to_fixed2(triple.volatile),
        caking: numeric::to_fixed2(triple.caking),
    }
}
